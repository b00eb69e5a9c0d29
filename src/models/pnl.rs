use crate::errors::ValidationError;
use crate::models::grid::{build_heatmap, GridSpec};
use crate::models::validation::finite;
use crate::models::PriceResult;
use ndarray::{Array2, Ix2};

/// Theoretical minus actual premium at every (sigma, S) cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PnlResult {
    pub call_net: Array2<f64>,
    pub put_net: Array2<f64>,
}

/// Subtract the traded premiums from a priced grid, element-wise.
pub fn net_of(theoretical: PriceResult<Ix2>, call_actual: f64, put_actual: f64) -> PnlResult {
    PnlResult {
        call_net: theoretical.call - call_actual,
        put_net: theoretical.put - put_actual,
    }
}

/// Build the heatmap for `spec` and net it against the premiums actually
/// paid. Premiums only need to be finite; zero or negative values pass.
pub fn compute_pnl(
    spec: &GridSpec,
    call_actual: f64,
    put_actual: f64,
    max_shocks: usize,
) -> Result<PnlResult, ValidationError> {
    finite("C_actual", call_actual)?;
    finite("P_actual", put_actual)?;
    let theoretical = build_heatmap(spec, max_shocks)?;
    Ok(net_of(theoretical, call_actual, put_actual))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grid::ShockAxis;

    fn spec() -> GridSpec {
        GridSpec {
            base_spot: 100.0,
            base_vol: 0.2,
            spot_shock: ShockAxis::new(70.0, 130.0, 6),
            vol_shock: ShockAxis::new(0.05, 0.6, 6),
            strike: 100.0,
            expiry: 0.5,
            rate: 0.04,
        }
    }

    #[test]
    fn test_net_equals_theoretical_minus_actual() {
        let theoretical = build_heatmap(&spec(), 250).unwrap();
        let pnl = compute_pnl(&spec(), 7.5, 4.25, 250).unwrap();

        assert_eq!(pnl.call_net.dim(), (6, 6));
        assert_eq!(pnl.call_net, theoretical.call.mapv(|c| c - 7.5));
        assert_eq!(pnl.put_net, theoretical.put.mapv(|p| p - 4.25));
    }

    #[test]
    fn test_zero_and_negative_premiums_accepted() {
        let theoretical = build_heatmap(&spec(), 250).unwrap();

        let zero = compute_pnl(&spec(), 0.0, 0.0, 250).unwrap();
        assert_eq!(zero.call_net, theoretical.call);
        assert_eq!(zero.put_net, theoretical.put);

        let neg = compute_pnl(&spec(), -1.0, -2.0, 250).unwrap();
        assert!(neg.call_net.iter().zip(theoretical.call.iter()).all(|(n, c)| *n == c + 1.0));
    }

    #[test]
    fn test_non_finite_premium_rejected() {
        assert!(matches!(
            compute_pnl(&spec(), f64::NAN, 1.0, 250),
            Err(ValidationError::NonFinite { field: "C_actual", .. })
        ));
        assert!(matches!(
            compute_pnl(&spec(), 1.0, f64::INFINITY, 250),
            Err(ValidationError::NonFinite { field: "P_actual", .. })
        ));
    }

    #[test]
    fn test_grid_errors_propagate() {
        let mut s = spec();
        s.expiry = -0.25;
        assert_eq!(
            compute_pnl(&s, 1.0, 1.0, 250),
            Err(ValidationError::NegativeExpiry(-0.25))
        );
    }
}
