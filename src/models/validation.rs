use crate::errors::ValidationError;
use crate::models::OptionParameters;
use ndarray::{arr0, ArrayView, Dimension};

/// Reject NaN and infinities before any domain check: NaN compares false
/// against every bound and would otherwise pass straight through.
#[inline]
pub fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite { field, value })
    }
}

/// Check Black-Scholes inputs before any arithmetic runs.
///
/// S and sigma are checked element-wise and must share a shape; K, T and r
/// are scalars. r is only required to be finite: negative rates are valid.
/// Returns the first violation found, in the order S, K, T, sigma, r.
pub fn validate<D: Dimension>(
    spot: ArrayView<f64, D>,
    strike: f64,
    expiry: f64,
    rate: f64,
    vol: ArrayView<f64, D>,
) -> Result<(), ValidationError> {
    if spot.shape() != vol.shape() {
        return Err(ValidationError::ShapeMismatch {
            spot: spot.shape().to_vec(),
            vol: vol.shape().to_vec(),
        });
    }

    for &s in spot.iter() {
        if finite("S", s)? <= 0.0 {
            return Err(ValidationError::NonPositiveSpot(s));
        }
    }

    if finite("K", strike)? <= 0.0 {
        return Err(ValidationError::NonPositiveStrike(strike));
    }

    if finite("T", expiry)? < 0.0 {
        return Err(ValidationError::NegativeExpiry(expiry));
    }

    for &v in vol.iter() {
        if finite("sigma", v)? < 0.0 {
            return Err(ValidationError::NegativeVolatility(v));
        }
    }

    finite("r", rate)?;
    Ok(())
}

/// Point-pricing form of [`validate`].
pub fn validate_parameters(params: &OptionParameters) -> Result<(), ValidationError> {
    validate(
        arr0(params.spot).view(),
        params.strike,
        params.expiry,
        params.rate,
        arr0(params.volatility).view(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn params(s: f64, k: f64, t: f64, r: f64, sigma: f64) -> OptionParameters {
        OptionParameters::new(s, k, t, r, sigma)
    }

    #[test]
    fn test_accepts_valid_and_negative_rate() {
        assert!(validate_parameters(&params(100.0, 100.0, 1.0, 0.05, 0.2)).is_ok());
        assert!(validate_parameters(&params(100.0, 100.0, 1.0, -0.01, 0.2)).is_ok());
        // boundaries: T = 0 and sigma = 0 are allowed
        assert!(validate_parameters(&params(100.0, 100.0, 0.0, 0.05, 0.0)).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_spot() {
        assert_eq!(
            validate_parameters(&params(0.0, 100.0, 1.0, 0.05, 0.2)),
            Err(ValidationError::NonPositiveSpot(0.0))
        );
        assert_eq!(
            validate_parameters(&params(-5.0, 100.0, 1.0, 0.05, 0.2)),
            Err(ValidationError::NonPositiveSpot(-5.0))
        );
    }

    #[test]
    fn test_rejects_bad_strike_expiry_vol() {
        assert_eq!(
            validate_parameters(&params(100.0, 0.0, 1.0, 0.05, 0.2)),
            Err(ValidationError::NonPositiveStrike(0.0))
        );
        assert_eq!(
            validate_parameters(&params(100.0, 100.0, -0.1, 0.05, 0.2)),
            Err(ValidationError::NegativeExpiry(-0.1))
        );
        assert_eq!(
            validate_parameters(&params(100.0, 100.0, 1.0, 0.05, -0.2)),
            Err(ValidationError::NegativeVolatility(-0.2))
        );
    }

    #[test]
    fn test_rejects_non_finite() {
        let err = validate_parameters(&params(f64::NAN, 100.0, 1.0, 0.05, 0.2)).unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { field: "S", .. }));

        let err = validate_parameters(&params(100.0, 100.0, f64::INFINITY, 0.05, 0.2)).unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { field: "T", .. }));

        let err = validate_parameters(&params(100.0, 100.0, 1.0, f64::NAN, 0.2)).unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { field: "r", .. }));
    }

    #[test]
    fn test_array_checks_every_element() {
        let spot = array![[90.0, 100.0], [110.0, -1.0]];
        let vol = Array2::from_elem((2, 2), 0.2);
        assert_eq!(
            validate(spot.view(), 100.0, 1.0, 0.05, vol.view()),
            Err(ValidationError::NonPositiveSpot(-1.0))
        );

        let spot = Array2::from_elem((2, 2), 100.0);
        let vol = array![[0.1, 0.2], [-0.3, 0.4]];
        assert_eq!(
            validate(spot.view(), 100.0, 1.0, 0.05, vol.view()),
            Err(ValidationError::NegativeVolatility(-0.3))
        );
    }

    #[test]
    fn test_shape_mismatch() {
        let spot = Array2::from_elem((2, 3), 100.0);
        let vol = Array2::from_elem((3, 2), 0.2);
        assert_eq!(
            validate(spot.view(), 100.0, 1.0, 0.05, vol.view()),
            Err(ValidationError::ShapeMismatch { spot: vec![2, 3], vol: vec![3, 2] })
        );
    }
}
