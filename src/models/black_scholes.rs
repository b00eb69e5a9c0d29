use crate::errors::{EngineError, EngineResult};
use crate::models::{OptionParameters, PriceResult};
use ndarray::{arr0, Array, ArrayView, Dimension, Zip};
use statrs::distribution::{ContinuousCDF, Normal};

/// Black-Scholes European call and put prices.
///
/// d1 = (ln(S/K) + (r + sigma^2/2)*T) / (sigma * sqrt(T))
/// d2 = d1 - sigma * sqrt(T)
/// call = S*N(d1) - K*e^(-rT)*N(d2)
/// put  = K*e^(-rT)*N(-d2) - S*N(-d1)
///
/// Vectorized over S and sigma, which must share a shape; K, T and r are
/// broadcast to every element. Cells with T == 0 or sigma == 0 collapse to
/// intrinsic value via an element-wise select, so a single call can price a
/// grid where only some cells are degenerate.
///
/// Inputs are assumed to have passed [`crate::models::validation::validate`].
/// Invalid input gives unspecified values (typically NaN); mismatched shapes
/// panic.
pub fn price<D: Dimension>(
    spot: ArrayView<f64, D>,
    strike: f64,
    expiry: f64,
    rate: f64,
    vol: ArrayView<f64, D>,
) -> PriceResult<D> {
    let normal = Normal::standard();
    let sqrt_t = expiry.sqrt();
    let discounted_strike = strike * (-rate * expiry).exp();

    let degenerate = vol.mapv(|v| expiry == 0.0 || v == 0.0);

    let mut call = Array::<f64, D>::zeros(spot.raw_dim());
    let mut put = Array::<f64, D>::zeros(spot.raw_dim());

    Zip::from(&mut call)
        .and(&mut put)
        .and(spot)
        .and(vol)
        .and(&degenerate)
        .for_each(|c, p, &s, &v, &is_degenerate| {
            // General case first; sigma*sqrt(T) == 0 yields inf/NaN here,
            // which the select below discards.
            let sigma_sqrt_t = v * sqrt_t;
            let d1 = ((s / strike).ln() + (rate + 0.5 * v * v) * expiry) / sigma_sqrt_t;
            let d2 = d1 - sigma_sqrt_t;

            let general_call = s * normal.cdf(d1) - discounted_strike * normal.cdf(d2);
            let general_put = discounted_strike * normal.cdf(-d2) - s * normal.cdf(-d1);

            *c = select(is_degenerate, (s - strike).max(0.0), general_call);
            *p = select(is_degenerate, (strike - s).max(0.0), general_put);
        });

    PriceResult { call, put }
}

#[inline(always)]
fn select(mask: bool, if_true: f64, if_false: f64) -> f64 {
    if mask {
        if_true
    } else {
        if_false
    }
}

/// Single-point price as (call, put). Same formula as [`price`], evaluated
/// over 0-dimensional arrays.
pub fn price_point(params: &OptionParameters) -> (f64, f64) {
    price(
        arr0(params.spot).view(),
        params.strike,
        params.expiry,
        params.rate,
        arr0(params.volatility).view(),
    )
    .into_scalars()
}

/// Option sensitivities. Not computed yet, see [`greeks`].
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
    pub rho: f64,
}

/// Greeks are not implemented. Always returns `EngineError::NotImplemented`
/// so callers never receive placeholder values.
pub fn greeks(_params: &OptionParameters) -> EngineResult<Greeks> {
    Err(EngineError::NotImplemented("greeks"))
}
