pub mod black_scholes;
pub mod grid;
pub mod pnl;
pub mod validation;

use ndarray::{Array, Dimension, Ix0};

/// Scalar inputs for a single European option valuation.
///
/// Grid evaluation does not go through this type: it passes S and sigma as
/// equal-shaped arrays straight to [`black_scholes::price`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionParameters {
    pub spot: f64,       // S, > 0
    pub strike: f64,     // K, > 0
    pub expiry: f64,     // T in years, >= 0
    pub rate: f64,       // r, any finite real
    pub volatility: f64, // sigma, >= 0
}

impl OptionParameters {
    pub fn new(spot: f64, strike: f64, expiry: f64, rate: f64, volatility: f64) -> Self {
        Self { spot, strike, expiry, rate, volatility }
    }
}

/// Call and put prices with the same shape as the S/sigma inputs.
/// A point price is the 0-dimensional case.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceResult<D: Dimension> {
    pub call: Array<f64, D>,
    pub put: Array<f64, D>,
}

impl PriceResult<Ix0> {
    pub fn into_scalars(self) -> (f64, f64) {
        (self.call.into_scalar(), self.put.into_scalar())
    }
}
