use crate::errors::ValidationError;
use crate::models::black_scholes;
use crate::models::validation::{finite, validate};
use crate::models::PriceResult;
use ndarray::{Array1, Array2, Ix2};

/// Evenly spaced samples from `min` to `max` inclusive.
///
/// Matches `numpy.linspace`: the first sample is exactly `min`, the last is
/// exactly `max`, and a single-sample axis is `[min]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShockAxis {
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl ShockAxis {
    pub fn new(min: f64, max: f64, count: usize) -> Self {
        Self { min, max, count }
    }

    pub fn samples(&self) -> Array1<f64> {
        let n = self.count;
        let step = if n > 1 {
            (self.max - self.min) / (n - 1) as f64
        } else {
            0.0
        };
        Array1::from_shape_fn(n, |i| match i {
            0 => self.min,
            i if i == n - 1 => self.max,
            i => self.min + step * i as f64,
        })
    }
}

/// Cartesian (S, sigma) grid with "xy" indexing: `spot[[i, j]]` is the j-th
/// spot shock and `vol[[i, j]]` the i-th volatility shock. Rows follow the
/// volatility axis, columns the spot axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ShockGrid {
    pub spot: Array2<f64>,
    pub vol: Array2<f64>,
}

impl ShockGrid {
    pub fn new(spot_axis: &ShockAxis, vol_axis: &ShockAxis) -> Self {
        let s = spot_axis.samples();
        let v = vol_axis.samples();
        let shape = (v.len(), s.len());
        Self {
            spot: Array2::from_shape_fn(shape, |(_, j)| s[j]),
            vol: Array2::from_shape_fn(shape, |(i, _)| v[i]),
        }
    }

    /// (rows, cols) = (volatility samples, spot samples)
    pub fn dim(&self) -> (usize, usize) {
        self.spot.dim()
    }
}

/// Heatmap construction inputs.
///
/// `base_spot` and `base_vol` are carried through but do not offset or
/// center the grid: it spans exactly the shock bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub base_spot: f64,
    pub base_vol: f64,
    pub spot_shock: ShockAxis,
    pub vol_shock: ShockAxis,
    pub strike: f64,
    pub expiry: f64,
    pub rate: f64,
}

impl GridSpec {
    /// Build and validate the shock grid. `n_shocks` is bounded by
    /// `max_shocks`; every grid cell goes through the same checks as a
    /// point price.
    pub fn shock_grid(&self, max_shocks: usize) -> Result<ShockGrid, ValidationError> {
        for axis in [&self.spot_shock, &self.vol_shock] {
            if axis.count == 0 || axis.count > max_shocks {
                return Err(ValidationError::ShockCount { got: axis.count, max: max_shocks });
            }
        }

        finite("base_S", self.base_spot)?;
        finite("base_sigma", self.base_vol)?;
        finite("S_shock_min", self.spot_shock.min)?;
        finite("S_shock_max", self.spot_shock.max)?;
        finite("sigma_shock_min", self.vol_shock.min)?;
        finite("sigma_shock_max", self.vol_shock.max)?;

        let grid = ShockGrid::new(&self.spot_shock, &self.vol_shock);
        validate(grid.spot.view(), self.strike, self.expiry, self.rate, grid.vol.view())?;
        Ok(grid)
    }
}

/// Price every cell of an already-validated grid in one batched call.
pub fn price_grid(grid: &ShockGrid, strike: f64, expiry: f64, rate: f64) -> PriceResult<Ix2> {
    black_scholes::price(grid.spot.view(), strike, expiry, rate, grid.vol.view())
}

/// Validate `spec`, then price the full (vol x spot) heatmap.
pub fn build_heatmap(spec: &GridSpec, max_shocks: usize) -> Result<PriceResult<Ix2>, ValidationError> {
    let grid = spec.shock_grid(max_shocks)?;
    let (rows, cols) = grid.dim();
    tracing::debug!(rows, cols, "pricing heatmap grid");
    Ok(price_grid(&grid, spec.strike, spec.expiry, spec.rate))
}
