use crate::config::AppConfig;
use crate::errors::{EngineError, ValidationError};
use portable_atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Lock-free request counters. Relaxed ordering: these are statistics, not
/// synchronization.
#[derive(Debug, Default)]
pub struct Counters {
    pub points_priced: AtomicU64,
    pub heatmaps_built: AtomicU64,
    pub pnl_grids_built: AtomicU64,
    pub grid_cells_priced: AtomicU64,
    pub validation_rejections: AtomicU64,
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct CounterSnapshot {
    pub points_priced: u64,
    pub heatmaps_built: u64,
    pub pnl_grids_built: u64,
    pub grid_cells_priced: u64,
    pub validation_rejections: u64,
}

impl Counters {
    #[inline]
    pub fn incr(counter: &AtomicU64, by: u64) {
        counter.fetch_add(by, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            points_priced: self.points_priced.load(Ordering::Relaxed),
            heatmaps_built: self.heatmaps_built.load(Ordering::Relaxed),
            pnl_grids_built: self.pnl_grids_built.load(Ordering::Relaxed),
            grid_cells_priced: self.grid_cells_priced.load(Ordering::Relaxed),
            validation_rejections: self.validation_rejections.load(Ordering::Relaxed),
        }
    }
}

/// Shared handler state. Read-only config plus counters; the pricing core
/// itself keeps no state between requests.
#[derive(Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub counters: Counters,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            counters: Counters::default(),
        })
    }

    /// Record and log a rejected request, returning the error for the caller.
    pub fn reject(&self, err: ValidationError) -> EngineError {
        Counters::incr(&self.counters.validation_rejections, 1);
        tracing::warn!(error = %err, "rejected invalid pricing input");
        err.into()
    }
}
