use crate::errors::EngineResult;
use crate::models::black_scholes::{self, Greeks};
use crate::models::grid::{self, GridSpec, ShockAxis};
use crate::models::pnl;
use crate::models::validation::validate_parameters;
use crate::models::OptionParameters;
use crate::state::{AppState, CounterSnapshot, Counters};
use axum::extract::State;
use axum::response::Json;
use ndarray::Array2;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub struct PriceRequest {
    #[serde(rename = "S")]
    pub spot: f64,
    #[serde(rename = "K")]
    pub strike: f64,
    #[serde(rename = "T")]
    pub expiry: f64,
    pub r: f64,
    pub sigma: f64,
}

impl From<PriceRequest> for OptionParameters {
    fn from(req: PriceRequest) -> Self {
        OptionParameters::new(req.spot, req.strike, req.expiry, req.r, req.sigma)
    }
}

#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct PriceResponse {
    pub call: f64,
    pub put: f64,
}

#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub struct HeatmapRequest {
    #[serde(rename = "base_S")]
    pub base_spot: f64,
    pub base_sigma: f64,
    #[serde(rename = "S_shock_min")]
    pub spot_shock_min: f64,
    #[serde(rename = "S_shock_max")]
    pub spot_shock_max: f64,
    pub sigma_shock_min: f64,
    pub sigma_shock_max: f64,
    pub n_shocks: usize,
    #[serde(rename = "K")]
    pub strike: f64,
    #[serde(rename = "T")]
    pub expiry: f64,
    pub r: f64,
}

impl HeatmapRequest {
    pub fn grid_spec(&self) -> GridSpec {
        GridSpec {
            base_spot: self.base_spot,
            base_vol: self.base_sigma,
            spot_shock: ShockAxis::new(self.spot_shock_min, self.spot_shock_max, self.n_shocks),
            vol_shock: ShockAxis::new(self.sigma_shock_min, self.sigma_shock_max, self.n_shocks),
            strike: self.strike,
            expiry: self.expiry,
            rate: self.r,
        }
    }
}

/// Rows are volatility shocks, columns are spot shocks.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HeatmapResponse {
    pub call: Vec<Vec<f64>>,
    pub put: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub struct PnlRequest {
    #[serde(flatten)]
    pub grid: HeatmapRequest,
    #[serde(rename = "C_actual")]
    pub call_actual: f64,
    #[serde(rename = "P_actual")]
    pub put_actual: f64,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct PnlResponse {
    pub call_net_grid: Vec<Vec<f64>>,
    pub put_net_grid: Vec<Vec<f64>>,
}

fn nested(a: &Array2<f64>) -> Vec<Vec<f64>> {
    a.outer_iter().map(|row| row.to_vec()).collect()
}

/// POST /price -- single-point call/put
pub async fn price(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PriceRequest>,
) -> EngineResult<Json<PriceResponse>> {
    let span = tracing::info_span!("price", request_id = %Uuid::new_v4());
    span.in_scope(|| {
        let params = OptionParameters::from(req);
        validate_parameters(&params).map_err(|e| state.reject(e))?;

        let (call, put) = black_scholes::price_point(&params);
        Counters::incr(&state.counters.points_priced, 1);
        tracing::debug!(call, put, "priced point");
        Ok(Json(PriceResponse { call, put }))
    })
}

/// POST /heatmap -- N x N call/put grids over spot and vol shocks
pub async fn heatmap(
    State(state): State<Arc<AppState>>,
    Json(req): Json<HeatmapRequest>,
) -> EngineResult<Json<HeatmapResponse>> {
    let span = tracing::info_span!("heatmap", request_id = %Uuid::new_v4(), n_shocks = req.n_shocks);
    span.in_scope(|| {
        let res = grid::build_heatmap(&req.grid_spec(), state.config.max_shocks)
            .map_err(|e| state.reject(e))?;

        Counters::incr(&state.counters.heatmaps_built, 1);
        Counters::incr(&state.counters.grid_cells_priced, res.call.len() as u64);
        Ok(Json(HeatmapResponse {
            call: nested(&res.call),
            put: nested(&res.put),
        }))
    })
}

/// POST /pnl -- heatmap netted against actual call/put premiums
pub async fn pnl(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PnlRequest>,
) -> EngineResult<Json<PnlResponse>> {
    let span = tracing::info_span!("pnl", request_id = %Uuid::new_v4(), n_shocks = req.grid.n_shocks);
    span.in_scope(|| {
        let res = pnl::compute_pnl(
            &req.grid.grid_spec(),
            req.call_actual,
            req.put_actual,
            state.config.max_shocks,
        )
        .map_err(|e| state.reject(e))?;

        Counters::incr(&state.counters.pnl_grids_built, 1);
        Counters::incr(&state.counters.grid_cells_priced, res.call_net.len() as u64);
        Ok(Json(PnlResponse {
            call_net_grid: nested(&res.call_net),
            put_net_grid: nested(&res.put_net),
        }))
    })
}

/// POST /greeks -- always 501 for valid input
pub async fn greeks(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PriceRequest>,
) -> EngineResult<Json<Greeks>> {
    let params = OptionParameters::from(req);
    validate_parameters(&params).map_err(|e| state.reject(e))?;
    black_scholes::greeks(&params).map(Json)
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /counters -- request counters (lock-free reads)
pub async fn counters(State(state): State<Arc<AppState>>) -> Json<CounterSnapshot> {
    Json(state.counters.snapshot())
}
