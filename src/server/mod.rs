pub mod routes;

use crate::config::CorsOrigins;
use crate::errors::{EngineError, EngineResult};
use crate::state::AppState;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> EngineResult<Router> {
    let cors = cors_layer(&state.config.cors_origins)?;

    Ok(Router::new()
        .route("/price", post(routes::price))
        .route("/heatmap", post(routes::heatmap))
        .route("/pnl", post(routes::pnl))
        .route("/greeks", post(routes::greeks))
        .route("/health", get(routes::health))
        .route("/counters", get(routes::counters))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state))
}

fn cors_layer(origins: &CorsOrigins) -> EngineResult<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origins {
        CorsOrigins::Any => Ok(layer.allow_origin(Any)),
        CorsOrigins::List(list) => {
            let values = list
                .iter()
                .map(|o| {
                    HeaderValue::from_str(o)
                        .map_err(|e| EngineError::Config(format!("CORS_ALLOWED_ORIGINS: {o}: {e}")))
                })
                .collect::<EngineResult<Vec<_>>>()?;
            Ok(layer.allow_origin(AllowOrigin::list(values)))
        }
    }
}
