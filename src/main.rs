mod config;
mod errors;
mod models;
mod server;
mod state;

use crate::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("bs_heatmap pricing service starting");

    let cfg = match config::AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    let addr = cfg.bind_addr();
    tracing::info!(max_shocks = cfg.max_shocks, cors = ?cfg.cors_origins, "config loaded");

    let app = match server::router(AppState::new(cfg)) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("router error: {e}");
            std::process::exit(1);
        }
    };

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("bind error: {e}");
            std::process::exit(1);
        });

    tracing::info!("server listening on {addr}");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {}", errors::EngineError::from(e));
    }
}
