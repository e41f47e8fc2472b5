// =============================================================================
// StockSense API — Main Entry Point
// =============================================================================
//
// Provider API keys are optional at startup; an endpoint whose provider is
// unconfigured reports an error when it is exercised.
// =============================================================================

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stocksense::api;
use stocksense::app_state::AppState;
use stocksense::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║        StockSense API — Starting Up                     ║");
    info!("╚══════════════════════════════════════════════════════════╝");

    let config = Config::from_env();
    info!(
        bind_addr = %config.bind_addr,
        model = %config.openai_model,
        benchmark = %config.benchmark_symbol,
        "configuration loaded"
    );

    // ── 2. Build shared state ────────────────────────────────────────────
    let state = Arc::new(AppState::new(config));

    // ── 3. Start the API server ──────────────────────────────────────────
    let app = api::rest::router(state.clone());
    let listener = tokio::net::TcpListener::bind(&state.config.bind_addr).await?;
    info!(addr = %state.config.bind_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("StockSense API shut down complete.");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => warn!("Shutdown signal received — stopping gracefully"),
        Err(e) => warn!(error = %e, "failed to listen for shutdown signal"),
    }
}
