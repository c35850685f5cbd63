//! Cambio Exchange API Binary
//!
//! Wires the exchange service over the in-memory store and the stub
//! transfer gateway, and serves the JSON API.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cambio_engine::{ExchangeService, StubGateway};
use cambio_server::metrics::Metrics;
use cambio_server::{router, AppState, ServerConfig};
use cambio_store::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting Cambio exchange server");

    let config = ServerConfig::from_env();
    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    let gateway = Arc::new(StubGateway::with_delay(
        config.stub_min_delay_ms,
        config.stub_max_delay_ms,
    ));
    let service = ExchangeService::open(Arc::new(MemoryStore::new()), gateway).await?;

    let state = Arc::new(AppState {
        service,
        metrics: Arc::new(Metrics::new()),
    });
    let app = router(state);

    let addr = format!("{}:{}", config.listen_addr, config.listen_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Exchange API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for Ctrl+C");
    info!("Shutdown signal received");
}
