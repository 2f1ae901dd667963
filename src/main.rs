use anyhow::{Context, Result};
use beacon::api::{create_router, AppState};
use beacon::config::BeaconConfig;
use beacon::queue::CommandQueue;
use beacon::state::StateStore;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beacon=info".into()),
        )
        .init();

    info!("Beacon starting...");

    let config = Arc::new(BeaconConfig::load().context("Failed to load configuration")?);
    info!(
        host = %config.server.host,
        port = config.server.port,
        max_pending = config.queue.max_pending,
        "Configuration loaded"
    );

    // Queue and store live for the whole process; nothing is persisted
    let state = AppState {
        queue: Arc::new(CommandQueue::new(config.queue.max_pending)),
        store: Arc::new(StateStore::new()),
        config: Arc::clone(&config),
    };
    let router = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind API address")?;
    info!(addr = %addr, "Beacon listening");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!(error = %e, "API server error");
        }
    });

    // Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl_c signal")?;
    info!("Shutdown signal received");

    server_handle.abort();
    info!("Beacon stopped");

    Ok(())
}
