//! # Airwatch Server
//!
//! Binary entry point: spins up the surveillance engine and serves the
//! viewer stream and feed-ingestion endpoints.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use airwatch_engine::Engine;
use airwatch_server::{build_router, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(version = airwatch_server::VERSION, "Starting airwatch server");

    // Spin up the surveillance engine
    let engine = Engine::spawn(config.engine());
    tracing::info!(
        tick_ms = config.tick_period.as_millis() as u64,
        horizontal_nm = config.horizontal_threshold_nm,
        vertical_ft = config.vertical_threshold_ft,
        "Engine started"
    );

    // Build router
    let state = AppState {
        engine: engine.clone(),
        ws_send_timeout: config.ws_send_timeout,
    };
    let app = build_router(state);

    // Start server; a failed bind is fatal and not retried
    let addr = config.server_addr;
    tracing::info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Snapshot stream available at ws://{}/ws", addr);
    tracing::info!("Feed ingestion at http://{}/feed/aircraft", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    engine.stop().await;
    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
