//! Fitcheck Server
//!
//! HTTP backend of the outfit rater.
//!
//! Architecture:
//! - Configuration: settings from the environment (and `.env`)
//! - State: remote clients built once and shared by handlers
//! - Services: input validation, remote calls, failure classification
//! - API: axum handlers mapping service results to HTTP responses

mod api;
mod config;
mod service;
mod state;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real deployments set the environment
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fitcheck_server=info,fitcheck_client=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Fitcheck Server...");

    let config = Config::from_env();
    config.validate().context("Invalid configuration")?;

    let state = AppState::from_config(&config)?;
    let enabled = state.enabled_services();
    if enabled.is_empty() {
        tracing::warn!("No API keys configured; every feature endpoint will report an error");
    } else {
        tracing::info!("Enabled services: {}", enabled.join(", "));
    }
    tracing::info!(
        "Try-on polling: {} attempts, {:?} interval, {:?} max wait",
        config.poll_max_attempts,
        config.poll_interval,
        config.poll_config().max_total_wait()
    );

    // Build router with all API endpoints
    let app = api::create_router(state, config.max_body_bytes);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C; in-flight try-on requests are allowed to finish
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
