//! MedLens Server
//!
//! Serves the clinical analysis single-page UI and the analysis endpoint
//! backed by a hosted generative model

use anyhow::{Context, Result};
use tracing::info;

mod config;
mod handlers;
mod middleware;
mod models;
mod services;
mod utils;

use config::Settings;
use handlers::create_router;

#[tokio::main]
async fn main() -> Result<()> {
    // Load settings from environment
    let settings = Settings::new().context("Failed to load server settings")?;

    // Initialize logging
    init_logging(&settings);
    info!("Server settings loaded");

    // Create router
    let app = create_router(settings.clone()).await?;

    // Build server address
    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("MedLens server started");
    info!("Health check: http://{}/health", addr);
    info!("Analysis endpoint: http://{}/api/analyze", addr);
    info!("UI: http://{}/", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    Ok(())
}

/// Initialize logging system
fn init_logging(settings: &Settings) {
    let log_level = settings.logging.level.clone();

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> =
        if settings.logging.format == "json" {
            // JSON format logs (production environment)
            Box::new(
                tracing_subscriber::fmt()
                    .with_env_filter(log_level)
                    .json()
                    .with_current_span(false)
                    .with_span_list(false)
                    .finish(),
            )
        } else {
            // Human readable format (development environment)
            Box::new(
                tracing_subscriber::fmt()
                    .with_env_filter(log_level)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .finish(),
            )
        };

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Logging system initialized");
}
