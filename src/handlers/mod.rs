//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic and the application router

pub mod analyze;
pub mod health;

use anyhow::Result;
use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::Settings;
use crate::middleware::logging::request_logging_middleware;
use crate::services::GeminiClient;

/// Directory holding the single-page UI
const ASSETS_DIR: &str = "assets";

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub gemini_client: GeminiClient,
}

/// Create application router
pub async fn create_router(settings: Settings) -> Result<Router> {
    // Create Gemini client
    let gemini_client = GeminiClient::new(settings.clone())?;

    // Create application state
    let app_state = Arc::new(AppState {
        settings: settings.clone(),
        gemini_client,
    });

    // Create middleware stack
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        // Align axum's default extractor limit with the configured cap
        .layer(DefaultBodyLimit::max(settings.request.max_request_size))
        .layer(RequestBodyLimitLayer::new(settings.request.max_request_size))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Create routes; unmatched paths fall through to the single-page UI
    let router = Router::new()
        .route("/api/analyze", post(analyze::handle_analyze))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check))
        .fallback_service(ServeDir::new(ASSETS_DIR).append_index_html_on_directories(true))
        .layer(axum::middleware::from_fn(request_logging_middleware))
        .with_state(app_state)
        .layer(middleware_stack);

    Ok(router)
}
