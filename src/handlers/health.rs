//! Health check handlers
//!
//! Provides application health status check endpoints

use axum::{extract::State, response::Json};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::handlers::AppState;

/// Process start time, captured on first health query
static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
    /// Timestamp
    pub timestamp: String,
    /// Details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

/// Check result details
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthDetails {
    /// Configured analysis model
    pub model: String,
    /// Configuration status
    pub config: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Basic health check
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing health check");

    let response = HealthResponse {
        status: "healthy".to_string(),
        service: "MedLens".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: Some(HealthDetails {
            model: state.settings.gemini.model.clone(),
            config: "valid".to_string(), // Configuration validated at startup
            uptime_seconds: START_TIME.elapsed().as_secs(),
        }),
    };

    Json(response)
}

/// Liveness check
///
/// GET /health/live
pub async fn liveness_check() -> Json<HealthResponse> {
    debug!("Executing liveness check");

    let response = HealthResponse {
        status: "alive".to_string(),
        service: "MedLens".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: None,
    };

    Json(response)
}

/// Readiness check
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing readiness check");

    let response = HealthResponse {
        status: "ready".to_string(),
        service: "MedLens".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: Some(HealthDetails {
            model: state.settings.gemini.model.clone(),
            config: "valid".to_string(),
            uptime_seconds: START_TIME.elapsed().as_secs(),
        }),
    };

    Json(response)
}
