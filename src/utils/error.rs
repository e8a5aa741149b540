//! Error handling module
//!
//! Defines error types and handling logic used in the project

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The one user-facing message for any analysis failure.
///
/// Upstream errors, empty responses, and malformed bodies all surface as
/// this string; specifics go to the server log only.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Failed to analyze the provided medical information. Please try again.";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request validation failed
    #[error("Request validation failed: {0}")]
    Validation(String),

    /// Analysis failed; the string carries internal detail for the log
    #[error("Analysis failed: {0}")]
    Analysis(String),

    /// Payload too large
    #[error("Payload too large")]
    PayloadTooLarge,

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure returned to the page
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always "error"
    #[serde(rename = "type")]
    pub response_type: String,
    /// Error details
    pub error: ErrorDetail,
}

/// Error details
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Error type
    #[serde(rename = "type")]
    pub error_type: String,
    /// User-facing error message
    pub message: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Analysis(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::HttpClient(_)
            | AppError::Serialization(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "invalid_request_error",
            AppError::PayloadTooLarge => "invalid_request_error",
            AppError::Analysis(_) => "analysis_error",
            AppError::Config(_)
            | AppError::HttpClient(_)
            | AppError::Serialization(_)
            | AppError::Internal(_) => "api_error",
        }
    }

    /// User-facing message.
    ///
    /// Analysis failures collapse to the single generic message regardless
    /// of the underlying cause.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Analysis(_) => ANALYSIS_FAILED_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Convert to the error response body
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            response_type: "error".to_string(),
            error: ErrorDetail {
                error_type: self.error_type().to_string(),
                message: self.user_message(),
            },
        }
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Validation failures are client mistakes; everything else is worth
        // the full detail in the log
        match &self {
            AppError::Validation(_) | AppError::PayloadTooLarge => {
                tracing::warn!("Client error: {} - Status code: {}", self, status);
            }
            _ => {
                tracing::error!("Application error: {} - Status code: {}", self, status);
            }
        }

        let error_response = self.to_error_response();

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Error handling helper functions
#[allow(dead_code)]
pub mod helpers {
    use super::*;

    /// Create validation error
    pub fn validation_error(message: impl Into<String>) -> AppError {
        AppError::Validation(message.into())
    }

    /// Create analysis error with internal detail
    pub fn analysis_error(message: impl Into<String>) -> AppError {
        AppError::Analysis(message.into())
    }

    /// Create internal error
    pub fn internal_error(message: impl Into<String>) -> AppError {
        AppError::Internal(message.into())
    }
}
