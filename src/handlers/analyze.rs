//! Clinical analysis handler
//!
//! Accepts the page's analysis request, validates it locally, runs the
//! single model call, and returns the structured result

use axum::{extract::State, Json};
use base64::Engine as _;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::handlers::AppState;
use crate::models::analysis::{AnalysisResult, AnalyzeRequest};
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::create_analyze_log_summary;

/// Image MIME types accepted for inline upload
const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/heic",
    "image/heif",
];

/// Handle analysis requests
///
/// POST /api/analyze
///
/// Local validation happens before any outbound call; every upstream
/// failure collapses into the single generic analysis-failure response.
pub async fn handle_analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> AppResult<Json<AnalysisResult>> {
    let summary = create_analyze_log_summary(&request);
    debug!("Received analysis request: {}", summary);

    // Reject locally before any call
    if let Err(message) = validate_analyze_request(&request, &state.settings) {
        warn!("Request validation failed: {}", message);
        return Err(AppError::Validation(message));
    }

    let result = state
        .gemini_client
        .analyze(&request)
        .await
        .map_err(|e| AppError::Analysis(e.to_string()))?;

    debug!(
        errors = result.potential_errors.len(),
        drugs = result.drug_information.len(),
        labs = result.lab_values.len(),
        "Analysis completed"
    );

    Ok(Json(result))
}

/// Validate an analysis request
///
/// At least one input is required; an attached image must carry an allowed
/// MIME type and valid base64 data within the configured size limit.
fn validate_analyze_request(request: &AnalyzeRequest, settings: &Settings) -> Result<(), String> {
    if request.is_empty() {
        return Err("Provide a document image or clinical text to analyze".to_string());
    }

    if let Some(image) = &request.image {
        if !ALLOWED_IMAGE_TYPES.contains(&image.mime_type.as_str()) {
            return Err(format!("Unsupported image type: {}", image.mime_type));
        }

        if image.data.is_empty() {
            return Err("Image data cannot be empty".to_string());
        }

        let decoded = base64::engine::general_purpose::STANDARD
            .decode(&image.data)
            .map_err(|_| "Image data is not valid base64".to_string())?;

        if decoded.is_empty() {
            return Err("Image data cannot be empty".to_string());
        }

        if decoded.len() > settings.request.max_image_bytes {
            return Err(format!(
                "Image exceeds the maximum size of {} bytes",
                settings.request.max_image_bytes
            ));
        }
    }

    Ok(())
}
