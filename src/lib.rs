//! MedLens Library
//!
//! Clinical medication analysis service: accepts a document image, typed
//! text, or dictated transcript and returns a structured review (potential
//! medication errors, drug summaries, lab interpretations) produced by a
//! hosted generative model against a declared response schema

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use handlers::{create_router, AppState};
pub use models::{AnalysisResult, AnalyzeRequest};
pub use services::{extract_analysis, GeminiClient};
pub use utils::error::{AppError, AppResult, ANALYSIS_FAILED_MESSAGE};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
