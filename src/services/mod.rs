//! Service layer module
//!
//! Contains the analysis prompt/contract and the Gemini HTTP client

pub mod client;
pub mod prompt;

pub use client::{extract_analysis, GeminiClient};
