//! Data models module
//!
//! Defines the clinical analysis domain types and the Gemini API wire types

pub mod analysis;
pub mod gemini;

pub use analysis::{
    AnalysisResult, AnalyzeRequest, DrugInfo, InlineImage, LabStatus, LabValue, PotentialError,
    RiskLevel,
};
pub use gemini::{GenerateContentRequest, GenerateContentResponse};
