//! Clinical analysis data models
//!
//! Defines the analysis request accepted from the page and the structured
//! result contract the model is asked to fill

use serde::{Deserialize, Serialize};

/// Clinical severity label attached to a detected medication issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Enum values as declared in the response schema
    pub fn schema_values() -> &'static [&'static str] {
        &["Low", "Moderate", "High"]
    }
}

/// Categorical flag on a lab result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabStatus {
    Normal,
    Low,
    High,
    Abnormal,
}

impl LabStatus {
    /// Enum values as declared in the response schema
    pub fn schema_values() -> &'static [&'static str] {
        &["Normal", "Low", "High", "Abnormal"]
    }
}

/// A potential medication error detected by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PotentialError {
    /// Error category (e.g. dosing, interaction, duplication)
    pub category: String,
    /// Severity tier
    pub risk: RiskLevel,
    /// Short description of the issue
    pub description: String,
    /// Free-text rationale behind the finding
    pub rationale: String,
}

/// Pharmacology summary for one prescribed drug
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugInfo {
    /// Drug name
    pub name: String,
    /// Pharmacological class
    #[serde(rename = "class")]
    pub drug_class: String,
    /// Mechanism of action
    pub mechanism: String,
    /// Indication in this prescription
    pub indication: String,
    /// Dose as prescribed
    pub prescribed_dose: String,
    /// Standard dose range for comparison
    pub standard_dose: String,
    /// Notable adverse effects
    pub adverse_effects: String,
    /// Monitoring requirements
    pub monitoring: String,
    /// Precautions and contraindications
    pub precautions: String,
}

/// Interpretation of a single laboratory value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabValue {
    /// Parameter name (e.g. creatinine, INR)
    pub parameter: String,
    /// Reported value
    pub value: String,
    /// Unit of measurement
    pub unit: String,
    /// Categorical status
    pub status: LabStatus,
    /// Clinical interpretation text
    pub interpretation: String,
}

/// Structured analysis result returned by the model
///
/// Each sequence is independently possibly empty; a missing array
/// deserializes as empty so the page still renders its per-tab
/// "no findings" state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Potential medication errors
    #[serde(default)]
    pub potential_errors: Vec<PotentialError>,
    /// Per-drug pharmacology summaries
    #[serde(default)]
    pub drug_information: Vec<DrugInfo>,
    /// Lab value interpretations
    #[serde(default)]
    pub lab_values: Vec<LabValue>,
}

impl AnalysisResult {
    /// True when no section has any finding
    pub fn is_empty(&self) -> bool {
        self.potential_errors.is_empty()
            && self.drug_information.is_empty()
            && self.lab_values.is_empty()
    }
}

/// Inline image payload submitted from the page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    /// Image MIME type (e.g. image/png)
    pub mime_type: String,
    /// Base64-encoded image bytes
    pub data: String,
}

/// Analysis request accepted from the page
///
/// Either field may be absent, but not both; validation happens in the
/// handler before any outbound call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Typed or dictated clinical text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Uploaded document image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<InlineImage>,
}

impl AnalyzeRequest {
    /// Trimmed text content, if any non-blank text was submitted
    pub fn trimmed_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// True when neither text nor image was provided
    pub fn is_empty(&self) -> bool {
        self.trimmed_text().is_none() && self.image.is_none()
    }
}
