//! Analysis prompt and response contract
//!
//! The fixed clinical instruction prompt sent with every analysis request,
//! the declared JSON response schema, and the request assembly from
//! validated page input.

use serde_json::{json, Value};

use crate::models::analysis::{AnalyzeRequest, LabStatus, RiskLevel};
use crate::models::gemini::{
    Content, GenerateContentRequest, GenerationConfig, InlineData, Part,
};

/// Sampling temperature for analysis requests. Extraction should be
/// stable, not creative.
const ANALYSIS_TEMPERATURE: f32 = 0.2;

/// Fixed instruction prompt for the clinical analysis task.
///
/// The model fills the declared response schema; sections with no findings
/// come back as empty arrays.
const ANALYSIS_INSTRUCTION: &str = "\
You are a clinical pharmacist assistant. Analyze the provided medical \
information (prescription document image and/or clinical text) and produce \
a structured review.\n\
\n\
1. potentialErrors: identify potential medication errors such as incorrect \
dosing, drug-drug interactions, therapeutic duplication, contraindications, \
or illegible/ambiguous orders. Classify each by category, assign a risk \
tier, and explain the rationale.\n\
2. drugInformation: for every drug mentioned, summarize its class, \
mechanism of action, indication, the prescribed dose versus the standard \
dose, notable adverse effects, monitoring requirements, and precautions.\n\
3. labValues: interpret every laboratory value present, flagging each as \
Normal, Low, High, or Abnormal with a short clinical interpretation.\n\
\n\
Only report findings supported by the provided information. If a section \
has no findings, return an empty array for it.";

/// Declared response shape for the analysis result.
///
/// Gemini schema subset: OBJECT/ARRAY/STRING types with enum constraints on
/// the tier fields. Keys mirror the serde renames on the domain types.
pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "potentialErrors": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "category": { "type": "STRING" },
                        "risk": { "type": "STRING", "enum": RiskLevel::schema_values() },
                        "description": { "type": "STRING" },
                        "rationale": { "type": "STRING" }
                    },
                    "required": ["category", "risk", "description", "rationale"]
                }
            },
            "drugInformation": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "class": { "type": "STRING" },
                        "mechanism": { "type": "STRING" },
                        "indication": { "type": "STRING" },
                        "prescribedDose": { "type": "STRING" },
                        "standardDose": { "type": "STRING" },
                        "adverseEffects": { "type": "STRING" },
                        "monitoring": { "type": "STRING" },
                        "precautions": { "type": "STRING" }
                    },
                    "required": [
                        "name", "class", "mechanism", "indication",
                        "prescribedDose", "standardDose", "adverseEffects",
                        "monitoring", "precautions"
                    ]
                }
            },
            "labValues": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "parameter": { "type": "STRING" },
                        "value": { "type": "STRING" },
                        "unit": { "type": "STRING" },
                        "status": { "type": "STRING", "enum": LabStatus::schema_values() },
                        "interpretation": { "type": "STRING" }
                    },
                    "required": ["parameter", "value", "unit", "status", "interpretation"]
                }
            }
        },
        "required": ["potentialErrors", "drugInformation", "labValues"]
    })
}

/// Assemble the outbound `generateContent` request from validated input.
///
/// The instruction prompt always comes first; the image part (if any)
/// precedes the clinician's text so the text reads as annotation on the
/// document.
pub fn build_analysis_request(input: &AnalyzeRequest) -> GenerateContentRequest {
    let mut parts = vec![Part::Text {
        text: ANALYSIS_INSTRUCTION.to_string(),
    }];

    if let Some(image) = &input.image {
        parts.push(Part::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: image.data.clone(),
            },
        });
    }

    if let Some(text) = input.trimmed_text() {
        parts.push(Part::Text {
            text: format!("Clinical information provided by the clinician:\n{text}"),
        });
    }

    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(analysis_response_schema()),
            temperature: Some(ANALYSIS_TEMPERATURE),
            max_output_tokens: None,
        }),
    }
}
