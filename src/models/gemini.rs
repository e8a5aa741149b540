//! Gemini API wire models
//!
//! Request and response structures for the hosted `generateContent` endpoint

use serde::{Deserialize, Serialize};

/// `generateContent` request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation contents (a single user turn here)
    pub contents: Vec<Content>,
    /// Generation parameters, including the declared response schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Content container used in both requests and responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Role (user/model), absent on some response contents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Ordered content parts
    pub parts: Vec<Part>,
}

/// Untagged union of text and inline media parts
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// Plain text part
    Text { text: String },
    /// Inline base64 media part
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

/// Base64 inline payload for image parts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// Media MIME type
    pub mime_type: String,
    /// Base64-encoded bytes
    pub data: String,
}

/// Generation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Response MIME type ("application/json" for structured output)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    /// Declared JSON response shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Output token cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// Top-level `generateContent` response envelope
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidate completions (may be empty on blocked prompts)
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Prompt feedback, present when the prompt was blocked
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

/// Candidate completion item
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content, absent when generation stopped before output
    #[serde(default)]
    pub content: Option<Content>,
    /// Reason generation finished (STOP, MAX_TOKENS, SAFETY, ...)
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Feedback attached when the prompt itself was rejected
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Block reason, if any
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Error response envelope returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiErrorResponse {
    /// Error information
    pub error: GeminiError,
}

/// Error details
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiError {
    /// HTTP-style status code
    #[serde(default)]
    pub code: Option<u32>,
    /// Error message
    pub message: String,
    /// Error status string (e.g. INVALID_ARGUMENT)
    #[serde(default)]
    pub status: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts, if any
    pub fn first_candidate_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                Part::InlineData { .. } => None,
            })
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
