//! HTTP client service
//!
//! Encapsulates HTTP communication with the hosted Gemini API

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::config::Settings;
use crate::models::analysis::{AnalysisResult, AnalyzeRequest};
use crate::models::gemini::{GenerateContentRequest, GenerateContentResponse, GeminiErrorResponse};
use crate::services::prompt;

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    settings: Settings,
}

impl GeminiClient {
    /// Create a new client instance
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.gemini.timeout))
            .user_agent(concat!("medlens/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, settings })
    }

    /// Run one clinical analysis: assemble the request, call the model,
    /// parse the structured result.
    ///
    /// One call, no retry; a failed call discards the in-progress result.
    pub async fn analyze(&self, input: &AnalyzeRequest) -> Result<AnalysisResult> {
        let request = prompt::build_analysis_request(input);
        let response = self.generate_content(request).await?;
        extract_analysis(&response)
    }

    /// Send a `generateContent` request
    pub async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        debug!("Sending generateContent request");

        let url = format!(
            "{}/models/{}:generateContent",
            self.settings.gemini.base_url, self.settings.gemini.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.settings.gemini.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request")?;

        self.handle_response(response).await
    }

    /// Handle HTTP response
    async fn handle_response(&self, response: Response) -> Result<GenerateContentResponse> {
        let status = response.status();

        if status.is_success() {
            let body: GenerateContentResponse = response
                .json()
                .await
                .context("Failed to parse Gemini response")?;

            debug!("Gemini request completed successfully");
            Ok(body)
        } else {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as Gemini error format
            if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(&error_text) {
                error!(
                    "Gemini API error: {} (code {}, {})",
                    error_response.error.message,
                    error_response.error.code.unwrap_or(status.as_u16() as u32),
                    error_response.error.status.as_deref().unwrap_or("unknown")
                );
                anyhow::bail!("Gemini API error: {}", error_response.error.message);
            } else {
                error!("Gemini API request failed: {} - {}", status, error_text);
                anyhow::bail!("Gemini API request failed: {}", status);
            }
        }
    }
}

/// Parse the structured analysis out of a model response.
///
/// Empty candidates, blocked prompts, and unparsable candidate text are all
/// failures here; the handler collapses them into the one generic
/// analysis-failure message.
pub fn extract_analysis(response: &GenerateContentResponse) -> Result<AnalysisResult> {
    if let Some(feedback) = &response.prompt_feedback {
        if let Some(reason) = &feedback.block_reason {
            warn!("Prompt blocked by the model: {}", reason);
            anyhow::bail!("Prompt blocked: {}", reason);
        }
    }

    let text = response
        .first_candidate_text()
        .context("Model response contained no candidate text")?;

    let result: AnalysisResult = serde_json::from_str(&text)
        .context("Model response did not match the declared schema")?;

    debug!(
        errors = result.potential_errors.len(),
        drugs = result.drug_information.len(),
        labs = result.lab_values.len(),
        "Parsed structured analysis"
    );

    Ok(result)
}
