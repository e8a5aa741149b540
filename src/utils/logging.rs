//! Logging utilities
//!
//! Redacting request summaries for debug logs. Submitted clinical text is
//! truncated and image bytes are never logged, only their size and type.

use base64::Engine as _;

use crate::models::analysis::AnalyzeRequest;

/// Maximum characters of clinical text echoed into the log
const TEXT_PREVIEW_LEN: usize = 120;

/// Truncate a string with a note about original length
fn truncate_content(s: &str, max_len: usize) -> String {
    if s.len() > max_len {
        let cut = s
            .char_indices()
            .take_while(|(i, _)| *i < max_len)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}... ({} chars truncated)", &s[..cut], s.len() - cut)
    } else {
        s.to_string()
    }
}

/// Create a filtered summary of an analysis request for logging
pub fn create_analyze_log_summary(request: &AnalyzeRequest) -> serde_json::Value {
    let text = match request.trimmed_text() {
        Some(t) => serde_json::json!({
            "chars": t.len(),
            "preview": truncate_content(t, TEXT_PREVIEW_LEN),
        }),
        None => serde_json::Value::Null,
    };

    let image = match &request.image {
        Some(image) => {
            let decoded_bytes = base64::engine::general_purpose::STANDARD
                .decode(&image.data)
                .map(|b| b.len())
                .unwrap_or(0);
            serde_json::json!({
                "mimeType": image.mime_type,
                "base64Chars": image.data.len(),
                "decodedBytes": decoded_bytes,
            })
        }
        None => serde_json::Value::Null,
    };

    serde_json::json!({
        "text": text,
        "image": image,
    })
}
