// src/ai/extract.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::ai::AiError;

static FENCED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("valid fenced json regex"));

static BRACED_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid braced span regex"));

/// Parses a JSON object out of a model reply.
///
/// Tries, in order: a ```json fenced block, the widest `{...}` span, the
/// whole trimmed text.
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Result<T, AiError> {
    if text.trim().is_empty() {
        return Err(AiError::EmptyReply);
    }

    let candidate = if let Some(fenced) = FENCED_JSON.captures(text).and_then(|c| c.get(1)) {
        fenced.as_str()
    } else if let Some(span) = BRACED_SPAN.find(text) {
        span.as_str()
    } else {
        text.trim()
    };

    serde_json::from_str(candidate).map_err(|e| {
        tracing::error!("Failed JSON extraction: {}", e);
        AiError::Parse(e.to_string())
    })
}
