//! Response Normalizer: turns a raw model reply into parsed JSON or a
//! `ModelFailure` that keeps the raw text for diagnosis.
//!
//! Recovery is intentionally simple: one fence strip, one parse attempt.
//! No fragment extraction, no repair.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;

use crate::llm_client::LlmError;

/// The `Failure` arm of every model-backed operation.
#[derive(Debug, Error)]
pub enum ModelFailure {
    /// The gateway call itself failed (network, auth, quota, timeout).
    #[error("Model gateway call failed: {0}")]
    Upstream(#[from] LlmError),

    /// The reply was not the JSON we asked for. `raw_response` is the
    /// fence-stripped text, never discarded.
    #[error("Invalid JSON response from model: {message}")]
    MalformedOutput {
        message: String,
        raw_response: String,
    },

    /// Caller input violated a contract; no model call was made.
    #[error("{0}")]
    Precondition(String),
}

/// `Success(T) | Failure(ModelFailure)`.
pub type ModelResult<T> = Result<T, ModelFailure>;

impl ModelFailure {
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            ModelFailure::MalformedOutput { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Error record shape used both for storage and for client payloads.
    pub fn to_payload(&self) -> Value {
        match self.raw_response() {
            Some(raw) => json!({ "error": self.to_string(), "raw_response": raw }),
            None => json!({ "error": self.to_string() }),
        }
    }
}

/// Strips one Markdown code fence (optionally tagged `json`) from each end.
/// Literal prefix/suffix match only.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    text.strip_suffix("```").unwrap_or(text).trim()
}

/// Parses a raw model reply as JSON after fence-stripping.
pub fn normalize(raw_text: &str) -> ModelResult<Value> {
    parse_reply(raw_text)
}

/// Same as [`normalize`] but deserializes straight into `T`. A reply that is
/// valid JSON of the wrong shape is still a `MalformedOutput`.
pub fn parse_reply<T: DeserializeOwned>(raw_text: &str) -> ModelResult<T> {
    let stripped = strip_json_fences(raw_text);
    serde_json::from_str(stripped).map_err(|e| ModelFailure::MalformedOutput {
        message: e.to_string(),
        raw_response: stripped.to_string(),
    })
}
