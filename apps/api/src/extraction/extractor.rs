//! Resume Extractor: structures raw resume text into `StructuredResumeInfo`.

use serde_json::Value;
use tracing::debug;

use crate::extraction::prompts::RESUME_EXTRACT_PROMPT_TEMPLATE;
use crate::llm_client::normalize::strip_json_fences;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{normalize, ModelFailure, ModelGateway, ModelResult};
use crate::models::StructuredResumeInfo;

pub fn build_extract_prompt(resume_text: &str) -> String {
    fill_template(
        RESUME_EXTRACT_PROMPT_TEMPLATE,
        &[("json_only", JSON_ONLY_INSTRUCTION), ("resume_text", resume_text)],
    )
}

/// Makes exactly one model call. Model and parse failures come back as
/// `ModelFailure`, never as a panic.
pub async fn extract_resume_info(
    resume_text: &str,
    llm: &dyn ModelGateway,
) -> ModelResult<StructuredResumeInfo> {
    let prompt = build_extract_prompt(resume_text);
    let raw = llm.generate(&prompt).await?;
    debug!(raw_response = %raw, "Raw resume extraction reply");

    match normalize(&raw)? {
        Value::Object(fields) => Ok(StructuredResumeInfo(fields)),
        other => Err(ModelFailure::MalformedOutput {
            message: format!("expected a JSON object of resume fields, got {}", kind(&other)),
            raw_response: strip_json_fences(&raw).to_string(),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
