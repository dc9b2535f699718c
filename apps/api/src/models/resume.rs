//! Resume records and the tolerant view over model-extracted resume fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored resume. Insert-only: never updated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ResumeRecord {
    pub id: Uuid,
    pub external_id: String,
    pub filename: String,
    /// Plain text pulled out of the uploaded PDF. Kept so extraction can be re-run.
    pub resume_text: String,
    /// Either the extracted fields or the error record of a failed extraction.
    pub structured_info: Value,
    pub created_at: DateTime<Utc>,
}

impl ResumeRecord {
    pub fn info(&self) -> StructuredResumeInfo {
        StructuredResumeInfo::from_value(&self.structured_info)
    }
}

/// Everything the caller supplies for an insert. The store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub external_id: String,
    pub filename: String,
    pub resume_text: String,
    pub structured_info: Value,
}

/// A field the model may return as plain text or as a nested object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrStructured {
    Text(String),
    Structured(Value),
}

impl StringOrStructured {
    /// Canonical string form for reuse inside a prompt.
    pub fn to_prompt_text(&self) -> String {
        match self {
            StringOrStructured::Text(text) => text.clone(),
            StringOrStructured::Structured(value) => value.to_string(),
        }
    }
}

impl From<&Value> for StringOrStructured {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => StringOrStructured::Text(s.clone()),
            other => StringOrStructured::Structured(other.clone()),
        }
    }
}

/// Model-extracted resume fields.
///
/// Keys: `Name`, `Skills`, `Projects`, `Experience`, `Education`, `OtherDetails`.
/// None are guaranteed and types drift between replies, so the raw object is
/// kept as-is and every accessor is tolerant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructuredResumeInfo(pub Map<String, Value>);

impl StructuredResumeInfo {
    /// Non-object values (including JSON `null`) give an empty view.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self(map.clone()),
            _ => Self::default(),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn name(&self) -> Option<String> {
        match self.0.get("Name")? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }

    /// Skills as a flat list.
    ///
    /// Accepts a list, a category -> list mapping, or a comma-separated string.
    pub fn skills(&self) -> Vec<String> {
        let mut skills = Vec::new();
        if let Some(value) = self.0.get("Skills") {
            collect_skills(value, &mut skills);
        }
        skills
    }

    pub fn projects(&self) -> Vec<StringOrStructured> {
        self.entries("Projects")
    }

    pub fn experience(&self) -> Vec<StringOrStructured> {
        self.entries("Experience")
    }

    /// A lone string or object is treated as a one-element list.
    fn entries(&self, key: &str) -> Vec<StringOrStructured> {
        match self.0.get(key) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .filter(|v| !v.is_null())
                .map(StringOrStructured::from)
                .collect(),
            Some(other) => vec![StringOrStructured::from(other)],
        }
    }
}

fn collect_skills(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.extend(
            s.split(',')
                .map(str::trim)
                .filter(|skill| !skill.is_empty())
                .map(String::from),
        ),
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::String(s) => out.push(s.clone()),
                    Value::Null => {}
                    other => out.push(other.to_string()),
                }
            }
        }
        Value::Object(groups) => {
            for group in groups.values() {
                collect_skills(group, out);
            }
        }
        _ => {}
    }
}
