//! Axum route handlers for resume intake and lookup.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::extractor::extract_resume_info;
use crate::extraction::pdf::extract_pdf_text;
use crate::llm_client::ModelFailure;
use crate::models::{NewResume, ResumeRecord};
use crate::state::AppState;
use crate::store::ResumeLookup;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub id: Uuid,
    pub external_id: String,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub resume: ResumeRecord,
}

#[derive(Debug, Serialize)]
pub struct ResumeListResponse {
    pub resumes: Vec<ResumeRecord>,
}

#[derive(Debug, Serialize)]
pub struct ExtractInfoResponse {
    pub extracted_info: Value,
}

/// An upload whose PDF text has already been pulled out.
struct ExtractedUpload {
    filename: String,
    external_id: String,
    resume_text: String,
}

/// The multipart fields of an upload.
struct UploadForm {
    filename: String,
    content: Bytes,
    external_id: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /upload-resume
///
/// Multipart fields: `file` (PDF) and `external_id`.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let form = read_upload_form(multipart).await?;
    let resume_text = extract_pdf_text(form.content).await?;

    let response = store_extracted_resume(
        &state,
        ExtractedUpload {
            filename: form.filename,
            external_id: form.external_id,
            resume_text,
        },
    )
    .await?;
    Ok(Json(response))
}

/// Runs extraction over uploaded text and persists the record.
///
/// Malformed model output is stored as the record's error payload so the
/// upload is not lost; a failed model call stores nothing.
async fn store_extracted_resume(
    state: &AppState,
    upload: ExtractedUpload,
) -> Result<UploadResponse, AppError> {
    let structured_info = match extract_resume_info(&upload.resume_text, state.llm.as_ref()).await
    {
        Ok(info) => info.into_value(),
        Err(failure @ ModelFailure::MalformedOutput { .. }) => {
            warn!(
                external_id = %upload.external_id,
                "Storing resume with failed extraction: {failure}"
            );
            failure.to_payload()
        }
        Err(failure) => return Err(failure.into()),
    };

    let id = state
        .store
        .insert_one(NewResume {
            external_id: upload.external_id.clone(),
            filename: upload.filename,
            resume_text: upload.resume_text,
            structured_info,
        })
        .await?;
    info!(%id, external_id = %upload.external_id, "Resume stored");

    Ok(UploadResponse {
        message: "Resume stored successfully".to_string(),
        id,
        external_id: upload.external_id,
    })
}

/// GET /get-resume/:external_id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> Result<Json<ResumeResponse>, AppError> {
    let resume = state
        .require_resume(ResumeLookup::ExternalId(external_id))
        .await?;
    Ok(Json(ResumeResponse { resume }))
}

/// GET /get-resume-by-record/:record_id
pub async fn handle_get_resume_by_record(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
) -> Result<Json<ResumeResponse>, AppError> {
    let id = Uuid::parse_str(&record_id)
        .map_err(|_| AppError::Validation(format!("'{record_id}' is not a valid record id")))?;
    let resume = state.require_resume(ResumeLookup::RecordId(id)).await?;
    Ok(Json(ResumeResponse { resume }))
}

/// GET /resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<ResumeListResponse>, AppError> {
    let resumes = state.store.find_all().await?;
    Ok(Json(ResumeListResponse { resumes }))
}

/// GET /extract-info/:external_id
///
/// Re-runs extraction over the stored resume text. Nothing is persisted.
pub async fn handle_extract_info(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> Result<Json<ExtractInfoResponse>, AppError> {
    let resume = state
        .require_resume(ResumeLookup::ExternalId(external_id))
        .await?;
    let info = extract_resume_info(&resume.resume_text, state.llm.as_ref()).await?;
    Ok(Json(ExtractInfoResponse {
        extracted_info: info.into_value(),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart parsing
// ────────────────────────────────────────────────────────────────────────────

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut external_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("resume.pdf").to_string();
                let content = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Upload(e.to_string()))?;
                file = Some((filename, content));
            }
            Some("external_id") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                external_id = Some(value.trim().to_string());
            }
            _ => {}
        }
    }

    let (filename, content) =
        file.ok_or_else(|| AppError::Validation("missing 'file' field".to_string()))?;
    let external_id = external_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Validation("missing 'external_id' field".to_string()))?;

    Ok(UploadForm {
        filename,
        content,
        external_id,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::json;

    use super::*;
    use crate::store::{MemoryResumeStore, ResumeStore};
    use crate::test_support::StubGateway;

    fn state_with(llm: StubGateway) -> (AppState, Arc<MemoryResumeStore>) {
        let store = Arc::new(MemoryResumeStore::new());
        let state = AppState {
            store: store.clone(),
            llm: Arc::new(llm),
        };
        (state, store)
    }

    fn upload() -> ExtractedUpload {
        ExtractedUpload {
            filename: "ada.pdf".to_string(),
            external_id: "abc123".to_string(),
            resume_text: "Ada Lovelace\nSkills: Rust".to_string(),
        }
    }

    #[tokio::test]
    async fn test_extracted_fields_are_stored() {
        let (state, store) = state_with(StubGateway::replying(&[
            r#"{"Name": "Ada", "Skills": ["Rust"]}"#,
        ]));

        let response = store_extracted_resume(&state, upload()).await.unwrap();
        assert_eq!(response.message, "Resume stored successfully");
        assert_eq!(response.external_id, "abc123");

        let stored = store
            .find_one(ResumeLookup::RecordId(response.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.structured_info, json!({"Name": "Ada", "Skills": ["Rust"]}));
        assert_eq!(stored.filename, "ada.pdf");
        assert_eq!(stored.resume_text, "Ada Lovelace\nSkills: Rust");
    }

    #[tokio::test]
    async fn test_malformed_extraction_is_stored_as_error_record() {
        let (state, store) = state_with(StubGateway::replying(&["not json at all"]));

        let response = store_extracted_resume(&state, upload()).await.unwrap();

        let stored = store
            .find_one(ResumeLookup::ExternalId("abc123".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, response.id);
        assert_eq!(stored.structured_info["raw_response"], "not json at all");
        assert!(stored.structured_info["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON response from model"));
    }

    #[tokio::test]
    async fn test_upstream_failure_stores_nothing() {
        let (state, store) = state_with(StubGateway::failing());

        let err = store_extracted_resume(&state, upload()).await.unwrap_err();
        assert!(matches!(err, AppError::Model(ModelFailure::Upstream(_))));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
        assert!(store.find_all().await.unwrap().is_empty());
    }
}
