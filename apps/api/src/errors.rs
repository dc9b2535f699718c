use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::ModelFailure;
use crate::store::StoreError;

pub const RESUME_NOT_FOUND: &str = "Resume not found";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every body has the shape `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    /// The uploaded file could not be read or parsed.
    #[error("Could not read uploaded resume: {0}")]
    Upload(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Model(#[from] ModelFailure),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn resume_not_found() -> Self {
        AppError::NotFound(RESUME_NOT_FOUND.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Upload(_) => {
                tracing::warn!("{self}");
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            AppError::Store(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "A storage error occurred" }),
                )
            }
            AppError::Model(failure) => {
                let status = match failure {
                    ModelFailure::Precondition(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    ModelFailure::Upstream(e) => {
                        tracing::error!("LLM error: {e}");
                        StatusCode::BAD_GATEWAY
                    }
                    ModelFailure::MalformedOutput { message, .. } => {
                        tracing::warn!("Malformed model output: {message}");
                        StatusCode::BAD_GATEWAY
                    }
                };
                (status, failure.to_payload())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal server error occurred" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
