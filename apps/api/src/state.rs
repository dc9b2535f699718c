use std::sync::Arc;

use crate::errors::AppError;
use crate::llm_client::ModelGateway;
use crate::models::ResumeRecord;
use crate::store::{ResumeLookup, ResumeStore};

/// Shared application state injected into all route handlers via Axum extractors.
/// Both handles are built once in `main`; nothing here is mutable.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResumeStore>,
    pub llm: Arc<dyn ModelGateway>,
}

impl AppState {
    /// Looks up a resume, mapping a miss to `{"error": "Resume not found"}`.
    pub async fn require_resume(&self, lookup: ResumeLookup) -> Result<ResumeRecord, AppError> {
        self.store
            .find_one(lookup)
            .await?
            .ok_or_else(AppError::resume_not_found)
    }
}
