use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::interview::turn::{next_turn, CandidateProfile, InterviewTurn};
use crate::state::AppState;
use crate::store::ResumeLookup;

#[derive(Debug, Deserialize)]
pub struct InterviewQuery {
    pub candidate_response: Option<String>,
}

/// POST /interview/:external_id?candidate_response=...
///
/// Returns `{"question": ...}` or `{"message": "Interview ended."}`.
pub async fn handle_interview(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
    Query(query): Query<InterviewQuery>,
) -> Result<Json<InterviewTurn>, AppError> {
    let resume = state
        .require_resume(ResumeLookup::ExternalId(external_id))
        .await?;

    let info = resume.info();
    let profile = CandidateProfile {
        name: info.name(),
        projects: info.projects(),
        experience: info.experience(),
    };

    let turn = next_turn(
        &profile,
        query.candidate_response.as_deref(),
        state.llm.as_ref(),
    )
    .await?;
    Ok(Json(turn))
}
