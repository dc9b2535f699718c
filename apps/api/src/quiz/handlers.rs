use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::quiz::generator::{generate_quiz, QuizSet, SkillBands};
use crate::state::AppState;
use crate::store::ResumeLookup;

#[derive(Debug, Serialize)]
pub struct McqResponse {
    pub mcqs: QuizSet,
    pub skill_bands: SkillBands,
}

/// GET /generate-mcqs/:external_id
///
/// Builds a quiz from the skills stored on the resume.
pub async fn handle_generate_mcqs(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> Result<Json<McqResponse>, AppError> {
    let resume = state
        .require_resume(ResumeLookup::ExternalId(external_id))
        .await?;

    let skills = resume.info().skills();
    if skills.is_empty() {
        return Err(AppError::Validation("No skills found in resume".to_string()));
    }

    let quiz = generate_quiz(&skills, state.llm.as_ref()).await?;
    Ok(Json(McqResponse {
        mcqs: quiz.questions,
        skill_bands: quiz.skill_bands,
    }))
}
