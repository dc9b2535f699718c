pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as resumes;
use crate::interview::handlers as interview;
use crate::quiz::handlers as quiz;
use crate::state::AppState;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    let upload = post(resumes::handle_upload_resume).layer(DefaultBodyLimit::max(max_upload_bytes));

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Resume intake and lookup
        .route("/upload-resume", upload.clone())
        .route("/upload-resume/", upload)
        .route("/resumes", get(resumes::handle_list_resumes))
        .route("/get-resume/:external_id", get(resumes::handle_get_resume))
        .route(
            "/get-resume-by-record/:record_id",
            get(resumes::handle_get_resume_by_record),
        )
        .route("/extract-info/:external_id", get(resumes::handle_extract_info))
        // Quiz and interview
        .route("/generate-mcqs/:external_id", get(quiz::handle_generate_mcqs))
        .route("/interview/:external_id", post(interview::handle_interview))
        .with_state(state)
}
