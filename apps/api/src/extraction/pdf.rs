use bytes::Bytes;

use crate::errors::AppError;

/// Pulls plain text out of an uploaded PDF on a blocking thread.
/// Parser errors and parser panics both come back as `AppError::Upload`.
pub async fn extract_pdf_text(content: Bytes) -> Result<String, AppError> {
    if content.is_empty() {
        return Err(AppError::Upload("uploaded file is empty".to_string()));
    }

    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&content))
        .await
        .map_err(|e| AppError::Upload(format!("PDF parser aborted: {e}")))?
        .map_err(|e| AppError::Upload(e.to_string()))
}
