//! Axum route handlers for the evaluation API.

use std::io::Write;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::evaluation::assessment::ParsedFit;
use crate::state::AppState;

/// Upper bound on the multipart request body.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    /// The assessment exactly as returned by the model.
    pub assessment: String,
    /// Typed parse of `assessment`, or null when the model ignored the requested format.
    pub fit: Option<ParsedFit>,
}

/// POST /api/v1/evaluations
///
/// Multipart form with a `cv` file (PDF) and a `job_description` text field.
/// The upload is written to a temporary file that is removed once the run finishes.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<EvaluateResponse>, AppError> {
    let mut cv: Option<Vec<u8>> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("cv") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read cv: {e}")))?;
                cv = Some(bytes.to_vec());
            }
            Some("job_description") => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read job_description: {e}"))
                })?;
                job_description = Some(text);
            }
            _ => {}
        }
    }

    let cv = cv
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::Validation("cv file is required".to_string()))?;
    let job_description = job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| AppError::Validation("job_description cannot be empty".to_string()))?;

    let mut upload = tempfile::Builder::new()
        .prefix("cv-fit-")
        .suffix(".pdf")
        .tempfile()
        .map_err(|e| AppError::Internal(e.into()))?;
    upload
        .write_all(&cv)
        .map_err(|e| AppError::Internal(e.into()))?;
    info!("Received CV upload ({} bytes)", cv.len());
    drop(cv);

    let assessment = state.pipeline.run(upload.path(), &job_description).await?;
    let fit = assessment.parse().ok();

    Ok(Json(EvaluateResponse {
        assessment: assessment.as_str().to_string(),
        fit,
    }))
}
