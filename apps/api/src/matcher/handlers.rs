//! Axum route handlers for the Resume Matcher API.

use std::time::Duration;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, MatchError};
use crate::matcher::extract::ResumeMimeType;
use crate::matcher::{match_resume, MatchRequest, MatchResult, ResumeUpload};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "jobDescription";

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// POST /api/match-resume
///
/// Multipart form with a `resume` file and a `jobDescription` text field.
/// Scoring runs on the blocking pool under the configured timeout.
pub async fn handle_match_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MatchResponse>, AppError> {
    let multipart = multipart.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let request = read_match_request(multipart, state.config.max_upload_bytes).await?;

    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        file = request.resume.as_ref().map(|r| r.file_name.as_str()).unwrap_or("<none>"),
        bytes = request.resume.as_ref().map(|r| r.bytes.len()).unwrap_or(0),
        "Matching resume"
    );

    let result =
        run_blocking_with_timeout(state.config.match_timeout, move || match_resume(&request))
            .await?;

    info!(%request_id, score = result.score, "Resume matched");

    Ok(Json(MatchResponse {
        success: true,
        result,
    }))
}

/// GET /api/resume-matcher/health
pub async fn handle_matcher_health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "service": { "status": "healthy" }
        })),
    )
}

/// Runs CPU-bound matcher work off the async executor, bounded by `timeout`.
/// A timeout or a panicked task surfaces as `MatchError::Unexpected`.
async fn run_blocking_with_timeout<T, F>(timeout: Duration, work: F) -> Result<T, MatchError>
where
    F: FnOnce() -> Result<T, MatchError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::time::timeout(timeout, tokio::task::spawn_blocking(work)).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(join_error)) => Err(MatchError::Unexpected(format!(
            "match task failed: {join_error}"
        ))),
        Err(_) => Err(MatchError::Unexpected(format!(
            "match exceeded {}ms timeout",
            timeout.as_millis()
        ))),
    }
}

/// Drains the multipart stream into a `MatchRequest`, enforcing the upload rules.
async fn read_match_request(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<MatchRequest, AppError> {
    let mut request = MatchRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_upload_bytes))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            RESUME_FIELD => {
                let mime_type = ResumeMimeType::from_content_type(
                    field.content_type().unwrap_or_default(),
                );
                if !mime_type.is_accepted() {
                    return Err(AppError::UnsupportedFileType);
                }
                let file_name = field.file_name().unwrap_or(RESUME_FIELD).to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, max_upload_bytes))?;
                if bytes.len() > max_upload_bytes {
                    return Err(AppError::PayloadTooLarge {
                        limit: max_upload_bytes,
                    });
                }
                request.resume = Some(ResumeUpload {
                    bytes,
                    mime_type,
                    file_name,
                });
            }
            JOB_DESCRIPTION_FIELD => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, max_upload_bytes))?;
                request.job_description = Some(text);
            }
            _ => {}
        }
    }

    Ok(request)
}

fn multipart_error(error: MultipartError, limit: usize) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::BadRequest(error.body_text())
    }
}
