use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message returned for every failure the caller cannot fix.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An error occurred while analyzing your resume. Please try again.";

/// Closed set of failures the resume matcher can produce.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Please upload a resume file")]
    MissingResume,

    #[error("Please provide a detailed job description (minimum 50 characters)")]
    InvalidJobDescription,

    #[error("Failed to process resume file: Failed to extract text from {file_name}: {cause}")]
    Extraction { file_name: String, cause: String },

    #[error(
        "Unable to extract sufficient text from resume. Please ensure the file contains readable text and try again."
    )]
    InsufficientText,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl MatchError {
    pub fn status(&self) -> StatusCode {
        match self {
            MatchError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Caller-facing message. Unexpected failures never expose their cause.
    pub fn public_message(&self) -> String {
        match self {
            MatchError::Unexpected(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for MatchError {
    fn into_response(self) -> Response {
        match &self {
            MatchError::Unexpected(cause) => tracing::error!("Resume matching error: {cause}"),
            other => tracing::warn!("Rejected match request: {other}"),
        }
        failure_response(self.status(), self.public_message())
    }
}

/// Errors raised by the HTTP/upload layer before the matcher runs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("Invalid file type. Only PDF, DOCX, and TXT files are allowed.")]
    UnsupportedFileType,

    #[error("Resume file exceeds the {limit} byte upload limit")]
    PayloadTooLarge { limit: usize },

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Match(e) => e.into_response(),
            AppError::UnsupportedFileType => {
                failure_response(StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::PayloadTooLarge { .. } => {
                failure_response(StatusCode::PAYLOAD_TOO_LARGE, self.to_string())
            }
            AppError::BadRequest(msg) => failure_response(StatusCode::BAD_REQUEST, msg),
        }
    }
}

/// The single failure envelope: `{ "success": false, "error": <message> }`.
fn failure_response(status: StatusCode, message: String) -> Response {
    let body = Json(json!({
        "success": false,
        "error": message
    }));

    (status, body).into_response()
}
