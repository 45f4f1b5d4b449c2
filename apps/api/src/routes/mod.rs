pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matcher::handlers;
use crate::state::AppState;

/// Headroom above the file limit for multipart framing and the text fields.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Resume Matcher API
        .route("/api/match-resume", post(handlers::handle_match_resume))
        .route(
            "/api/resume-matcher/health",
            get(handlers::handle_matcher_health),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
