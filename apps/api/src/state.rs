use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; every match request is computed independently.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}
