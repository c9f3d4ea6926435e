use crate::interview::service::InterviewService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Owns the live sessions and the persistence sink chosen at startup.
    pub interview: InterviewService,
}
