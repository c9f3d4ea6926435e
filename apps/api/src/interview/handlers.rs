//! Axum route handlers for the Interview API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::service::{SessionView, TurnResult};
use crate::state::AppState;

/// Longest message accepted in a single turn.
const MAX_MESSAGE_CHARS: usize = 4000;

#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    pub message: String,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<TurnResult>) {
    let started = state.interview.start_session().await;
    (StatusCode::CREATED, Json(started))
}

/// POST /api/v1/sessions/:id/turns
pub async fn handle_turn(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TurnRequest>,
) -> Result<Json<TurnResult>, AppError> {
    if req.message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AppError::Validation(format!(
            "message must be at most {MAX_MESSAGE_CHARS} characters"
        )));
    }

    let result = state.interview.take_turn(id, &req.message).await?;
    Ok(Json(result))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.interview.view(id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.interview.discard(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
