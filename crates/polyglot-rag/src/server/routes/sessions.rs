//! Session history endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::ChatTurn;

/// Turns of one session
#[derive(Debug, Serialize)]
pub struct SessionHistory {
    pub session_id: Uuid,
    pub turns: Vec<ChatTurn>,
}

/// GET /api/sessions/:id/history
pub async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionHistory>> {
    let turns = state
        .sessions()
        .history(&id)
        .ok_or_else(|| Error::SessionNotFound(id.to_string()))?;

    Ok(Json(SessionHistory { session_id: id, turns }))
}

/// POST /api/sessions/:id/clear
pub async fn clear_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionHistory>> {
    if !state.sessions().clear(&id) {
        return Err(Error::SessionNotFound(id.to_string()));
    }

    tracing::info!("Cleared session {}", id);
    Ok(Json(SessionHistory {
        session_id: id,
        turns: Vec::new(),
    }))
}

/// DELETE /api/sessions/:id
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    if !state.sessions().remove(&id) {
        return Err(Error::SessionNotFound(id.to_string()));
    }

    tracing::info!("Deleted session {}", id);
    Ok(StatusCode::NO_CONTENT)
}
