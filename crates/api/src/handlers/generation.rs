//! Handlers for per-session generations.
//!
//! Input and credential checks run before anything is spawned, so a
//! rejected request never occupies the session slot.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use medidoc_core::error::CoreError;
use medidoc_pipeline::{GenerationRequest, GenerationStatus};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(session_id: String) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Generation",
        key: session_id,
    })
}

/// POST /api/v1/sessions/{session_id}/generation
pub async fn start(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<GenerationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<GenerationStatus>>)> {
    state.orchestrator.precheck(&request)?;

    let status = state
        .sessions
        .start(&session_id, Arc::clone(&state.orchestrator), request)?;
    tracing::info!(session_id = %session_id, "Generation started");

    Ok((StatusCode::ACCEPTED, Json(DataResponse { data: status })))
}

/// GET /api/v1/sessions/{session_id}/generation
pub async fn status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> AppResult<Json<DataResponse<GenerationStatus>>> {
    let status = state
        .sessions
        .status(&session_id)?
        .ok_or_else(|| not_found(session_id))?;
    Ok(Json(DataResponse { data: status }))
}

/// DELETE /api/v1/sessions/{session_id}/generation
pub async fn clear(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> AppResult<StatusCode> {
    if state.sessions.clear(&session_id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(session_id))
    }
}
