//! Handlers for the `/prompts` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use medidoc_core::constants::MSG_DEFAULT_PROMPT_PROTECTED;
use medidoc_core::error::CoreError;
use medidoc_core::prompt::{is_default_prompt_key, validate_prompt_fields};
use medidoc_db::models::prompt::{Prompt, PromptKey, UpsertPrompt};
use medidoc_db::repositories::PromptRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(key: &PromptKey) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Prompt",
        key: format!("{}/{}/{}", key.department, key.document_type, key.doctor),
    })
}

/// GET /api/v1/prompts
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Prompt>>>> {
    let prompts = PromptRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: prompts }))
}

/// GET /api/v1/prompts/effective?department&document_type&doctor
///
/// The stored prompt for the key, or the system default prompt.
pub async fn effective(
    State(state): State<AppState>,
    Query(key): Query<PromptKey>,
) -> AppResult<Json<DataResponse<Prompt>>> {
    let prompt = PromptRepo::effective(&state.pool, &key)
        .await?
        .ok_or_else(|| not_found(&key))?;
    Ok(Json(DataResponse { data: prompt }))
}

/// PUT /api/v1/prompts
///
/// Returns 201 when a new prompt was created, 200 when one was replaced.
pub async fn upsert(
    State(state): State<AppState>,
    Json(input): Json<UpsertPrompt>,
) -> AppResult<(StatusCode, Json<DataResponse<Prompt>>)> {
    let model = validate_prompt_fields(
        &input.department,
        &input.document_type,
        &input.doctor,
        &input.content,
        input.selected_model.as_deref(),
    )?;
    let input = UpsertPrompt {
        selected_model: model.map(|m| m.to_string()),
        ..input
    };

    let (prompt, created) = PromptRepo::upsert(&state.pool, &input).await?;
    tracing::info!(
        department = %prompt.department,
        document_type = %prompt.document_type,
        doctor = %prompt.doctor,
        created,
        "Prompt saved",
    );

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DataResponse { data: prompt })))
}

/// DELETE /api/v1/prompts?department&document_type&doctor
pub async fn delete(
    State(state): State<AppState>,
    Query(key): Query<PromptKey>,
) -> AppResult<StatusCode> {
    let protected = || AppError::Core(CoreError::Conflict(MSG_DEFAULT_PROMPT_PROTECTED.into()));
    if is_default_prompt_key(&key.department, &key.document_type, &key.doctor) {
        return Err(protected());
    }

    let prompt = PromptRepo::find(&state.pool, &key)
        .await?
        .ok_or_else(|| not_found(&key))?;
    if prompt.is_default {
        return Err(protected());
    }

    PromptRepo::delete(&state.pool, &key).await?;
    Ok(StatusCode::NO_CONTENT)
}
