//! Handlers for the evaluation prompt settings.

use axum::extract::{Path, State};
use axum::Json;
use medidoc_core::error::CoreError;
use medidoc_core::evaluation::default_evaluation_prompt;
use medidoc_db::models::evaluation_prompt::{EvaluationPrompt, SaveEvaluationPrompt};
use medidoc_db::repositories::EvaluationPromptRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// The prompt shown in the editor for one document type.
#[derive(Debug, Serialize)]
pub struct EvaluationPromptView {
    pub document_type: String,
    pub content: String,
    /// `true` while the built-in prompt has not been overridden.
    pub is_default: bool,
}

/// GET /api/v1/evaluation-prompts
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<EvaluationPrompt>>>> {
    let prompts = EvaluationPromptRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: prompts }))
}

/// GET /api/v1/evaluation-prompts/{document_type}
pub async fn get_for_document_type(
    State(state): State<AppState>,
    Path(document_type): Path<String>,
) -> AppResult<Json<DataResponse<EvaluationPromptView>>> {
    if let Some(stored) = EvaluationPromptRepo::find(&state.pool, &document_type).await? {
        return Ok(Json(DataResponse {
            data: EvaluationPromptView {
                document_type: stored.document_type,
                content: stored.content,
                is_default: false,
            },
        }));
    }

    let content = default_evaluation_prompt(&document_type).ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "EvaluationPrompt",
            key: document_type.clone(),
        })
    })?;
    Ok(Json(DataResponse {
        data: EvaluationPromptView {
            document_type,
            content: content.to_string(),
            is_default: true,
        },
    }))
}

/// PUT /api/v1/evaluation-prompts/{document_type}
pub async fn save(
    State(state): State<AppState>,
    Path(document_type): Path<String>,
    Json(input): Json<SaveEvaluationPrompt>,
) -> AppResult<Json<DataResponse<EvaluationPrompt>>> {
    if input.content.trim().is_empty() {
        return Err(AppError::BadRequest("評価プロンプトを入力してください".into()));
    }

    let prompt = EvaluationPromptRepo::upsert(&state.pool, &document_type, &input.content).await?;
    tracing::info!(document_type = %prompt.document_type, "Evaluation prompt saved");
    Ok(Json(DataResponse { data: prompt }))
}
