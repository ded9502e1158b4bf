//! Handlers for the `/document-types` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use medidoc_core::constants::DEFAULT_DOCUMENT_TYPE;
use medidoc_core::error::CoreError;
use medidoc_db::models::department::MoveRequest;
use medidoc_db::models::document_type::{CreateDocumentType, DocumentType};
use medidoc_db::repositories::DocumentTypeRepo;

use super::required_name;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(name: String) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "DocumentType",
        key: name,
    })
}

/// GET /api/v1/document-types
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<DocumentType>>>> {
    let document_types = DocumentTypeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: document_types,
    }))
}

/// POST /api/v1/document-types
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateDocumentType>,
) -> AppResult<(StatusCode, Json<DataResponse<DocumentType>>)> {
    let input = CreateDocumentType {
        name: required_name(&input.name)?,
    };
    let document_type = DocumentTypeRepo::create(&state.pool, &input).await?;

    tracing::info!(document_type = %document_type.name, "Document type created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: document_type,
        }),
    ))
}

/// DELETE /api/v1/document-types/{name}
///
/// The document type of the default prompt cannot be deleted.
pub async fn delete(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<StatusCode> {
    if name == DEFAULT_DOCUMENT_TYPE {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "既定の文書種類「{DEFAULT_DOCUMENT_TYPE}」は削除できません"
        ))));
    }

    if DocumentTypeRepo::delete(&state.pool, &name).await? {
        tracing::info!(document_type = %name, "Document type deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(name))
    }
}

/// PUT /api/v1/document-types/{name}/order
pub async fn move_to(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(input): Json<MoveRequest>,
) -> AppResult<Json<DataResponse<Vec<DocumentType>>>> {
    if !DocumentTypeRepo::move_to(&state.pool, &name, input.position).await? {
        return Err(not_found(name));
    }

    let document_types = DocumentTypeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: document_types,
    }))
}
