//! Handlers for the `/departments` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use medidoc_core::constants::DEFAULT_DEPARTMENT;
use medidoc_core::error::CoreError;
use medidoc_db::models::department::{CreateDepartment, Department, MoveRequest, UpdateDepartment};
use medidoc_db::repositories::DepartmentRepo;

use super::{parse_model, required_name};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(name: String) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Department",
        key: name,
    })
}

/// GET /api/v1/departments
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Department>>>> {
    let departments = DepartmentRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: departments }))
}

/// POST /api/v1/departments
///
/// Provisions a prompt for every doctor of the department and every
/// document type.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<DataResponse<Department>>)> {
    let name = required_name(&input.name)?;
    if name == DEFAULT_DEPARTMENT {
        return Err(AppError::BadRequest(format!(
            "'{DEFAULT_DEPARTMENT}' is reserved for the shared department"
        )));
    }
    let default_model = parse_model(input.default_model.as_deref())?;

    let doctors = state.orchestrator.config().directory.doctors_for(&name);
    let input = CreateDepartment {
        name,
        default_model: default_model.map(|m| m.to_string()),
    };
    let department = DepartmentRepo::create(&state.pool, &input, &doctors).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: department })))
}

/// PUT /api/v1/departments/{name}
pub async fn update(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(input): Json<UpdateDepartment>,
) -> AppResult<Json<DataResponse<Department>>> {
    let default_model = parse_model(input.default_model.as_deref())?;
    let input = UpdateDepartment {
        default_model: default_model.map(|m| m.to_string()),
    };

    let department = DepartmentRepo::update(&state.pool, &name, &input)
        .await?
        .ok_or_else(|| not_found(name))?;
    Ok(Json(DataResponse { data: department }))
}

/// DELETE /api/v1/departments/{name}
pub async fn delete(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<StatusCode> {
    match DepartmentRepo::delete(&state.pool, &name).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(not_found(name)),
    }
}

/// PUT /api/v1/departments/{name}/order
///
/// Returns the list in its new order.
pub async fn move_to(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(input): Json<MoveRequest>,
) -> AppResult<Json<DataResponse<Vec<Department>>>> {
    if !DepartmentRepo::move_to(&state.pool, &name, input.position).await? {
        return Err(not_found(name));
    }
    tracing::info!(department = %name, position = input.position, "Department moved");

    let departments = DepartmentRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: departments }))
}
