//! Handler for the sidebar choices.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use medidoc_core::constants::{
    DEFAULT_ADDITIONAL_INFO, DEFAULT_DEPARTMENT, DEFAULT_DEPARTMENT_LABEL, DEFAULT_DOCTOR,
};
use medidoc_core::model_family::{default_family, ModelFamily};
use medidoc_db::repositories::{DepartmentRepo, DocumentTypeRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DepartmentOption {
    pub name: String,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct SelectionDefaults {
    pub department: &'static str,
    pub document_type: Option<String>,
    pub doctor: &'static str,
    pub model: Option<ModelFamily>,
    pub additional_info: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Options {
    /// The shared default department first, then the catalog order.
    pub departments: Vec<DepartmentOption>,
    pub doctors: BTreeMap<String, Vec<String>>,
    pub document_types: Vec<String>,
    pub available_models: Vec<ModelFamily>,
    pub defaults: SelectionDefaults,
}

/// GET /api/v1/options
pub async fn get_options(State(state): State<AppState>) -> AppResult<Json<DataResponse<Options>>> {
    let department_names = DepartmentRepo::names(&state.pool).await?;
    let document_types = DocumentTypeRepo::names(&state.pool).await?;

    let directory = &state.orchestrator.config().directory;
    let departments: Vec<DepartmentOption> = std::iter::once(DepartmentOption {
        name: DEFAULT_DEPARTMENT.to_string(),
        label: DEFAULT_DEPARTMENT_LABEL.to_string(),
    })
    .chain(department_names.into_iter().map(|name| DepartmentOption {
        label: name.clone(),
        name,
    }))
    .collect();
    let doctors = departments
        .iter()
        .map(|d| (d.name.clone(), directory.doctors_for(&d.name)))
        .collect();

    let available_models = state.orchestrator.registry().available();
    let configured = state.orchestrator.config().default_model;
    let model = if available_models.contains(&configured) {
        Some(configured)
    } else {
        default_family(&available_models)
    };

    let defaults = SelectionDefaults {
        department: DEFAULT_DEPARTMENT,
        document_type: document_types.first().cloned(),
        doctor: DEFAULT_DOCTOR,
        model,
        additional_info: DEFAULT_ADDITIONAL_INFO,
    };

    Ok(Json(DataResponse {
        data: Options {
            departments,
            doctors,
            document_types,
            available_models,
            defaults,
        },
    }))
}
