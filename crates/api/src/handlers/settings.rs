//! Handlers for the persisted sidebar selection.

use axum::extract::State;
use axum::Json;
use medidoc_core::constants::USER_PREFERENCES_SETTING_ID;
use medidoc_db::models::app_setting::{AppSetting, SaveAppSetting};
use medidoc_db::repositories::AppSettingRepo;

use super::{parse_model, required_name};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/settings
///
/// `data` is `null` until a selection has been saved.
pub async fn load(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Option<AppSetting>>>> {
    let setting = AppSettingRepo::load(&state.pool, USER_PREFERENCES_SETTING_ID).await?;
    Ok(Json(DataResponse { data: setting }))
}

/// PUT /api/v1/settings
///
/// A department that no longer exists is stored as the shared default.
pub async fn save(
    State(state): State<AppState>,
    Json(input): Json<SaveAppSetting>,
) -> AppResult<Json<DataResponse<AppSetting>>> {
    let model = parse_model(input.selected_model.as_deref())?;
    let input = SaveAppSetting {
        selected_department: required_name(&input.selected_department)?,
        selected_model: model.map(|m| m.to_string()),
        ..input
    };

    let setting = AppSettingRepo::save(&state.pool, USER_PREFERENCES_SETTING_ID, &input).await?;
    tracing::debug!(department = ?setting.selected_department, "Settings saved");
    Ok(Json(DataResponse { data: setting }))
}
