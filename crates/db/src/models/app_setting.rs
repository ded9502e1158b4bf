//! Persisted sidebar selection.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use medidoc_core::types::{DbId, Timestamp};

/// A row from the `app_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AppSetting {
    pub id: DbId,
    pub setting_id: String,
    pub selected_department: Option<String>,
    pub selected_model: Option<String>,
    pub selected_doctor: Option<String>,
    pub app_type: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for saving the last-used selection.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveAppSetting {
    pub selected_department: String,
    pub selected_model: Option<String>,
    pub selected_doctor: Option<String>,
    pub app_type: Option<String>,
}
