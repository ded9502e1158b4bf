//! Repository for the `app_settings` table.

use sqlx::PgPool;
use medidoc_core::constants::DEFAULT_DEPARTMENT;

use crate::models::app_setting::{AppSetting, SaveAppSetting};

const COLUMNS: &str = "id, setting_id, selected_department, selected_model, \
    selected_doctor, app_type, created_at, updated_at";

/// Stores the last-used selection, one row per `setting_id`.
pub struct AppSettingRepo;

impl AppSettingRepo {
    pub async fn load(pool: &PgPool, setting_id: &str) -> Result<Option<AppSetting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM app_settings WHERE setting_id = $1");
        sqlx::query_as::<_, AppSetting>(&query)
            .bind(setting_id)
            .fetch_optional(pool)
            .await
    }

    /// Upsert the selection. A department that no longer exists is stored
    /// as the shared default department.
    pub async fn save(
        pool: &PgPool,
        setting_id: &str,
        input: &SaveAppSetting,
    ) -> Result<AppSetting, sqlx::Error> {
        let query = format!(
            "INSERT INTO app_settings
                (setting_id, selected_department, selected_model, selected_doctor, app_type)
             VALUES (
                $1,
                CASE WHEN $2 = $6 OR EXISTS (SELECT 1 FROM departments WHERE name = $2)
                     THEN $2 ELSE $6 END,
                $3, $4, $5
             )
             ON CONFLICT ON CONSTRAINT uq_app_settings_setting_id
             DO UPDATE SET
                selected_department = EXCLUDED.selected_department,
                selected_model      = EXCLUDED.selected_model,
                selected_doctor     = EXCLUDED.selected_doctor,
                app_type            = EXCLUDED.app_type,
                updated_at          = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AppSetting>(&query)
            .bind(setting_id)
            .bind(&input.selected_department)
            .bind(&input.selected_model)
            .bind(&input.selected_doctor)
            .bind(&input.app_type)
            .bind(DEFAULT_DEPARTMENT)
            .fetch_one(pool)
            .await
    }
}
