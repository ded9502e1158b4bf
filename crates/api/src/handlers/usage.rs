//! Handlers for the usage statistics view.

use axum::extract::{Query, State};
use axum::Json;
use medidoc_core::model_family::{classify_model_detail, ModelFamily};
use medidoc_db::models::usage::{DepartmentUsage, UsageRecord, UsageTotals};
use medidoc_db::repositories::UsageRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::query::UsageQuery;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UsageSummary {
    pub totals: UsageTotals,
    pub by_department: Vec<DepartmentUsage>,
}

/// A ledger row with the family its `model_detail` belongs to.
#[derive(Debug, Serialize)]
pub struct UsageRow {
    #[serde(flatten)]
    pub record: UsageRecord,
    pub model_family: Option<ModelFamily>,
}

/// GET /api/v1/usage/summary
pub async fn summary(
    State(state): State<AppState>,
    Query(query): Query<UsageQuery>,
) -> AppResult<Json<DataResponse<UsageSummary>>> {
    let filter = query.into_filter()?;
    let totals = UsageRepo::totals(&state.pool, &filter).await?;
    let by_department = UsageRepo::by_department(&state.pool, &filter).await?;

    Ok(Json(DataResponse {
        data: UsageSummary {
            totals,
            by_department,
        },
    }))
}

/// GET /api/v1/usage/records
pub async fn records(
    State(state): State<AppState>,
    Query(query): Query<UsageQuery>,
) -> AppResult<Json<DataResponse<Vec<UsageRow>>>> {
    let filter = query.into_filter()?;
    let rows = UsageRepo::details(&state.pool, &filter)
        .await?
        .into_iter()
        .map(|record| UsageRow {
            model_family: classify_model_detail(&record.model_detail),
            record,
        })
        .collect();

    Ok(Json(DataResponse { data: rows }))
}
