//! Usage ledger models and aggregate views.

use serde::Serialize;
use sqlx::FromRow;
use medidoc_core::model_family::ModelFamily;
use medidoc_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the append-only `summary_usage` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UsageRecord {
    pub id: DbId,
    pub recorded_at: Timestamp,
    pub app_type: String,
    pub document_type: String,
    /// Concrete model identifier the provider was called with.
    pub model_detail: String,
    pub department: String,
    pub doctor: String,
    pub input_tokens: i64,
    pub output_tokens: i64,
    pub total_tokens: i64,
    pub processing_time_secs: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// A usage event to append. The total is derived, never supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUsageRecord {
    pub app_type: String,
    pub document_type: String,
    pub model_detail: String,
    pub department: String,
    pub doctor: String,
    pub input_tokens: i64,
    pub output_tokens: i64,
    pub processing_time_secs: f64,
}

impl NewUsageRecord {
    pub fn total_tokens(&self) -> i64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Reporting filter. `start` is inclusive, `end` exclusive.
#[derive(Debug, Clone, Default)]
pub struct UsageFilter {
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
    pub model: Option<ModelFamily>,
    pub document_type: Option<String>,
}

/// Totals over every record matching a filter.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct UsageTotals {
    pub count: i64,
    pub input_tokens: i64,
    pub output_tokens: i64,
    pub total_tokens: i64,
}

/// Totals grouped by department and document type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DepartmentUsage {
    pub department: String,
    pub document_type: String,
    pub count: i64,
    pub input_tokens: i64,
    pub output_tokens: i64,
    pub total_tokens: i64,
}
