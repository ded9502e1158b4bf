//! Repository for the append-only `summary_usage` ledger.
//!
//! The model filter is applied to `model_detail` with the family's
//! substring pattern, because the ledger stores concrete model ids.

use sqlx::PgPool;
use medidoc_core::types::Timestamp;

use crate::models::usage::{DepartmentUsage, NewUsageRecord, UsageFilter, UsageRecord, UsageTotals};

const COLUMNS: &str = "id, recorded_at, app_type, document_type, model_detail, department, \
    doctor, input_tokens, output_tokens, total_tokens, processing_time_secs, \
    created_at, updated_at";

/// Shared WHERE clause; binds are `$1..$5` in [`bind_filter`] order.
const FILTER: &str = "($1::timestamptz IS NULL OR recorded_at >= $1)
    AND ($2::timestamptz IS NULL OR recorded_at < $2)
    AND ($3::text IS NULL OR model_detail ILIKE '%' || $3 || '%')
    AND ($4::text IS NULL OR model_detail NOT ILIKE '%' || $4 || '%')
    AND ($5::text IS NULL OR document_type = $5)";

/// Filter values in bind order.
struct FilterBinds<'a> {
    start: Option<Timestamp>,
    end: Option<Timestamp>,
    pattern: Option<&'static str>,
    exclude: Option<&'static str>,
    document_type: Option<&'a str>,
}

fn bind_filter(filter: &UsageFilter) -> FilterBinds<'_> {
    let pattern = filter.model.map(|m| m.usage_pattern());
    FilterBinds {
        start: filter.start,
        end: filter.end,
        pattern: pattern.map(|p| p.pattern),
        exclude: pattern.and_then(|p| p.exclude),
        document_type: filter.document_type.as_deref(),
    }
}

/// Provides insert and reporting queries for usage records.
pub struct UsageRepo;

impl UsageRepo {
    /// Append a usage record. `total_tokens` is computed here.
    pub async fn insert(pool: &PgPool, input: &NewUsageRecord) -> Result<UsageRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO summary_usage
                (app_type, document_type, model_detail, department, doctor,
                 input_tokens, output_tokens, total_tokens, processing_time_secs)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UsageRecord>(&query)
            .bind(&input.app_type)
            .bind(&input.document_type)
            .bind(&input.model_detail)
            .bind(&input.department)
            .bind(&input.doctor)
            .bind(input.input_tokens)
            .bind(input.output_tokens)
            .bind(input.total_tokens())
            .bind(input.processing_time_secs)
            .fetch_one(pool)
            .await
    }

    /// Count and token sums over matching records.
    pub async fn totals(pool: &PgPool, filter: &UsageFilter) -> Result<UsageTotals, sqlx::Error> {
        let binds = bind_filter(filter);
        let query = format!(
            "SELECT COUNT(*) AS count,
                    COALESCE(SUM(input_tokens), 0)::BIGINT AS input_tokens,
                    COALESCE(SUM(output_tokens), 0)::BIGINT AS output_tokens,
                    COALESCE(SUM(total_tokens), 0)::BIGINT AS total_tokens
             FROM summary_usage
             WHERE {FILTER}"
        );
        sqlx::query_as::<_, UsageTotals>(&query)
            .bind(binds.start)
            .bind(binds.end)
            .bind(binds.pattern)
            .bind(binds.exclude)
            .bind(binds.document_type)
            .fetch_one(pool)
            .await
    }

    /// Totals per (department, document type), busiest first.
    pub async fn by_department(
        pool: &PgPool,
        filter: &UsageFilter,
    ) -> Result<Vec<DepartmentUsage>, sqlx::Error> {
        let binds = bind_filter(filter);
        let query = format!(
            "SELECT department, document_type,
                    COUNT(*) AS count,
                    COALESCE(SUM(input_tokens), 0)::BIGINT AS input_tokens,
                    COALESCE(SUM(output_tokens), 0)::BIGINT AS output_tokens,
                    COALESCE(SUM(total_tokens), 0)::BIGINT AS total_tokens
             FROM summary_usage
             WHERE {FILTER}
             GROUP BY department, document_type
             ORDER BY count DESC, department, document_type"
        );
        sqlx::query_as::<_, DepartmentUsage>(&query)
            .bind(binds.start)
            .bind(binds.end)
            .bind(binds.pattern)
            .bind(binds.exclude)
            .bind(binds.document_type)
            .fetch_all(pool)
            .await
    }

    /// Matching records, newest first.
    pub async fn details(
        pool: &PgPool,
        filter: &UsageFilter,
    ) -> Result<Vec<UsageRecord>, sqlx::Error> {
        let binds = bind_filter(filter);
        let query = format!(
            "SELECT {COLUMNS} FROM summary_usage
             WHERE {FILTER}
             ORDER BY recorded_at DESC, id DESC"
        );
        sqlx::query_as::<_, UsageRecord>(&query)
            .bind(binds.start)
            .bind(binds.end)
            .bind(binds.pattern)
            .bind(binds.exclude)
            .bind(binds.document_type)
            .fetch_all(pool)
            .await
    }
}
