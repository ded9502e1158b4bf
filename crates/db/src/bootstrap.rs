//! Start-up sequence: connect, migrate (or fall back to plain DDL), seed.
//!
//! The whole sequence is retried with exponential backoff before the
//! process gives up. Seeding is idempotent so a retry after a partial
//! failure is safe.

use std::future::Future;
use std::time::Duration;

use medidoc_core::constants::{
    DEFAULT_DEPARTMENT, DEFAULT_DEPARTMENTS, DEFAULT_DOCTOR, DEFAULT_DOCUMENT_TYPE,
    DEFAULT_DOCUMENT_TYPES, DEFAULT_PROMPT_TEMPLATE,
};
use medidoc_core::doctors::DoctorDirectory;

use crate::repositories::{DepartmentRepo, PromptRepo};
use crate::{create_pool, ensure_schema, health_check, run_migrations, DbPool, PoolSettings};

/// Attempts made by [`bootstrap`] before giving up.
pub const MAX_ATTEMPTS: u32 = 5;

/// Delay before the second attempt; doubled after every failure.
pub const BASE_BACKOFF: Duration = Duration::from_secs(1);

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Failed to create schema: {0}")]
    Schema(#[source] sqlx::Error),

    #[error("Failed to seed default data: {0}")]
    Seed(#[source] sqlx::Error),

    #[error("Database initialization failed after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        last: Box<BootstrapError>,
    },
}

/// Data provisioned into an empty database.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub departments: Vec<String>,
    pub document_types: Vec<String>,
    pub directory: DoctorDirectory,
    pub default_prompt: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            departments: DEFAULT_DEPARTMENTS.iter().map(|s| s.to_string()).collect(),
            document_types: DEFAULT_DOCUMENT_TYPES.iter().map(|s| s.to_string()).collect(),
            directory: DoctorDirectory::default(),
            default_prompt: DEFAULT_PROMPT_TEMPLATE.to_string(),
        }
    }
}

/// Connect and prepare the database, retrying the whole sequence.
pub async fn bootstrap(
    database_url: &str,
    pool_settings: &PoolSettings,
    seed: &SeedConfig,
) -> Result<DbPool, BootstrapError> {
    retry_with_backoff(MAX_ATTEMPTS, BASE_BACKOFF, |attempt| async move {
        tracing::debug!(attempt, "Initializing database");
        let pool = create_pool(database_url, pool_settings)
            .await
            .map_err(BootstrapError::Connect)?;
        initialize(&pool, seed).await?;
        Ok(pool)
    })
    .await
}

/// Bring an already connected pool to a usable state.
pub async fn initialize(pool: &DbPool, seed: &SeedConfig) -> Result<(), BootstrapError> {
    health_check(pool).await.map_err(BootstrapError::Connect)?;

    if let Err(e) = run_migrations(pool).await {
        tracing::warn!(error = %e, "Migrations could not be applied, creating tables directly");
        ensure_schema(pool).await.map_err(BootstrapError::Schema)?;
    }

    seed_defaults(pool, seed).await.map_err(BootstrapError::Seed)?;
    Ok(())
}

/// Insert the default prompt, catalog rows and per-department prompts that
/// are missing. Existing rows are never modified.
pub async fn seed_defaults(pool: &DbPool, seed: &SeedConfig) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO prompts (department, document_type, doctor, content, is_default)
         VALUES ($1, $2, $3, $4, TRUE)
         ON CONFLICT (department, document_type, doctor) DO NOTHING",
    )
    .bind(DEFAULT_DEPARTMENT)
    .bind(DEFAULT_DOCUMENT_TYPE)
    .bind(DEFAULT_DOCTOR)
    .bind(&seed.default_prompt)
    .execute(&mut *tx)
    .await?;

    let (department_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM departments")
        .fetch_one(&mut *tx)
        .await?;
    if department_count == 0 {
        for (idx, name) in seed.departments.iter().enumerate() {
            sqlx::query("INSERT INTO departments (name, order_index) VALUES ($1, $2)")
                .bind(name)
                .bind(idx as i32)
                .execute(&mut *tx)
                .await?;
        }
    }

    let (document_type_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM document_types")
        .fetch_one(&mut *tx)
        .await?;
    if document_type_count == 0 {
        for (idx, name) in seed.document_types.iter().enumerate() {
            sqlx::query("INSERT INTO document_types (name, order_index) VALUES ($1, $2)")
                .bind(name)
                .bind(idx as i32)
                .execute(&mut *tx)
                .await?;
        }
    }

    let mut provisioned = 0;
    for department in DepartmentRepo::names_in_tx(&mut tx).await? {
        let doctors = seed.directory.doctors_for(&department);
        provisioned += PromptRepo::provision_department(&mut tx, &department, &doctors).await?;
    }

    tx.commit().await?;

    tracing::info!(provisioned_prompts = provisioned, "Default data seeded");
    Ok(())
}

/// Run `op` up to `max_attempts` times, sleeping `base_delay * 2^n` between
/// failures.
pub async fn retry_with_backoff<T, F, Fut>(
    max_attempts: u32,
    base_delay: Duration,
    mut op: F,
) -> Result<T, BootstrapError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, BootstrapError>>,
{
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= max_attempts => {
                tracing::error!(attempt, error = %e, "Database initialization failed");
                return Err(BootstrapError::Exhausted {
                    attempts: attempt,
                    last: Box::new(e),
                });
            }
            Err(e) => {
                let delay = base_delay * 2u32.pow(attempt - 1);
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_secs = delay.as_secs_f64(),
                    error = %e,
                    "Database initialization failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
