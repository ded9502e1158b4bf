//! Repository for the `prompts` table.

use sqlx::PgPool;

use crate::models::prompt::{Prompt, PromptKey, UpsertPrompt, UpsertedPrompt};

/// Column list for prompts queries.
const COLUMNS: &str = "id, department, document_type, doctor, content, \
    selected_model, is_default, created_at, updated_at";

/// Provides lookup, upsert and delete operations for prompt templates.
pub struct PromptRepo;

impl PromptRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Prompt>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompts
             ORDER BY is_default DESC, department, document_type, doctor"
        );
        sqlx::query_as::<_, Prompt>(&query).fetch_all(pool).await
    }

    /// Exact lookup by composite key.
    pub async fn find(pool: &PgPool, key: &PromptKey) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompts
             WHERE department = $1 AND document_type = $2 AND doctor = $3"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(&key.department)
            .bind(&key.document_type)
            .bind(&key.doctor)
            .fetch_optional(pool)
            .await
    }

    /// The single system default prompt.
    pub async fn find_default(pool: &PgPool) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prompts WHERE is_default LIMIT 1");
        sqlx::query_as::<_, Prompt>(&query).fetch_optional(pool).await
    }

    /// The prompt at `key`, falling back to the system default prompt.
    ///
    /// `None` only before the database has been seeded.
    pub async fn effective(pool: &PgPool, key: &PromptKey) -> Result<Option<Prompt>, sqlx::Error> {
        if let Some(prompt) = Self::find(pool, key).await? {
            return Ok(Some(prompt));
        }
        Self::find_default(pool).await
    }

    /// Create or replace the prompt at the input's key.
    ///
    /// Returns the stored row and `true` when it was newly inserted.
    pub async fn upsert(pool: &PgPool, input: &UpsertPrompt) -> Result<(Prompt, bool), sqlx::Error> {
        let query = format!(
            "INSERT INTO prompts (department, document_type, doctor, content, selected_model)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT uq_prompts_department_document_type_doctor
             DO UPDATE SET
                content        = EXCLUDED.content,
                selected_model = EXCLUDED.selected_model,
                updated_at     = NOW()
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        );
        let row = sqlx::query_as::<_, UpsertedPrompt>(&query)
            .bind(&input.department)
            .bind(&input.document_type)
            .bind(&input.doctor)
            .bind(&input.content)
            .bind(&input.selected_model)
            .fetch_one(pool)
            .await?;
        Ok((row.prompt, row.inserted))
    }

    /// Delete the prompt at `key`. The default prompt is never deleted.
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, key: &PromptKey) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM prompts
             WHERE department = $1 AND document_type = $2 AND doctor = $3
               AND NOT is_default",
        )
        .bind(&key.department)
        .bind(&key.document_type)
        .bind(&key.doctor)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_for_department(pool: &PgPool, department: &str) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM prompts WHERE department = $1")
            .bind(department)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Insert a prompt for every (doctor, document type) pair of a department
    /// that does not have one yet, copying the default prompt's content.
    /// Returns the number of rows inserted.
    pub(crate) async fn provision_department(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        department: &str,
        doctors: &[String],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO prompts (department, document_type, doctor, content)
             SELECT $1, dt.name, doc.name, def.content
             FROM document_types dt
             CROSS JOIN unnest($2::text[]) AS doc(name)
             CROSS JOIN (SELECT content FROM prompts WHERE is_default LIMIT 1) AS def
             ON CONFLICT (department, document_type, doctor) DO NOTHING",
        )
        .bind(department)
        .bind(doctors)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }

    /// Remove every prompt owned by a department.
    pub(crate) async fn delete_for_department(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        department: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM prompts WHERE department = $1 AND NOT is_default")
            .bind(department)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
