//! Repository for the `evaluation_prompts` table.

use sqlx::PgPool;

use crate::models::evaluation_prompt::EvaluationPrompt;

const COLUMNS: &str = "id, document_type, content, created_at, updated_at";

pub struct EvaluationPromptRepo;

impl EvaluationPromptRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<EvaluationPrompt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM evaluation_prompts ORDER BY document_type");
        sqlx::query_as::<_, EvaluationPrompt>(&query).fetch_all(pool).await
    }

    pub async fn find(
        pool: &PgPool,
        document_type: &str,
    ) -> Result<Option<EvaluationPrompt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM evaluation_prompts WHERE document_type = $1");
        sqlx::query_as::<_, EvaluationPrompt>(&query)
            .bind(document_type)
            .fetch_optional(pool)
            .await
    }

    /// Create or replace the evaluation prompt of a document type.
    pub async fn upsert(
        pool: &PgPool,
        document_type: &str,
        content: &str,
    ) -> Result<EvaluationPrompt, sqlx::Error> {
        let query = format!(
            "INSERT INTO evaluation_prompts (document_type, content)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_evaluation_prompts_document_type
             DO UPDATE SET content = EXCLUDED.content, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EvaluationPrompt>(&query)
            .bind(document_type)
            .bind(content)
            .fetch_one(pool)
            .await
    }
}
