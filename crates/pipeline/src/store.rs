//! Persistence seam used by the orchestrator.

use async_trait::async_trait;
use medidoc_db::models::prompt::{Prompt, PromptKey};
use medidoc_db::models::usage::NewUsageRecord;
use medidoc_db::repositories::{DepartmentRepo, DocumentTypeRepo, PromptRepo, UsageRepo};
use medidoc_db::DbPool;

/// Template text and model override resolved for a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectivePrompt {
    pub content: String,
    /// Logical model family name, when the prompt pins one.
    pub selected_model: Option<String>,
}

impl From<Prompt> for EffectivePrompt {
    fn from(prompt: Prompt) -> Self {
        Self {
            content: prompt.content,
            selected_model: prompt.selected_model,
        }
    }
}

/// Everything the orchestrator reads from or writes to storage.
#[async_trait]
pub trait GenerationStore: Send + Sync {
    async fn department_names(&self) -> Result<Vec<String>, sqlx::Error>;

    async fn document_type_names(&self) -> Result<Vec<String>, sqlx::Error>;

    /// Exact prompt for `key`, else the system default prompt.
    async fn effective_prompt(&self, key: &PromptKey)
        -> Result<Option<EffectivePrompt>, sqlx::Error>;

    async fn record_usage(&self, record: &NewUsageRecord) -> Result<(), sqlx::Error>;
}

/// [`GenerationStore`] backed by the PostgreSQL repositories.
#[derive(Clone)]
pub struct PgGenerationStore {
    pool: DbPool,
}

impl PgGenerationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenerationStore for PgGenerationStore {
    async fn department_names(&self) -> Result<Vec<String>, sqlx::Error> {
        DepartmentRepo::names(&self.pool).await
    }

    async fn document_type_names(&self) -> Result<Vec<String>, sqlx::Error> {
        DocumentTypeRepo::names(&self.pool).await
    }

    async fn effective_prompt(
        &self,
        key: &PromptKey,
    ) -> Result<Option<EffectivePrompt>, sqlx::Error> {
        Ok(PromptRepo::effective(&self.pool, key)
            .await?
            .map(EffectivePrompt::from))
    }

    async fn record_usage(&self, record: &NewUsageRecord) -> Result<(), sqlx::Error> {
        UsageRepo::insert(&self.pool, record).await.map(|_| ())
    }
}
