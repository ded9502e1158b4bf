//! Evaluation prompt models, one row per document type.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use medidoc_core::types::{DbId, Timestamp};

/// A row from the `evaluation_prompts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EvaluationPrompt {
    pub id: DbId,
    pub document_type: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveEvaluationPrompt {
    pub content: String,
}
