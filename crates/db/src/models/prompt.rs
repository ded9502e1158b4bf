//! Prompt template models and DTOs.
//!
//! A prompt is keyed by (department, document_type, doctor). Exactly one
//! row carries `is_default`; it is the fallback for every lookup miss.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use medidoc_core::constants::{DEFAULT_DEPARTMENT, DEFAULT_DOCTOR, DEFAULT_DOCUMENT_TYPE};
use medidoc_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `prompts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Prompt {
    pub id: DbId,
    pub department: String,
    pub document_type: String,
    pub doctor: String,
    pub content: String,
    /// Logical model family name overriding the session default.
    pub selected_model: Option<String>,
    pub is_default: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Prompt row plus whether the upsert inserted it.
#[derive(Debug, FromRow)]
pub(crate) struct UpsertedPrompt {
    #[sqlx(flatten)]
    pub prompt: Prompt,
    pub inserted: bool,
}

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Composite key identifying a prompt, also used as query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptKey {
    #[serde(default = "default_department")]
    pub department: String,
    #[serde(default = "default_document_type")]
    pub document_type: String,
    #[serde(default = "default_doctor")]
    pub doctor: String,
}

fn default_department() -> String {
    DEFAULT_DEPARTMENT.to_string()
}

fn default_document_type() -> String {
    DEFAULT_DOCUMENT_TYPE.to_string()
}

fn default_doctor() -> String {
    DEFAULT_DOCTOR.to_string()
}

impl PromptKey {
    pub fn new(
        department: impl Into<String>,
        document_type: impl Into<String>,
        doctor: impl Into<String>,
    ) -> Self {
        Self {
            department: department.into(),
            document_type: document_type.into(),
            doctor: doctor.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Upsert DTO
// ---------------------------------------------------------------------------

/// Input for creating or replacing the prompt at a key.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertPrompt {
    pub department: String,
    pub document_type: String,
    pub doctor: String,
    pub content: String,
    pub selected_model: Option<String>,
}
