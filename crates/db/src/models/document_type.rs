//! Document type models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use medidoc_core::types::{DbId, Timestamp};

/// A row from the `document_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DocumentType {
    pub id: DbId,
    pub name: String,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocumentType {
    pub name: String,
}
