//! Department models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use medidoc_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `departments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Department {
    pub id: DbId,
    pub name: String,
    pub order_index: i32,
    pub default_model: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDepartment {
    pub name: String,
    pub default_model: Option<String>,
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Only the default model is editable; `None` clears it.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDepartment {
    pub default_model: Option<String>,
}

// ---------------------------------------------------------------------------
// API request types
// ---------------------------------------------------------------------------

/// Request body for moving a department or document type.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MoveRequest {
    pub position: usize,
}
