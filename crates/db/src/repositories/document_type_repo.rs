//! Repository for the `document_types` table.

use sqlx::PgPool;

use crate::models::document_type::{CreateDocumentType, DocumentType};
use crate::repositories::ordering;

const TABLE: &str = "document_types";

const COLUMNS: &str = "id, name, order_index, created_at, updated_at";

/// Provides CRUD and ordering operations for document types.
///
/// Deleting a document type leaves its prompts in place; they simply stop
/// being reachable from the selector.
pub struct DocumentTypeRepo;

impl DocumentTypeRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<DocumentType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM document_types ORDER BY order_index, id");
        sqlx::query_as::<_, DocumentType>(&query).fetch_all(pool).await
    }

    /// Document type names in display order.
    pub async fn names(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM document_types ORDER BY order_index, id")
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Append a document type at the end of the order.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDocumentType,
    ) -> Result<DocumentType, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let position = ordering::next_position(&mut tx, TABLE).await?;
        let query = format!(
            "INSERT INTO document_types (name, order_index)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let document_type = sqlx::query_as::<_, DocumentType>(&query)
            .bind(&input.name)
            .bind(position)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(document_type)
    }

    /// Delete a document type. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let deleted = ordering::delete_row(&mut tx, TABLE, name).await?;
        if deleted {
            tx.commit().await?;
        }
        Ok(deleted)
    }

    /// Move a document type to `position` (clamped to the last slot).
    pub async fn move_to(pool: &PgPool, name: &str, position: usize) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let moved = ordering::move_row(&mut tx, TABLE, name, position).await?;
        if moved {
            tx.commit().await?;
        }
        Ok(moved)
    }
}
