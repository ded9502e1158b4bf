//! Repository for the `departments` table.
//!
//! Departments own their prompts: creating one provisions a prompt per
//! (doctor, document type) and deleting one removes them, in the same
//! transaction as the department row.

use sqlx::PgPool;

use crate::models::department::{CreateDepartment, Department, UpdateDepartment};
use crate::repositories::{ordering, PromptRepo};

const TABLE: &str = "departments";

/// Column list for departments queries.
const COLUMNS: &str = "id, name, order_index, default_model, created_at, updated_at";

/// Provides CRUD and ordering operations for departments.
pub struct DepartmentRepo;

impl DepartmentRepo {
    /// All departments in display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Department>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM departments ORDER BY order_index, id");
        sqlx::query_as::<_, Department>(&query).fetch_all(pool).await
    }

    /// Department names in display order.
    pub async fn names(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM departments ORDER BY order_index, id")
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    pub(crate) async fn names_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM departments ORDER BY order_index, id")
                .fetch_all(&mut **tx)
                .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Append a department and provision its prompts for `doctors`.
    ///
    /// A duplicate name fails with the `uq_departments_name` violation.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDepartment,
        doctors: &[String],
    ) -> Result<Department, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let position = ordering::next_position(&mut tx, TABLE).await?;
        let query = format!(
            "INSERT INTO departments (name, order_index, default_model)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let department = sqlx::query_as::<_, Department>(&query)
            .bind(&input.name)
            .bind(position)
            .bind(&input.default_model)
            .fetch_one(&mut *tx)
            .await?;

        let provisioned = PromptRepo::provision_department(&mut tx, &department.name, doctors).await?;

        tx.commit().await?;
        tracing::info!(department = %department.name, provisioned, "Department created");
        Ok(department)
    }

    /// Update the default model. Returns `None` if the department does not exist.
    pub async fn update(
        pool: &PgPool,
        name: &str,
        input: &UpdateDepartment,
    ) -> Result<Option<Department>, sqlx::Error> {
        let query = format!(
            "UPDATE departments SET default_model = $2, updated_at = NOW()
             WHERE name = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Department>(&query)
            .bind(name)
            .bind(&input.default_model)
            .fetch_optional(pool)
            .await
    }

    /// Delete a department together with all of its prompts.
    ///
    /// Returns the number of prompts removed, or `None` if the department
    /// does not exist.
    pub async fn delete(pool: &PgPool, name: &str) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !ordering::delete_row(&mut tx, TABLE, name).await? {
            return Ok(None);
        }
        let removed = PromptRepo::delete_for_department(&mut tx, name).await?;

        tx.commit().await?;
        tracing::info!(department = %name, removed_prompts = removed, "Department deleted");
        Ok(Some(removed))
    }

    /// Move a department to `position` (clamped to the last slot).
    /// Returns `false` if the department does not exist.
    pub async fn move_to(pool: &PgPool, name: &str, position: usize) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let moved = ordering::move_row(&mut tx, TABLE, name, position).await?;
        if moved {
            tx.commit().await?;
        }
        Ok(moved)
    }
}
