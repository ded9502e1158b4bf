//! Shared helpers for tables with a dense `order_index` column.

use medidoc_core::ordering;

type Tx<'a> = sqlx::Transaction<'a, sqlx::Postgres>;

/// Names of all rows in display order, locking them for the transaction.
pub(crate) async fn load_names(tx: &mut Tx<'_>, table: &str) -> Result<Vec<String>, sqlx::Error> {
    let query = format!("SELECT name FROM {table} ORDER BY order_index, id FOR UPDATE");
    let rows: Vec<(String,)> = sqlx::query_as(&query).fetch_all(&mut **tx).await?;
    Ok(rows.into_iter().map(|(name,)| name).collect())
}

/// Rewrite `order_index` so each row sits at its position in `names`.
pub(crate) async fn write_positions(
    tx: &mut Tx<'_>,
    table: &str,
    names: &[String],
) -> Result<(), sqlx::Error> {
    let query = format!(
        "UPDATE {table} SET order_index = $1, updated_at = NOW()
         WHERE name = $2 AND order_index <> $1"
    );
    for (position, name) in names.iter().enumerate() {
        sqlx::query(&query)
            .bind(position as i32)
            .bind(name)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

/// Move `name` to `position`. Returns `false` when no such row exists.
pub(crate) async fn move_row(
    tx: &mut Tx<'_>,
    table: &str,
    name: &str,
    position: usize,
) -> Result<bool, sqlx::Error> {
    let mut names = load_names(tx, table).await?;
    if ordering::move_to(&mut names, name, position).is_err() {
        return Ok(false);
    }
    write_positions(tx, table, &names).await?;
    Ok(true)
}

/// Delete `name` and close the gap it leaves. Returns `false` when no such
/// row exists.
pub(crate) async fn delete_row(tx: &mut Tx<'_>, table: &str, name: &str) -> Result<bool, sqlx::Error> {
    let mut names = load_names(tx, table).await?;
    if !ordering::remove_and_repack(&mut names, name) {
        return Ok(false);
    }
    let query = format!("DELETE FROM {table} WHERE name = $1");
    sqlx::query(&query).bind(name).execute(&mut **tx).await?;
    write_positions(tx, table, &names).await?;
    Ok(true)
}

/// Position for a row appended at the end.
pub(crate) async fn next_position(tx: &mut Tx<'_>, table: &str) -> Result<i32, sqlx::Error> {
    let query = format!("SELECT COALESCE(MAX(order_index) + 1, 0) FROM {table}");
    let (next,): (i32,) = sqlx::query_as(&query).fetch_one(&mut **tx).await?;
    Ok(next)
}
