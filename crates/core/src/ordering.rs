//! Dense display ordering for departments and document types.
//!
//! Rows carry an `order_index`; after every create, delete or move the
//! indices must be exactly `0..N`. Repositories load the names in current
//! order, apply one of these operations, and write back the positions.

use crate::error::CoreError;

/// Move `name` to position `target`, shifting the rows in between.
///
/// Targets past the end clamp to the last position.
pub fn move_to(names: &mut Vec<String>, name: &str, target: usize) -> Result<(), CoreError> {
    let current = names
        .iter()
        .position(|n| n == name)
        .ok_or_else(|| CoreError::NotFound {
            entity: "OrderedItem",
            key: name.to_string(),
        })?;

    let item = names.remove(current);
    let target = target.min(names.len());
    names.insert(target, item);
    Ok(())
}

/// Remove `name` if present. Positions of later rows shift down by one.
pub fn remove_and_repack(names: &mut Vec<String>, name: &str) -> bool {
    match names.iter().position(|n| n == name) {
        Some(idx) => {
            names.remove(idx);
            true
        }
        None => false,
    }
}

/// Whether the indices form exactly `{0, 1, ..., N-1}`.
pub fn is_dense(indices: &[i32]) -> bool {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .enumerate()
        .all(|(pos, &idx)| i32::try_from(pos).map_or(false, |p| p == idx))
}
