pub mod departments;
pub mod document_types;
pub mod evaluation_prompts;
pub mod generation;
pub mod health;
pub mod options;
pub mod prompts;
pub mod settings;
pub mod usage;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /options                                         sidebar choices and defaults
///
/// /departments                                     list, create
/// /departments/{name}                              update default model, delete
/// /departments/{name}/order                        move (PUT)
///
/// /document-types                                  list, create
/// /document-types/{name}                           delete
/// /document-types/{name}/order                     move (PUT)
///
/// /prompts                                         list, upsert (PUT), delete (?key)
/// /prompts/effective                               stored or default prompt (?key)
///
/// /usage/summary                                   totals and per-department totals
/// /usage/records                                   matching ledger rows
///
/// /settings                                        last-used selection (GET, PUT)
///
/// /evaluation-prompts                              list
/// /evaluation-prompts/{document_type}              stored or built-in (GET), save (PUT)
///
/// /sessions/{session_id}/generation                start (POST), poll (GET), clear (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/options", options::router())
        .nest("/departments", departments::router())
        .nest("/document-types", document_types::router())
        .nest("/prompts", prompts::router())
        .nest("/usage", usage::router())
        .nest("/settings", settings::router())
        .nest("/evaluation-prompts", evaluation_prompts::router())
        .nest("/sessions", generation::router())
}
