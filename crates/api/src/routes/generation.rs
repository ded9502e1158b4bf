use axum::routing::post;
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// Routes mounted at `/sessions`.
///
/// ```text
/// POST   /{session_id}/generation           -> start
/// GET    /{session_id}/generation           -> status
/// DELETE /{session_id}/generation           -> clear
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{session_id}/generation",
        post(generation::start)
            .get(generation::status)
            .delete(generation::clear),
    )
}
