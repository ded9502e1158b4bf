use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::document_types;
use crate::state::AppState;

/// Routes mounted at `/document-types`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// DELETE /{name}                            -> delete
/// PUT    /{name}/order                      -> move_to
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(document_types::list).post(document_types::create))
        .route("/{name}", delete(document_types::delete))
        .route("/{name}/order", put(document_types::move_to))
}
