use axum::routing::get;
use axum::Router;

use crate::handlers::evaluation_prompts;
use crate::state::AppState;

/// Routes mounted at `/evaluation-prompts`.
///
/// ```text
/// GET    /                                  -> list
/// GET    /{document_type}                   -> get_for_document_type
/// PUT    /{document_type}                   -> save
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(evaluation_prompts::list))
        .route(
            "/{document_type}",
            get(evaluation_prompts::get_for_document_type).put(evaluation_prompts::save),
        )
}
