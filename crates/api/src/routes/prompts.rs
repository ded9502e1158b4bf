use axum::routing::get;
use axum::Router;

use crate::handlers::prompts;
use crate::state::AppState;

/// Routes mounted at `/prompts`.
///
/// The composite key travels in the query string
/// (`?department&document_type&doctor`); missing parts mean `default`.
///
/// ```text
/// GET    /                                  -> list
/// PUT    /                                  -> upsert
/// DELETE /?department&document_type&doctor  -> delete
/// GET    /effective?department&...          -> effective
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(prompts::list).put(prompts::upsert).delete(prompts::delete),
        )
        .route("/effective", get(prompts::effective))
}
