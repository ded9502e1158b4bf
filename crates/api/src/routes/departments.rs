use axum::routing::{get, put};
use axum::Router;

use crate::handlers::departments;
use crate::state::AppState;

/// Routes mounted at `/departments`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// PUT    /{name}                            -> update
/// DELETE /{name}                            -> delete
/// PUT    /{name}/order                      -> move_to
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(departments::list).post(departments::create))
        .route(
            "/{name}",
            put(departments::update).delete(departments::delete),
        )
        .route("/{name}/order", put(departments::move_to))
}
