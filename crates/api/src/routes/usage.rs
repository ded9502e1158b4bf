use axum::routing::get;
use axum::Router;

use crate::handlers::usage;
use crate::state::AppState;

/// Routes mounted at `/usage`.
///
/// Both accept `?start&end&model&document_type`.
///
/// ```text
/// GET    /summary                           -> summary
/// GET    /records                           -> records
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(usage::summary))
        .route("/records", get(usage::records))
}
