use axum::routing::get;
use axum::Router;

use crate::handlers::options;
use crate::state::AppState;

/// Routes mounted at `/options`.
///
/// ```text
/// GET    /                                  -> get_options
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(options::get_options))
}
