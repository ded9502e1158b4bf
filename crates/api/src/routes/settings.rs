use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes mounted at `/settings`.
///
/// ```text
/// GET    /                                  -> load
/// PUT    /                                  -> save
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(settings::load).put(settings::save))
}
