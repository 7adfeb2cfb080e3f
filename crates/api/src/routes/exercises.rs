//! Route definitions for the `/exercises` catalog resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::exercises;
use crate::state::AppState;

/// Routes mounted at `/exercises`.
///
/// ```text
/// GET    /    -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(exercises::list))
}
