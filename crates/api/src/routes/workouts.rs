//! Route definitions for the `/workouts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::workouts;
use crate::state::AppState;

/// Routes mounted at `/workouts`.
///
/// ```text
/// GET    /                 -> list_for_day
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// DELETE /{id}             -> delete
/// GET    /{id}/edit        -> get_edit_document
/// POST   /{id}/complete    -> complete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(workouts::list_for_day).post(workouts::create))
        .route(
            "/{id}",
            get(workouts::get_by_id)
                .put(workouts::update)
                .delete(workouts::delete),
        )
        .route("/{id}/edit", get(workouts::get_edit_document))
        .route("/{id}/complete", post(workouts::complete))
}
