pub mod exercises;
pub mod health;
pub mod workouts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy (all routes require a valid bearer token):
///
/// ```text
/// /workouts                    list for a day (?date=YYYY-MM-DD), create
/// /workouts/{id}               get, replace, delete
/// /workouts/{id}/edit          flattened edit document
/// /workouts/{id}/complete      mark completed (POST)
///
/// /exercises                   catalog listing
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/workouts", workouts::router())
        .nest("/exercises", exercises::router())
}
