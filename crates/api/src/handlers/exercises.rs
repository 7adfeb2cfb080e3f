//! Handlers for the exercise catalog.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use liftlog_db::repositories::ExerciseRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/exercises
///
/// List the shared exercise catalog alphabetically. Used by the exercise
/// picker; rows are created lazily by workout writes, never here.
pub async fn list(_user: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let exercises = ExerciseRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: exercises }))
}
