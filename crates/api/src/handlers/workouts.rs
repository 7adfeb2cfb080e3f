//! Handlers for the `/workouts` resource.
//!
//! Every handler is scoped to the authenticated subject. A workout owned
//! by someone else is reported as 404, never 403, so the existence of
//! other users' data is not leaked.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{NaiveDate, Utc};
use liftlog_core::day::day_window;
use liftlog_core::document::{self, EditDocument};
use liftlog_core::error::CoreError;
use liftlog_core::types::DbId;
use liftlog_db::models::workout::{CreateWorkout, ReplaceWorkout};
use liftlog_db::repositories::WorkoutRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the day listing.
#[derive(Debug, Deserialize)]
pub struct DayQuery {
    /// Calendar date in `YYYY-MM-DD` form, interpreted as a UTC day.
    pub date: NaiveDate,
}

/// GET /api/v1/workouts?date=YYYY-MM-DD
///
/// List the authenticated user's workouts for one calendar day, most
/// recent first, each with its full exercise/set tree.
pub async fn list_for_day(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> AppResult<impl IntoResponse> {
    let window = day_window(query.date);
    let workouts =
        WorkoutRepo::list_for_user_in_window(&state.pool, &user.subject, window).await?;
    Ok(Json(DataResponse { data: workouts }))
}

/// POST /api/v1/workouts
///
/// Create a workout from an edit document. Validation runs before any
/// store call.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(doc): Json<EditDocument>,
) -> AppResult<impl IntoResponse> {
    let exercises = document::exercise_specs(&doc)?;
    let input = CreateWorkout {
        name: doc.name.trim().to_string(),
        started_at: doc.started_at,
        exercises,
    };
    let workout = WorkoutRepo::create_aggregate(&state.pool, &user.subject, &input).await?;

    tracing::info!(user = %user.subject, workout_id = %workout.id, "Workout created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: workout })))
}

/// GET /api/v1/workouts/{id}
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let workout = WorkoutRepo::find_by_id(&state.pool, id, &user.subject)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "workout",
            id,
        }))?;
    Ok(Json(DataResponse { data: workout }))
}

/// GET /api/v1/workouts/{id}/edit
///
/// The flattened edit-document form consumed by the edit flow.
pub async fn get_edit_document(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let workout = WorkoutRepo::find_by_id(&state.pool, id, &user.subject)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "workout",
            id,
        }))?;
    Ok(Json(DataResponse {
        data: document::to_edit_document(&workout),
    }))
}

/// PUT /api/v1/workouts/{id}
///
/// Full-tree replace: scalar fields and the entire exercise/set
/// composition are swapped in one transaction.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(doc): Json<EditDocument>,
) -> AppResult<impl IntoResponse> {
    let exercises = document::exercise_specs(&doc)?;
    let input = ReplaceWorkout {
        name: doc.name.trim().to_string(),
        started_at: doc.started_at,
        completed_at: doc.completed_at,
        exercises,
    };
    let workout = WorkoutRepo::replace_aggregate(&state.pool, id, &user.subject, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "workout",
            id,
        }))?;

    tracing::info!(user = %user.subject, workout_id = %workout.id, "Workout replaced");
    Ok(Json(DataResponse { data: workout }))
}

/// POST /api/v1/workouts/{id}/complete
///
/// Mark an in-progress workout completed. Completion is one-way.
pub async fn complete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let completed = WorkoutRepo::complete(&state.pool, id, &user.subject, Utc::now()).await?;
    match completed {
        Some(workout) => {
            tracing::info!(user = %user.subject, workout_id = %workout.id, "Workout completed");
            Ok(Json(DataResponse { data: workout }))
        }
        // Tell "already completed" apart from "missing" for the caller.
        None => match WorkoutRepo::find_by_id(&state.pool, id, &user.subject).await? {
            Some(_) => Err(AppError::Core(CoreError::Conflict(
                "workout is already completed".into(),
            ))),
            None => Err(AppError::Core(CoreError::NotFound {
                entity: "workout",
                id,
            })),
        },
    }
}

/// DELETE /api/v1/workouts/{id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if WorkoutRepo::delete(&state.pool, id, &user.subject).await? {
        tracing::info!(user = %user.subject, workout_id = %id, "Workout deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "workout",
            id,
        }))
    }
}
