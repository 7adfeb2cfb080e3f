//! Workout entity rows and aggregate write DTOs.

use liftlog_core::types::{DbId, Timestamp};
use liftlog_core::workout::ExerciseSpec;
use rust_decimal::Decimal;
use sqlx::FromRow;

/// A row from the `workouts` table.
#[derive(Debug, Clone, FromRow)]
pub struct WorkoutRow {
    pub id: DbId,
    pub owner_user_id: String,
    pub name: String,
    pub started_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A `workout_exercises` row joined with its catalog exercise name.
#[derive(Debug, Clone, FromRow)]
pub struct WorkoutExerciseRow {
    pub id: DbId,
    pub workout_id: DbId,
    pub exercise_id: DbId,
    pub exercise_name: String,
    pub position: i32,
}

/// A row from the `sets` table.
#[derive(Debug, Clone, FromRow)]
pub struct SetRow {
    pub id: DbId,
    pub workout_exercise_id: DbId,
    pub set_number: i32,
    pub weight: Option<Decimal>,
    pub reps: Option<i32>,
}

/// Input for creating a workout aggregate.
#[derive(Debug, Clone)]
pub struct CreateWorkout {
    pub name: String,
    pub started_at: Timestamp,
    pub exercises: Vec<ExerciseSpec>,
}

/// Input for the full-tree replace performed by update.
#[derive(Debug, Clone)]
pub struct ReplaceWorkout {
    pub name: String,
    pub started_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub exercises: Vec<ExerciseSpec>,
}
