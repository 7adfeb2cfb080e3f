//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or, for transaction-scoped helpers, a connection) as
//! the first argument.

pub mod exercise_repo;
pub mod workout_repo;

pub use exercise_repo::ExerciseRepo;
pub use workout_repo::{ReplaceWorkoutError, WorkoutRepo};
