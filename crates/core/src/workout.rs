//! Workout aggregate and input-spec types.
//!
//! A [`WorkoutAggregate`] is a workout together with its full tree of
//! exercise entries and sets, treated as one consistency unit. The input
//! side ([`ExerciseSpec`], [`SetSpec`]) carries no identifiers or sequence
//! numbers; position is implied by list order and assigned at persistence.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Catalog exercise referenced by a workout entry.
///
/// The catalog is global and de-duplicated by name; rows are shared across
/// users and workouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRef {
    pub id: DbId,
    pub name: String,
}

/// One recorded set.
///
/// `weight` and `reps` are independently optional: a bodyweight movement
/// records reps with no weight, and a timed hold may record neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetEntry {
    pub id: DbId,
    /// 1-based, ascending within the parent entry.
    pub set_number: i32,
    pub weight: Option<Decimal>,
    pub reps: Option<i32>,
}

/// A catalog exercise at a specific position within a workout, with its
/// ordered sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExerciseEntry {
    pub id: DbId,
    /// 0-based, ascending; defines display and iteration order.
    pub position: i32,
    pub exercise: ExerciseRef,
    pub sets: Vec<SetEntry>,
}

/// A workout with its full exercise/set tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutAggregate {
    pub id: DbId,
    pub name: String,
    pub started_at: Timestamp,
    /// `None` while the workout is in progress.
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub exercises: Vec<WorkoutExerciseEntry>,
}

impl WorkoutAggregate {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Requested values for one set, by position in the containing spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetSpec {
    pub weight: Option<Decimal>,
    pub reps: Option<i32>,
}

/// One exercise with its ordered sets, as supplied to create/update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSpec {
    /// Catalog lookup key: exercises are de-duplicated by exact name.
    pub name: String,
    pub sets: Vec<SetSpec>,
}
