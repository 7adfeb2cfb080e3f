//! Flattened edit-document form of a workout aggregate.
//!
//! [`to_edit_document`] and [`exercise_specs`] are a pure bidirectional
//! pair: flattening drops generated identifiers and sequence numbers; the
//! inverse reconstructs position from list order. Neither touches storage,
//! so round-trip behaviour is testable in isolation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};
use crate::workout::{ExerciseSpec, SetSpec, WorkoutAggregate};

/// The UI-facing shape of a workout: scalar fields plus exercises with
/// their sets, positions implied by list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditDocument {
    /// Absent when the document describes a workout not yet created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    pub name: String,
    pub started_at: Timestamp,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
    pub exercises: Vec<ExerciseSpec>,
}

/// Flatten an aggregate into its edit document.
///
/// Join/catalog ids, `position`, and `set_number` are dropped; exercise and
/// set order is preserved exactly.
pub fn to_edit_document(workout: &WorkoutAggregate) -> EditDocument {
    EditDocument {
        id: Some(workout.id),
        name: workout.name.clone(),
        started_at: workout.started_at,
        completed_at: workout.completed_at,
        exercises: workout
            .exercises
            .iter()
            .map(|entry| ExerciseSpec {
                name: entry.exercise.name.clone(),
                sets: entry
                    .sets
                    .iter()
                    .map(|set| SetSpec {
                        weight: set.weight,
                        reps: set.reps,
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Validate an edit document and extract its exercise specs.
///
/// Runs before any store call and short-circuits on the first offending
/// field. Exercise names are trimmed so catalog de-duplication keys are
/// canonical. Rules:
///
/// - the workout name must be non-empty
/// - at least one exercise, each with a non-empty name and at least one set
/// - `weight` and `reps`, where present, must be positive
pub fn exercise_specs(doc: &EditDocument) -> Result<Vec<ExerciseSpec>, CoreError> {
    if doc.name.trim().is_empty() {
        return Err(CoreError::Validation("workout name must not be empty".into()));
    }
    if doc.exercises.is_empty() {
        return Err(CoreError::Validation(
            "a workout needs at least one exercise".into(),
        ));
    }

    let mut specs = Vec::with_capacity(doc.exercises.len());
    for (index, exercise) in doc.exercises.iter().enumerate() {
        let name = exercise.name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation(format!(
                "exercise {} has an empty name",
                index + 1
            )));
        }
        if exercise.sets.is_empty() {
            return Err(CoreError::Validation(format!(
                "exercise \"{name}\" has no sets"
            )));
        }
        for (set_index, set) in exercise.sets.iter().enumerate() {
            if set.weight.is_some_and(|w| w <= Decimal::ZERO) {
                return Err(CoreError::Validation(format!(
                    "set {} of \"{name}\" has a non-positive weight",
                    set_index + 1
                )));
            }
            if set.reps.is_some_and(|r| r <= 0) {
                return Err(CoreError::Validation(format!(
                    "set {} of \"{name}\" has a non-positive rep count",
                    set_index + 1
                )));
            }
        }
        specs.push(ExerciseSpec {
            name: name.to_string(),
            sets: exercise.sets.clone(),
        });
    }
    Ok(specs)
}
