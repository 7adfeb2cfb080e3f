//! Repository for workout aggregates.
//!
//! A workout and its exercise/set tree are written as one transaction;
//! readers never observe a partially written or partially replaced tree.
//! Every operation is scoped to an owner: an id owned by another user is
//! indistinguishable from an id that does not exist.

use std::collections::HashMap;

use liftlog_core::day::DayWindow;
use liftlog_core::types::{DbId, Timestamp};
use liftlog_core::workout::{
    ExerciseRef, ExerciseSpec, SetEntry, WorkoutAggregate, WorkoutExerciseEntry,
};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::workout::{CreateWorkout, ReplaceWorkout, SetRow, WorkoutExerciseRow, WorkoutRow};
use crate::repositories::exercise_repo::ExerciseRepo;

/// Column list shared across workout queries.
const COLUMNS: &str =
    "id, owner_user_id, name, started_at, completed_at, created_at, updated_at";

/// Error from the full-tree replace path.
#[derive(Debug, thiserror::Error)]
pub enum ReplaceWorkoutError {
    /// The update would move a completed workout back to in-progress.
    #[error("a completed workout cannot be returned to in-progress")]
    ReopenCompleted,

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Provides ownership-scoped access to workout aggregates.
pub struct WorkoutRepo;

impl WorkoutRepo {
    /// List a user's workouts whose `started_at` falls inside `window`,
    /// most recent first, each fully hydrated (exercise entries ascending
    /// by position, sets ascending by set number).
    pub async fn list_for_user_in_window(
        pool: &PgPool,
        owner_user_id: &str,
        window: DayWindow,
    ) -> Result<Vec<WorkoutAggregate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workouts
             WHERE owner_user_id = $1 AND started_at >= $2 AND started_at < $3
             ORDER BY started_at DESC"
        );
        let workouts = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(owner_user_id)
            .bind(window.start)
            .bind(window.end)
            .fetch_all(pool)
            .await?;
        hydrate(pool, workouts).await
    }

    /// Find one aggregate by id, scoped to its owner.
    ///
    /// Returns `None` both for ids that do not exist and for ids owned by
    /// a different user; callers cannot distinguish the two cases.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        owner_user_id: &str,
    ) -> Result<Option<WorkoutAggregate>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM workouts WHERE id = $1 AND owner_user_id = $2");
        let workout = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(id)
            .bind(owner_user_id)
            .fetch_optional(pool)
            .await?;
        match workout {
            Some(row) => Ok(hydrate(pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Create a workout with its full exercise/set tree in one
    /// transaction. Positions and set numbers are assigned from input
    /// order; catalog rows are inserted lazily, at most once per name.
    pub async fn create_aggregate(
        pool: &PgPool,
        owner_user_id: &str,
        input: &CreateWorkout,
    ) -> Result<WorkoutAggregate, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO workouts (id, owner_user_id, name, started_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let workout = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(Uuid::now_v7())
            .bind(owner_user_id)
            .bind(&input.name)
            .bind(input.started_at)
            .fetch_one(&mut *tx)
            .await?;

        let entries = insert_entries(&mut tx, workout.id, &input.exercises).await?;
        tx.commit().await?;

        Ok(into_aggregate(workout, entries))
    }

    /// Replace a workout's scalar fields and entire exercise/set tree.
    ///
    /// Runs in one transaction with the workout row locked, so readers see
    /// the old tree or the new tree, never a mixture, and concurrent
    /// writers to the same aggregate serialize. Returns `Ok(None)` when
    /// the workout does not exist or is not owned by `owner_user_id`.
    pub async fn replace_aggregate(
        pool: &PgPool,
        id: DbId,
        owner_user_id: &str,
        input: &ReplaceWorkout,
    ) -> Result<Option<WorkoutAggregate>, ReplaceWorkoutError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {COLUMNS} FROM workouts
             WHERE id = $1 AND owner_user_id = $2
             FOR UPDATE"
        );
        let current = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(id)
            .bind(owner_user_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(current) = current else {
            return Ok(None);
        };

        // completed_at is monotonic: InProgress -> Completed only.
        if current.completed_at.is_some() && input.completed_at.is_none() {
            return Err(ReplaceWorkoutError::ReopenCompleted);
        }

        let query = format!(
            "UPDATE workouts
             SET name = $2, started_at = $3, completed_at = $4, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let workout = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.started_at)
            .bind(input.completed_at)
            .fetch_one(&mut *tx)
            .await?;

        // Sets cascade with their parent entries.
        sqlx::query("DELETE FROM workout_exercises WHERE workout_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let entries = insert_entries(&mut tx, id, &input.exercises).await?;
        tx.commit().await?;

        Ok(Some(into_aggregate(workout, entries)))
    }

    /// Mark an in-progress workout completed.
    ///
    /// Returns `None` when the workout is missing, not owned, or already
    /// completed; callers that need to tell the last case apart can
    /// follow up with [`WorkoutRepo::find_by_id`].
    pub async fn complete(
        pool: &PgPool,
        id: DbId,
        owner_user_id: &str,
        at: Timestamp,
    ) -> Result<Option<WorkoutAggregate>, sqlx::Error> {
        let query = format!(
            "UPDATE workouts SET completed_at = $3, updated_at = NOW()
             WHERE id = $1 AND owner_user_id = $2 AND completed_at IS NULL
             RETURNING {COLUMNS}"
        );
        let workout = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(id)
            .bind(owner_user_id)
            .bind(at)
            .fetch_optional(pool)
            .await?;
        match workout {
            Some(row) => Ok(hydrate(pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Delete a workout and, by cascade, its exercise entries and sets.
    ///
    /// Returns `true` if a row owned by `owner_user_id` was removed.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        owner_user_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1 AND owner_user_id = $2")
            .bind(id)
            .bind(owner_user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Attach exercise entries and sets to workout rows, preserving the
/// incoming workout order.
async fn hydrate(
    pool: &PgPool,
    workouts: Vec<WorkoutRow>,
) -> Result<Vec<WorkoutAggregate>, sqlx::Error> {
    if workouts.is_empty() {
        return Ok(Vec::new());
    }
    let workout_ids: Vec<DbId> = workouts.iter().map(|w| w.id).collect();

    let entries = sqlx::query_as::<_, WorkoutExerciseRow>(
        "SELECT we.id, we.workout_id, we.exercise_id, e.name AS exercise_name, we.position
         FROM workout_exercises we
         JOIN exercises e ON e.id = we.exercise_id
         WHERE we.workout_id = ANY($1)
         ORDER BY we.position",
    )
    .bind(&workout_ids)
    .fetch_all(pool)
    .await?;

    let entry_ids: Vec<DbId> = entries.iter().map(|e| e.id).collect();
    let sets = sqlx::query_as::<_, SetRow>(
        "SELECT id, workout_exercise_id, set_number, weight, reps
         FROM sets
         WHERE workout_exercise_id = ANY($1)
         ORDER BY set_number",
    )
    .bind(&entry_ids)
    .fetch_all(pool)
    .await?;

    let mut sets_by_entry: HashMap<DbId, Vec<SetEntry>> = HashMap::new();
    for set in sets {
        sets_by_entry
            .entry(set.workout_exercise_id)
            .or_default()
            .push(SetEntry {
                id: set.id,
                set_number: set.set_number,
                weight: set.weight,
                reps: set.reps,
            });
    }

    let mut entries_by_workout: HashMap<DbId, Vec<WorkoutExerciseEntry>> = HashMap::new();
    for entry in entries {
        let sets = sets_by_entry.remove(&entry.id).unwrap_or_default();
        entries_by_workout
            .entry(entry.workout_id)
            .or_default()
            .push(WorkoutExerciseEntry {
                id: entry.id,
                position: entry.position,
                exercise: ExerciseRef {
                    id: entry.exercise_id,
                    name: entry.exercise_name,
                },
                sets,
            });
    }

    Ok(workouts
        .into_iter()
        .map(|row| {
            let entries = entries_by_workout.remove(&row.id).unwrap_or_default();
            into_aggregate(row, entries)
        })
        .collect())
}

/// Insert the exercise entries and sets for `workout_id`, positions
/// 0-based and set numbers 1-based from input order.
async fn insert_entries(
    conn: &mut PgConnection,
    workout_id: DbId,
    specs: &[ExerciseSpec],
) -> Result<Vec<WorkoutExerciseEntry>, sqlx::Error> {
    let mut entries = Vec::with_capacity(specs.len());
    for (position, spec) in specs.iter().enumerate() {
        let exercise = ExerciseRepo::find_or_create(&mut *conn, &spec.name).await?;

        let (entry_id,): (DbId,) = sqlx::query_as(
            "INSERT INTO workout_exercises (id, workout_id, exercise_id, position)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(Uuid::now_v7())
        .bind(workout_id)
        .bind(exercise.id)
        .bind(position as i32)
        .fetch_one(&mut *conn)
        .await?;

        let mut sets = Vec::with_capacity(spec.sets.len());
        for (index, set) in spec.sets.iter().enumerate() {
            let set_number = (index + 1) as i32;
            let (set_id,): (DbId,) = sqlx::query_as(
                "INSERT INTO sets (id, workout_exercise_id, set_number, weight, reps)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING id",
            )
            .bind(Uuid::now_v7())
            .bind(entry_id)
            .bind(set_number)
            .bind(set.weight)
            .bind(set.reps)
            .fetch_one(&mut *conn)
            .await?;
            sets.push(SetEntry {
                id: set_id,
                set_number,
                weight: set.weight,
                reps: set.reps,
            });
        }

        entries.push(WorkoutExerciseEntry {
            id: entry_id,
            position: position as i32,
            exercise: ExerciseRef {
                id: exercise.id,
                name: exercise.name,
            },
            sets,
        });
    }
    Ok(entries)
}

/// Assemble the aggregate shape returned to callers.
fn into_aggregate(row: WorkoutRow, exercises: Vec<WorkoutExerciseEntry>) -> WorkoutAggregate {
    WorkoutAggregate {
        id: row.id,
        name: row.name,
        started_at: row.started_at,
        completed_at: row.completed_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
        exercises,
    }
}
