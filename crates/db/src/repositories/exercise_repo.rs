//! Repository for the `exercises` catalog.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::exercise::Exercise;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides access to the shared, de-duplicated exercise catalog.
pub struct ExerciseRepo;

impl ExerciseRepo {
    /// List the full catalog, alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Exercise>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM exercises ORDER BY name");
        sqlx::query_as::<_, Exercise>(&query).fetch_all(pool).await
    }

    /// Look up an exercise by exact name, inserting it if absent.
    ///
    /// Insert-ignore-then-select rather than check-then-insert: two
    /// concurrent first uses of the same name serialize on the unique
    /// index and converge on a single catalog row. Takes a connection so
    /// aggregate writes can run it inside their transaction.
    pub async fn find_or_create(
        conn: &mut PgConnection,
        name: &str,
    ) -> Result<Exercise, sqlx::Error> {
        sqlx::query("INSERT INTO exercises (id, name) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING")
            .bind(Uuid::now_v7())
            .bind(name)
            .execute(&mut *conn)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM exercises WHERE name = $1");
        sqlx::query_as::<_, Exercise>(&query)
            .bind(name)
            .fetch_one(&mut *conn)
            .await
    }
}
