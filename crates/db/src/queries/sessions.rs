// crates/db/src/queries/sessions.rs
//! Record-source queries over the `sessions` table.
//!
//! Rows are written by the session tracker and treated as immutable facts
//! here. The insight engine only ever reads them windowed by `start_time`.

use focusflow_core::SessionRecord;

use crate::{Database, DbResult};

impl Database {
    /// Insert a session row, returning the assigned id.
    ///
    /// Write path for the session tracker (and tests); the insight engine
    /// itself never writes sessions.
    pub async fn insert_session(
        &self,
        activity_type: &str,
        duration_secs: i64,
        start_time: i64,
        end_time: i64,
        description: Option<&str>,
        created_at: i64,
    ) -> DbResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO sessions (activity_type, duration, start_time, end_time, description, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(activity_type)
        .bind(duration_secs)
        .bind(start_time)
        .bind(end_time)
        .bind(description)
        .bind(created_at)
        .execute(self.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Fetch all sessions whose start time falls in `[start, end)`,
    /// ordered by start time.
    pub async fn sessions_in_window(&self, start: i64, end: i64) -> DbResult<Vec<SessionRecord>> {
        let rows: Vec<(i64, String, i64, i64, i64, Option<String>, i64)> = sqlx::query_as(
            r#"
            SELECT id, activity_type, duration, start_time, end_time, description, created_at
            FROM sessions
            WHERE start_time >= ?1 AND start_time < ?2
            ORDER BY start_time
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(self.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(id, activity_type, duration_secs, start_time, end_time, description, created_at)| {
                    SessionRecord {
                        id,
                        activity_type,
                        duration_secs,
                        start_time,
                        end_time,
                        description,
                        created_at,
                    }
                },
            )
            .collect())
    }

    /// Total number of session rows.
    pub async fn session_count(&self) -> DbResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions")
            .fetch_one(self.pool())
            .await?;
        Ok(count)
    }
}
