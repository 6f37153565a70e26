// crates/db/src/queries/insights_cache.rs
//! Insight cache reads and writes.
//!
//! Cache identity is the (kind, window) key; cache validity is the stored
//! fingerprint. These are the only two operations the engine performs; no
//! partial updates exist.

use focusflow_core::InsightKind;
use serde::Serialize;

use crate::{Database, DbError, DbResult};

/// One cached insight row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedInsight {
    pub kind: InsightKind,
    /// Unix seconds at which the text was generated.
    pub generated_at: i64,
    /// Fingerprint of the records the text was generated from.
    pub data_hash: String,
    pub insight_text: String,
    pub time_period_start: i64,
    pub time_period_end: i64,
}

impl Database {
    /// Look up the cached insight for a (kind, window) key.
    pub async fn get_cached_insight(
        &self,
        kind: InsightKind,
        start: i64,
        end: i64,
    ) -> DbResult<Option<CachedInsight>> {
        let row: Option<(String, i64, String, String, i64, i64)> = sqlx::query_as(
            r#"
            SELECT insight_type, generated_at, data_hash, insight_text,
                   time_period_start, time_period_end
            FROM insights_cache
            WHERE insight_type = ?1 AND time_period_start = ?2 AND time_period_end = ?3
            "#,
        )
        .bind(kind.as_str())
        .bind(start)
        .bind(end)
        .fetch_optional(self.pool())
        .await?;

        row.map(
            |(insight_type, generated_at, data_hash, insight_text, period_start, period_end)| {
                let kind = InsightKind::parse(&insight_type)
                    .ok_or(DbError::UnknownInsightType(insight_type))?;
                Ok(CachedInsight {
                    kind,
                    generated_at,
                    data_hash,
                    insight_text,
                    time_period_start: period_start,
                    time_period_end: period_end,
                })
            },
        )
        .transpose()
    }

    /// Atomically insert or replace the cached insight for a (kind, window)
    /// key.
    ///
    /// The `ON CONFLICT` clause targets the table's uniqueness constraint, so
    /// concurrent writers to the same key serialize inside SQLite: the last
    /// writer wins and a duplicate row is never observable.
    pub async fn upsert_cached_insight(
        &self,
        kind: InsightKind,
        start: i64,
        end: i64,
        data_hash: &str,
        insight_text: &str,
        generated_at: i64,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO insights_cache
                (insight_type, time_period_start, time_period_end, data_hash, insight_text, generated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (insight_type, time_period_start, time_period_end)
            DO UPDATE SET
                data_hash = excluded.data_hash,
                insight_text = excluded.insight_text,
                generated_at = excluded.generated_at
            "#,
        )
        .bind(kind.as_str())
        .bind(start)
        .bind(end)
        .bind(data_hash)
        .bind(insight_text)
        .bind(generated_at)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Delete cache rows whose window ended before `cutoff`. Garbage
    /// collection policy (when, and with what cutoff) belongs to the caller.
    pub async fn delete_cached_insights_before(&self, cutoff: i64) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM insights_cache WHERE time_period_end < ?1")
            .bind(cutoff)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected())
    }

    /// Total number of cached insight rows.
    pub async fn cached_insight_count(&self) -> DbResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM insights_cache")
            .fetch_one(self.pool())
            .await?;
        Ok(count)
    }
}
