/// Inline SQL migrations for the FocusFlow database schema.
///
/// We use simple inline migrations rather than sqlx migration files
/// because the schema is small and self-contained.

pub const MIGRATIONS: &[&str] = &[
    // Migration 1: sessions table (written by the session tracker)
    r#"
CREATE TABLE IF NOT EXISTS sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    activity_type TEXT NOT NULL,
    duration INTEGER NOT NULL,
    start_time INTEGER NOT NULL,
    end_time INTEGER NOT NULL,
    description TEXT,
    created_at INTEGER NOT NULL
);
"#,
    // Migration 2: sessions indexes
    r#"CREATE INDEX IF NOT EXISTS idx_sessions_created_at ON sessions(created_at);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_sessions_activity_type ON sessions(activity_type);"#,
    // Migration 3: insights cache.
    // One row per (insight_type, period) key; the unique constraint is what
    // makes the upsert atomic under concurrent writers.
    r#"
CREATE TABLE IF NOT EXISTS insights_cache (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    insight_type TEXT NOT NULL,
    generated_at INTEGER NOT NULL,
    data_hash TEXT NOT NULL,
    insight_text TEXT NOT NULL,
    time_period_start INTEGER NOT NULL,
    time_period_end INTEGER NOT NULL,
    UNIQUE (insight_type, time_period_start, time_period_end)
);
"#,
    // Migration 4: insights cache indexes
    r#"CREATE INDEX IF NOT EXISTS idx_insights_cache_type ON insights_cache(insight_type);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_insights_cache_period ON insights_cache(time_period_start, time_period_end);"#,
];

// ============================================================================
// Tests for migrations
// ============================================================================
