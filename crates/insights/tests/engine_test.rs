// crates/insights/tests/engine_test.rs
//! End-to-end tests for the insight engine: content-addressed caching,
//! staleness detection, and degraded-path behavior, run against an
//! in-memory store and an in-process generator.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use focusflow_core::{GenerationError, InsightKind, SessionRecord, TextGenerator, TimeWindow};
use focusflow_db::Database;
use focusflow_insights::{InsightEngine, InsightError};

/// Generator fake: counts calls, records the last prompt, and can be toggled
/// into an outage. Each successful call returns distinct text so cache reuse
/// is observable.
#[derive(Default)]
struct FakeGenerator {
    calls: AtomicUsize,
    fail: AtomicBool,
    last_prompt: Mutex<Option<String>>,
}

impl FakeGenerator {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    fn last_prompt(&self) -> String {
        self.last_prompt.lock().unwrap().clone().unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        if self.fail.load(Ordering::SeqCst) {
            return Err(GenerationError::Http("service outage".into()));
        }
        Ok(format!("generated insight #{call}"))
    }

    fn name(&self) -> &str {
        "fake"
    }
}

async fn engine() -> (InsightEngine, Arc<FakeGenerator>, Database) {
    // Opt-in log output for debugging failing tests: RUST_LOG=debug cargo test
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let db = Database::new_in_memory().await.unwrap();
    let generator = Arc::new(FakeGenerator::default());
    let engine = InsightEngine::new(db.clone(), generator.clone());
    (engine, generator, db)
}

fn window() -> TimeWindow {
    TimeWindow::daily(NaiveDate::from_ymd_opt(2026, 2, 6).unwrap())
}

fn record(id: i64, start: i64) -> SessionRecord {
    SessionRecord {
        id,
        activity_type: "write".into(),
        duration_secs: 1800,
        start_time: start,
        end_time: start + 1800,
        description: None,
        created_at: start + 1800,
    }
}

#[tokio::test]
async fn first_request_generates_and_caches() {
    let (engine, generator, db) = engine().await;
    let window = window();
    let records = vec![record(1, window.start + 60)];

    let text = engine
        .get_insight(InsightKind::Daily, &window, &records, None)
        .await
        .unwrap();

    assert_eq!(text, "generated insight #1");
    assert_eq!(generator.calls(), 1);

    let cached = db
        .get_cached_insight(InsightKind::Daily, window.start, window.end)
        .await
        .unwrap()
        .expect("insight should be cached");
    assert_eq!(cached.insight_text, text);
    assert!(cached.generated_at > 0);
}

#[tokio::test]
async fn unchanged_window_serves_cache_without_external_call() {
    let (engine, generator, _db) = engine().await;
    let window = window();
    let records = vec![record(1, window.start + 60)];

    let first = engine
        .get_insight(InsightKind::Daily, &window, &records, None)
        .await
        .unwrap();
    let second = engine
        .get_insight(InsightKind::Daily, &window, &records, None)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(generator.calls(), 1, "second request must not hit the service");
}

#[tokio::test]
async fn order_of_records_does_not_invalidate() {
    let (engine, generator, _db) = engine().await;
    let window = window();
    let a = record(1, window.start + 60);
    let b = record(2, window.start + 120);

    engine
        .get_insight(InsightKind::Daily, &window, &[a.clone(), b.clone()], None)
        .await
        .unwrap();
    engine
        .get_insight(InsightKind::Daily, &window, &[b, a], None)
        .await
        .unwrap();

    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn new_session_inside_window_forces_regeneration() {
    let (engine, generator, db) = engine().await;
    let window = window();
    let mut records = vec![record(1, window.start + 60)];

    let first = engine
        .get_insight(InsightKind::Daily, &window, &records, None)
        .await
        .unwrap();

    records.push(record(2, window.start + 3600));
    let second = engine
        .get_insight(InsightKind::Daily, &window, &records, None)
        .await
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(generator.calls(), 2);
    // Overwritten in place: still exactly one row for the key.
    assert_eq!(db.cached_insight_count().await.unwrap(), 1);
}

#[tokio::test]
async fn edited_session_forces_regeneration() {
    let (engine, generator, _db) = engine().await;
    let window = window();
    let mut records = vec![record(1, window.start + 60)];

    engine
        .get_insight(InsightKind::Daily, &window, &records, None)
        .await
        .unwrap();

    records[0].duration_secs += 300;
    engine
        .get_insight(InsightKind::Daily, &window, &records, None)
        .await
        .unwrap();

    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn generation_failure_serves_stale_text() {
    let (engine, generator, _db) = engine().await;
    let window = window();
    let mut records = vec![record(1, window.start + 60)];

    let first = engine
        .get_insight(InsightKind::Daily, &window, &records, None)
        .await
        .unwrap();

    // Data changed, but the service is down: the stale text is better than
    // failing the request.
    records.push(record(2, window.start + 3600));
    generator.set_failing(true);
    let fallback = engine
        .get_insight(InsightKind::Daily, &window, &records, None)
        .await
        .unwrap();

    assert_eq!(fallback, first);
}

#[tokio::test]
async fn generation_failure_without_cache_propagates() {
    let (engine, generator, _db) = engine().await;
    let window = window();
    generator.set_failing(true);

    let err = engine
        .get_insight(InsightKind::Daily, &window, &[record(1, window.start + 60)], None)
        .await
        .unwrap_err();

    assert!(matches!(err, InsightError::Generation(_)));
}

#[tokio::test]
async fn regenerate_bypasses_cache_read() {
    let (engine, generator, db) = engine().await;
    let window = window();
    let records = vec![record(1, window.start + 60)];

    let first = engine
        .get_insight(InsightKind::Daily, &window, &records, None)
        .await
        .unwrap();
    let forced = engine
        .regenerate(InsightKind::Daily, &window, &records, None)
        .await
        .unwrap();

    assert_ne!(first, forced);
    assert_eq!(generator.calls(), 2);

    // The forced result replaces the cached row.
    let cached = db
        .get_cached_insight(InsightKind::Daily, window.start, window.end)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cached.insight_text, forced);
    assert_eq!(db.cached_insight_count().await.unwrap(), 1);
}

#[tokio::test]
async fn regenerate_failure_propagates_even_with_cache() {
    let (engine, generator, _db) = engine().await;
    let window = window();
    let records = vec![record(1, window.start + 60)];

    engine
        .get_insight(InsightKind::Daily, &window, &records, None)
        .await
        .unwrap();

    generator.set_failing(true);
    let err = engine
        .regenerate(InsightKind::Daily, &window, &records, None)
        .await
        .unwrap_err();
    assert!(matches!(err, InsightError::Generation(_)));
}

#[tokio::test]
async fn empty_window_sends_encouragement_prompt() {
    let (engine, generator, _db) = engine().await;
    let window = window();

    engine
        .get_insight(InsightKind::Daily, &window, &[], None)
        .await
        .unwrap();

    let prompt = generator.last_prompt();
    assert!(prompt.contains("no focus sessions"), "{prompt}");
    assert!(!prompt.contains("Top activities"), "{prompt}");
}

#[tokio::test]
async fn cache_read_failure_degrades_to_regeneration() {
    let (engine, generator, db) = engine().await;
    let window = window();

    // Break the cache table entirely: reads and writes both fail, yet the
    // request still succeeds with fresh text.
    sqlx::query("DROP TABLE insights_cache")
        .execute(db.pool())
        .await
        .unwrap();

    let text = engine
        .get_insight(InsightKind::Daily, &window, &[record(1, window.start + 60)], None)
        .await
        .unwrap();

    assert_eq!(text, "generated insight #1");
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn for_window_loads_records_from_store() {
    let (engine, generator, db) = engine().await;
    let window = window();

    db.insert_session(
        "write",
        1800,
        window.start + 60,
        window.start + 1860,
        None,
        window.start + 1860,
    )
    .await
    .unwrap();
    db.insert_session(
        "read",
        3600,
        window.start + 7200,
        window.start + 10_800,
        None,
        window.start + 10_800,
    )
    .await
    .unwrap();

    engine
        .get_insight_for_window(InsightKind::Daily, &window)
        .await
        .unwrap();

    let prompt = generator.last_prompt();
    assert!(prompt.contains("2 focus sessions today"), "{prompt}");
}

#[tokio::test]
async fn weekly_for_window_includes_trend_from_preceding_week() {
    let (engine, generator, db) = engine().await;
    let week = TimeWindow::weekly(NaiveDate::from_ymd_opt(2026, 2, 6).unwrap());

    // One session this week, one in the week before.
    db.insert_session("write", 3600, week.start + 60, week.start + 3660, None, week.start + 3660)
        .await
        .unwrap();
    let previous = week.preceding();
    db.insert_session(
        "write",
        1800,
        previous.start + 60,
        previous.start + 1860,
        None,
        previous.start + 1860,
    )
    .await
    .unwrap();

    engine
        .get_insight_for_window(InsightKind::Weekly, &week)
        .await
        .unwrap();

    let prompt = generator.last_prompt();
    assert!(prompt.contains("Compared to the previous week"), "{prompt}");
    assert!(prompt.contains("+0 sessions"), "{prompt}");
    assert!(prompt.contains("+0.5 hours"), "{prompt}");
}

#[tokio::test]
async fn for_window_cache_hit_skips_generation() {
    let (engine, generator, db) = engine().await;
    let window = window();

    db.insert_session(
        "write",
        1800,
        window.start + 60,
        window.start + 1860,
        None,
        window.start + 1860,
    )
    .await
    .unwrap();

    engine
        .get_insight_for_window(InsightKind::Daily, &window)
        .await
        .unwrap();
    engine
        .get_insight_for_window(InsightKind::Daily, &window)
        .await
        .unwrap();
    assert_eq!(generator.calls(), 1);

    // A new session written by the tracker invalidates on the next request.
    db.insert_session(
        "read",
        600,
        window.start + 7200,
        window.start + 7800,
        None,
        window.start + 7800,
    )
    .await
    .unwrap();
    engine
        .get_insight_for_window(InsightKind::Daily, &window)
        .await
        .unwrap();
    assert_eq!(generator.calls(), 2);
}
