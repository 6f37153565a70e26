// crates/insights/src/engine.rs
//! The insight engine: content-addressed caching over generated text.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use focusflow_core::{
    aggregate, build_prompt, fingerprint_records, AggregatedSummary, GenerationError, InsightKind,
    SessionRecord, TextGenerator, TimeWindow,
};
use focusflow_db::{Database, DbError};

/// Errors surfaced to the engine's caller.
///
/// Degraded paths (stale cache served, cache write lost) never reach here;
/// the caller always gets either text or one of these.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("insight generation unavailable: {0}")]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Db(#[from] DbError),
}

/// Orchestrates aggregation, fingerprinting, the cache, and the external
/// generator.
///
/// Both collaborators are injected so tests can run against an in-memory
/// store and an in-process generator. The engine holds no locks of its own:
/// concurrent requests for the same key may both call the generator, and the
/// cache's uniqueness constraint arbitrates whichever write lands last.
#[derive(Clone)]
pub struct InsightEngine {
    db: Database,
    generator: Arc<dyn TextGenerator>,
}

impl InsightEngine {
    pub fn new(db: Database, generator: Arc<dyn TextGenerator>) -> Self {
        Self { db, generator }
    }

    /// Return the insight text for `kind` over `window`.
    ///
    /// Serves the cached text when the window's records are unchanged since
    /// the last generation (no external call). Otherwise generates fresh
    /// text and upserts the cache. If generation fails and a stale entry
    /// exists, the stale text is served rather than failing the request.
    pub async fn get_insight(
        &self,
        kind: InsightKind,
        window: &TimeWindow,
        records: &[SessionRecord],
        prior: Option<&AggregatedSummary>,
    ) -> Result<String, InsightError> {
        let summary = aggregate(records, window, prior);
        let fingerprint = fingerprint_records(records);

        // A failed cache read degrades to a miss: we can always regenerate.
        let cached = match self
            .db
            .get_cached_insight(kind, window.start, window.end)
            .await
        {
            Ok(cached) => cached,
            Err(e) => {
                warn!(error = %e, kind = %kind, "cache read failed, treating as miss");
                None
            }
        };

        if let Some(cached) = &cached {
            if cached.data_hash == fingerprint {
                debug!(kind = %kind, window = %window.label, "insight cache hit");
                return Ok(cached.insight_text.clone());
            }
            debug!(kind = %kind, window = %window.label, "insight cache stale");
        }

        let prompt = build_prompt(kind, &summary);
        match self.generator.generate(&prompt).await {
            Ok(text) => {
                self.store(kind, window, &fingerprint, &text).await;
                Ok(text)
            }
            Err(e) => match cached {
                // Serve stale rather than fail a request we could answer.
                Some(cached) => {
                    warn!(error = %e, kind = %kind, "generation failed, serving stale insight");
                    Ok(cached.insight_text)
                }
                None => Err(e.into()),
            },
        }
    }

    /// Generate fresh text unconditionally, bypassing the cache read.
    ///
    /// Still upserts the cache on success. Failures propagate: a caller
    /// forcing regeneration has opted out of stale text.
    pub async fn regenerate(
        &self,
        kind: InsightKind,
        window: &TimeWindow,
        records: &[SessionRecord],
        prior: Option<&AggregatedSummary>,
    ) -> Result<String, InsightError> {
        let summary = aggregate(records, window, prior);
        let fingerprint = fingerprint_records(records);

        let prompt = build_prompt(kind, &summary);
        let text = self.generator.generate(&prompt).await?;
        self.store(kind, window, &fingerprint, &text).await;
        Ok(text)
    }

    /// Like [`get_insight`](Self::get_insight), but loads the window's
    /// records from the session store, and for weekly/monthly requests also
    /// aggregates the preceding window so the prompt gets its trend block.
    pub async fn get_insight_for_window(
        &self,
        kind: InsightKind,
        window: &TimeWindow,
    ) -> Result<String, InsightError> {
        let records = self.db.sessions_in_window(window.start, window.end).await?;

        let prior = match kind {
            InsightKind::Weekly | InsightKind::Monthly => {
                let previous = window.preceding();
                let previous_records = self
                    .db
                    .sessions_in_window(previous.start, previous.end)
                    .await?;
                Some(aggregate(&previous_records, &previous, None))
            }
            InsightKind::Daily | InsightKind::Activity => None,
        };

        self.get_insight(kind, window, &records, prior.as_ref()).await
    }

    /// Persist a freshly generated insight. Write failures are logged and
    /// swallowed: the caller already has its text, and the next request will
    /// simply regenerate.
    async fn store(&self, kind: InsightKind, window: &TimeWindow, fingerprint: &str, text: &str) {
        let now = Utc::now().timestamp();
        if let Err(e) = self
            .db
            .upsert_cached_insight(kind, window.start, window.end, fingerprint, text, now)
            .await
        {
            warn!(error = %e, kind = %kind, "failed to persist generated insight");
        }
    }
}
