// crates/core/src/types.rs
//! Core domain types: session records, insight kinds, and aggregated summaries.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single tracked focus session.
///
/// Records are produced by the session tracker and are read-only inputs here:
/// the engine never mutates them. `id` is the store-assigned row id and is
/// stable for the lifetime of the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: i64,
    pub activity_type: String,
    pub duration_secs: i64,
    /// Unix seconds.
    pub start_time: i64,
    /// Unix seconds; always >= `start_time` for a valid record.
    pub end_time: i64,
    pub description: Option<String>,
    /// Unix seconds at which the tracker wrote the record.
    pub created_at: i64,
}

impl SessionRecord {
    /// A record is valid when its interval is well-formed and it has
    /// positive duration. Invalid records are dropped during aggregation
    /// rather than failing the whole request.
    pub fn is_valid(&self) -> bool {
        self.end_time >= self.start_time && self.duration_secs > 0
    }

    /// Whether the record carries a non-blank free-text description.
    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }
}

/// The granularity/category of a generated insight.
///
/// Doubles as the kind tag on [`TimeWindow`](crate::window::TimeWindow) and
/// as the `insight_type` column text in the cache table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Daily,
    Weekly,
    Monthly,
    Activity,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Daily => "daily",
            InsightKind::Weekly => "weekly",
            InsightKind::Monthly => "monthly",
            InsightKind::Activity => "activity",
        }
    }

    /// Inverse of [`as_str`](Self::as_str); `None` for unrecognized text.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(InsightKind::Daily),
            "weekly" => Some(InsightKind::Weekly),
            "monthly" => Some(InsightKind::Monthly),
            "activity" => Some(InsightKind::Activity),
            _ => None,
        }
    }
}

impl std::fmt::Display for InsightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One activity in the ranked breakdown of a summary.
///
/// `percent` is the exact share of total duration; rounding to whole numbers
/// happens only at render time so the shares always sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct ActivityBreakdown {
    pub activity_type: String,
    pub total_hours: f64,
    pub percent: f64,
}

/// Current-vs-previous comparison for a single metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct MetricDelta {
    pub current: f64,
    pub previous: f64,
    /// Absolute change (current - previous).
    pub delta: f64,
    /// Percentage change rounded to 1 decimal place; 0 when the previous
    /// value was 0 (a jump from nothing has no meaningful percentage).
    pub percent_change: f64,
}

impl MetricDelta {
    pub fn new(current: f64, previous: f64) -> Self {
        let delta = current - previous;
        let percent_change = if previous == 0.0 {
            0.0
        } else {
            ((delta / previous) * 1000.0).round() / 10.0
        };
        Self {
            current,
            previous,
            delta,
            percent_change,
        }
    }
}

/// Trend block comparing a window against the one before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct TrendDelta {
    pub session_count: MetricDelta,
    pub hours: MetricDelta,
}

/// Derived view of one window's sessions. Recomputed on every request;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct AggregatedSummary {
    pub window_label: String,
    pub kind: InsightKind,
    pub total_sessions: u32,
    pub total_hours: f64,
    pub avg_session_minutes: f64,
    /// Ranked by total duration descending, ties broken by activity name.
    pub activities: Vec<ActivityBreakdown>,
    /// Fraction of sessions carrying a description, clamped to [0, 1].
    pub description_density: f64,
    /// Up to [`aggregate::SAMPLE_DESCRIPTION_CAP`](crate::aggregate::SAMPLE_DESCRIPTION_CAP)
    /// descriptions, most recent first.
    pub sample_descriptions: Vec<String>,
    pub trend: Option<TrendDelta>,
}
