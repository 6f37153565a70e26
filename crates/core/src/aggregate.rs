// crates/core/src/aggregate.rs
//! Session aggregator: raw records + a window -> an [`AggregatedSummary`].
//!
//! Pure and deterministic: identical inputs always produce identical output,
//! with no dependence on wall-clock time beyond the window itself.

use std::collections::BTreeMap;

use tracing::warn;

use crate::types::{
    ActivityBreakdown, AggregatedSummary, MetricDelta, SessionRecord, TrendDelta,
};
use crate::window::TimeWindow;

/// Maximum number of sample descriptions carried on a summary.
pub const SAMPLE_DESCRIPTION_CAP: usize = 5;

/// Aggregate `records` over `window`, optionally computing trend deltas
/// against a prior window's summary.
///
/// Only records whose `start_time` falls in the window's half-open interval
/// are counted. Malformed records (end before start, non-positive duration)
/// are dropped with a warning rather than failing the aggregation.
pub fn aggregate(
    records: &[SessionRecord],
    window: &TimeWindow,
    prior: Option<&AggregatedSummary>,
) -> AggregatedSummary {
    let mut in_window: Vec<&SessionRecord> = Vec::new();
    for record in records {
        if !record.is_valid() {
            warn!(id = record.id, "dropping malformed session record");
            continue;
        }
        if window.contains(record.start_time) {
            in_window.push(record);
        }
    }

    let total_sessions = in_window.len() as u32;
    let total_secs: i64 = in_window.iter().map(|r| r.duration_secs).sum();
    let total_hours = total_secs as f64 / 3600.0;
    let avg_session_minutes = if in_window.is_empty() {
        0.0
    } else {
        total_secs as f64 / 60.0 / in_window.len() as f64
    };

    // Group by activity; BTreeMap gives the lexical tie-break for free once
    // we sort by duration.
    let mut by_activity: BTreeMap<&str, i64> = BTreeMap::new();
    for record in &in_window {
        *by_activity.entry(record.activity_type.as_str()).or_insert(0) += record.duration_secs;
    }
    let mut ranked: Vec<(&str, i64)> = by_activity.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    let activities = ranked
        .into_iter()
        .map(|(activity_type, secs)| ActivityBreakdown {
            activity_type: activity_type.to_string(),
            total_hours: secs as f64 / 3600.0,
            percent: if total_secs > 0 {
                secs as f64 / total_secs as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();

    let described = in_window.iter().filter(|r| r.has_description()).count();
    let description_density = if in_window.is_empty() {
        0.0
    } else {
        (described as f64 / in_window.len() as f64).clamp(0.0, 1.0)
    };

    // Most recent descriptions first, bounded.
    let mut described_records: Vec<&SessionRecord> = in_window
        .iter()
        .copied()
        .filter(|r| r.has_description())
        .collect();
    described_records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    let sample_descriptions = described_records
        .into_iter()
        .take(SAMPLE_DESCRIPTION_CAP)
        .filter_map(|r| r.description.clone())
        .collect();

    let trend = prior.map(|p| TrendDelta {
        session_count: MetricDelta::new(total_sessions as f64, p.total_sessions as f64),
        hours: MetricDelta::new(total_hours, p.total_hours),
    });

    AggregatedSummary {
        window_label: window.label.clone(),
        kind: window.kind,
        total_sessions,
        total_hours,
        avg_session_minutes,
        activities,
        description_density,
        sample_descriptions,
        trend,
    }
}
