// crates/core/src/window.rs
//! Time windows identifying which sessions an aggregation/insight covers.
//!
//! Windows are half-open intervals `[start, end)` of Unix seconds, UTC. The
//! constructors own the calendar math (day/week/month bounds) so callers only
//! ever hand the engine a date.

use chrono::{DateTime, Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::InsightKind;

/// A half-open time interval `[start, end)` with a human-readable label and
/// a kind tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    /// Unix seconds, inclusive.
    pub start: i64,
    /// Unix seconds, exclusive.
    pub end: i64,
    pub label: String,
    pub kind: InsightKind,
}

impl TimeWindow {
    /// The calendar day containing `date`: midnight to next midnight UTC.
    pub fn daily(date: NaiveDate) -> Self {
        let start = midnight(date);
        let end = midnight(date + Duration::days(1));
        Self {
            start,
            end,
            label: date.format("%A, %B %-d").to_string(),
            kind: InsightKind::Daily,
        }
    }

    /// The calendar week containing `date`: Monday 00:00 to next Monday 00:00 UTC.
    pub fn weekly(date: NaiveDate) -> Self {
        let days_since_monday = date.weekday().num_days_from_monday() as i64;
        let monday = date - Duration::days(days_since_monday);
        Self {
            start: midnight(monday),
            end: midnight(monday + Duration::days(7)),
            label: monday.format("Week of %B %-d").to_string(),
            kind: InsightKind::Weekly,
        }
    }

    /// The calendar month containing `date`: the 1st 00:00 to the 1st of the
    /// next month 00:00 UTC.
    pub fn monthly(date: NaiveDate) -> Self {
        let first = first_of_month(date);
        Self {
            start: midnight(first),
            end: midnight(first_of_next_month(first)),
            label: first.format("%B %Y").to_string(),
            kind: InsightKind::Monthly,
        }
    }

    /// An activity-specific window over an arbitrary interval. The label is
    /// the activity name, which the prompt builder surfaces verbatim.
    pub fn activity(name: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            label: name.into(),
            kind: InsightKind::Activity,
        }
    }

    /// Whether `t` falls inside the window. Half-open: the end bound is
    /// excluded, so adjacent windows never share a timestamp.
    pub fn contains(&self, t: i64) -> bool {
        self.start <= t && t < self.end
    }

    /// The window immediately before this one, used to aggregate the prior
    /// period for trend deltas.
    ///
    /// Daily/weekly windows shift back by their own length; monthly windows
    /// step to the previous calendar month (which may be shorter or longer);
    /// activity windows use the equal-duration interval just before, mirroring
    /// how ad-hoc ranges are compared.
    pub fn preceding(&self) -> Self {
        match self.kind {
            InsightKind::Daily => Self::daily(self.start_date() - Duration::days(1)),
            InsightKind::Weekly => Self::weekly(self.start_date() - Duration::days(7)),
            InsightKind::Monthly => {
                Self::monthly(first_of_month(self.start_date()) - Duration::days(1))
            }
            InsightKind::Activity => Self {
                start: self.start - (self.end - self.start),
                end: self.start,
                label: self.label.clone(),
                kind: InsightKind::Activity,
            },
        }
    }

    fn start_date(&self) -> NaiveDate {
        DateTime::from_timestamp(self.start, 0)
            .map(|dt| dt.date_naive())
            .unwrap_or_default()
    }
}

fn midnight(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap()
}

fn first_of_next_month(first: NaiveDate) -> NaiveDate {
    if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1).unwrap()
    }
}
