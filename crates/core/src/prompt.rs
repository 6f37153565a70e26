// crates/core/src/prompt.rs
//! Prompt builder: maps an aggregated summary to the prompt string sent to
//! the generative text service.
//!
//! One policy per insight kind. Pure string construction: no I/O, and
//! missing data renders as zero/empty rather than failing.

use crate::types::{AggregatedSummary, InsightKind};

/// How many ranked activities a prompt lists.
const ACTIVITY_RENDER_CAP: usize = 3;

/// How many sample descriptions a prompt quotes.
const DESCRIPTION_EXCERPT_CAP: usize = 3;

/// Description excerpts are included only when at least this fraction of the
/// window's sessions carry free-text notes.
const DENSITY_EXCERPT_THRESHOLD: f64 = 0.3;

/// Build the generation prompt for `kind` from `summary`.
///
/// Windows with no sessions short-circuit to a fixed encouragement template
/// that never references statistics.
pub fn build_prompt(kind: InsightKind, summary: &AggregatedSummary) -> String {
    if summary.total_sessions == 0 {
        return empty_prompt(kind, summary);
    }

    let mut prompt = String::new();

    prompt.push_str(&format!(
        "The user completed {} focus session{} {}, totaling {:.1} hours (about {:.0} minutes per session on average).\n",
        summary.total_sessions,
        if summary.total_sessions == 1 { "" } else { "s" },
        period_phrase(kind, &summary.window_label),
        summary.total_hours,
        summary.avg_session_minutes,
    ));

    if !summary.activities.is_empty() {
        prompt.push_str("\nTop activities:\n");
        for (rank, activity) in summary.activities.iter().take(ACTIVITY_RENDER_CAP).enumerate() {
            prompt.push_str(&format!(
                "{}. {} - {:.1}h ({}%)\n",
                rank + 1,
                activity.activity_type,
                activity.total_hours,
                activity.percent.round() as i64,
            ));
        }
    }

    if summary.description_density > DENSITY_EXCERPT_THRESHOLD
        && !summary.sample_descriptions.is_empty()
    {
        prompt.push_str("\nIn their own words:\n");
        for description in summary.sample_descriptions.iter().take(DESCRIPTION_EXCERPT_CAP) {
            prompt.push_str(&format!("- \"{}\"\n", description));
        }
    }

    if kind == InsightKind::Weekly {
        if let Some(trend) = &summary.trend {
            prompt.push_str(&format!(
                "\nCompared to the previous week: {:+.0} session{} ({:+.1}%), {:+.1} hours ({:+.1}%).\n",
                trend.session_count.delta,
                if trend.session_count.delta.abs() == 1.0 { "" } else { "s" },
                trend.session_count.percent_change,
                trend.hours.delta,
                trend.hours.percent_change,
            ));
        }
    }

    prompt.push('\n');
    prompt.push_str(instruction_suffix(kind));
    prompt
}

fn period_phrase(kind: InsightKind, label: &str) -> String {
    match kind {
        InsightKind::Daily => "today".to_string(),
        InsightKind::Weekly => "this week".to_string(),
        InsightKind::Monthly => "this month".to_string(),
        InsightKind::Activity => format!("on \"{}\"", label),
    }
}

fn empty_prompt(kind: InsightKind, summary: &AggregatedSummary) -> String {
    match kind {
        InsightKind::Daily => "The user logged no focus sessions today. Write 2-3 encouraging \
             sentences inviting them to start a short session tomorrow. Do not \
             invent statistics."
            .to_string(),
        InsightKind::Weekly => "The user logged no focus sessions this week. Write 2-3 encouraging \
             sentences inviting them to plan one session for next week. Do not \
             invent statistics."
            .to_string(),
        InsightKind::Monthly => "The user logged no focus sessions this month. Write 2-3 encouraging \
             sentences about starting fresh next month. Do not invent statistics."
            .to_string(),
        InsightKind::Activity => format!(
            "The user logged no focus sessions for \"{}\" in this period. Write \
             2-3 encouraging sentences inviting them to schedule time for it. Do \
             not invent statistics.",
            summary.window_label
        ),
    }
}

fn instruction_suffix(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Daily => {
            "Write 2-3 sentences. Include: (1) one pattern or achievement from \
             today, (2) one actionable suggestion for tomorrow. Keep the tone \
             encouraging and specific, and address the user directly."
        }
        InsightKind::Weekly => {
            "Write 3-4 sentences. Include: (1) the week's standout pattern or \
             achievement, (2) how this week compares to the previous one, (3) one \
             actionable suggestion for next week. Keep the tone encouraging and \
             specific, and address the user directly."
        }
        InsightKind::Monthly => {
            "Write 4-5 sentences. Include: (1) the month's big-picture \
             trajectory, (2) one standout pattern or achievement, (3) how their \
             habits shifted over the month, (4) one actionable suggestion for \
             next month. Keep the tone encouraging and specific, and address the \
             user directly."
        }
        InsightKind::Activity => {
            "Write 2-3 sentences. Include: (1) one pattern or achievement in this \
             activity, (2) one actionable suggestion to improve it. Keep the tone \
             encouraging and specific, and address the user directly."
        }
    }
}
