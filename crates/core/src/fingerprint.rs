// crates/core/src/fingerprint.rs
//! Content fingerprints for cache-validity comparison.
//!
//! A fingerprint is a deterministic, order-independent digest of the records
//! (or derived summary) an insight was generated from. Its only job is
//! equality detection: if the fingerprint stored with a cached insight still
//! matches the window's current records, the cached text may be reused.
//! CRC32 collisions are tolerable here: a collision merely lets a stale
//! insight survive one extra round, it never corrupts data.

use crate::types::{AggregatedSummary, SessionRecord};

/// Sentinel fingerprint for the empty record set. Five characters, so it can
/// never collide with a real 8-hex-char digest.
pub const EMPTY_FINGERPRINT: &str = "empty";

/// Fingerprint a set of session records.
///
/// Order-independent: any permutation of the same records yields the same
/// digest. The digest covers each record's identifier, activity type,
/// duration, and creation time. Editing any of those, or adding/removing a
/// record, changes the fingerprint.
pub fn fingerprint_records(records: &[SessionRecord]) -> String {
    if records.is_empty() {
        return EMPTY_FINGERPRINT.to_string();
    }

    let mut lines: Vec<String> = records
        .iter()
        .map(|r| {
            format!(
                "{}|{}|{}|{}",
                r.id, r.activity_type, r.duration_secs, r.created_at
            )
        })
        .collect();
    lines.sort_unstable();

    digest(lines.join("\n").as_bytes())
}

/// Fingerprint an aggregated summary via its canonical JSON serialization.
///
/// Used when only derived data, not the raw records, is available for
/// comparison. Struct field order is fixed, so the serialization (and the
/// digest) is deterministic.
pub fn fingerprint_summary(summary: &AggregatedSummary) -> String {
    let json = serde_json::to_string(summary).unwrap_or_default();
    digest(json.as_bytes())
}

fn digest(bytes: &[u8]) -> String {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(bytes);
    format!("{:08x}", hasher.finalize())
}
