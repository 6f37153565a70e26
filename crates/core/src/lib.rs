// crates/core/src/lib.rs
//! Domain logic for the FocusFlow insight engine.
//!
//! Everything in this crate is persistence-free: session and summary types,
//! time-window construction, the session aggregator, the content fingerprint,
//! the prompt builder, and the generative text service interface. The `db`
//! crate owns storage; the `insights` crate composes both.

pub mod aggregate;
pub mod fingerprint;
pub mod generator;
pub mod prompt;
pub mod types;
pub mod window;

pub use aggregate::aggregate;
pub use fingerprint::{fingerprint_records, fingerprint_summary, EMPTY_FINGERPRINT};
pub use generator::{GenerationError, GeneratorConfig, HttpGenerator, TextGenerator};
pub use prompt::build_prompt;
pub use types::{
    ActivityBreakdown, AggregatedSummary, InsightKind, MetricDelta, SessionRecord, TrendDelta,
};
pub use window::TimeWindow;
