// crates/insights/src/lib.rs
//! Insight orchestration for FocusFlow.
//!
//! Ties the aggregator, fingerprint, prompt builder, cache, and external
//! generator together behind [`InsightEngine`]. Cache *identity* is the
//! (kind, window) key; cache *validity* is the content fingerprint, so a
//! single edited or added session inside an otherwise-unchanged window
//! invalidates exactly that window's entry and nothing else.

mod engine;

pub use engine::{InsightEngine, InsightError};
