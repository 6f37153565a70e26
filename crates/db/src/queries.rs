// crates/db/src/queries.rs
//! Query modules, one per table.

pub mod insights_cache;
pub mod sessions;
