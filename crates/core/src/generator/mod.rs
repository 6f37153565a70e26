// crates/core/src/generator/mod.rs
//! Generative text service integration.
//!
//! Provides the `TextGenerator` trait the orchestrator calls through, the
//! HTTP implementation used in production, and the error/config types shared
//! by both.

pub mod config;
pub mod http;
pub mod provider;
pub mod types;

pub use config::GeneratorConfig;
pub use http::HttpGenerator;
pub use provider::TextGenerator;
pub use types::GenerationError;
