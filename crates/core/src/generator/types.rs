// crates/core/src/generator/types.rs
//! Error type for generative service calls.

use thiserror::Error;

/// Errors that can occur while requesting generated text.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Http(String),

    #[error("generation service returned status {0}")]
    Status(u16),

    #[error("invalid response payload: {0}")]
    InvalidResponse(String),

    #[error("generation timed out after {0} seconds")]
    Timeout(u64),
}
