// crates/core/src/generator/provider.rs
//! TextGenerator trait defining the interface to the generative service.

use async_trait::async_trait;

use super::types::GenerationError;

/// An opaque natural-language text generator.
///
/// The production implementation is [`HttpGenerator`](super::HttpGenerator);
/// tests substitute an in-process fake. Implementations are expected to
/// enforce their own timeout and surface it as
/// [`GenerationError::Timeout`].
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt`. Network-bound and fallible.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Generator name for logging/display (e.g. "http", "fake").
    fn name(&self) -> &str;
}
