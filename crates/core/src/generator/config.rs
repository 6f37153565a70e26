// crates/core/src/generator/config.rs
//! Generator configuration.

/// Configuration for the HTTP text generator.
///
/// Passed explicitly wherever a generator is constructed; there is no
/// global configuration.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Full URL of the generation endpoint.
    pub endpoint: String,
    /// Model identifier forwarded to the service.
    pub model: String,
    /// Whole-call timeout; expiry is treated as generation failure.
    pub timeout_secs: u64,
    pub max_tokens: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.focusflow.app/v1/insights/generate".into(),
            model: "insight-v1".into(),
            timeout_secs: 10,
            max_tokens: 256,
        }
    }
}
