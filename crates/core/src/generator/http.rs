// crates/core/src/generator/http.rs
//! HTTP text generator: POSTs the prompt to the configured endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::config::GeneratorConfig;
use super::provider::TextGenerator;
use super::types::GenerationError;

/// Production generator: one JSON POST per request, whole call bounded by
/// the configured timeout.
pub struct HttpGenerator {
    client: reqwest::Client,
    config: GeneratorConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    text: String,
}

impl HttpGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn request(&self, prompt: &str) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&GenerateRequest {
                model: &self.config.model,
                prompt,
                max_tokens: self.config.max_tokens,
            })
            .send()
            .await
            .map_err(|e| GenerationError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GenerationError::Status(response.status().as_u16()));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        if body.text.trim().is_empty() {
            return Err(GenerationError::InvalidResponse("empty text".into()));
        }

        Ok(body.text)
    }
}

#[async_trait]
impl TextGenerator for HttpGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let t0 = std::time::Instant::now();
        let text = timeout(
            Duration::from_secs(self.config.timeout_secs),
            self.request(prompt),
        )
        .await
        .map_err(|_| GenerationError::Timeout(self.config.timeout_secs))??;

        debug!(
            model = %self.config.model,
            latency_ms = t0.elapsed().as_millis() as u64,
            "generation completed"
        );
        Ok(text)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: String) -> GeneratorConfig {
        GeneratorConfig {
            endpoint,
            ..GeneratorConfig::default()
        }
    }

    #[tokio::test]
    async fn test_generate_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/generate")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_body(r#"{"text":"A strong day of deep work."}"#)
            .create_async()
            .await;

        let generator = HttpGenerator::new(config(format!("{}/generate", server.url())));
        let text = generator.generate("prompt").await.unwrap();
        assert_eq!(text, "A strong day of deep work.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_sends_model_and_prompt() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/generate")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "insight-v1",
                "prompt": "tell me about my week",
            })))
            .with_status(200)
            .with_body(r#"{"text":"ok"}"#)
            .create_async()
            .await;

        let generator = HttpGenerator::new(config(format!("{}/generate", server.url())));
        generator.generate("tell me about my week").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/generate")
            .with_status(503)
            .create_async()
            .await;

        let generator = HttpGenerator::new(config(format!("{}/generate", server.url())));
        let err = generator.generate("prompt").await.unwrap_err();
        assert!(matches!(err, GenerationError::Status(503)));
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/generate")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let generator = HttpGenerator::new(config(format!("{}/generate", server.url())));
        let err = generator.generate("prompt").await.unwrap_err();
        assert!(matches!(err, GenerationError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/generate")
            .with_status(200)
            .with_body(r#"{"text":"   "}"#)
            .create_async()
            .await;

        let generator = HttpGenerator::new(config(format!("{}/generate", server.url())));
        let err = generator.generate("prompt").await.unwrap_err();
        assert!(matches!(err, GenerationError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_zero_timeout_fails_fast() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/generate")
            .with_status(200)
            .with_body(r#"{"text":"too late"}"#)
            .create_async()
            .await;

        let generator = HttpGenerator::new(GeneratorConfig {
            endpoint: format!("{}/generate", server.url()),
            timeout_secs: 0,
            ..GeneratorConfig::default()
        });
        let err = generator.generate("prompt").await.unwrap_err();
        assert!(matches!(err, GenerationError::Timeout(0)));
    }
}
