//! Ollama-backed question generator - the only network-facing capability.
//!
//! One bounded request per run, no retries. Every failure mode (timeout,
//! transport error, bad status, empty body) collapses into the
//! `Unavailable` tag; callers branch on the tag instead of catching errors,
//! so a dead or slow backend can never abort a run.

use async_trait::async_trait;
use glowgen_common::GeneratorConfig;
use std::time::Duration;
use tracing::debug;

/// Outcome of one generative attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// Raw text returned by the backend
    Generated(String),
    /// The backend could not produce text, with the reason for the log
    Unavailable(String),
}

/// A source of generated text. Implemented by the Ollama client in
/// production and by canned fakes in tests.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Perform one bounded generation attempt.
    async fn generate(&self, prompt: &str) -> GenerationOutcome;
}

/// Production generator speaking to a local Ollama server.
pub struct OllamaGenerator {
    config: GeneratorConfig,
}

impl OllamaGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl QuestionGenerator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> GenerationOutcome {
        let client = match reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()
        {
            Ok(client) => client,
            Err(e) => return GenerationOutcome::Unavailable(format!("http client: {}", e)),
        };

        let body = serde_json::json!({
            "model": self.config.model,
            "prompt": prompt,
            "stream": false
        });

        debug!(
            "requesting {} questions prompt ({} chars)",
            self.config.model,
            prompt.len()
        );

        let response = match client
            .post(format!("{}/api/generate", self.config.endpoint))
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return GenerationOutcome::Unavailable(format!("request failed: {}", e)),
        };

        if !response.status().is_success() {
            return GenerationOutcome::Unavailable(format!(
                "backend returned status {}",
                response.status()
            ));
        }

        let json: serde_json::Value = match response.json().await {
            Ok(json) => json,
            Err(e) => return GenerationOutcome::Unavailable(format!("unreadable body: {}", e)),
        };

        match json.get("response").and_then(|r| r.as_str()) {
            Some(text) if !text.trim().is_empty() => {
                GenerationOutcome::Generated(text.to_string())
            }
            _ => GenerationOutcome::Unavailable("empty response field".to_string()),
        }
    }
}

/// Generator that never attempts a call. Used for offline runs and when
/// the generator is disabled in configuration.
pub struct DisabledGenerator;

#[async_trait]
impl QuestionGenerator for DisabledGenerator {
    async fn generate(&self, _prompt: &str) -> GenerationOutcome {
        GenerationOutcome::Unavailable("generator disabled".to_string())
    }
}
