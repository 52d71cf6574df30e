//! Ollama local LLM generator.
//!
//! Ollama runs models locally without API keys.
//! Install from: https://ollama.ai

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;

use crate::error::{BiasLensError, Result};

use super::prompts;
use super::provider::{ExplanationContext, LlmConfig, TextGenerator};

/// Default Ollama API endpoint.
const DEFAULT_API_URL: &str = "http://localhost:11434/api/chat";

/// Text generator backed by a local Ollama server.
pub struct OllamaProvider {
    client: Client,
    api_url: String,
    config: LlmConfig,
}

impl OllamaProvider {
    /// Create a new Ollama generator with default settings.
    ///
    /// Uses llama3 by default. Make sure you've pulled it:
    /// `ollama pull llama3`
    pub fn new() -> Result<Self> {
        Self::with_config(LlmConfig::default())
    }

    /// Create with a specific model.
    pub fn with_model(model: impl Into<String>) -> Result<Self> {
        let config = LlmConfig {
            model: model.into(),
            ..LlmConfig::default()
        };
        Self::with_config(config)
    }

    /// Create with custom configuration.
    ///
    /// The endpoint can be overridden with the `OLLAMA_HOST` environment
    /// variable (e.g. `http://gpu-box:11434`).
    pub fn with_config(config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BiasLensError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let api_url = std::env::var("OLLAMA_HOST")
            .map(|host| format!("{}/api/chat", host.trim_end_matches('/')))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self {
            client,
            api_url,
            config,
        })
    }

    /// Endpoint requests are sent to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Send a message to Ollama.
    fn send_message(&self, user_prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.config.model,
            "stream": false,
            "options": {
                "temperature": self.config.temperature,
                "num_predict": self.config.max_tokens
            },
            "messages": [
                {
                    "role": "system",
                    "content": prompts::system_prompt()
                },
                {
                    "role": "user",
                    "content": user_prompt
                }
            ]
        });

        let response = self
            .client
            .post(&self.api_url)
            .headers(self.build_headers())
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    BiasLensError::Generation(format!(
                        "Ollama did not answer within {}s",
                        self.config.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    BiasLensError::Generation(
                        "Failed to connect to Ollama. Is it running? Start with: ollama serve"
                            .to_string(),
                    )
                } else {
                    BiasLensError::Generation(format!("Ollama request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();

            if error_text.contains("not found") {
                return Err(BiasLensError::Generation(format!(
                    "Model '{}' not found. Pull it with: ollama pull {}",
                    self.config.model, self.config.model
                )));
            }

            return Err(BiasLensError::Generation(format!(
                "Ollama error ({}): {}",
                status, error_text
            )));
        }

        let api_response: OllamaResponse = response.json().map_err(|e| {
            BiasLensError::Generation(format!("Failed to parse Ollama response: {}", e))
        })?;

        Ok(api_response.message.content)
    }
}

impl TextGenerator for OllamaProvider {
    fn generate(&self, context: &ExplanationContext) -> Result<String> {
        let prompt = prompts::explanation_prompt(context);
        let response = self.send_message(&prompt)?;

        let text = response.trim();
        if text.is_empty() {
            return Err(BiasLensError::Generation(
                "Ollama returned an empty response".to_string(),
            ));
        }
        Ok(text.to_string())
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

/// Ollama API response structure.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_unreachable_server_is_generation_error() {
        // Port 9 (discard) is closed on test machines; the connect fails fast
        let provider = OllamaProvider {
            client: Client::builder()
                .timeout(Duration::from_secs(2))
                .build()
                .unwrap(),
            api_url: "http://127.0.0.1:9/api/chat".to_string(),
            config: LlmConfig::default(),
        };
        let ctx = ExplanationContext {
            attribute: "gender".to_string(),
            distribution: Default::default(),
            disparate_impact: 1.0,
            statistical_parity_difference: 0.0,
        };

        let err = provider.generate(&ctx).unwrap_err();
        assert!(matches!(err, BiasLensError::Generation(_)));
    }

    #[test]
    fn test_response_deserializes() {
        let raw = r#"{"model":"llama3","message":{"role":"assistant","content":" hi "},"done":true}"#;
        let parsed: OllamaResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.message.content, " hi ");
    }
}
