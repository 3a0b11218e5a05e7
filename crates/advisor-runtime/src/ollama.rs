//! Ollama LLM Provider
//!
//! Implementation of `LlmProvider` against the Ollama generate API.
//!
//! The wire format is a single JSON POST per prompt:
//! `{"model": ..., "prompt": ..., "stream": false}` answered by a body
//! whose `response` field carries the full generated text.

use std::time::Duration;

use advisor_core::{
    error::{ProviderError, Result},
    provider::{LlmProvider, ProviderInfo},
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

/// Ollama provider configuration
#[derive(Clone, Debug)]
pub struct OllamaConfig {
    /// Full URL of the generate endpoint
    pub url: String,

    /// Model identifier sent with every request
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:11434/api/generate".into(),
            model: "llama3.2".into(),
            timeout_secs: 60,
        }
    }
}

impl OllamaConfig {
    pub fn from_env() -> Self {
        let url = std::env::var("OLLAMA_URL")
            .unwrap_or_else(|_| "http://localhost:11434/api/generate".into());
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2".into());

        Self {
            url,
            model,
            ..Default::default()
        }
    }
}

/// Body of a non-streaming generate response
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Ollama LLM provider
pub struct OllamaClient {
    http: reqwest::Client,
    config: OllamaConfig,
}

impl OllamaClient {
    /// Create from configuration
    ///
    /// Fails only if the underlying HTTP client cannot be constructed.
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Config(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(OllamaConfig::from_env())
    }

    /// Create with default localhost settings
    pub fn localhost() -> Result<Self> {
        Self::new(OllamaConfig::default())
    }

    /// Server base URL, used for probes against endpoints other than generate
    fn base_url(&self) -> &str {
        self.config
            .url
            .strip_suffix("/api/generate")
            .unwrap_or(&self.config.url)
    }

    /// Map a transport error onto the provider error taxonomy
    fn classify(&self, err: &reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.config.timeout_secs)
        } else if err.is_connect() {
            ProviderError::Connect(err.to_string())
        } else if let Some(status) = err.status() {
            ProviderError::Status {
                status: status.as_u16(),
                detail: err.to_string(),
            }
        } else if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Other(err.to_string())
        }
    }

    async fn request(&self, prompt: &str) -> Result<String> {
        let payload = json!({
            "model": self.config.model,
            "prompt": prompt,
            "stream": false,
        });

        let response = self
            .http
            .post(&self.config.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.classify(&e))?
            .error_for_status()
            .map_err(|e| self.classify(&e))?;

        let body: GenerateResponse = response.json().await.map_err(|e| self.classify(&e))?;

        if body.response.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(body.response)
    }
}

#[async_trait]
impl LlmProvider for OllamaClient {
    fn describe(&self) -> ProviderInfo {
        ProviderInfo {
            name: "Ollama".into(),
            endpoint: self.config.url.clone(),
            model: self.config.model.clone(),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        match self.http.get(self.base_url()).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                tracing::warn!("Ollama health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!(
            url = %self.config.url,
            model = %self.config.model,
            prompt_chars = prompt.len(),
            "sending generate request"
        );

        match self.request(prompt).await {
            Ok(text) => {
                tracing::debug!(response_chars = text.len(), "model responded");
                Ok(text)
            }
            Err(e) => {
                tracing::warn!(
                    url = %self.config.url,
                    model = %self.config.model,
                    error = %e,
                    "model request failed"
                );
                Err(e)
            }
        }
    }
}
