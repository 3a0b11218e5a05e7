//! LLM Provider Strategy Pattern
//!
//! Defines a common interface for all model backends (Ollama, OpenAI, etc.)
//! so the advisory engine can generate text without knowing which service
//! is behind it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use advisor_core::provider::LlmProvider;
//!
//! let provider = OllamaClient::new(config)?;
//! let advice = provider.generate("As an expert financial advisor...").await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Provider metadata for logging and health reporting
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "Ollama")
    pub name: String,

    /// Endpoint the provider sends requests to
    pub endpoint: String,

    /// Model identifier used for generation
    pub model: String,
}

/// Strategy trait for LLM providers
///
/// Implement this trait to add support for a new model backend.
/// The advisory engine works exclusively through this interface.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider identity, endpoint and model
    fn describe(&self) -> ProviderInfo;

    /// Check if the provider is reachable and configured correctly
    async fn health_check(&self) -> Result<bool>;

    /// Generate a completion for a single prompt
    ///
    /// Returns the full generated text. Implementations must map an empty
    /// generation to [`ProviderError::EmptyResponse`] rather than returning
    /// an empty string.
    ///
    /// [`ProviderError::EmptyResponse`]: crate::error::ProviderError::EmptyResponse
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoProvider;

    #[async_trait]
    impl LlmProvider for EchoProvider {
        fn describe(&self) -> ProviderInfo {
            ProviderInfo {
                name: "Echo".into(),
                endpoint: "local".into(),
                model: "echo-1".into(),
            }
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        async fn generate(&self, prompt: &str) -> Result<String> {
            Ok(format!("echo: {prompt}"))
        }
    }

    #[tokio::test]
    async fn test_provider_through_trait_object() {
        let provider: Box<dyn LlmProvider> = Box::new(EchoProvider);
        assert_eq!(provider.describe().model, "echo-1");
        assert!(provider.health_check().await.unwrap());

        let text = provider.generate("hello").await.unwrap();
        assert_eq!(text, "echo: hello");
    }
}
