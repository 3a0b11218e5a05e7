//! # advisor-runtime
//!
//! Runtime model providers for the finance advisory service.
//!
//! ## Providers
//!
//! - **Ollama** (default): Local LLM inference via the Ollama generate API
//!
//! ## Usage
//!
//! ```rust,ignore
//! use advisor_runtime::ollama::{OllamaClient, OllamaConfig};
//!
//! let client = OllamaClient::new(OllamaConfig::from_env())?;
//! let engine = AdvisorEngine::new(Arc::new(client), profiles, advice, chat);
//! ```

pub mod ollama;

pub use ollama::{OllamaClient, OllamaConfig};

// Re-export core types for convenience
pub use advisor_core::{LlmProvider, ProviderError, ProviderInfo, Result};
