//! # advisor-core
//!
//! Core abstractions for the finance advisory pipeline: a provider-agnostic
//! LLM interface and the error taxonomy for model calls.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    AdvisorEngine                          │
//! │  ┌──────────┐   ┌──────────────┐   ┌──────────────────┐  │
//! │  │  Prompt  │──▶│ LlmProvider  │──▶│    Formatter     │  │
//! │  │  Builder │   │  (Strategy)  │   │  (markdown→HTML) │  │
//! │  └──────────┘   └──────┬───────┘   └──────────────────┘  │
//! │                        │ on failure                      │
//! │                 ┌──────▼───────┐                         │
//! │                 │   Fallback   │                         │
//! │                 │  Generator   │                         │
//! │                 └──────────────┘                         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait enables swapping between Ollama, OpenAI, Anthropic,
//! or any other backend without changing advisory logic. Providers never
//! surface errors to end users directly; callers are expected to substitute
//! locally generated advice when a provider call fails.

pub mod error;
pub mod provider;

pub use error::{ProviderError, Result};
pub use provider::{LlmProvider, ProviderInfo};
