//! # finance-advisor
//!
//! Personalized investment advisory engine. Builds prompts from a user's
//! financial profile, asks an [`advisor_core::LlmProvider`] for advice,
//! formats the reply into sanitized HTML, and falls back to locally
//! generated guidance whenever the model is unreachable.
//!
//! ## Flow
//!
//! ```text
//! FinancialProfile ──▶ prompt ──▶ LlmProvider ──▶ format_advice ──▶ stored advice
//!                                     │
//!                                     │ on failure
//!                                     ▼
//!                              FallbackGenerator
//! ```
//!
//! Profiles, advice records, and chat transcripts persist through the
//! store traits in [`store`]; the in-memory implementations back the
//! default deployment and the test suite.

pub mod currency;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod maintenance;
pub mod model;
pub mod prompt;
pub mod render;
pub mod store;

pub use engine::{AdvisorEngine, ChatReply};
pub use error::{AdvisorError, Result};
pub use fallback::FallbackGenerator;
pub use model::{
    ChatMessage, FinancialProfile, InvestmentAdvice, InvestmentGoal, KnowledgeLevel,
    MessageAuthor, ProfileInput, RiskTolerance,
};
pub use render::{format_advice, strip_html, strip_wrapper};
pub use store::{
    AdviceStore, ChatStore, MemoryAdviceStore, MemoryChatStore, MemoryProfileStore, ProfileStore,
};
