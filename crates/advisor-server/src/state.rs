//! Application State

use std::sync::Arc;

use advisor_core::LlmProvider;
use finance_advisor::AdvisorEngine;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Advisory engine owning the stores and the fallback generator
    pub engine: Arc<AdvisorEngine>,

    /// LLM provider, kept separately for health reporting
    pub provider: Arc<dyn LlmProvider>,
}
