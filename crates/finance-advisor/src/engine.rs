//! Advisory Engine
//!
//! Orchestrates the whole advice pipeline: profile management, prompt
//! construction, model invocation with local fallback, response formatting
//! and persistence. Network trouble never escapes this layer; callers of
//! `generate_advice` and `chat_turn` always get content back.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use advisor_core::LlmProvider;

use crate::error::{AdvisorError, Result};
use crate::fallback::FallbackGenerator;
use crate::model::{ChatMessage, FinancialProfile, InvestmentAdvice, InvestmentGoal, ProfileInput};
use crate::prompt;
use crate::render::{format_advice, strip_wrapper};
use crate::store::{AdviceStore, ChatStore, ProfileStore};

/// Opening phrases that keep repeated advice from reading identically
const MARKET_PERSPECTIVES: [&str; 5] = [
    "In the current market conditions",
    "Given recent economic trends",
    "With today's market volatility",
    "Considering the present economic climate",
    "In light of recent market developments",
];

/// Candidate focus areas, keyed by the profile's investment goal
fn focus_areas(goal: InvestmentGoal) -> &'static [&'static str] {
    match goal {
        InvestmentGoal::Retirement => &[
            "long-term wealth building",
            "retirement planning",
            "pension optimization",
        ],
        InvestmentGoal::Wealth => &[
            "wealth accumulation",
            "portfolio diversification",
            "high-growth investments",
        ],
        InvestmentGoal::Education => &[
            "education funding",
            "systematic investment for education",
            "tax-efficient education savings",
        ],
        InvestmentGoal::Home => &[
            "real estate investment",
            "mortgage planning",
            "down payment strategies",
        ],
        InvestmentGoal::Other => &[
            "financial independence",
            "passive income streams",
            "balanced portfolio management",
        ],
    }
}

/// Capitalize the first letter of every alphabetic run, including after
/// hyphens, so "long-term wealth building" becomes "Long-Term Wealth
/// Building" in advice titles
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// What a chat turn hands back to the caller
#[derive(Clone, Debug, Serialize)]
pub struct ChatReply {
    /// Sanitized HTML fragment, ready to render
    pub response_html: String,

    /// Unformatted model (or fallback) text
    pub raw_response: String,

    /// When the advisor message was recorded
    pub timestamp: DateTime<Utc>,
}

/// The advisory service core
///
/// Holds the model provider behind its trait seam plus the three stores.
/// Cheap to share: wrap in an `Arc` and clone the handle per request.
pub struct AdvisorEngine {
    provider: Arc<dyn LlmProvider>,
    fallback: FallbackGenerator,
    profiles: Arc<dyn ProfileStore>,
    advice: Arc<dyn AdviceStore>,
    chat: Arc<dyn ChatStore>,
    seed: Option<u64>,
}

impl AdvisorEngine {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        profiles: Arc<dyn ProfileStore>,
        advice: Arc<dyn AdviceStore>,
        chat: Arc<dyn ChatStore>,
    ) -> Self {
        Self {
            provider,
            fallback: FallbackGenerator::new(),
            profiles,
            advice,
            chat,
            seed: None,
        }
    }

    /// Pin focus-area, perspective and fallback variety for reproducible
    /// output. Production engines stay unseeded.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.fallback = FallbackGenerator::seeded(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Ask the model for a completion; on any failure or empty answer,
    /// substitute locally generated advice. Never fails.
    async fn complete_or_fallback(&self, prompt: &str) -> String {
        match self.provider.generate(prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!("model returned empty text, using fallback advice");
                self.fallback.generate(prompt)
            }
            Err(err) => {
                warn!(error = %err, "model unavailable, using fallback advice");
                self.fallback.generate(prompt)
            }
        }
    }

    /// Validate and store a new profile, then generate the user's first
    /// piece of advice so their dashboard is never empty
    pub async fn create_profile(
        &self,
        user_id: &str,
        input: ProfileInput,
    ) -> Result<FinancialProfile> {
        let profile = FinancialProfile::from_input(user_id, input)?;
        self.profiles.save(&profile)?;
        info!(user_id, profile_id = %profile.id, "financial profile created");

        self.generate_advice_for(&profile).await?;
        Ok(profile)
    }

    /// Re-validate and replace an existing profile
    pub fn update_profile(&self, user_id: &str, input: ProfileInput) -> Result<FinancialProfile> {
        let mut profile = self.get_profile(user_id)?;
        profile.apply_update(input)?;
        self.profiles.update(&profile)?;
        info!(user_id, profile_id = %profile.id, "financial profile updated");
        Ok(profile)
    }

    pub fn get_profile(&self, user_id: &str) -> Result<FinancialProfile> {
        self.profiles
            .find_by_user(user_id)?
            .ok_or(AdvisorError::ProfileNotFound)
    }

    /// Generate and persist a fresh piece of advice for the user
    pub async fn generate_advice(&self, user_id: &str) -> Result<InvestmentAdvice> {
        let profile = self.get_profile(user_id)?;
        self.generate_advice_for(&profile).await
    }

    async fn generate_advice_for(&self, profile: &FinancialProfile) -> Result<InvestmentAdvice> {
        let previous = self.advice.count_for_user(&profile.user_id)?;

        let mut rng = self.rng();
        let areas = focus_areas(profile.investment_goal);
        let focus_area = areas[rng.gen_range(0..areas.len())];
        let perspective = MARKET_PERSPECTIVES[rng.gen_range(0..MARKET_PERSPECTIVES.len())];

        let prompt = prompt::enhanced_advice_prompt(
            profile,
            focus_area,
            perspective,
            previous,
            Local::now(),
        );
        let raw = self.complete_or_fallback(&prompt).await;

        let formatted = format_advice(&raw);
        let content = strip_wrapper(&formatted).to_string();

        let title = format!(
            "Investment Advice: {} for {}",
            title_case(focus_area),
            profile.name
        );
        let advice = InvestmentAdvice::new(profile.user_id.clone(), profile.id, title, content);
        self.advice.save(&advice)?;
        info!(
            user_id = %profile.user_id,
            advice_id = %advice.id,
            focus_area,
            "investment advice generated"
        );

        Ok(advice)
    }

    /// One full chat exchange: persist the user message, answer it with
    /// profile and history context, persist and return the reply
    pub async fn chat_turn(&self, user_id: &str, message: &str) -> Result<ChatReply> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AdvisorError::EmptyMessage);
        }

        let profile = self.get_profile(user_id)?;

        self.chat.save(&ChatMessage::user(user_id, message))?;

        // History is read back after the save so the prompt window includes
        // the message being answered
        let history = self.chat.list_for_user(user_id)?;
        let prompt = prompt::chat_prompt(&profile, &history, message);

        let raw = self.complete_or_fallback(&prompt).await;
        let formatted = format_advice(&raw);
        let response_html = strip_wrapper(&formatted).to_string();

        let reply = ChatMessage::advisor(user_id, response_html.clone());
        self.chat.save(&reply)?;
        info!(user_id, "chat turn completed");

        Ok(ChatReply {
            response_html,
            raw_response: raw,
            timestamp: reply.timestamp,
        })
    }

    /// All advice for a user, newest first
    pub fn advice_history(&self, user_id: &str) -> Result<Vec<InvestmentAdvice>> {
        self.advice.list_for_user(user_id)
    }

    /// One advice record, only if it belongs to the requesting user
    pub fn get_advice(&self, id: Uuid, user_id: &str) -> Result<InvestmentAdvice> {
        self.advice
            .find(id, user_id)?
            .ok_or(AdvisorError::AdviceNotFound(id))
    }

    /// Full chat transcript for a user, oldest first
    pub fn chat_history(&self, user_id: &str) -> Result<Vec<ChatMessage>> {
        self.chat.list_for_user(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{KnowledgeLevel, MessageAuthor, RiskTolerance};
    use crate::store::{MemoryAdviceStore, MemoryChatStore, MemoryProfileStore};
    use advisor_core::{ProviderError, ProviderInfo};
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    struct FailingProvider;

    #[async_trait]
    impl LlmProvider for FailingProvider {
        fn describe(&self) -> ProviderInfo {
            ProviderInfo {
                name: "failing".into(),
                endpoint: "http://localhost:9/api/generate".into(),
                model: "none".into(),
            }
        }

        async fn health_check(&self) -> advisor_core::Result<bool> {
            Ok(false)
        }

        async fn generate(&self, _prompt: &str) -> advisor_core::Result<String> {
            Err(ProviderError::Connect("connection refused".into()))
        }
    }

    struct CannedProvider(&'static str);

    #[async_trait]
    impl LlmProvider for CannedProvider {
        fn describe(&self) -> ProviderInfo {
            ProviderInfo {
                name: "canned".into(),
                endpoint: "memory".into(),
                model: "none".into(),
            }
        }

        async fn health_check(&self) -> advisor_core::Result<bool> {
            Ok(true)
        }

        async fn generate(&self, _prompt: &str) -> advisor_core::Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn engine_with(provider: Arc<dyn LlmProvider>) -> AdvisorEngine {
        AdvisorEngine::new(
            provider,
            Arc::new(MemoryProfileStore::new()),
            Arc::new(MemoryAdviceStore::new()),
            Arc::new(MemoryChatStore::new()),
        )
    }

    fn conservative_input() -> ProfileInput {
        ProfileInput {
            name: "Asha".into(),
            age: 32,
            occupation: "Teacher".into(),
            family_size: 2,
            monthly_income: dec!(50000),
            monthly_expenses: dec!(30000),
            monthly_savings: dec!(15000),
            current_debts: Decimal::ZERO,
            debt_interest_rate: Decimal::ZERO,
            annual_income: None,
            savings: None,
            risk_tolerance: RiskTolerance::VeryConservative,
            investment_goal: InvestmentGoal::Retirement,
            investment_knowledge: KnowledgeLevel::Beginner,
            has_investment_experience: false,
            previous_investments: String::new(),
            short_term_goals: "Emergency fund".into(),
            short_term_goal_amount: dec!(300000),
            medium_term_goals: String::new(),
            medium_term_goal_amount: Decimal::ZERO,
            long_term_goals: "Retirement corpus".into(),
            long_term_goal_amount: dec!(20000000),
            other_assets: String::new(),
            retirement_plans: String::new(),
        }
    }

    #[tokio::test]
    async fn test_unreachable_model_still_yields_conservative_advice() {
        let engine = engine_with(Arc::new(FailingProvider)).with_seed(1);
        engine.create_profile("u1", conservative_input()).await.unwrap();

        let history = engine.advice_history("u1").unwrap();
        assert_eq!(history.len(), 1);

        let advice = &history[0];
        assert!(advice.content.contains("Fixed Income Investments (60-70%)"));
        assert!(advice.title.starts_with("Investment Advice: "));
        assert!(advice.title.ends_with(" for Asha"));
        // persisted without the presentation wrapper
        assert!(!advice.content.contains("advice-content"));
    }

    #[tokio::test]
    async fn test_advice_requires_profile() {
        let engine = engine_with(Arc::new(FailingProvider));
        let err = engine.generate_advice("nobody").await.unwrap_err();
        assert!(matches!(err, AdvisorError::ProfileNotFound));
    }

    #[tokio::test]
    async fn test_duplicate_profile_rejected() {
        let engine = engine_with(Arc::new(FailingProvider));
        engine.create_profile("u1", conservative_input()).await.unwrap();

        let err = engine
            .create_profile("u1", conservative_input())
            .await
            .unwrap_err();
        assert!(matches!(err, AdvisorError::ProfileExists));
    }

    #[tokio::test]
    async fn test_chat_turn_persists_question_and_reply() {
        let engine = engine_with(Arc::new(FailingProvider)).with_seed(5);
        engine.create_profile("u1", conservative_input()).await.unwrap();

        let reply = engine
            .chat_turn("u1", "What should I do for retirement?")
            .await
            .unwrap();
        assert!(reply.response_html.contains("Retirement Planning"));
        assert!(!reply.raw_response.is_empty());

        let transcript = engine.chat_history("u1").unwrap();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].author, MessageAuthor::User);
        assert_eq!(transcript[0].content, "What should I do for retirement?");
        assert_eq!(transcript[1].author, MessageAuthor::Advisor);
        assert_eq!(transcript[1].content, reply.response_html);
    }

    #[tokio::test]
    async fn test_empty_chat_message_rejected() {
        let engine = engine_with(Arc::new(FailingProvider));
        let err = engine.chat_turn("u1", "   ").await.unwrap_err();
        assert!(matches!(err, AdvisorError::EmptyMessage));
    }

    #[tokio::test]
    async fn test_chat_requires_profile() {
        let engine = engine_with(Arc::new(FailingProvider));
        let err = engine.chat_turn("nobody", "hello").await.unwrap_err();
        assert!(matches!(err, AdvisorError::ProfileNotFound));
    }

    #[tokio::test]
    async fn test_advice_history_newest_first() {
        let engine = engine_with(Arc::new(FailingProvider)).with_seed(2);
        engine.create_profile("u1", conservative_input()).await.unwrap();
        engine.generate_advice("u1").await.unwrap();
        engine.generate_advice("u1").await.unwrap();

        let history = engine.advice_history("u1").unwrap();
        assert_eq!(history.len(), 3);
        assert!(history
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at));
    }

    #[tokio::test]
    async fn test_get_advice_is_scoped_to_owner() {
        let engine = engine_with(Arc::new(FailingProvider)).with_seed(3);
        engine.create_profile("u1", conservative_input()).await.unwrap();
        let advice = &engine.advice_history("u1").unwrap()[0];

        assert!(engine.get_advice(advice.id, "u1").is_ok());
        let err = engine.get_advice(advice.id, "intruder").unwrap_err();
        assert!(matches!(err, AdvisorError::AdviceNotFound(_)));
    }

    #[tokio::test]
    async fn test_model_text_is_formatted_and_returned_raw() {
        let engine =
            engine_with(Arc::new(CannedProvider("Invest **steadily** in index funds.")));
        engine.create_profile("u1", conservative_input()).await.unwrap();

        let reply = engine.chat_turn("u1", "any tips?").await.unwrap();
        assert_eq!(reply.raw_response, "Invest **steadily** in index funds.");
        assert!(reply.response_html.contains("<strong>steadily</strong>"));
        assert!(reply.response_html.starts_with("<p class=\"advice-paragraph\">"));
    }

    #[tokio::test]
    async fn test_seeded_engines_produce_identical_advice() {
        let a = engine_with(Arc::new(FailingProvider)).with_seed(9);
        let b = engine_with(Arc::new(FailingProvider)).with_seed(9);
        a.create_profile("u1", conservative_input()).await.unwrap();
        b.create_profile("u1", conservative_input()).await.unwrap();

        let advice_a = &a.advice_history("u1").unwrap()[0];
        let advice_b = &b.advice_history("u1").unwrap()[0];
        assert_eq!(advice_a.title, advice_b.title);
        assert_eq!(advice_a.content, advice_b.content);
    }

    #[tokio::test]
    async fn test_update_profile_keeps_identity() {
        let engine = engine_with(Arc::new(FailingProvider)).with_seed(4);
        let created = engine.create_profile("u1", conservative_input()).await.unwrap();

        let mut input = conservative_input();
        input.name = "Asha K".into();
        input.risk_tolerance = RiskTolerance::Aggressive;
        let updated = engine.update_profile("u1", input).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Asha K");
        assert_eq!(
            engine.get_profile("u1").unwrap().risk_tolerance,
            RiskTolerance::Aggressive
        );
    }

    #[test]
    fn test_title_case_capitalizes_hyphenated_words() {
        assert_eq!(title_case("long-term wealth building"), "Long-Term Wealth Building");
        assert_eq!(title_case("pension optimization"), "Pension Optimization");
        assert_eq!(title_case("ELSS funds"), "Elss Funds");
    }
}
