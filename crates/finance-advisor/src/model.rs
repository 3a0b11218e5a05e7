//! Domain Models
//!
//! Core data types for the advisory service: financial profiles, generated
//! advice records and chat messages.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AdvisorError, Result};

/// Willingness to take investment risk, on a 1-5 scale
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RiskTolerance {
    VeryConservative = 1,
    Conservative = 2,
    Neutral = 3,
    Aggressive = 4,
    ExtremelyAggressive = 5,
}

impl RiskTolerance {
    /// Human-readable label used in prompts and summaries
    pub const fn display(self) -> &'static str {
        match self {
            Self::VeryConservative => "Very Conservative",
            Self::Conservative => "Conservative",
            Self::Neutral => "Neutral",
            Self::Aggressive => "Aggressive",
            Self::ExtremelyAggressive => "Extremely Aggressive",
        }
    }
}

impl TryFrom<u8> for RiskTolerance {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::VeryConservative),
            2 => Ok(Self::Conservative),
            3 => Ok(Self::Neutral),
            4 => Ok(Self::Aggressive),
            5 => Ok(Self::ExtremelyAggressive),
            _ => Err("Risk tolerance must be between 1 and 5".into()),
        }
    }
}

impl From<RiskTolerance> for u8 {
    fn from(value: RiskTolerance) -> Self {
        value as Self
    }
}

impl std::fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display())
    }
}

/// Primary objective the user is investing toward
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentGoal {
    Retirement,
    Wealth,
    Education,
    Home,
    #[default]
    Other,
}

impl InvestmentGoal {
    /// Human-readable label used in prompts and summaries
    pub const fn display(self) -> &'static str {
        match self {
            Self::Retirement => "Retirement Planning",
            Self::Wealth => "Wealth Building",
            Self::Education => "Education Funding",
            Self::Home => "Home Purchase",
            Self::Other => "Other Goals",
        }
    }
}

impl std::fmt::Display for InvestmentGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display())
    }
}

/// Self-assessed investment knowledge, on a 1-5 scale
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum KnowledgeLevel {
    Beginner = 1,
    Intermediate = 2,
    #[default]
    Advanced = 3,
    Expert = 4,
    ExtremelyExpert = 5,
}

impl KnowledgeLevel {
    /// Human-readable label used in prompts and summaries
    pub const fn display(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
            Self::ExtremelyExpert => "Extremely Expert",
        }
    }
}

impl TryFrom<u8> for KnowledgeLevel {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Beginner),
            2 => Ok(Self::Intermediate),
            3 => Ok(Self::Advanced),
            4 => Ok(Self::Expert),
            5 => Ok(Self::ExtremelyExpert),
            _ => Err("Investment knowledge must be between 1 and 5".into()),
        }
    }
}

impl From<KnowledgeLevel> for u8 {
    fn from(value: KnowledgeLevel) -> Self {
        value as Self
    }
}

impl std::fmt::Display for KnowledgeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display())
    }
}

fn default_family_size() -> u32 {
    1
}

/// A submitted financial profile, before validation and derivation
///
/// `annual_income` and `savings` may be omitted; they are derived from the
/// monthly figures when absent or zero.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileInput {
    pub name: String,
    pub age: u32,
    pub occupation: String,

    #[serde(default = "default_family_size")]
    pub family_size: u32,

    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    pub monthly_savings: Decimal,

    #[serde(default)]
    pub current_debts: Decimal,

    #[serde(default)]
    pub debt_interest_rate: Decimal,

    #[serde(default)]
    pub annual_income: Option<Decimal>,

    #[serde(default)]
    pub savings: Option<Decimal>,

    pub risk_tolerance: RiskTolerance,

    #[serde(default)]
    pub investment_goal: InvestmentGoal,

    #[serde(default)]
    pub investment_knowledge: KnowledgeLevel,

    #[serde(default)]
    pub has_investment_experience: bool,

    #[serde(default)]
    pub previous_investments: String,

    #[serde(default)]
    pub short_term_goals: String,

    #[serde(default)]
    pub short_term_goal_amount: Decimal,

    #[serde(default)]
    pub medium_term_goals: String,

    #[serde(default)]
    pub medium_term_goal_amount: Decimal,

    #[serde(default)]
    pub long_term_goals: String,

    #[serde(default)]
    pub long_term_goal_amount: Decimal,

    #[serde(default)]
    pub other_assets: String,

    #[serde(default)]
    pub retirement_plans: String,
}

impl ProfileInput {
    /// Fill derived fields from the monthly figures
    ///
    /// Derivation order matters: annual income comes from monthly income
    /// first, so a profile submitted with only one of the two always ends
    /// up with both populated.
    pub fn resolve(mut self) -> Self {
        let annual = self.annual_income.unwrap_or_default();
        if annual.is_zero() && !self.monthly_income.is_zero() {
            self.annual_income = Some(self.monthly_income * dec!(12));
        } else {
            self.annual_income = Some(annual);
        }

        if self.monthly_income.is_zero() {
            if let Some(annual) = self.annual_income {
                if !annual.is_zero() {
                    self.monthly_income = (annual / dec!(12)).round_dp(2);
                }
            }
        }

        let savings = self.savings.unwrap_or_default();
        if savings.is_zero() {
            self.savings = Some(self.monthly_savings * dec!(12));
        } else {
            self.savings = Some(savings);
        }

        self
    }

    /// Check every domain rule, returning the first violation
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AdvisorError::Validation("This field is required.".into()));
        }
        if self.age < 18 {
            return Err(AdvisorError::Validation(
                "You must be at least 18 years old".into(),
            ));
        }
        if self.age > 100 {
            return Err(AdvisorError::Validation("Please enter a valid age".into()));
        }
        if self.occupation.trim().is_empty() {
            return Err(AdvisorError::Validation("This field is required.".into()));
        }
        if self.family_size < 1 {
            return Err(AdvisorError::Validation(
                "Family size must be at least 1".into(),
            ));
        }
        if self.monthly_income < Decimal::ZERO {
            return Err(AdvisorError::Validation(
                "Monthly income cannot be negative".into(),
            ));
        }
        if self.annual_income.unwrap_or_default() < Decimal::ZERO {
            return Err(AdvisorError::Validation(
                "Annual income cannot be negative".into(),
            ));
        }
        if self.monthly_expenses < Decimal::ZERO {
            return Err(AdvisorError::Validation(
                "Monthly expenses cannot be negative".into(),
            ));
        }
        if self.monthly_savings < Decimal::ZERO {
            return Err(AdvisorError::Validation(
                "Monthly savings cannot be negative".into(),
            ));
        }
        if self.current_debts < Decimal::ZERO {
            return Err(AdvisorError::Validation(
                "Current debts cannot be negative".into(),
            ));
        }
        if self.savings.unwrap_or_default() < Decimal::ZERO {
            return Err(AdvisorError::Validation(
                "Savings cannot be negative".into(),
            ));
        }
        if self.debt_interest_rate < Decimal::ZERO {
            return Err(AdvisorError::Validation(
                "Debt interest rate cannot be negative".into(),
            ));
        }
        if self.debt_interest_rate > dec!(100) {
            return Err(AdvisorError::Validation(
                "Debt interest rate cannot exceed 100%".into(),
            ));
        }
        if self.short_term_goal_amount < Decimal::ZERO
            || self.medium_term_goal_amount < Decimal::ZERO
            || self.long_term_goal_amount < Decimal::ZERO
        {
            return Err(AdvisorError::Validation(
                "Goal amount cannot be negative".into(),
            ));
        }
        if self.monthly_expenses > self.monthly_income {
            return Err(AdvisorError::Validation(
                "Monthly expenses cannot be greater than monthly income".into(),
            ));
        }
        if self.monthly_savings > self.monthly_income - self.monthly_expenses {
            return Err(AdvisorError::Validation(
                "Monthly savings cannot be greater than (income - expenses)".into(),
            ));
        }

        Ok(())
    }
}

/// Financial profile of a user with investment preferences and goals
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub id: Uuid,
    pub user_id: String,

    // Personal information
    pub name: String,
    pub age: u32,
    pub occupation: String,
    pub family_size: u32,

    // Financial information
    pub monthly_income: Decimal,
    pub annual_income: Decimal,
    pub monthly_expenses: Decimal,
    pub monthly_savings: Decimal,
    pub savings: Decimal,
    pub current_debts: Decimal,
    pub debt_interest_rate: Decimal,

    // Investment preferences
    pub risk_tolerance: RiskTolerance,
    pub investment_goal: InvestmentGoal,
    pub investment_knowledge: KnowledgeLevel,
    pub has_investment_experience: bool,
    pub previous_investments: String,

    // Tiered goals
    pub short_term_goals: String,
    pub short_term_goal_amount: Decimal,
    pub medium_term_goals: String,
    pub medium_term_goal_amount: Decimal,
    pub long_term_goals: String,
    pub long_term_goal_amount: Decimal,

    // Additional assets
    pub other_assets: String,
    pub retirement_plans: String,

    // Timestamps
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FinancialProfile {
    /// Build a profile from submitted input: derive, validate, stamp
    pub fn from_input(user_id: impl Into<String>, input: ProfileInput) -> Result<Self> {
        let input = input.resolve();
        input.validate()?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            name: input.name,
            age: input.age,
            occupation: input.occupation,
            family_size: input.family_size,
            monthly_income: input.monthly_income,
            annual_income: input.annual_income.unwrap_or_default(),
            monthly_expenses: input.monthly_expenses,
            monthly_savings: input.monthly_savings,
            savings: input.savings.unwrap_or_default(),
            current_debts: input.current_debts,
            debt_interest_rate: input.debt_interest_rate,
            risk_tolerance: input.risk_tolerance,
            investment_goal: input.investment_goal,
            investment_knowledge: input.investment_knowledge,
            has_investment_experience: input.has_investment_experience,
            previous_investments: input.previous_investments,
            short_term_goals: input.short_term_goals,
            short_term_goal_amount: input.short_term_goal_amount,
            medium_term_goals: input.medium_term_goals,
            medium_term_goal_amount: input.medium_term_goal_amount,
            long_term_goals: input.long_term_goals,
            long_term_goal_amount: input.long_term_goal_amount,
            other_assets: input.other_assets,
            retirement_plans: input.retirement_plans,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace editable fields with fresh input, keeping identity and
    /// creation time
    pub fn apply_update(&mut self, input: ProfileInput) -> Result<()> {
        let input = input.resolve();
        input.validate()?;

        self.name = input.name;
        self.age = input.age;
        self.occupation = input.occupation;
        self.family_size = input.family_size;
        self.monthly_income = input.monthly_income;
        self.annual_income = input.annual_income.unwrap_or_default();
        self.monthly_expenses = input.monthly_expenses;
        self.monthly_savings = input.monthly_savings;
        self.savings = input.savings.unwrap_or_default();
        self.current_debts = input.current_debts;
        self.debt_interest_rate = input.debt_interest_rate;
        self.risk_tolerance = input.risk_tolerance;
        self.investment_goal = input.investment_goal;
        self.investment_knowledge = input.investment_knowledge;
        self.has_investment_experience = input.has_investment_experience;
        self.previous_investments = input.previous_investments;
        self.short_term_goals = input.short_term_goals;
        self.short_term_goal_amount = input.short_term_goal_amount;
        self.medium_term_goals = input.medium_term_goals;
        self.medium_term_goal_amount = input.medium_term_goal_amount;
        self.long_term_goals = input.long_term_goals;
        self.long_term_goal_amount = input.long_term_goal_amount;
        self.other_assets = input.other_assets;
        self.retirement_plans = input.retirement_plans;
        self.updated_at = Utc::now();

        Ok(())
    }
}

/// Investment advice generated for a user's financial profile
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InvestmentAdvice {
    pub id: Uuid,
    pub user_id: String,
    pub profile_id: Uuid,
    pub title: String,

    /// Sanitized HTML fragment, stored without the presentation wrapper
    pub content: String,

    pub created_at: DateTime<Utc>,
}

impl InvestmentAdvice {
    pub fn new(
        user_id: impl Into<String>,
        profile_id: Uuid,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            profile_id,
            title: title.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Who authored a chat message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageAuthor {
    User,
    Advisor,
}

impl std::fmt::Display for MessageAuthor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Advisor => "advisor",
        })
    }
}

/// A single chat message between user and advisor
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub user_id: String,
    pub author: MessageAuthor,

    /// User messages hold verbatim text; advisor messages hold a sanitized
    /// HTML fragment without the presentation wrapper
    pub content: String,

    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(author: MessageAuthor, user_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            author,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(user_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(MessageAuthor::User, user_id, content)
    }

    pub fn advisor(user_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(MessageAuthor::Advisor, user_id, content)
    }
}
