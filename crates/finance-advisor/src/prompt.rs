//! Prompt Construction
//!
//! Pure builders for every prompt the engine sends to a model. Nothing in
//! here talks to the network or the clock; variety inputs (focus area,
//! market perspective, timestamps) are passed in by the caller.

use chrono::{DateTime, Local};

use crate::currency::format_inr;
use crate::model::{ChatMessage, FinancialProfile, MessageAuthor};
use crate::render::strip_html;

/// How many prior turns of conversation the chat prompt may carry
pub const CHAT_HISTORY_WINDOW: usize = 10;

/// Comprehensive advice prompt covering the whole financial profile
pub fn advice_prompt(profile: &FinancialProfile) -> String {
    let experience = if profile.has_investment_experience {
        "Yes"
    } else {
        "No"
    };

    format!(
        "As an expert financial advisor, provide personalized investment advice based on the following client profile:

Personal Information:
- Age: {age}
- Occupation: {occupation}
- Family Size: {family_size}

Financial Situation:
- Monthly Income: ${monthly_income}
- Monthly Expenses: ${monthly_expenses}
- Monthly Savings: ${monthly_savings}
- Current Debts: ${current_debts} (Interest Rate: {debt_interest_rate}%)

Investment Profile:
- Risk Tolerance: {risk_tolerance}
- Investment Knowledge: {investment_knowledge}
- Previous Investment Experience: {experience}
- Previous Investments: {previous_investments}

Financial Goals:
Short-term (1-3 years):
- Goals: {short_term_goals}
- Required Amount: ${short_term_goal_amount}

Medium-term (5-10 years):
- Goals: {medium_term_goals}
- Required Amount: ${medium_term_goal_amount}

Long-term (10+ years):
- Goals: {long_term_goals}
- Required Amount: ${long_term_goal_amount}

Additional Information:
- Other Assets: {other_assets}
- Retirement Plans: {retirement_plans}

Please provide:
1. A comprehensive investment strategy that aligns with the client's risk tolerance and goals
2. Specific investment recommendations for each time horizon
3. Asset allocation suggestions
4. Risk management strategies
5. Regular review and rebalancing recommendations
6. Any specific concerns or considerations based on the client's profile

Format the response in a clear, structured manner with sections and bullet points where appropriate.",
        age = profile.age,
        occupation = profile.occupation,
        family_size = profile.family_size,
        monthly_income = profile.monthly_income,
        monthly_expenses = profile.monthly_expenses,
        monthly_savings = profile.monthly_savings,
        current_debts = profile.current_debts,
        debt_interest_rate = profile.debt_interest_rate,
        risk_tolerance = profile.risk_tolerance.display(),
        investment_knowledge = profile.investment_knowledge.display(),
        experience = experience,
        previous_investments = profile.previous_investments,
        short_term_goals = profile.short_term_goals,
        short_term_goal_amount = profile.short_term_goal_amount,
        medium_term_goals = profile.medium_term_goals,
        medium_term_goal_amount = profile.medium_term_goal_amount,
        long_term_goals = profile.long_term_goals,
        long_term_goal_amount = profile.long_term_goal_amount,
        other_assets = profile.other_assets,
        retirement_plans = profile.retirement_plans,
    )
}

/// Advice prompt enriched with per-request context so repeated requests
/// draw varied answers from the same profile
pub fn enhanced_advice_prompt(
    profile: &FinancialProfile,
    focus_area: &str,
    market_perspective: &str,
    previous_advice_count: usize,
    now: DateTime<Local>,
) -> String {
    let base = advice_prompt(profile);
    let sequence = if previous_advice_count == 0 {
        "First advice".to_string()
    } else {
        format!("Advice #{}", previous_advice_count + 1)
    };

    format!(
        "{base}

Additional Context:
- Current Date: {date}
- Current Time: {time}
- Market Context: {market_perspective}
- Focus Area: {focus_area}
- Advice Count: {sequence}

Please provide:
1. A personalized investment strategy with specific focus on {focus_area}
2. Recommended investments based on their risk tolerance and current market conditions
3. Expected returns and timeframes
4. At least one unique recommendation you haven't given before

Format your response with clear headings and bullet points.",
        date = now.format("%B %d, %Y"),
        time = now.format("%H:%M"),
    )
}

/// Chat prompt: profile context, a bounded window of recent turns with all
/// HTML stripped, then the new question
pub fn chat_prompt(profile: &FinancialProfile, history: &[ChatMessage], message: &str) -> String {
    let start = history.len().saturating_sub(CHAT_HISTORY_WINDOW);
    let mut history_text = String::new();
    if !history[start..].is_empty() {
        history_text.push_str("Recent conversation history:\n");
        for msg in &history[start..] {
            let role = match msg.author {
                MessageAuthor::User => "USER",
                MessageAuthor::Advisor => "ASSISTANT",
            };
            history_text.push_str(&format!("{role}: {}\n", strip_html(&msg.content)));
        }
    }

    format!(
        "Context: This user has submitted a financial profile with the following details:
- Name: {name}
- Age: {age}
- Occupation: {occupation}
- Annual Income: {annual_income}
- Savings: {savings}
- Risk Tolerance: {risk_tolerance}
- Investment Goal: {investment_goal}

{history_text}
User asks: {message}

Provide a helpful, accurate, and personalized response addressing their question about finances or investments.
Keep the response concise yet informative. Use clear formatting with bullet points or numbered lists if applicable.",
        name = profile.name,
        age = profile.age,
        occupation = profile.occupation,
        annual_income = format_inr(profile.annual_income),
        savings = format_inr(profile.savings),
        risk_tolerance = profile.risk_tolerance.display(),
        investment_goal = profile.investment_goal.display(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InvestmentGoal, KnowledgeLevel, ProfileInput, RiskTolerance};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn sample_profile() -> FinancialProfile {
        let input = ProfileInput {
            name: "Priya".into(),
            age: 35,
            occupation: "Engineer".into(),
            family_size: 3,
            monthly_income: dec!(50000),
            monthly_expenses: dec!(30000),
            monthly_savings: dec!(15000),
            current_debts: dec!(200000),
            debt_interest_rate: dec!(9.5),
            annual_income: None,
            savings: None,
            risk_tolerance: RiskTolerance::VeryConservative,
            investment_goal: InvestmentGoal::Retirement,
            investment_knowledge: KnowledgeLevel::Intermediate,
            has_investment_experience: false,
            previous_investments: String::new(),
            short_term_goals: "Emergency fund".into(),
            short_term_goal_amount: dec!(300000),
            medium_term_goals: "House down payment".into(),
            medium_term_goal_amount: dec!(1500000),
            long_term_goals: "Retirement corpus".into(),
            long_term_goal_amount: dec!(20000000),
            other_assets: "PPF account".into(),
            retirement_plans: "NPS".into(),
        };
        FinancialProfile::from_input("u1", input).unwrap()
    }

    #[test]
    fn test_advice_prompt_covers_every_section() {
        let prompt = advice_prompt(&sample_profile());
        assert!(prompt.contains("Personal Information:"));
        assert!(prompt.contains("Financial Situation:"));
        assert!(prompt.contains("Investment Profile:"));
        assert!(prompt.contains("Financial Goals:"));
        assert!(prompt.contains("Short-term (1-3 years):"));
        assert!(prompt.contains("Medium-term (5-10 years):"));
        assert!(prompt.contains("Long-term (10+ years):"));
        assert!(prompt.contains("Additional Information:"));
        assert!(prompt.contains("- Risk Tolerance: Very Conservative"));
        assert!(prompt.contains("- Previous Investment Experience: No"));
        assert!(prompt.contains("- Required Amount: $300000"));
    }

    #[test]
    fn test_enhanced_prompt_adds_context_block() {
        let now = Local.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        let prompt = enhanced_advice_prompt(&sample_profile(), "retirement planning", "Given recent economic trends", 0, now);

        assert!(prompt.contains("Additional Context:"));
        assert!(prompt.contains("- Current Date: March 14, 2025"));
        assert!(prompt.contains("- Current Time: 09:30"));
        assert!(prompt.contains("- Market Context: Given recent economic trends"));
        assert!(prompt.contains("- Focus Area: retirement planning"));
        assert!(prompt.contains("- Advice Count: First advice"));
        assert!(prompt.contains("specific focus on retirement planning"));
    }

    #[test]
    fn test_enhanced_prompt_numbers_repeat_requests() {
        let now = Local.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        let prompt = enhanced_advice_prompt(&sample_profile(), "pension optimization", "In the current market conditions", 2, now);
        assert!(prompt.contains("- Advice Count: Advice #3"));
    }

    #[test]
    fn test_chat_prompt_includes_profile_context() {
        let prompt = chat_prompt(&sample_profile(), &[], "Where do I start?");
        assert!(prompt.contains("- Name: Priya"));
        assert!(prompt.contains("- Annual Income: ₹6.00 lakh"));
        assert!(prompt.contains("- Savings: ₹1.80 lakh"));
        assert!(prompt.contains("- Investment Goal: Retirement Planning"));
        assert!(prompt.contains("User asks: Where do I start?"));
        assert!(!prompt.contains("Recent conversation history:"));
    }

    #[test]
    fn test_chat_prompt_windows_history_to_last_ten() {
        let profile = sample_profile();
        let mut history = Vec::new();
        for i in 0..12 {
            history.push(ChatMessage::user("u1", format!("question {i}")));
            history.push(ChatMessage::advisor("u1", format!("<p>answer {i}</p>")));
        }

        let prompt = chat_prompt(&profile, &history, "latest question");
        assert!(!prompt.contains("question 6"));
        assert!(prompt.contains("USER: question 7"));
        assert!(prompt.contains("ASSISTANT: answer 11"));
    }

    #[test]
    fn test_chat_prompt_strips_html_from_history() {
        let profile = sample_profile();
        let history = vec![ChatMessage::advisor(
            "u1",
            "<p class=\"advice-paragraph\">Diversify <strong>broadly</strong>.</p>",
        )];

        let prompt = chat_prompt(&profile, &history, "ok");
        assert!(prompt.contains("ASSISTANT: Diversify broadly."));
        assert!(!prompt.contains("advice-paragraph"));
    }
}
