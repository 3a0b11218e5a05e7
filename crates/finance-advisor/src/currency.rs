//! Indian Currency Formatting
//!
//! Renders and parses amounts in the crore/lakh notation used throughout
//! prompts and summaries. 1 crore = 10,000,000 and 1 lakh = 100,000.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const CRORE: Decimal = dec!(10_000_000);
const LAKH: Decimal = dec!(100_000);

/// Format an amount with the rupee symbol, e.g. `₹1.50 crore`
pub fn format_inr(value: Decimal) -> String {
    format!("₹{}", format_amount(value))
}

/// Format an amount without the rupee symbol
///
/// Values of a crore or more render as `N.NN crore`, a lakh or more as
/// `N.NN lakh`, everything else as a comma-grouped figure with two
/// decimal places.
pub fn format_amount(value: Decimal) -> String {
    if value >= CRORE {
        format!("{:.2} crore", (value / CRORE).round_dp(2))
    } else if value >= LAKH {
        format!("{:.2} lakh", (value / LAKH).round_dp(2))
    } else {
        group_thousands(value)
    }
}

/// Parse an amount written with crore/lakh suffixes
///
/// Accepts plain figures, the rupee symbol, comma grouping, and the
/// suffixes `cr`, `crore(s)`, `l`, `lakh(s)`. Returns `None` when the
/// numeric part does not parse.
pub fn parse_inr(input: &str) -> Option<Decimal> {
    let cleaned = input.trim().to_lowercase().replace(['₹', ','], "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    // Suffix order matters: "crore" must win over its "cr" prefix and
    // "lakh" over the bare "l" shorthand.
    for (suffix, multiplier) in [
        ("crores", CRORE),
        ("crore", CRORE),
        ("cr", CRORE),
        ("lakhs", LAKH),
        ("lakh", LAKH),
        ("l", LAKH),
    ] {
        if let Some(numeric) = cleaned.strip_suffix(suffix) {
            let amount: Decimal = numeric.trim().parse().ok()?;
            return Some(amount * multiplier);
        }
    }

    cleaned.parse().ok()
}

fn group_thousands(value: Decimal) -> String {
    let rounded = value.abs().round_dp(2);
    let fixed = format!("{rounded:.2}");
    let (integral, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(integral.len() + integral.len() / 3);
    for (i, digit) in integral.chars().enumerate() {
        if i > 0 && (integral.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{fraction}")
}
