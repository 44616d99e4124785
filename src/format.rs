//! Display rounding for amounts and percentages.
//!
//! The report functions return full precision; rounding happens here and
//! only here.

use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Round to cents, half away from zero.
pub fn round_amount(val: Decimal) -> Decimal {
    val.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a percentage to one decimal place, half away from zero.
pub fn round_percent(val: Decimal) -> Decimal {
    val.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` → `"$1,234,567.89"`
pub fn format_amount(val: Decimal) -> String {
    format_amount_with(val, DEFAULT_CURRENCY_SYMBOL)
}

/// Same as [`format_amount`] with a caller-chosen currency symbol.
pub fn format_amount_with(val: Decimal, symbol: &str) -> String {
    let rounded = round_amount(val);
    let abs = rounded.abs();
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if rounded < Decimal::ZERO {
        format!("-{symbol}{with_commas}.{dec_part}")
    } else {
        format!("{symbol}{with_commas}.{dec_part}")
    }
}

/// e.g. `73.2713` → `"73.3%"`
pub fn format_percent(val: Decimal) -> String {
    let rounded = round_percent(val);
    format!("{rounded:.1}%")
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
