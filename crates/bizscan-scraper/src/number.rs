//! Currency amount parsing for listing cards.
//!
//! Uses manual character scanning rather than `regex`; the grammar is a
//! single numeric token with an optional magnitude suffix.

/// Amounts at or above this do not fit a `u64` and are treated as unparsable.
#[allow(clippy::cast_precision_loss)]
const MAX_AMOUNT: f64 = u64::MAX as f64;

/// Extracts a whole-dollar amount from free-form currency text.
///
/// `$` and `,` are stripped first, then the first numeric token
/// (`123` or `123.45`) is taken, optionally followed by whitespace and a
/// case-insensitive `K` (thousand) or `M` (million) suffix. The result is
/// truncated toward zero, not rounded: `"$1,234.99"` yields `1234`.
///
/// Returns `None` for empty input, when no digits are present, or when the
/// amount is too large to represent. Never fails on malformed input.
#[must_use]
pub fn parse_amount(text: &str) -> Option<u64> {
    let cleaned: String = text.chars().filter(|c| *c != '$' && *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    let (token, rest) = first_numeric_token(cleaned)?;
    let value: f64 = token.parse().ok()?;

    let scale = match rest.trim_start().chars().next() {
        Some('k' | 'K') => 1_000.0,
        Some('m' | 'M') => 1_000_000.0,
        _ => 1.0,
    };

    let amount = value * scale;
    if !amount.is_finite() || amount >= MAX_AMOUNT {
        return None;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(amount as u64)
}

/// Finds the first run of digits, extended by `.digits` when present.
///
/// Returns the token and the remainder of the input after it.
fn first_numeric_token(input: &str) -> Option<(&str, &str)> {
    let start = input.find(|c: char| c.is_ascii_digit())?;
    let bytes = input.as_bytes();

    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }

    // Only consume the decimal point if at least one digit follows it.
    if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }

    Some((&input[start..end], &input[end..]))
}
