//! Currency helpers.
//!
//! Amounts cross the wire as integer cents. User input arrives as decimal
//! dollar strings and is converted without going through floating point.

use crate::error::{WidgetError, WidgetResult};

/// Convert a decimal dollar string (`"12.34"`, `"$1,200"`, `".5"`) to cents.
///
/// Digits beyond the second decimal place round half away from zero.
pub fn dollars_to_cents(input: &str) -> WidgetResult<i64> {
    let invalid = || WidgetError::InvalidAmount(input.to_string());

    let trimmed = input.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let unsigned = unsigned.strip_prefix('$').unwrap_or(unsigned);
    let cleaned: String = unsigned.chars().filter(|c| *c != ',').collect();

    let (whole, frac) = cleaned.split_once('.').unwrap_or((cleaned.as_str(), ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let whole_cents = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<i64>()
            .ok()
            .and_then(|w| w.checked_mul(100))
            .ok_or_else(invalid)?
    };

    let mut digits = frac.bytes().map(|b| i64::from(b - b'0'));
    let tens = digits.next().unwrap_or(0);
    let ones = digits.next().unwrap_or(0);
    let round_up = digits.next().is_some_and(|d| d >= 5);

    let cents = whole_cents
        .checked_add(tens * 10 + ones + i64::from(round_up))
        .ok_or_else(invalid)?;

    Ok(if negative { -cents } else { cents })
}

/// Render cents as a plain decimal dollar string with two places (`1234` → `"12.34"`).
pub fn cents_to_numeric_dollars(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}
