//! Amount normalization for statement cells.
//!
//! Malformed amounts are common in extracted statements, so parsing never
//! fails: anything that does not read as a number becomes `0.0`.

use super::patterns::NON_NUMERIC;

/// Parse a currency-formatted amount such as `"$1,234.56"` or
/// `"(1,234.56)"` into a signed value.
///
/// Dollar signs and thousands separators are removed, an opening parenthesis
/// becomes a minus sign and the closing one is dropped. Empty or
/// non-numeric input yields `0.0`.
pub fn parse_amount(text: &str) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }

    let cleaned = text
        .replace('$', "")
        .replace(',', "")
        .replace('(', "-")
        .replace(')', "");

    to_finite(cleaned.trim())
}

/// Parse a number after dropping every character that is not a digit or a
/// decimal point. Signs are lost; unparsable leftovers yield `0.0`.
pub fn parse_loose_number(text: &str) -> f64 {
    let digits = NON_NUMERIC.replace_all(text.trim(), "");
    if digits.is_empty() {
        return 0.0;
    }
    to_finite(&digits)
}

fn to_finite(s: &str) -> f64 {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
