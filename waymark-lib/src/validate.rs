//! Form input validation helpers.
//!
//! Raw field text is checked in two passes: first that every value looks
//! like a signed decimal number, then that every value is greater than
//! zero. Callers decide which fields go through which pass.

use once_cell::sync::Lazy;
use regex::Regex;

// Optional sign, optional integer part, optional fractional part, at
// least one digit overall. "12", "-3.5" and ".5" match; "7." and "1e5"
// do not.
static NUMERIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-+]?\d*\.?\d+$").unwrap());

/// Returns true when every value matches the signed decimal pattern.
#[must_use]
pub fn is_numeric_format(values: &[&str]) -> bool {
    values.iter().all(|v| NUMERIC_RE.is_match(v))
}

/// Returns true when every value parses as a number greater than zero.
/// Values that do not parse at all fail the check.
#[must_use]
pub fn is_positive(values: &[&str]) -> bool {
    values
        .iter()
        .all(|v| v.parse::<f64>().map_or(false, |n| n > 0.0))
}
