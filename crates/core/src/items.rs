//! Item field validation.
//!
//! Prices are handled as fixed-point integer cents everywhere inside the
//! system; the decimal string form only exists at the HTTP boundary.

use crate::error::CoreError;

/// Validate and normalize an item name.
///
/// The name is trimmed and must be non-empty after trimming. Length is
/// not capped here; the client form enforces its own limit.
pub fn validate_name(raw: &str) -> Result<String, CoreError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Item name is required".into()));
    }
    Ok(name.to_string())
}

/// Parse a decimal price string (e.g. `"29.99"`) into non-negative cents.
///
/// Rejects anything that is not a finite number >= 0. Sub-cent precision is
/// rounded to the nearest cent.
pub fn parse_price(raw: &str) -> Result<i64, CoreError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::Validation("Valid price is required".into()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation("Valid price is required".into()));
    }
    Ok((value * 100.0).round() as i64)
}

/// Convert stored cents back to the decimal number used on the wire.
pub fn cents_to_decimal(cents: i64) -> f64 {
    cents as f64 / 100.0
}
