//! Field parsing utilities for EMS record tokens
//!
//! Positional helpers used by the record builders. A token that is present
//! but cannot be coerced is an error for the whole row; an absent token
//! falls back to the caller's default where the format allows it.

use crate::constants::SKIP_LINE_PREFIX;
use crate::{Error, Result};

/// Fail unless at least `required` tokens are present
pub fn require_tokens(tokens: &[&str], required: usize) -> Result<()> {
    if tokens.len() < required {
        return Err(Error::too_few_tokens(tokens.len(), required));
    }
    Ok(())
}

/// Parse a token as a float, accepting the forms the legacy tools wrote
pub fn parse_number(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok()
}

/// Whether a token reads as a number
pub fn is_numeric(token: &str) -> bool {
    parse_number(token).is_some()
}

/// Truncate a float toward zero into an i32; `None` when out of range or not finite
pub fn truncate_to_i32(value: f64) -> Option<i32> {
    if value.is_finite() && value >= i32::MIN as f64 && value <= i32::MAX as f64 {
        Some(value.trunc() as i32)
    } else {
        None
    }
}

/// Parse a required integer token
pub fn parse_required_i32(tokens: &[&str], index: usize, field_name: &str) -> Result<i32> {
    let value_str = get_required_token(tokens, index, field_name)?;

    value_str.parse::<i32>().map_err(|e| {
        Error::invalid_field(field_name, value_str, format!("invalid integer ({})", e))
    })
}

/// Parse a required float token
pub fn parse_required_f64(tokens: &[&str], index: usize, field_name: &str) -> Result<f64> {
    let value_str = get_required_token(tokens, index, field_name)?;

    value_str.parse::<f64>().map_err(|e| {
        Error::invalid_field(field_name, value_str, format!("invalid number ({})", e))
    })
}

/// Parse a float token, using `default` only when the token is absent
pub fn parse_positional_f64(
    tokens: &[&str],
    index: usize,
    field_name: &str,
    default: f64,
) -> Result<f64> {
    if index < tokens.len() {
        parse_required_f64(tokens, index, field_name)
    } else {
        Ok(default)
    }
}

/// Quote-stripped string token, or `default` when absent
pub fn parse_positional_string(tokens: &[&str], index: usize, default: &str) -> String {
    tokens
        .get(index)
        .map(|token| strip_quotes(token).to_string())
        .unwrap_or_else(|| default.to_string())
}

/// Get a required token
pub fn get_required_token<'a>(tokens: &[&'a str], index: usize, field_name: &str) -> Result<&'a str> {
    tokens.get(index).copied().ok_or_else(|| {
        Error::invalid_field(field_name, "", format!("missing token at position {}", index))
    })
}

/// Remove single quotes from both ends of a token
pub fn strip_quotes(token: &str) -> &str {
    token.trim_matches('\'')
}

/// Remove single and double quotes from both ends of a string
pub fn strip_any_quotes(value: &str) -> &str {
    value.trim_matches(['\'', '"'])
}

/// Whether a trimmed line is a record candidate
///
/// Blank lines and lines starting with `0` (section trailers, comment rows)
/// are never records.
pub fn is_record_line(line: &str) -> bool {
    !line.is_empty() && !line.starts_with(SKIP_LINE_PREFIX)
}

/// First `chars` characters of a line for warning messages
pub fn preview(line: &str, chars: usize) -> String {
    line.chars().take(chars).collect()
}
