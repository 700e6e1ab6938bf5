//! Primitive string parsers
//!
//! Every parser maps empty input to the zero value of its type and never
//! fails on it. Malformed input yields a [`ParseError`].

use std::num::{ParseFloatError, ParseIntError};

/// Errors from primitive parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Not a base-10 integer
    #[error("invalid integer: {0}")]
    Int(#[from] ParseIntError),

    /// Integer outside the 64-bit domain
    #[error("integer {0} is outside the 64-bit range")]
    OutOfRange(String),

    /// Not a decimal floating point number
    #[error("invalid float: {0}")]
    Float(#[from] ParseFloatError),

    /// Not a boolean literal
    #[error("invalid boolean literal: {0:?}")]
    Bool(String),
}

/// Parse a base-10 integer into a 128-bit intermediate
///
/// The result always lies in `i64::MIN..=u64::MAX`, so every signed and
/// unsigned 64-bit value is representable and narrower targets can truncate.
///
/// # Errors
/// Returns error if input is not an integer or leaves the 64-bit domain
pub fn parse_integer(raw: &str) -> Result<i128, ParseError> {
    if raw.is_empty() {
        return Ok(0);
    }
    let value: i128 = raw.parse()?;
    if value < i128::from(i64::MIN) || value > i128::from(u64::MAX) {
        return Err(ParseError::OutOfRange(raw.to_string()));
    }
    Ok(value)
}

/// Parse a decimal into a single precision float
///
/// # Errors
/// Returns error if input is not a float literal
pub fn parse_f32(raw: &str) -> Result<f32, ParseError> {
    if raw.is_empty() {
        return Ok(0.0);
    }
    Ok(raw.parse()?)
}

/// Parse a decimal into a double precision float
///
/// # Errors
/// Returns error if input is not a float literal
pub fn parse_f64(raw: &str) -> Result<f64, ParseError> {
    if raw.is_empty() {
        return Ok(0.0);
    }
    Ok(raw.parse()?)
}

/// Parse a boolean literal
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
///
/// # Errors
/// Returns error for any other literal
pub fn parse_bool(raw: &str) -> Result<bool, ParseError> {
    match raw {
        "" | "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        other => Err(ParseError::Bool(other.to_string())),
    }
}
