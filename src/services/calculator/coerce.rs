//! Loose value to decimal coercion
//!
//! Request values arrive as JSON numbers, numeric strings (query parameters,
//! form fields) or not at all. Both the strict request path and the lenient
//! packaging normalizer go through [`to_decimal`].

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use super::ValidationError;

/// Outcome of coercing a single value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coerced {
    Absent,
    Number(Decimal),
    /// Numeric, but beyond what a decimal can hold
    OutOfRange,
    Invalid,
}

/// Coerce a JSON value into a decimal without losing precision.
///
/// `null` and blank strings count as absent.
pub fn to_decimal(value: Option<&Value>) -> Coerced {
    match value {
        None | Some(Value::Null) => Coerced::Absent,
        Some(Value::Number(n)) => parse_str(&n.to_string()),
        Some(Value::String(s)) if s.trim().is_empty() => Coerced::Absent,
        Some(Value::String(s)) => parse_str(s.trim()),
        Some(_) => Coerced::Invalid,
    }
}

fn parse_str(s: &str) -> Coerced {
    if let Ok(d) = Decimal::from_str(s).or_else(|_| Decimal::from_scientific(s)) {
        return Coerced::Number(d);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.abs() >= 1.0 => Coerced::OutOfRange,
        _ => Coerced::Invalid,
    }
}

/// Strict coercion for a request field: non-numeric is an error, absent is `None`.
pub fn optional_field(
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<Decimal>, ValidationError> {
    match to_decimal(value) {
        Coerced::Absent => Ok(None),
        Coerced::Number(d) => Ok(Some(d)),
        Coerced::OutOfRange => Err(ValidationError::TooLarge { field }),
        Coerced::Invalid => Err(ValidationError::NotNumeric { field }),
    }
}

/// Strict coercion for a dimension: must be numeric and strictly positive.
pub fn positive_field(
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<Decimal>, ValidationError> {
    match optional_field(field, value)? {
        Some(d) if d <= Decimal::ZERO => Err(ValidationError::NonPositive { field }),
        other => Ok(other),
    }
}

/// Lenient coercion: anything unusable, including non-positive numbers, is `None`.
pub fn lenient_positive(value: Option<&Value>) -> Option<Decimal> {
    match to_decimal(value) {
        Coerced::Number(d) if d > Decimal::ZERO => Some(d),
        _ => None,
    }
}
