//! Type conversion builtins - int(), float(), str(), bool()

use crate::core::Value;
use crate::errors::{LessonError, Result};

/// `int(x)`
///
/// Strings must hold a base-10 integer literal (surrounding whitespace and
/// `_` digit separators allowed). Floats truncate toward zero.
pub fn to_int(value: &Value) -> Result<Value> {
    match value {
        Value::Int(i) => Ok(Value::Int(*i)),
        Value::Bool(b) => Ok(Value::Int(*b as i64)),
        Value::Float(f) => {
            if !f.is_finite() {
                return Err(LessonError::conversion(format!(
                    "cannot convert float {} to integer",
                    value
                )));
            }
            let truncated = f.trunc();
            // i64::MIN is exactly representable; i64::MAX rounds up to 2^63
            if truncated < i64::MIN as f64 || truncated >= -(i64::MIN as f64) {
                return Err(LessonError::value(format!(
                    "int too large to convert: {}",
                    value
                )));
            }
            Ok(Value::Int(truncated as i64))
        }
        Value::Str(s) => parse_int_literal(s).map(Value::Int).ok_or_else(|| {
            LessonError::conversion(format!("invalid literal for int() with base 10: {}", value.repr()))
        }),
        other => Err(LessonError::conversion(format!(
            "int() argument must be a string or a number, not '{}'",
            other.type_name()
        ))),
    }
}

fn parse_int_literal(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
        || !digits.chars().all(|c| c.is_ascii_digit() || c == '_')
    {
        return None;
    }
    trimmed.replace('_', "").parse().ok()
}

/// `float(x)`
pub fn to_float(value: &Value) -> Result<Value> {
    match value {
        Value::Float(f) => Ok(Value::Float(*f)),
        Value::Int(_) | Value::Bool(_) => value
            .as_f64()
            .map(Value::Float)
            .ok_or_else(|| LessonError::conversion("float() argument out of range")),
        Value::Str(s) => parse_float_literal(s).map(Value::Float).ok_or_else(|| {
            LessonError::conversion(format!("could not convert string to float: {}", value.repr()))
        }),
        other => Err(LessonError::conversion(format!(
            "float() argument must be a string or a real number, not '{}'",
            other.type_name()
        ))),
    }
}

fn parse_float_literal(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let lowered = trimmed.to_ascii_lowercase();
    let unsigned = lowered.strip_prefix(['+', '-']).unwrap_or(&lowered);
    match unsigned {
        "inf" | "infinity" | "nan" => return lowered.parse().ok(),
        _ => {}
    }
    // Rust accepts "inf"-style words in more spellings; only plain numerals from here on
    if unsigned.is_empty() || !unsigned.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | '+' | '-')) {
        return None;
    }
    trimmed.parse().ok()
}

/// `str(x)`
pub fn to_str(value: &Value) -> Value {
    match value {
        Value::Str(_) => value.clone(),
        other => Value::str(other.to_string()),
    }
}

/// `bool(x)`: zero and empty values are `False`
pub fn to_bool(value: &Value) -> Value {
    Value::Bool(value.is_truthy())
}
