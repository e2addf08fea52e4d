//! Comparing, rendering and parsing setting values

use anyhow::Result;
use serde_json::Value;

/// Structural equality, except that numbers compare numerically
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Equality of possibly unset values
pub fn same_value(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => values_equal(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// JSON truthiness: `null`, `false`, `0`, `""` and unset are false
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Render a value for menus and messages; strings are shown bare
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None => "unset".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Prompt validator accepting whole numbers
pub fn validate_integer(input: &str) -> std::result::Result<(), String> {
    parse_integer(input)
        .map(|_| ())
        .map_err(|_| format!("'{}' is not a whole number", input.trim()))
}

/// Parse a whole number as typed by the user
pub fn parse_integer(input: &str) -> Result<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| anyhow::anyhow!("Invalid number: '{}'", input))
}

/// Parse a boolean as typed by the user
pub fn parse_bool(input: &str) -> Result<bool> {
    match input.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => anyhow::bail!("Invalid boolean: '{}'. Expected true or false", other),
    }
}
