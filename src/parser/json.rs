//! Strict JSON reader.

use crate::error::ParseError;
use crate::format::Format;
use crate::value::Value;

/// Parses a JSON string into a [`Value`].
///
/// The grammar is strict: trailing commas, comments and unquoted keys are
/// rejected. Object key order is kept.
///
/// # Examples
///
/// ```
/// use semcompare::parser::parse_json;
///
/// let json = r#"{"name": "Alice", "age": 30}"#;
/// let value = parse_json(json).unwrap();
/// assert!(value.get("name").is_some());
/// ```
pub fn parse_json(content: &str) -> Result<Value, ParseError> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| ParseError::new(Format::Json, e.to_string()))?;
    Ok(json_to_value(value))
}

/// Converts a `serde_json::Value` into our representation.
fn json_to_value(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        // as_f64 only returns None under arbitrary_precision, which is not enabled
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::Array(items.into_iter().map(json_to_value).collect())
        }
        serde_json::Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| (k, json_to_value(v)))
            .collect(),
    }
}
