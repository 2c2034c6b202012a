//! TOML reader.

use crate::error::ParseError;
use crate::format::Format;
use crate::value::Value;

/// Parses a TOML document into a [`Value`].
///
/// Tables, arrays of tables and inline tables become objects and arrays.
/// Dates and times are kept as their RFC 3339 text so that they compare
/// consistently with the same timestamp written as a string elsewhere.
///
/// # Examples
///
/// ```
/// use semcompare::parser::parse_toml;
/// use semcompare::Value;
///
/// let value = parse_toml("[server]\nport = 8080").unwrap();
/// let server = value.get("server").unwrap();
/// assert_eq!(server.get("port"), Some(&Value::Number(8080.0)));
/// ```
pub fn parse_toml(content: &str) -> Result<Value, ParseError> {
    let table: ::toml::Table = content
        .parse()
        .map_err(|e: ::toml::de::Error| ParseError::new(Format::Toml, e.to_string().trim_end()))?;
    Ok(table_to_value(table))
}

fn table_to_value(table: ::toml::Table) -> Value {
    table
        .into_iter()
        .map(|(k, v)| (k, toml_to_value(v)))
        .collect()
}

/// Converts a `toml::Value` into our representation.
fn toml_to_value(value: ::toml::Value) -> Value {
    match value {
        ::toml::Value::String(s) => Value::String(s),
        ::toml::Value::Integer(i) => Value::Number(i as f64),
        ::toml::Value::Float(f) => Value::Number(f),
        ::toml::Value::Boolean(b) => Value::Bool(b),
        ::toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        ::toml::Value::Array(items) => {
            Value::Array(items.into_iter().map(toml_to_value).collect())
        }
        ::toml::Value::Table(table) => table_to_value(table),
    }
}
