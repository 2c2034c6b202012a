//! Parsing of raw text into the [`Value`] model.
//!
//! Each format has its own reader in a submodule. Readers share nothing but
//! their output type, and [`parse_content`] dispatches to one of them based on
//! the requested [`Format`].
//!
//! # Examples
//!
//! ```
//! use semcompare::{parse_content, Format, Value};
//!
//! let value = parse_content(r#"{"name": "Alice", "age": 30}"#, Format::Json).unwrap();
//! assert_eq!(value.get("age"), Some(&Value::Number(30.0)));
//! ```

mod csv;
mod json;
mod toml;
mod xml;
mod yaml;

pub use self::csv::parse_csv;
pub use self::json::parse_json;
pub use self::toml::parse_toml;
pub use self::xml::{parse_xml, ATTRIBUTE_PREFIX, TEXT_KEY};
pub use self::yaml::parse_yaml;

pub(crate) use self::csv::header_fields as csv_header_fields;

use crate::detect::detect_format;
use crate::error::ParseError;
use crate::format::Format;
use crate::value::Value;
use regex::Regex;
use std::sync::LazyLock;

/// A parsed document together with the format it was read as.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub value: Value,
    pub format: Format,
}

/// Parses `content` as `format`.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying `format` and the reader's message when
/// the text is not valid in that format.
pub fn parse_content(content: &str, format: Format) -> Result<Value, ParseError> {
    tracing::trace!(%format, bytes = content.len(), "parsing content");
    match format {
        Format::Json => parse_json(content),
        Format::Yaml => parse_yaml(content),
        Format::Toml => parse_toml(content),
        Format::Xml => parse_xml(content),
        Format::Csv => parse_csv(content),
    }
}

/// Detects the format of `content` and parses it with that format.
///
/// Detection never fails; the parse it triggers can.
pub fn parse_with_auto_detection(
    content: &str,
    filename: Option<&str>,
) -> Result<ParsedDocument, ParseError> {
    let format = detect_format(content, filename);
    let value = parse_content(content, format)?;
    Ok(ParsedDocument { value, format })
}

static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(\d+\.?\d*|\.\d+)([eE][-+]?\d+)?$").expect("static regex")
});

/// Parse-time typing for formats whose scalars are untyped text (CSV, XML).
///
/// `true`/`false` become booleans and decimal numerals become numbers.
/// Everything else stays a string. This is independent of the normalizer's
/// type coercion.
pub(crate) fn infer_scalar(text: &str) -> Value {
    let trimmed = text.trim();
    match trimmed {
        "true" | "TRUE" => return Value::Bool(true),
        "false" | "FALSE" => return Value::Bool(false),
        _ => {}
    }
    if NUMBER_PATTERN.is_match(trimmed) {
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return Value::Number(n);
            }
        }
    }
    Value::String(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_scalar_numbers() {
        assert_eq!(infer_scalar("30"), Value::Number(30.0));
        assert_eq!(infer_scalar("-2.5"), Value::Number(-2.5));
        assert_eq!(infer_scalar(".5"), Value::Number(0.5));
        assert_eq!(infer_scalar("1e3"), Value::Number(1000.0));
        assert_eq!(infer_scalar(" 7 "), Value::Number(7.0));
    }

    #[test]
    fn test_infer_scalar_booleans() {
        assert_eq!(infer_scalar("true"), Value::Bool(true));
        assert_eq!(infer_scalar("FALSE"), Value::Bool(false));
        assert_eq!(infer_scalar("True"), Value::from("True"));
    }

    #[test]
    fn test_infer_scalar_leaves_text() {
        assert_eq!(infer_scalar("NYC"), Value::from("NYC"));
        assert_eq!(infer_scalar("1.2.3"), Value::from("1.2.3"));
        assert_eq!(infer_scalar(""), Value::from(""));
        assert_eq!(infer_scalar("null"), Value::from("null"));
    }

    #[test]
    fn test_parse_content_dispatch() {
        assert_eq!(parse_content("true", Format::Json).unwrap(), Value::Bool(true));
        let yaml = parse_content("a: 1", Format::Yaml).unwrap();
        assert_eq!(yaml.get("a"), Some(&Value::Number(1.0)));
        let toml = parse_content("a = 1", Format::Toml).unwrap();
        assert_eq!(toml.get("a"), Some(&Value::Number(1.0)));
        assert!(parse_content("<a>1</a>", Format::Xml).unwrap().get("a").is_some());
        assert!(parse_content("a,b\n1,2", Format::Csv).unwrap().as_array().is_some());
    }

    #[test]
    fn test_parse_content_error_carries_format() {
        let err = parse_content("{invalid", Format::Json).unwrap_err();
        assert_eq!(err.format, Format::Json);
    }

    #[test]
    fn test_parse_with_auto_detection() {
        let doc = parse_with_auto_detection("a: 1", Some("config.yml")).unwrap();
        assert_eq!(doc.format, Format::Yaml);

        let doc = parse_with_auto_detection(r#"{"a": 1}"#, None).unwrap();
        assert_eq!(doc.format, Format::Json);
    }
}
