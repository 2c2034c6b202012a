//! Single-document YAML reader limited to JSON-compatible values.
//!
//! Plain scalars are typed by the YAML 1.2 JSON schema: only `null`,
//! `true`, `false` and JSON numerals get a type. Spellings the core schema
//! also resolves (`~`, `True`, `0x1F`, `.nan`, ...) stay strings.

use crate::error::ParseError;
use crate::format::Format;
use crate::value::{Map, Value};
use regex::Regex;
use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::sync::LazyLock;

static JSON_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][-+]?[0-9]+)?$").expect("static regex")
});

/// Parses a YAML string into a [`Value`].
///
/// Only one document is accepted, and only the values JSON can also express
/// come out of it: strings, numbers, booleans, null, sequences and mappings.
/// Timestamps stay strings. Custom tags are rejected so YAML and JSON inputs
/// normalize identically.
///
/// # Examples
///
/// ```
/// use semcompare::parser::parse_yaml;
/// use semcompare::Value;
///
/// let value = parse_yaml("name: Alice\nage: 30\nalias: ~").unwrap();
/// assert_eq!(value.get("age"), Some(&Value::Number(30.0)));
/// assert_eq!(value.get("alias"), Some(&Value::from("~")));
/// ```
pub fn parse_yaml(content: &str) -> Result<Value, ParseError> {
    // The first pass gives the document shape and tells quoted scalars apart
    // from resolved ones. The second pass reads the source text of every
    // resolved scalar.
    let shape: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ParseError::new(Format::Yaml, e.to_string()))?;

    match SourceText(&shape).deserialize(serde_yaml::Deserializer::from_str(content)) {
        Ok(value) => Ok(value),
        // An empty document has no scalar event to read.
        Err(_) if shape.is_null() => Ok(Value::Null),
        Err(e) => Err(ParseError::new(Format::Yaml, e.to_string())),
    }
}

/// Types a plain scalar by the JSON schema.
fn json_scalar(text: &str) -> Value {
    match text {
        "" | "null" => Value::Null,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ if JSON_NUMBER.is_match(text) => text
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map_or_else(|| Value::String(text.to_string()), Value::Number),
        _ => Value::String(text.to_string()),
    }
}

/// Reads a document following the shape of its first-pass value.
struct SourceText<'a>(&'a serde_yaml::Value);

impl<'de> DeserializeSeed<'de> for SourceText<'_> {
    type Value = Value;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        match self.0 {
            serde_yaml::Value::String(s) => {
                IgnoredAny::deserialize(deserializer)?;
                Ok(Value::String(s.clone()))
            }
            serde_yaml::Value::Null | serde_yaml::Value::Bool(_) | serde_yaml::Value::Number(_) => {
                let text = String::deserialize(deserializer)?;
                Ok(json_scalar(&text))
            }
            serde_yaml::Value::Sequence(items) => deserializer.deserialize_seq(SequenceVisitor(items)),
            serde_yaml::Value::Mapping(map) => deserializer.deserialize_map(MappingVisitor(map)),
            serde_yaml::Value::Tagged(tagged) => Err(de::Error::custom(format_args!(
                "unsupported tag {}",
                tagged.tag
            ))),
        }
    }
}

/// Reads a mapping key as text. Non-string keys keep their source spelling.
struct KeyText<'a>(&'a serde_yaml::Value);

impl<'de> DeserializeSeed<'de> for KeyText<'_> {
    type Value = String;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<String, D::Error> {
        match self.0 {
            serde_yaml::Value::String(s) => {
                IgnoredAny::deserialize(deserializer)?;
                Ok(s.clone())
            }
            serde_yaml::Value::Null | serde_yaml::Value::Bool(_) | serde_yaml::Value::Number(_) => {
                String::deserialize(deserializer)
            }
            other => Err(de::Error::custom(format_args!(
                "unsupported mapping key of kind {}",
                yaml_kind(other)
            ))),
        }
    }
}

struct SequenceVisitor<'a>(&'a [serde_yaml::Value]);

impl<'de> Visitor<'de> for SequenceVisitor<'_> {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YAML sequence")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(self.0.len());
        for shape in self.0 {
            match seq.next_element_seed(SourceText(shape))? {
                Some(item) => items.push(item),
                None => return Err(de::Error::invalid_length(items.len(), &self)),
            }
        }
        Ok(Value::Array(items))
    }
}

struct MappingVisitor<'a>(&'a serde_yaml::Mapping);

impl<'de> Visitor<'de> for MappingVisitor<'_> {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YAML mapping")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut object = Map::with_capacity(self.0.len());
        for (key, value) in self.0 {
            let Some(key) = map.next_key_seed(KeyText(key))? else {
                return Err(de::Error::invalid_length(object.len(), &self));
            };
            let value = map.next_value_seed(SourceText(value))?;
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}
