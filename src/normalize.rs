//! Semantics-preserving rewrites applied before comparison.
//!
//! [`normalize_data`] runs up to four passes, in this order, each switched
//! on by [`NormalizationConfig`]:
//!
//! 1. path removal (`ignore_paths`)
//! 2. string normalization (`trim_strings`, `ignore_whitespace`,
//!    `case_sensitive`)
//! 3. type coercion (`coerce_types`)
//! 4. key and element sorting (`sort_keys`)
//!
//! Normalization is total and idempotent for a fixed configuration.
//!
//! # Examples
//!
//! ```
//! use semcompare::{normalize_data, parse_json, Format, NormalizationConfig, Value};
//!
//! let value = parse_json(r#"{"Port": "8080"}"#).unwrap();
//! let config = NormalizationConfig {
//!     coerce_types: true,
//!     ..Default::default()
//! };
//! let normalized = normalize_data(&value, Format::Json, &config);
//! assert_eq!(normalized.get("port"), Some(&Value::Number(8080.0)));
//! ```

use crate::format::Format;
use crate::parser::ATTRIBUTE_PREFIX;
use crate::value::{Map, Value};
use regex::Regex;
use std::sync::LazyLock;

/// Configuration for the normalizer.
///
/// Every flag defaults to `false`. Note that `case_sensitive: false` means
/// strings and keys are lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationConfig {
    /// Sort object keys (and scalar arrays) before comparing
    pub sort_keys: bool,
    /// Turn numeric, boolean and null strings into typed values
    pub coerce_types: bool,
    /// Collapse runs of whitespace inside strings to one space
    pub ignore_whitespace: bool,
    /// Keep case in strings and keys; when false both are lowercased
    pub case_sensitive: bool,
    /// Trim leading and trailing whitespace from strings
    pub trim_strings: bool,
    /// Dot paths removed before comparing
    pub ignore_paths: Vec<String>,
}

impl NormalizationConfig {
    fn rewrites_strings(&self) -> bool {
        self.trim_strings || self.ignore_whitespace || !self.case_sensitive
    }
}

/// Normalizes `value` according to `config`.
///
/// `format` only matters for sorting: XML-origin values keep attributes
/// ahead of child elements. The input is left untouched.
pub fn normalize_data(value: &Value, format: Format, config: &NormalizationConfig) -> Value {
    let mut normalized = value.clone();

    if !config.ignore_paths.is_empty() {
        for path in &config.ignore_paths {
            remove_path(&mut normalized, path, config.case_sensitive);
        }
    }

    if config.rewrites_strings() {
        normalized = normalize_strings(normalized, config);
    }

    if config.coerce_types {
        normalized = coerce_types(normalized);
    }

    if config.sort_keys {
        normalized = match format {
            Format::Xml => sort_xml(normalized),
            _ => sort_keys(normalized),
        };
    }

    tracing::trace!(%format, ?config, "normalized value");
    normalized
}

// ---------------------------------------------------------------------------
// Path removal
// ---------------------------------------------------------------------------

/// Deletes the object key addressed by the dot `path`.
///
/// Intermediate segments walk objects by key and arrays by index. When any
/// of them does not resolve, or the final segment does not name a key of an
/// object, nothing happens. With `case_sensitive` off, segments match keys
/// regardless of case.
pub fn remove_path(value: &mut Value, path: &str, case_sensitive: bool) {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    if let Some(Value::Object(map)) = resolve_mut(value, parents, case_sensitive) {
        map.retain(|key, _| !key_matches(key, last, case_sensitive));
    }
}

fn resolve_mut<'v>(
    value: &'v mut Value,
    segments: &[&str],
    case_sensitive: bool,
) -> Option<&'v mut Value> {
    let Some((first, rest)) = segments.split_first() else {
        return Some(value);
    };

    let child = match value {
        Value::Object(map) => {
            // The last matching key is the one that survives key lowercasing.
            let key = map
                .keys()
                .rev()
                .find(|key| key_matches(key, first, case_sensitive))?
                .clone();
            map.get_mut(&key)?
        }
        Value::Array(items) => items.get_mut(first.parse::<usize>().ok()?)?,
        _ => return None,
    };

    resolve_mut(child, rest, case_sensitive)
}

fn key_matches(key: &str, segment: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        key == segment
    } else {
        key.to_lowercase() == segment.to_lowercase()
    }
}

// ---------------------------------------------------------------------------
// String normalization
// ---------------------------------------------------------------------------

/// Applies the string rewrites of `config` to a single string.
pub fn normalize_string(s: &str, config: &NormalizationConfig) -> String {
    let mut normalized = if config.trim_strings {
        s.trim().to_string()
    } else {
        s.to_string()
    };
    if config.ignore_whitespace {
        normalized = normalize_whitespace(&normalized);
    }
    if !config.case_sensitive {
        normalized = normalized.to_lowercase();
    }
    normalized
}

/// Collapses whitespace runs to a single space and trims the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rewrites every string scalar, and lowercases object keys when
/// `case_sensitive` is off. Colliding keys keep the last value.
fn normalize_strings(value: Value, config: &NormalizationConfig) -> Value {
    match value {
        Value::String(s) => Value::String(normalize_string(&s, config)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| normalize_strings(item, config))
                .collect(),
        ),
        Value::Object(map) => {
            let mut normalized = Map::with_capacity(map.len());
            for (key, item) in map {
                let key = if config.case_sensitive {
                    key
                } else {
                    key.to_lowercase()
                };
                normalized.insert(key, normalize_strings(item, config));
            }
            Value::Object(normalized)
        }
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Type coercion
// ---------------------------------------------------------------------------

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+$").expect("static regex"));

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]*\.[0-9]+$").expect("static regex"));

/// One string-to-value coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionRule {
    /// `^-?\d+$` becomes a number
    Integer,
    /// `^-?\d*\.\d+$` becomes a number
    Decimal,
    /// `true`/`false` in any case becomes a boolean
    Boolean,
    /// `null` in any case becomes null
    Null,
}

impl CoercionRule {
    /// Rules in the order they are tried. The first match wins.
    pub const ORDER: [CoercionRule; 4] = [
        CoercionRule::Integer,
        CoercionRule::Decimal,
        CoercionRule::Boolean,
        CoercionRule::Null,
    ];

    pub fn apply(self, text: &str) -> Option<Value> {
        match self {
            CoercionRule::Integer if INTEGER.is_match(text) => {
                text.parse::<f64>().ok().map(Value::Number)
            }
            CoercionRule::Decimal if DECIMAL.is_match(text) => {
                text.parse::<f64>().ok().map(Value::Number)
            }
            CoercionRule::Boolean if text.eq_ignore_ascii_case("true") => Some(Value::Bool(true)),
            CoercionRule::Boolean if text.eq_ignore_ascii_case("false") => {
                Some(Value::Bool(false))
            }
            CoercionRule::Null if text.eq_ignore_ascii_case("null") => Some(Value::Null),
            _ => None,
        }
    }
}

/// Coerces a single string, or returns `None` when no rule matches.
pub fn coerce_value(text: &str) -> Option<Value> {
    CoercionRule::ORDER
        .into_iter()
        .find_map(|rule| rule.apply(text))
}

fn coerce_types(value: Value) -> Value {
    match value {
        Value::String(s) => coerce_value(&s).unwrap_or(Value::String(s)),
        Value::Array(items) => Value::Array(items.into_iter().map(coerce_types).collect()),
        Value::Object(map) => map
            .into_iter()
            .map(|(key, item)| (key, coerce_types(item)))
            .collect(),
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Sorts object keys, and arrays made only of scalars by their text.
///
/// Null sorts first. Arrays holding any container keep their order.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Array(items) => {
            let mut items: Vec<Value> = items.into_iter().map(sort_keys).collect();
            if items.iter().all(Value::is_scalar) {
                items.sort_by_key(Value::scalar_text);
            }
            Value::Array(items)
        }
        Value::Object(map) => {
            let mut sorted: Map = map
                .into_iter()
                .map(|(key, item)| (key, sort_keys(item)))
                .collect();
            sorted.sort_keys();
            Value::Object(sorted)
        }
        other => other,
    }
}

/// Sorts attributes and child elements separately, attributes first.
fn sort_xml(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(sort_xml).collect()),
        Value::Object(map) => {
            let (mut attributes, mut elements): (Map, Map) = map
                .into_iter()
                .map(|(key, item)| (key, sort_xml(item)))
                .partition(|(key, _)| key.starts_with(ATTRIBUTE_PREFIX));
            attributes.sort_keys();
            elements.sort_keys();
            attributes.extend(elements);
            Value::Object(attributes)
        }
        other => other,
    }
}
