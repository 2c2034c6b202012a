//! Format detection from file names and content.
//!
//! Detection never fails: when no rule matches, YAML is returned because it
//! is the most permissive grammar. The parse that follows may still fail.
//!
//! # Examples
//!
//! ```
//! use semcompare::{detect_format, Format};
//!
//! assert_eq!(detect_format("a: 1", Some("config.yml")), Format::Yaml);
//! assert_eq!(detect_format(r#"{"a": 1}"#, None), Format::Json);
//! assert_eq!(detect_format("<a/>", None), Format::Xml);
//! ```

use crate::format::Format;
use crate::parser::csv_header_fields;
use regex::Regex;
use std::sync::LazyLock;

static TOML_TABLE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\[.*\]\s*$").expect("static regex"));

static TOML_KEY_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\w+\s*=\s*.+$").expect("static regex"));

/// Characters that rule a line out as a CSV record.
const NON_CSV_CHARS: [char; 6] = ['{', '<', '=', ':', '[', ']'];

/// Picks the format of `content`.
///
/// Rules, first match wins:
///
/// 1. a recognized file name extension
/// 2. the content is valid JSON
/// 3. the content starts with `<` or contains `<?xml`
/// 4. a TOML table header or `key = value` line
/// 5. the CSV heuristic in [`looks_like_csv`]
/// 6. YAML
pub fn detect_format(content: &str, filename: Option<&str>) -> Format {
    if let Some(format) = filename.and_then(Format::from_filename) {
        tracing::debug!(%format, ?filename, "format detected from file extension");
        return format;
    }

    let trimmed = content.trim();

    let format = if serde_json::from_str::<serde::de::IgnoredAny>(trimmed).is_ok() {
        Format::Json
    } else if trimmed.starts_with('<') || trimmed.contains("<?xml") {
        Format::Xml
    } else if TOML_TABLE_HEADER.is_match(trimmed) || TOML_KEY_VALUE.is_match(trimmed) {
        Format::Toml
    } else if looks_like_csv(trimmed) {
        Format::Csv
    } else {
        Format::Yaml
    };

    tracing::debug!(%format, "format detected from content");
    format
}

/// CSV heuristic.
///
/// Requires at least two non-blank lines whose first two have the same
/// non-zero number of commas, no structural characters of other formats, no
/// YAML list marker, and a header of at least two columns.
pub fn looks_like_csv(content: &str) -> bool {
    let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return false;
    }

    let first = lines[0];
    let second = lines[1];
    let commas = first.matches(',').count();
    if commas == 0 || commas != second.matches(',').count() {
        return false;
    }

    let foreign = |line: &str| {
        line.contains(NON_CSV_CHARS.as_slice()) || line.trim_start().starts_with("- ")
    };
    if foreign(first) || foreign(second) {
        return false;
    }

    csv_header_fields(content).is_some_and(|header| header.len() >= 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_wins() {
        assert_eq!(detect_format(r#"{"a": 1}"#, Some("data.yaml")), Format::Yaml);
        assert_eq!(detect_format("a: 1", Some("x.toml")), Format::Toml);
        assert_eq!(detect_format("a,b\n1,2", Some("x.csv")), Format::Csv);
    }

    #[test]
    fn test_unknown_extension_falls_back_to_content() {
        assert_eq!(detect_format(r#"{"a": 1}"#, Some("notes.txt")), Format::Json);
    }

    #[test]
    fn test_json_content() {
        assert_eq!(detect_format("  [1, 2, 3]  ", None), Format::Json);
        assert_eq!(detect_format("42", None), Format::Json);
    }

    #[test]
    fn test_xml_content() {
        assert_eq!(detect_format("<root><a>1</a></root>", None), Format::Xml);
        assert_eq!(detect_format("\n<?xml version=\"1.0\"?><r/>", None), Format::Xml);
    }

    #[test]
    fn test_toml_content() {
        assert_eq!(detect_format("[server]\nport = 80", None), Format::Toml);
        assert_eq!(detect_format("name = \"app\"", None), Format::Toml);
    }

    #[test]
    fn test_csv_content() {
        assert_eq!(detect_format("name,age\nJohn,30\nJane,25", None), Format::Csv);
    }

    #[test]
    fn test_yaml_fallback() {
        assert_eq!(detect_format("name: John\nage: 30", None), Format::Yaml);
        assert_eq!(detect_format("- a\n- b", None), Format::Yaml);
        assert_eq!(detect_format("", None), Format::Yaml);
    }

    #[test]
    fn test_csv_heuristic_rejections() {
        assert!(!looks_like_csv("a,b"));
        assert!(!looks_like_csv("a,b\n1,2,3"));
        assert!(!looks_like_csv("a\nb"));
        assert!(!looks_like_csv("a: 1, b\nc: 2, d"));
        assert!(!looks_like_csv("- a, b\n- c, d"));
        assert!(!looks_like_csv("{a, b\nc, d}"));
        assert!(looks_like_csv("a,b\n\n1,2"));
    }
}
