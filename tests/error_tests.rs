use semcompare::{
    load_options, parse_json, semantic_compare, CompareError, CompareRequest, Format, OutputError,
    ParseError, SemcompareError, Side,
};
use std::error::Error;
use std::path::Path;

#[test]
fn test_parse_error_display() {
    let err = ParseError::new(Format::Yaml, "mapping values are not allowed");
    assert_eq!(
        err.to_string(),
        "Failed to parse as YAML: mapping values are not allowed"
    );
}

#[test]
fn test_parse_error_keeps_underlying_message() {
    let err = parse_json("{\"a\": }").unwrap_err();
    assert_eq!(err.format, Format::Json);
    assert!(err.message.contains("line 1"));
}

#[test]
fn test_semcompare_error_source_chain() {
    let err = SemcompareError::parse(Side::Original, ParseError::new(Format::Csv, "bad row"));
    let source = err.source().unwrap();
    assert_eq!(source.to_string(), "Failed to parse as CSV: bad row");
}

#[test]
fn test_semcompare_error_from_compare_error() {
    let err: SemcompareError = CompareError::DepthLimitExceeded {
        path: "a".to_string(),
        limit: 512,
    }
    .into();
    assert!(matches!(err, SemcompareError::Compare(_)));
    assert!(err.to_string().contains("depth"));
}

#[test]
fn test_output_error_from_serde() {
    let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: SemcompareError = OutputError::JsonSerializationError { source: serde_err }.into();
    assert!(matches!(err, SemcompareError::Output(_)));
    assert!(err.to_string().starts_with("Failed to serialize to JSON"));
}

#[test]
fn test_io_error_names_path() {
    let err = load_options(Path::new("/nonexistent/semcompare.yaml")).unwrap_err();
    assert!(matches!(err, SemcompareError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/semcompare.yaml"));
}

#[test]
fn test_parse_failure_aborts_comparison() {
    let request = CompareRequest::new("{}", "{\"a\": [1,}").with_format(Format::Json);
    let err = semantic_compare(&request).unwrap_err();
    assert!(err
        .to_string()
        .starts_with("Failed to parse modified document: Failed to parse as JSON:"));
}
