use semcompare::normalize::{coerce_value, normalize_string, CoercionRule};
use semcompare::{
    compare_data, normalize_data, parse_csv, parse_json, parse_xml, CompareConfig, Format,
    NormalizationConfig, Value,
};

fn json(text: &str) -> Value {
    parse_json(text).unwrap()
}

fn keys(value: &Value) -> Vec<String> {
    value.as_object().unwrap().keys().cloned().collect()
}

#[test]
fn test_normalization_is_idempotent() {
    let value = json(
        r#"{
            "Name": "  Jane   DOE ",
            "Tags": ["b", "A", "10", "2", null],
            "Meta": {"Version": "1.0", "Flag": "TRUE", "Created": "now"},
            "Items": [{"Id": "1", "Tmp": 1}, {"Id": "2"}]
        }"#,
    );
    let config = NormalizationConfig {
        sort_keys: true,
        coerce_types: true,
        ignore_whitespace: true,
        case_sensitive: false,
        trim_strings: true,
        ignore_paths: vec!["meta.created".to_string(), "Items.0.tmp".to_string()],
    };

    let once = normalize_data(&value, Format::Json, &config);
    let twice = normalize_data(&once, Format::Json, &config);
    assert_eq!(once, twice);
    assert_eq!(once.get("name"), Some(&Value::from("jane doe")));
    assert_eq!(once.get("meta").and_then(|m| m.get("created")), None);
}

#[test]
fn test_key_order_independence() {
    let a = json(r#"{"b": {"y": 1, "x": [3, 1]}, "a": true}"#);
    let b = json(r#"{"a": true, "b": {"x": [1, 3], "y": 1}}"#);
    let config = NormalizationConfig {
        sort_keys: true,
        ..Default::default()
    };
    let a = normalize_data(&a, Format::Json, &config);
    let b = normalize_data(&b, Format::Json, &config);
    assert_eq!(compare_data(&a, &b, &CompareConfig::default()).unwrap(), None);
}

#[test]
fn test_coercion_round_trip() {
    assert_eq!(coerce_value("42"), Some(Value::Number(42.0)));
    assert_eq!(coerce_value("true"), Some(Value::Bool(true)));
    assert_eq!(coerce_value("null"), Some(Value::Null));
    assert_eq!(coerce_value("abc"), None);
}

#[test]
fn test_coercion_rule_order() {
    assert_eq!(
        CoercionRule::ORDER,
        [
            CoercionRule::Integer,
            CoercionRule::Decimal,
            CoercionRule::Boolean,
            CoercionRule::Null
        ]
    );
    assert_eq!(CoercionRule::Integer.apply("1.0"), None);
    assert_eq!(CoercionRule::Decimal.apply("1.0"), Some(Value::Number(1.0)));
    assert_eq!(CoercionRule::Boolean.apply("FaLsE"), Some(Value::Bool(false)));
    assert_eq!(CoercionRule::Null.apply("nil"), None);
}

#[test]
fn test_whitespace_normalization() {
    let config = NormalizationConfig {
        ignore_whitespace: true,
        case_sensitive: true,
        ..Default::default()
    };
    assert_eq!(normalize_string("  Hello    World   ", &config), "Hello World");
    assert_eq!(normalize_string("tab\tand\nnewline", &config), "tab and newline");
}

#[test]
fn test_ignore_paths_removes_keys() {
    let value = json(r#"{"a": 1, "b": 2, "c": {"d": 3, "e": 4}}"#);
    let config = NormalizationConfig {
        case_sensitive: true,
        ignore_paths: vec!["b".to_string(), "c.d".to_string(), "missing.path".to_string()],
        ..Default::default()
    };
    assert_eq!(
        normalize_data(&value, Format::Json, &config),
        json(r#"{"a": 1, "c": {"e": 4}}"#)
    );
}

#[test]
fn test_case_sensitive_keeps_case() {
    let value = json(r#"{"Name": "JOHN"}"#);
    let config = NormalizationConfig {
        case_sensitive: true,
        ..Default::default()
    };
    assert_eq!(normalize_data(&value, Format::Json, &config), value);
}

#[test]
fn test_xml_attributes_sort_before_elements() {
    let value = parse_xml(r#"<item zeta="1" alpha="2"><name>x</name><code>y</code></item>"#).unwrap();
    let config = NormalizationConfig {
        sort_keys: true,
        case_sensitive: true,
        ..Default::default()
    };
    let normalized = normalize_data(&value, Format::Xml, &config);
    let item = normalized.get("item").unwrap();
    assert_eq!(keys(item), vec!["@alpha", "@zeta", "code", "name"]);
}

#[test]
fn test_xml_arrays_keep_order() {
    let value = parse_xml("<list><v>b</v><v>a</v></list>").unwrap();
    let config = NormalizationConfig {
        sort_keys: true,
        case_sensitive: true,
        ..Default::default()
    };
    let normalized = normalize_data(&value, Format::Xml, &config);
    assert_eq!(normalized, value);
}

#[test]
fn test_csv_inference_is_independent_of_coercion() {
    let value = parse_csv("id,code\n7,007").unwrap();
    let row = &value.as_array().unwrap()[0];
    assert_eq!(row.get("id"), Some(&Value::Number(7.0)));

    // Without coercion the parse-time number survives untouched.
    let plain = normalize_data(&value, Format::Csv, &NormalizationConfig::default());
    assert_eq!(plain.as_array().unwrap()[0].get("id"), Some(&Value::Number(7.0)));

    // Coercion only rewrites strings, so numbers are not coerced twice.
    let config = NormalizationConfig {
        coerce_types: true,
        ..Default::default()
    };
    let coerced = normalize_data(&value, Format::Csv, &config);
    assert_eq!(coerced, plain);
}
