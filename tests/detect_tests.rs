use semcompare::detect::looks_like_csv;
use semcompare::{detect_format, Format};

#[test]
fn test_every_extension_is_recognized() {
    let cases = [
        ("a.json", Format::Json),
        ("a.yaml", Format::Yaml),
        ("a.yml", Format::Yaml),
        ("a.toml", Format::Toml),
        ("a.xml", Format::Xml),
        ("a.csv", Format::Csv),
        ("dir/nested/A.JSON", Format::Json),
    ];
    for (filename, expected) in cases {
        assert_eq!(detect_format("", Some(filename)), expected, "{}", filename);
    }
}

#[test]
fn test_extension_beats_content() {
    assert_eq!(detect_format("<root/>", Some("data.json")), Format::Json);
}

#[test]
fn test_content_precedence() {
    // Valid JSON wins over everything else.
    assert_eq!(detect_format(r#"{"a": "b = c"}"#, None), Format::Json);
    assert_eq!(detect_format("\"just a string\"", None), Format::Json);

    // XML before TOML.
    assert_eq!(detect_format("<config>a = b</config>", None), Format::Xml);
    assert_eq!(detect_format("title = 1\n<?xml version=\"1.0\"?>", None), Format::Xml);

    // TOML before CSV.
    assert_eq!(detect_format("a = 1,2\nb = 3,4", None), Format::Toml);
}

#[test]
fn test_toml_detection() {
    assert_eq!(detect_format("[package]\nname = \"demo\"", None), Format::Toml);
    assert_eq!(detect_format("  [[bin]]  \n", None), Format::Toml);
    assert_eq!(detect_format("key = \"value\"", None), Format::Toml);
}

#[test]
fn test_csv_detection() {
    assert_eq!(detect_format("id,name,email\n1,Ann,a@x.io\n2,Bo,b@x.io", None), Format::Csv);
    assert_eq!(detect_format("\"a,b\",c\n1,2", None), Format::Yaml);
}

#[test]
fn test_yaml_fallback() {
    assert_eq!(detect_format("server:\n  port: 80", None), Format::Yaml);
    assert_eq!(detect_format("- one\n- two", None), Format::Yaml);
    assert_eq!(detect_format("plain text", None), Format::Yaml);
    assert_eq!(detect_format("   \n\n", None), Format::Yaml);
}

#[test]
fn test_csv_heuristic() {
    assert!(looks_like_csv("a,b\n1,2"));
    assert!(looks_like_csv("a,b,c\n1,2,3\n4,5"));
    assert!(!looks_like_csv("a,b\n1,2,3"));
    assert!(!looks_like_csv("a\n1"));
    assert!(!looks_like_csv("a,b"));
    assert!(!looks_like_csv("key: a,b\nother: c,d"));
    assert!(!looks_like_csv("a,b\n[1,2]"));
    assert!(!looks_like_csv("  - a,b\n  - c,d"));
}
