//! XML reader mapping elements, attributes and text onto objects.
//!
//! The mapping:
//!
//! - the document becomes `{ rootName: rootValue }`
//! - attributes become keys prefixed with `@`
//! - an element with only text becomes that text (typed like CSV cells)
//! - an element with attributes or children keeps its text under `#text`
//! - repeated sibling elements collapse into an array
//! - whitespace-only text, comments, declarations and processing
//!   instructions are dropped

use super::infer_scalar;
use crate::error::ParseError;
use crate::format::Format;
use crate::value::{Map, Value, MAX_DEPTH};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Key holding an element's text when the element also has attributes or
/// children.
pub const TEXT_KEY: &str = "#text";

/// Prefix marking attribute keys.
pub const ATTRIBUTE_PREFIX: &str = "@";

// Each element level can add an object and a repetition array.
const MAX_NESTING: usize = MAX_DEPTH / 2 - 1;

/// An element whose end tag has not been seen yet.
struct OpenElement {
    name: String,
    fields: Map,
    text: Vec<String>,
}

impl OpenElement {
    fn into_entry(self) -> (String, Value) {
        let text = self.text.join(" ");
        let mut fields = self.fields;
        let value = if fields.is_empty() {
            if text.is_empty() {
                Value::String(String::new())
            } else {
                infer_scalar(&text)
            }
        } else {
            if !text.is_empty() {
                fields.insert(TEXT_KEY.to_string(), infer_scalar(&text));
            }
            Value::Object(fields)
        };
        (self.name, value)
    }
}

/// Parses an XML document into a [`Value`].
///
/// # Examples
///
/// ```
/// use semcompare::parser::parse_xml;
/// use semcompare::Value;
///
/// let value = parse_xml(r#"<user id="7"><name>Ann</name></user>"#).unwrap();
/// let user = value.get("user").unwrap();
/// assert_eq!(user.get("@id"), Some(&Value::Number(7.0)));
/// assert_eq!(user.get("name"), Some(&Value::from("Ann")));
/// ```
pub fn parse_xml(content: &str) -> Result<Value, ParseError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut document = Map::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            xml_error(format!("{} (at byte {})", e, reader.buffer_position()))
        })?;

        match event {
            Event::Start(start) => {
                if stack.len() >= MAX_NESTING {
                    return Err(xml_error(format!(
                        "elements nested deeper than {} levels",
                        MAX_NESTING
                    )));
                }
                stack.push(open_element(&start)?);
            }
            Event::Empty(start) => {
                let element = open_element(&start)?;
                attach(&mut stack, &mut document, element);
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| xml_error("closing tag without matching opening tag"))?;
                attach(&mut stack, &mut document, element);
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| xml_error(e.to_string()))?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(cdata) => {
                let raw = cdata.into_inner();
                push_text(&mut stack, &String::from_utf8_lossy(&raw))?;
            }
            Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.last() {
        return Err(xml_error(format!("unclosed element <{}>", open.name)));
    }
    if document.is_empty() {
        return Err(xml_error("no root element"));
    }

    Ok(Value::Object(document))
}

fn xml_error(message: impl Into<String>) -> ParseError {
    ParseError::new(Format::Xml, message)
}

fn open_element(start: &BytesStart<'_>) -> Result<OpenElement, ParseError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut fields = Map::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| xml_error(e.to_string()))?;
        let key = format!(
            "{}{}",
            ATTRIBUTE_PREFIX,
            String::from_utf8_lossy(attr.key.as_ref())
        );
        let value = attr.unescape_value().map_err(|e| xml_error(e.to_string()))?;
        fields.insert(key, infer_scalar(&value));
    }

    Ok(OpenElement {
        name,
        fields,
        text: Vec::new(),
    })
}

/// Adds a finished element to its parent, or to the document at top level.
fn attach(stack: &mut [OpenElement], document: &mut Map, element: OpenElement) {
    let (name, value) = element.into_entry();
    match stack.last_mut() {
        Some(parent) => insert_repeated(&mut parent.fields, name, value),
        None => insert_repeated(document, name, value),
    }
}

/// Inserts `value` under `name`, turning repeated names into an array.
///
/// Element values are never arrays themselves, so an existing array under
/// `name` always means the element was already repeated.
fn insert_repeated(map: &mut Map, name: String, value: Value) {
    match map.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = std::mem::replace(existing, Value::Null);
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(name, value);
        }
    }
}

fn push_text(stack: &mut [OpenElement], text: &str) -> Result<(), ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(element) => {
            element.text.push(text.to_string());
            Ok(())
        }
        None => Err(xml_error("text outside of the root element")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_only_element_is_scalar() {
        let value = parse_xml("<config><port>8080</port><host>local</host></config>").unwrap();
        let config = value.get("config").unwrap();
        assert_eq!(config.get("port"), Some(&Value::Number(8080.0)));
        assert_eq!(config.get("host"), Some(&Value::from("local")));
    }

    #[test]
    fn test_attributes_are_prefixed() {
        let value = parse_xml(r#"<server name="web" secure="true"/>"#).unwrap();
        let server = value.get("server").unwrap();
        assert_eq!(server.get("@name"), Some(&Value::from("web")));
        assert_eq!(server.get("@secure"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_text_with_attributes_uses_text_key() {
        let value = parse_xml(r#"<price currency="EUR">12.5</price>"#).unwrap();
        let price = value.get("price").unwrap();
        assert_eq!(price.get("@currency"), Some(&Value::from("EUR")));
        assert_eq!(price.get(TEXT_KEY), Some(&Value::Number(12.5)));
    }

    #[test]
    fn test_repeated_elements_collapse_into_array() {
        let value = parse_xml("<list><item>a</item><item>b</item><item>c</item></list>").unwrap();
        let items = value.get("list").and_then(|l| l.get("item")).unwrap();
        assert_eq!(
            items,
            &Value::Array(vec![Value::from("a"), Value::from("b"), Value::from("c")])
        );
    }

    #[test]
    fn test_whitespace_only_text_is_dropped() {
        let compact = parse_xml("<a><b>1</b></a>").unwrap();
        let pretty = parse_xml("<a>\n    <b>1</b>\n</a>\n").unwrap();
        assert_eq!(compact, pretty);
    }

    #[test]
    fn test_declaration_and_comments_are_dropped() {
        let value = parse_xml("<?xml version=\"1.0\"?>\n<!-- note -->\n<a>x</a>").unwrap();
        assert_eq!(value.as_object().map(|m| m.len()), Some(1));
        assert_eq!(value.get("a"), Some(&Value::from("x")));
    }

    #[test]
    fn test_empty_element_is_empty_string() {
        let value = parse_xml("<a><b/></a>").unwrap();
        assert_eq!(value.get("a").and_then(|a| a.get("b")), Some(&Value::from("")));
    }

    #[test]
    fn test_entities_and_cdata() {
        let value = parse_xml("<a><b>x &amp; y</b><c><![CDATA[<raw>]]></c></a>").unwrap();
        let a = value.get("a").unwrap();
        assert_eq!(a.get("b"), Some(&Value::from("x & y")));
        assert_eq!(a.get("c"), Some(&Value::from("<raw>")));
    }

    #[test]
    fn test_malformed_xml() {
        assert!(parse_xml("<a><b></a>").is_err());
        assert!(parse_xml("<a>").is_err());
        assert!(parse_xml("").is_err());
        assert!(parse_xml("just text").is_err());
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let depth = MAX_NESTING + 1;
        let doc = format!("{}{}", "<a>".repeat(depth), "</a>".repeat(depth));
        let err = parse_xml(&doc).unwrap_err();
        assert!(err.message.contains("nested"));
    }
}
