//! CSV reader producing one object per row, keyed by the header.

use super::infer_scalar;
use crate::error::ParseError;
use crate::format::Format;
use crate::value::{Map, Value};

/// One physical record of the input, with the line it started on.
#[derive(Debug)]
struct Record {
    line: usize,
    fields: Vec<String>,
}

/// Parses CSV text into an array of objects.
///
/// The first record is the header. Every following record becomes an object
/// keyed by the header names, with cells typed at parse time (`30` is a
/// number, `true` a boolean). Blank lines are skipped. A record shorter than
/// the header leaves the missing keys out; a longer one is an error.
///
/// # Examples
///
/// ```
/// use semcompare::parser::parse_csv;
/// use semcompare::Value;
///
/// let value = parse_csv("name,age\nJohn,30").unwrap();
/// let rows = value.as_array().unwrap();
/// assert_eq!(rows[0].get("age"), Some(&Value::Number(30.0)));
/// ```
pub fn parse_csv(content: &str) -> Result<Value, ParseError> {
    let mut records = read_records(content)?.into_iter();
    let header = match records.next() {
        Some(header) => header.fields,
        None => return Ok(Value::Array(Vec::new())),
    };

    let mut rows = Vec::new();
    for record in records {
        if record.fields.len() > header.len() {
            return Err(csv_error(format!(
                "record on line {} has {} fields, header has {}",
                record.line,
                record.fields.len(),
                header.len()
            )));
        }
        let row: Map = header
            .iter()
            .zip(record.fields)
            .map(|(name, cell)| (name.clone(), infer_scalar(&cell)))
            .collect();
        rows.push(Value::Object(row));
    }

    Ok(Value::Array(rows))
}

/// Returns the header names of `content`, if it has at least one record.
pub(crate) fn header_fields(content: &str) -> Option<Vec<String>> {
    read_records(content)
        .ok()
        .and_then(|records| records.into_iter().next())
        .map(|record| record.fields)
}

fn csv_error(message: impl Into<String>) -> ParseError {
    ParseError::new(Format::Csv, message)
}

/// Splits the input into records, honoring quoted fields.
///
/// Quoted fields may contain commas, newlines and doubled quotes (`""`).
fn read_records(content: &str) -> Result<Vec<Record>, ParseError> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut record_quoted = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => {
                in_quotes = true;
                record_quoted = true;
            }
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                finish_record(&mut records, std::mem::take(&mut fields), record_line, record_quoted);
                record_quoted = false;
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(csv_error(format!(
            "unterminated quoted field in record starting on line {}",
            record_line
        )));
    }

    fields.push(field);
    finish_record(&mut records, fields, record_line, record_quoted);

    Ok(records)
}

fn finish_record(records: &mut Vec<Record>, fields: Vec<String>, line: usize, quoted: bool) {
    let blank = !quoted && fields.len() == 1 && fields[0].trim().is_empty();
    if !blank {
        records.push(Record { line, fields });
    }
}
