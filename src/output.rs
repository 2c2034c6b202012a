//! Output formatting for comparison results.
//!
//! This module renders a [`CompareOutcome`] as colored terminal text, plain
//! text, or JSON.
//!
//! # Examples
//!
//! ```
//! use semcompare::{format_outcome, semantic_compare, CompareRequest, Format};
//! use semcompare::{OutputFormat, OutputOptions};
//!
//! let request = CompareRequest::new(r#"{"age": 30}"#, r#"{"age": 31}"#).with_format(Format::Json);
//! let outcome = semantic_compare(&request).unwrap();
//!
//! let output = format_outcome(&outcome, &OutputFormat::Plain, &OutputOptions::default()).unwrap();
//! assert!(output.contains("• age: 30 → 31"));
//! ```

use crate::compare::CompareOutcome;
use crate::diff::{DiffEntry, DiffKind, DiffStats};
use crate::error::OutputError;
use crate::value::Value;
use colored::*;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored terminal output with ANSI escape codes
    Terminal,
    /// JSON representation of the full outcome
    Json,
    /// Plain text, no colors (suitable for piping)
    Plain,
}

/// Options for controlling output formatting.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Maximum length for displayed values (truncate if longer)
    pub max_value_length: usize,
    /// Print the difference lines only
    pub quiet: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            max_value_length: 80,
            quiet: false,
        }
    }
}

/// Formats an outcome according to the specified format and options.
///
/// Text formats print one line per difference followed by a summary line.
/// Unless the outcome asks for differences only, both normalized documents
/// are appended as pretty JSON.
///
/// # Errors
///
/// Returns an [`OutputError`] when JSON serialization fails.
pub fn format_outcome(
    outcome: &CompareOutcome,
    format: &OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Terminal => format_text(outcome, options, true),
        OutputFormat::Plain => format_text(outcome, options, false),
        OutputFormat::Json => format_json(outcome),
    }
}

fn format_text(
    outcome: &CompareOutcome,
    options: &OutputOptions,
    use_color: bool,
) -> Result<String, OutputError> {
    let mut lines: Vec<String> = outcome
        .entries()
        .iter()
        .map(|entry| {
            if use_color {
                format_entry_terminal(entry, options)
            } else {
                format_entry_plain(entry, options)
            }
        })
        .collect();

    if options.quiet {
        return Ok(lines.join("\n"));
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    let summary = format_summary(&outcome.summary.summary, &outcome.stats());
    lines.push(if use_color {
        summary.bold().to_string()
    } else {
        summary
    });

    if !outcome.show_only_differences {
        for (label, value) in [
            ("Original (normalized):", &outcome.original_normalized),
            ("Modified (normalized):", &outcome.modified_normalized),
        ] {
            lines.push(String::new());
            lines.push(if use_color {
                label.bold().to_string()
            } else {
                label.to_string()
            });
            lines.push(to_pretty_json(value)?);
        }
    }

    Ok(lines.join("\n"))
}

/// Formats a single entry for terminal output.
///
/// Color scheme: additions green, removals red, updates yellow.
fn format_entry_terminal(entry: &DiffEntry, options: &OutputOptions) -> String {
    let path = format_path(&entry.path);
    let old_value = format_value(entry.old_value.as_ref(), options.max_value_length);
    let new_value = format_value(entry.new_value.as_ref(), options.max_value_length);

    match entry.kind {
        DiffKind::Add => format!("{} {}: {}", "+".bright_green(), path.green(), new_value.green()),
        DiffKind::Remove => format!("{} {}: {}", "-".bright_red(), path.red(), old_value.red()),
        DiffKind::Update => format!(
            "{} {}: {} {} {}",
            "•".bright_yellow(),
            path.yellow(),
            old_value.yellow(),
            "→".bright_yellow(),
            new_value.yellow()
        ),
    }
}

/// Formats a single entry for plain text output.
fn format_entry_plain(entry: &DiffEntry, options: &OutputOptions) -> String {
    let path = format_path(&entry.path);
    let old_value = format_value(entry.old_value.as_ref(), options.max_value_length);
    let new_value = format_value(entry.new_value.as_ref(), options.max_value_length);

    match entry.kind {
        DiffKind::Add => format!("+ {}: {}", path, new_value),
        DiffKind::Remove => format!("- {}: {}", path, old_value),
        DiffKind::Update => format!("• {}: {} → {}", path, old_value, new_value),
    }
}

/// Formats the outcome as pretty JSON with the camelCase field names of a
/// comparison response.
fn format_json(outcome: &CompareOutcome) -> Result<String, OutputError> {
    serde_json::to_string_pretty(outcome)
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}

fn to_pretty_json(value: &Value) -> Result<String, OutputError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}

/// The root path is shown as `(root)`.
fn format_path(path: &str) -> String {
    if path.is_empty() {
        "(root)".to_string()
    } else {
        path.to_string()
    }
}

fn format_value(value: Option<&Value>, max_length: usize) -> String {
    value
        .map(|v| v.preview(max_length))
        .unwrap_or_default()
}

fn format_summary(text: &str, stats: &DiffStats) -> String {
    format!(
        "Summary: {} ({} added, {} removed, {} updated)",
        text, stats.added, stats.removed, stats.updated
    )
}
