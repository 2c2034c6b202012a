//! The comparison pipeline: detect, parse, normalize, diff, summarize.
//!
//! # Examples
//!
//! ```
//! use semcompare::{semantic_compare, CompareOptions, CompareRequest, Format};
//!
//! let request = CompareRequest::new(r#"{"a": 1, "b": 2}"#, r#"{"b": 2, "a": 1}"#)
//!     .with_format(Format::Json)
//!     .with_options(CompareOptions {
//!         sort_keys: true,
//!         ..Default::default()
//!     });
//!
//! let outcome = semantic_compare(&request).unwrap();
//! assert!(outcome.identical);
//! assert_eq!(outcome.summary.summary, "No differences found");
//! ```

use crate::detect::detect_format;
use crate::diff::{compare_data, CompareConfig, DiffEntry, DiffStats};
use crate::error::{SemcompareError, Side};
use crate::format::Format;
use crate::normalize::{normalize_data, NormalizationConfig};
use crate::parser::parse_content;
use crate::summary::{summarize, Summary};
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Options of a comparison, as they appear in a request or options file.
///
/// Every flag defaults to `false` and every list to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompareOptions {
    pub sort_keys: bool,
    pub coerce_types: bool,
    pub ignore_whitespace: bool,
    pub case_sensitive: bool,
    pub trim_strings: bool,
    pub ignore_paths: Vec<String>,
    pub ignore_array_order: bool,
    pub keys_to_skip: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_item_key_name: Option<String>,
    pub show_only_differences: bool,
    /// Detect formats even when the request names one
    pub auto_detect_format: bool,
}

impl CompareOptions {
    pub fn normalization_config(&self) -> NormalizationConfig {
        NormalizationConfig {
            sort_keys: self.sort_keys,
            coerce_types: self.coerce_types,
            ignore_whitespace: self.ignore_whitespace,
            case_sensitive: self.case_sensitive,
            trim_strings: self.trim_strings,
            ignore_paths: self.ignore_paths.clone(),
        }
    }

    pub fn compare_config(&self) -> CompareConfig {
        CompareConfig {
            ignore_array_order: self.ignore_array_order,
            keys_to_skip: self.keys_to_skip.clone(),
            array_item_key_name: self.array_item_key_name.clone(),
            show_only_differences: self.show_only_differences,
        }
    }
}

/// Input of [`semantic_compare`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub original: String,
    pub modified: String,
    /// Format of both documents; detected when absent
    #[serde(default, rename = "type")]
    pub format: Option<Format>,
    #[serde(default)]
    pub original_filename: Option<String>,
    #[serde(default)]
    pub modified_filename: Option<String>,
    #[serde(default)]
    pub options: CompareOptions,
}

impl CompareRequest {
    pub fn new(original: impl Into<String>, modified: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            modified: modified.into(),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets the file names used as detection hints.
    pub fn with_filenames(mut self, original: Option<&str>, modified: Option<&str>) -> Self {
        self.original_filename = original.map(str::to_string);
        self.modified_filename = modified.map(str::to_string);
        self
    }

    pub fn with_options(mut self, options: CompareOptions) -> Self {
        self.options = options;
        self
    }

    fn auto_detect(&self) -> bool {
        self.format.is_none() || self.options.auto_detect_format
    }
}

/// Formats each side was parsed with in auto-detect mode.
///
/// When the two detections disagree both fields hold the reconciled format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DetectedFormats {
    pub original: Format,
    pub modified: Format,
}

/// Everything a caller needs to present a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareOutcome {
    /// Edit script, `None` when identical
    pub diff: Option<Vec<DiffEntry>>,
    pub identical: bool,
    pub summary: Summary,
    pub original_parsed: Value,
    pub modified_parsed: Value,
    pub original_normalized: Value,
    pub modified_normalized: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_formats: Option<DetectedFormats>,
    /// Format both documents were parsed with
    pub format: Format,
    pub show_only_differences: bool,
}

impl CompareOutcome {
    pub fn entries(&self) -> &[DiffEntry] {
        self.diff.as_deref().unwrap_or_default()
    }

    pub fn stats(&self) -> DiffStats {
        DiffStats::from_entries(self.entries())
    }
}

/// Compares two documents semantically.
///
/// When the request names no format (or sets `autoDetectFormat`), each side
/// is detected on its own. If the two detections disagree, one format is
/// picked with [`Format::reconcile`] and both sides are parsed with it, which
/// may fail for the side written in the other format.
///
/// # Errors
///
/// - [`SemcompareError::Parse`] when either side does not parse, tagged with
///   the side
/// - [`SemcompareError::Compare`] when a value nests beyond the supported
///   depth
#[tracing::instrument(skip_all, fields(format = ?request.format))]
pub fn semantic_compare(request: &CompareRequest) -> Result<CompareOutcome, SemcompareError> {
    let options = &request.options;

    let (format, detected_formats) = match request.format {
        Some(format) if !request.auto_detect() => (format, None),
        _ => {
            let original = detect_format(&request.original, request.original_filename.as_deref());
            let modified = detect_format(&request.modified, request.modified_filename.as_deref());
            let format = Format::reconcile(original, modified);
            if original != modified {
                tracing::debug!(
                    %original,
                    %modified,
                    chosen = %format,
                    "detected formats differ, parsing both sides with one format"
                );
            }
            let parsed_as = DetectedFormats {
                original: format,
                modified: format,
            };
            (format, Some(parsed_as))
        }
    };

    let original_parsed = parse_content(&request.original, format)
        .map_err(|e| SemcompareError::parse(Side::Original, e))?;
    let modified_parsed = parse_content(&request.modified, format)
        .map_err(|e| SemcompareError::parse(Side::Modified, e))?;

    let normalization = options.normalization_config();
    let original_normalized = normalize_data(&original_parsed, format, &normalization);
    let modified_normalized = normalize_data(&modified_parsed, format, &normalization);

    let diff = compare_data(
        &original_normalized,
        &modified_normalized,
        &options.compare_config(),
    )?;
    let summary = summarize(diff.as_deref());

    tracing::debug!(%format, changes = summary.change_count, "comparison finished");

    Ok(CompareOutcome {
        identical: diff.is_none(),
        diff,
        summary,
        original_parsed,
        modified_parsed,
        original_normalized,
        modified_normalized,
        detected_formats,
        format,
        show_only_differences: options.show_only_differences,
    })
}
