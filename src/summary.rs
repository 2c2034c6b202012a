//! Human-readable summary of an edit script.

use crate::diff::DiffEntry;
use serde::Serialize;

/// Summary of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub has_changes: bool,
    /// Number of diff entries, 0 when identical
    pub change_count: usize,
    /// One-line description (`"3 changes detected"`)
    pub summary: String,
}

/// Summarizes the result of [`compare_data`](crate::compare_data).
///
/// # Examples
///
/// ```
/// use semcompare::summarize;
///
/// let summary = summarize(None);
/// assert!(!summary.has_changes);
/// assert_eq!(summary.summary, "No differences found");
/// ```
pub fn summarize(diff: Option<&[DiffEntry]>) -> Summary {
    let change_count = diff.map_or(0, <[DiffEntry]>::len);
    let summary = match change_count {
        0 => "No differences found".to_string(),
        1 => "1 change detected".to_string(),
        n => format!("{} changes detected", n),
    };

    Summary {
        has_changes: change_count > 0,
        change_count,
        summary,
    }
}
