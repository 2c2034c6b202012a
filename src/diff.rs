//! Structural diff between two normalized values.
//!
//! This module compares two [`Value`] trees and produces an ordered edit
//! script of [`DiffEntry`] items. The algorithm recursively traverses both
//! trees, recording additions, removals and updates at dot paths.
//!
//! # Examples
//!
//! ```
//! use semcompare::{compare_data, parse_json, CompareConfig, DiffKind};
//!
//! let old = parse_json(r#"{"user": {"age": 30}}"#).unwrap();
//! let new = parse_json(r#"{"user": {"age": 31}}"#).unwrap();
//!
//! let diff = compare_data(&old, &new, &CompareConfig::default())
//!     .unwrap()
//!     .unwrap();
//!
//! assert_eq!(diff.len(), 1);
//! assert_eq!(diff[0].path, "user.age");
//! assert_eq!(diff[0].kind, DiffKind::Update);
//! ```

use crate::error::CompareError;
use crate::value::{Map, Value, MAX_DEPTH};
use serde::Serialize;

/// The kind of a single difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// Present in the modified value only
    Add,
    /// Present in the original value only
    Remove,
    /// Present in both with different values
    Update,
}

/// A single difference at a dot path.
///
/// The path joins object keys and array indices with `.` (`users.0.age`).
/// The root value has the empty path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffEntry {
    /// Dot path of the changed value
    pub path: String,
    /// Kind of change
    pub kind: DiffKind,
    /// Original value (None for additions)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    /// Modified value (None for removals)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
}

impl DiffEntry {
    pub fn added(path: impl Into<String>, value: Value) -> Self {
        Self {
            path: path.into(),
            kind: DiffKind::Add,
            old_value: None,
            new_value: Some(value),
        }
    }

    pub fn removed(path: impl Into<String>, value: Value) -> Self {
        Self {
            path: path.into(),
            kind: DiffKind::Remove,
            old_value: Some(value),
            new_value: None,
        }
    }

    pub fn updated(path: impl Into<String>, old: Value, new: Value) -> Self {
        Self {
            path: path.into(),
            kind: DiffKind::Update,
            old_value: Some(old),
            new_value: Some(new),
        }
    }
}

/// Statistics about a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    /// Number of added values
    pub added: usize,
    /// Number of removed values
    pub removed: usize,
    /// Number of updated values
    pub updated: usize,
}

impl DiffStats {
    /// Counts the entries of an edit script by kind.
    pub fn from_entries(entries: &[DiffEntry]) -> Self {
        let mut stats = Self::default();
        for entry in entries {
            match entry.kind {
                DiffKind::Add => stats.added += 1,
                DiffKind::Remove => stats.removed += 1,
                DiffKind::Update => stats.updated += 1,
            }
        }
        stats
    }

    /// Returns the total number of changes.
    pub fn total_changes(&self) -> usize {
        self.added + self.removed + self.updated
    }

    /// Returns true if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }
}

/// Configuration for the differ.
///
/// `show_only_differences` does not change what is computed; it is passed
/// through to renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareConfig {
    /// Match array elements regardless of position
    pub ignore_array_order: bool,
    /// Object keys excluded from comparison at every level
    pub keys_to_skip: Vec<String>,
    /// Key joining object elements of unordered arrays
    pub array_item_key_name: Option<String>,
    /// Render only the differences
    pub show_only_differences: bool,
}

/// Computes the edit script turning `a` into `b`.
///
/// Returns `Ok(None)` when the values are semantically identical, otherwise
/// the ordered list of differences.
///
/// # Errors
///
/// Returns [`CompareError::DepthLimitExceeded`] when either tree nests deeper
/// than [`MAX_DEPTH`]. Differences in the data itself are never errors.
pub fn compare_data(
    a: &Value,
    b: &Value,
    config: &CompareConfig,
) -> Result<Option<Vec<DiffEntry>>, CompareError> {
    let mut differ = Differ::new(config);
    differ.diff_values(a, b, "", 0)?;

    tracing::debug!(entries = differ.entries.len(), "computed structural diff");

    if differ.entries.is_empty() {
        Ok(None)
    } else {
        Ok(Some(differ.entries))
    }
}

/// Returns true when `a` and `b` have no differences under `config`.
pub fn are_identical(a: &Value, b: &Value, config: &CompareConfig) -> Result<bool, CompareError> {
    Ok(compare_data(a, b, config)?.is_none())
}

/// Joins a parent path and a child segment.
pub fn join_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", parent, segment)
    }
}

struct Differ<'c> {
    config: &'c CompareConfig,
    entries: Vec<DiffEntry>,
}

impl<'c> Differ<'c> {
    fn new(config: &'c CompareConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
        }
    }

    fn diff_values(
        &mut self,
        a: &Value,
        b: &Value,
        path: &str,
        depth: usize,
    ) -> Result<(), CompareError> {
        if depth > MAX_DEPTH {
            return Err(CompareError::DepthLimitExceeded {
                path: path.to_string(),
                limit: MAX_DEPTH,
            });
        }

        match (a, b) {
            (Value::Object(a_map), Value::Object(b_map)) => {
                self.diff_objects(a_map, b_map, path, depth)
            }
            (Value::Array(a_items), Value::Array(b_items)) if self.config.ignore_array_order => {
                self.diff_unordered(a_items, b_items, path, depth)
            }
            (Value::Array(a_items), Value::Array(b_items)) => {
                self.diff_positional(a_items, b_items, path, depth)
            }
            _ => {
                if !a.scalar_equals(b) {
                    self.entries
                        .push(DiffEntry::updated(path, a.clone(), b.clone()));
                }
                Ok(())
            }
        }
    }

    fn skips(&self, key: &str) -> bool {
        self.config.keys_to_skip.iter().any(|k| k == key)
    }

    /// Keys of `a` in order (removed or recursed into), then keys only in `b`.
    fn diff_objects(
        &mut self,
        a: &Map,
        b: &Map,
        path: &str,
        depth: usize,
    ) -> Result<(), CompareError> {
        for (key, a_value) in a {
            if self.skips(key) {
                continue;
            }
            let child = join_path(path, key);
            match b.get(key) {
                Some(b_value) => self.diff_values(a_value, b_value, &child, depth + 1)?,
                None => self.entries.push(DiffEntry::removed(child, a_value.clone())),
            }
        }

        for (key, b_value) in b {
            if self.skips(key) || a.contains_key(key) {
                continue;
            }
            self.entries
                .push(DiffEntry::added(join_path(path, key), b_value.clone()));
        }

        Ok(())
    }

    /// Compares elements at the same index; the longer tail is added or removed.
    fn diff_positional(
        &mut self,
        a: &[Value],
        b: &[Value],
        path: &str,
        depth: usize,
    ) -> Result<(), CompareError> {
        for index in 0..a.len().max(b.len()) {
            let child = join_path(path, &index.to_string());
            match (a.get(index), b.get(index)) {
                (Some(a_item), Some(b_item)) => {
                    self.diff_values(a_item, b_item, &child, depth + 1)?
                }
                (Some(a_item), None) => self.entries.push(DiffEntry::removed(child, a_item.clone())),
                (None, Some(b_item)) => self.entries.push(DiffEntry::added(child, b_item.clone())),
                (None, None) => {}
            }
        }
        Ok(())
    }

    /// Matches elements regardless of position.
    ///
    /// Objects carrying the configured join key pair up by that key's value
    /// and are then diffed against each other. Everything else pairs with
    /// the first unmatched equivalent element. Unpaired elements of `a` are
    /// removals at their `a` index, unpaired elements of `b` are additions at
    /// their `b` index.
    fn diff_unordered(
        &mut self,
        a: &[Value],
        b: &[Value],
        path: &str,
        depth: usize,
    ) -> Result<(), CompareError> {
        let mut used = vec![false; b.len()];

        for (index, a_item) in a.iter().enumerate() {
            let child = join_path(path, &index.to_string());

            let matched = match self.join_key(a_item) {
                Some(key) => b
                    .iter()
                    .enumerate()
                    .position(|(j, b_item)| !used[j] && self.join_key(b_item) == Some(key)),
                None => self.find_equivalent(a_item, b, &used, depth)?,
            };

            match matched {
                Some(j) => {
                    used[j] = true;
                    self.diff_values(a_item, &b[j], &child, depth + 1)?;
                }
                None => self.entries.push(DiffEntry::removed(child, a_item.clone())),
            }
        }

        for (j, b_item) in b.iter().enumerate() {
            if !used[j] {
                self.entries
                    .push(DiffEntry::added(join_path(path, &j.to_string()), b_item.clone()));
            }
        }

        Ok(())
    }

    fn join_key<'v>(&self, item: &'v Value) -> Option<&'v Value> {
        let name = self.config.array_item_key_name.as_deref()?;
        item.get(name)
    }

    fn find_equivalent(
        &self,
        item: &Value,
        candidates: &[Value],
        used: &[bool],
        depth: usize,
    ) -> Result<Option<usize>, CompareError> {
        for (j, candidate) in candidates.iter().enumerate() {
            if used[j] || self.join_key(candidate).is_some() {
                continue;
            }
            let mut scratch = Differ::new(self.config);
            scratch.diff_values(item, candidate, "", depth + 1)?;
            if scratch.entries.is_empty() {
                return Ok(Some(j));
            }
        }
        Ok(None)
    }
}
