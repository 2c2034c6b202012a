//! Comparison options read from a file.
//!
//! An options file holds the same camelCase keys as the `options` object of
//! a comparison request, written as YAML or JSON:
//!
//! ```yaml
//! sortKeys: true
//! ignorePaths:
//!   - metadata.generatedAt
//! keysToSkip: [id]
//! ```

use crate::compare::CompareOptions;
use crate::error::SemcompareError;
use std::fs;
use std::path::{Path, PathBuf};

/// File names searched by [`discover_options_file`], in order.
pub const OPTIONS_FILE_NAMES: [&str; 4] = [
    ".semcompare.yaml",
    ".semcompare.yml",
    "semcompare.yaml",
    "semcompare.json",
];

/// Reads options from a YAML or JSON file.
///
/// # Errors
///
/// Returns [`SemcompareError::Io`] when the file cannot be read and
/// [`SemcompareError::ConfigError`] when its contents are not valid options.
pub fn load_options(path: &Path) -> Result<CompareOptions, SemcompareError> {
    let content = fs::read_to_string(path)
        .map_err(|e| SemcompareError::io(path.display().to_string(), e))?;
    let options = parse_options(&content)
        .map_err(|e| SemcompareError::config(format!("{}: {}", path.display(), e)))?;
    tracing::debug!(path = %path.display(), "loaded options file");
    Ok(options)
}

/// Parses options from YAML or JSON text. Empty text yields the defaults.
pub fn parse_options(content: &str) -> Result<CompareOptions, SemcompareError> {
    if content.trim().is_empty() {
        return Ok(CompareOptions::default());
    }
    serde_yaml::from_str(content).map_err(|e| SemcompareError::config(e.to_string()))
}

/// Returns the first options file present in `dir`.
pub fn discover_options_file(dir: &Path) -> Option<PathBuf> {
    OPTIONS_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Layers `overrides` on top of `base`.
///
/// Flags set in either are set in the result, lists are concatenated, and
/// an override join key replaces the base one.
pub fn merge_options(base: CompareOptions, overrides: CompareOptions) -> CompareOptions {
    let mut ignore_paths = base.ignore_paths;
    ignore_paths.extend(overrides.ignore_paths);
    let mut keys_to_skip = base.keys_to_skip;
    keys_to_skip.extend(overrides.keys_to_skip);

    CompareOptions {
        sort_keys: base.sort_keys || overrides.sort_keys,
        coerce_types: base.coerce_types || overrides.coerce_types,
        ignore_whitespace: base.ignore_whitespace || overrides.ignore_whitespace,
        case_sensitive: base.case_sensitive || overrides.case_sensitive,
        trim_strings: base.trim_strings || overrides.trim_strings,
        ignore_paths,
        ignore_array_order: base.ignore_array_order || overrides.ignore_array_order,
        keys_to_skip,
        array_item_key_name: overrides.array_item_key_name.or(base.array_item_key_name),
        show_only_differences: base.show_only_differences || overrides.show_only_differences,
        auto_detect_format: base.auto_detect_format || overrides.auto_detect_format,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_yaml_options() {
        let options = parse_options(
            "sortKeys: true\ncaseSensitive: true\nignorePaths:\n  - a.b\narrayItemKeyName: id\n",
        )
        .unwrap();
        assert!(options.sort_keys);
        assert!(options.case_sensitive);
        assert!(!options.coerce_types);
        assert_eq!(options.ignore_paths, vec!["a.b"]);
        assert_eq!(options.array_item_key_name.as_deref(), Some("id"));
    }

    #[test]
    fn test_parse_json_options() {
        let options = parse_options(r#"{"coerceTypes": true, "keysToSkip": ["ts"]}"#).unwrap();
        assert!(options.coerce_types);
        assert_eq!(options.keys_to_skip, vec!["ts"]);
    }

    #[test]
    fn test_empty_options() {
        assert_eq!(parse_options("  \n").unwrap(), CompareOptions::default());
    }

    #[test]
    fn test_invalid_options() {
        let err = parse_options("sortKeys: [1, 2]").unwrap_err();
        assert!(matches!(err, SemcompareError::ConfigError { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_options(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, SemcompareError::Io { .. }));
    }

    #[test]
    fn test_discover_options_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(discover_options_file(dir.path()), None);

        fs::write(dir.path().join("semcompare.json"), "{}").unwrap();
        fs::write(dir.path().join(".semcompare.yml"), "sortKeys: true").unwrap();

        let found = discover_options_file(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), ".semcompare.yml");
        assert!(load_options(&found).unwrap().sort_keys);
    }

    #[test]
    fn test_merge_options() {
        let base = CompareOptions {
            sort_keys: true,
            ignore_paths: vec!["a".to_string()],
            array_item_key_name: Some("id".to_string()),
            ..Default::default()
        };
        let overrides = CompareOptions {
            coerce_types: true,
            ignore_paths: vec!["b".to_string()],
            ..Default::default()
        };
        let merged = merge_options(base, overrides);
        assert!(merged.sort_keys);
        assert!(merged.coerce_types);
        assert_eq!(merged.ignore_paths, vec!["a", "b"]);
        assert_eq!(merged.array_item_key_name.as_deref(), Some("id"));
    }
}
