//! semcompare - Semantic comparison of structured documents.
//!
//! This library compares JSON, YAML, TOML, XML and CSV documents by meaning
//! rather than by text. Both sides are parsed into a common [`Value`] model,
//! normalized according to a [`NormalizationConfig`], and diffed structurally
//! into an ordered list of [`DiffEntry`] items.
//!
//! # Example
//!
//! ```
//! use semcompare::{semantic_compare, CompareOptions, CompareRequest};
//!
//! # fn example() -> Result<(), semcompare::SemcompareError> {
//! let request = CompareRequest::new("enabled: \"true\"\nport: \"8080\"", "enabled: true\nport: 8080")
//!     .with_filenames(Some("old.yaml"), Some("new.yaml"))
//!     .with_options(CompareOptions {
//!         coerce_types: true,
//!         ..Default::default()
//!     });
//!
//! let outcome = semantic_compare(&request)?;
//! assert!(outcome.identical);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod compare;
pub mod config;
pub mod detect;
pub mod diff;
pub mod error;
pub mod format;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod summary;
pub mod value;

// Re-export commonly used types for convenience
pub use compare::{
    semantic_compare, CompareOptions, CompareOutcome, CompareRequest, DetectedFormats,
};
pub use config::{discover_options_file, load_options, merge_options, parse_options};
pub use detect::detect_format;
pub use diff::{are_identical, compare_data, CompareConfig, DiffEntry, DiffKind, DiffStats};
pub use error::{CompareError, OutputError, ParseError, SemcompareError, Side};
pub use format::Format;
pub use normalize::{normalize_data, NormalizationConfig};
pub use output::{format_outcome, OutputFormat, OutputOptions};
pub use parser::{
    parse_content, parse_csv, parse_json, parse_toml, parse_with_auto_detection, parse_xml,
    parse_yaml, ParsedDocument,
};
pub use summary::{summarize, Summary};
pub use value::{Map, Value};
