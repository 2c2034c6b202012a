//! Error types for semcompare.

use crate::format::Format;
use std::fmt;

/// Malformed input for the declared or detected format.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Failed to parse as {}: {message}", .format.name().to_uppercase())]
pub struct ParseError {
    pub format: Format,
    pub message: String,
}

/// Internal invariant violation inside the differ.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompareError {
    #[error("Value nesting exceeds the supported depth of {limit} at '{path}'")]
    DepthLimitExceeded { path: String, limit: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to serialize to JSON: {source}")]
    JsonSerializationError {
        #[source]
        source: serde_json::Error,
    },
}

/// Which of the two compared documents an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Original,
    Modified,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Original => f.write_str("original"),
            Side::Modified => f.write_str("modified"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SemcompareError {
    #[error("Failed to parse {side} document: {source}")]
    Parse {
        side: Side,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Compare(#[from] CompareError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },
}

impl ParseError {
    pub fn new(format: Format, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
        }
    }
}

impl SemcompareError {
    pub fn parse(side: Side, source: ParseError) -> Self {
        Self::Parse { side, source }
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }
}
