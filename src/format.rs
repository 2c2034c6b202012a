//! Supported document formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A document format understood by the parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Yaml,
    Toml,
    Xml,
    Csv,
}

impl Format {
    /// Every format, in declaration order.
    pub const ALL: [Format; 5] = [
        Format::Json,
        Format::Yaml,
        Format::Toml,
        Format::Xml,
        Format::Csv,
    ];

    /// Order used to pick one format when two documents were detected
    /// differently.
    pub const PRIORITY: [Format; 5] = [
        Format::Json,
        Format::Xml,
        Format::Toml,
        Format::Csv,
        Format::Yaml,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
            Format::Xml => "xml",
            Format::Csv => "csv",
        }
    }

    /// File extensions mapped to this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Json => &["json"],
            Format::Yaml => &["yaml", "yml"],
            Format::Toml => &["toml"],
            Format::Xml => &["xml"],
            Format::Csv => &["csv"],
        }
    }

    /// Maps a file extension (without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Format> {
        let ext = ext.to_ascii_lowercase();
        Format::ALL
            .into_iter()
            .find(|format| format.extensions().contains(&ext.as_str()))
    }

    /// Maps a file name or path to a format by its extension.
    pub fn from_filename(filename: &str) -> Option<Format> {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }

    /// Picks the first format in [`Format::PRIORITY`] that either side uses.
    pub fn reconcile(a: Format, b: Format) -> Format {
        Format::PRIORITY
            .into_iter()
            .find(|f| *f == a || *f == b)
            .unwrap_or(Format::Json)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            "xml" => Ok(Format::Xml),
            "csv" => Ok(Format::Csv),
            other => Err(format!("unsupported format: {}", other)),
        }
    }
}
