//! semcompare command-line interface.
//!
//! Reads two documents, compares them semantically and prints the result.
//! Exit codes: 0 when identical, 1 when differences were found, 2 on error.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use semcompare::{
    discover_options_file, format_outcome, load_options, merge_options, semantic_compare,
    CompareOptions, CompareRequest, Format, OutputFormat, OutputOptions, SemcompareError,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// semcompare - Semantic comparison of structured documents
///
/// Compares JSON, YAML, TOML, XML and CSV documents by meaning, ignoring
/// formatting, key order and, on request, case, whitespace and types.
#[derive(Parser)]
#[command(name = "semcompare")]
#[command(version)]
#[command(about = "Semantic comparison of structured documents", long_about = None)]
struct Cli {
    /// Original document
    #[arg(value_name = "ORIGINAL")]
    original: PathBuf,

    /// Modified document
    #[arg(value_name = "MODIFIED")]
    modified: PathBuf,

    /// Format of both documents (json, yaml, toml, xml, csv); detected when omitted
    #[arg(short = 't', long = "type", value_name = "FORMAT")]
    format: Option<Format>,

    /// Detect formats even when --type is given
    #[arg(long)]
    auto_detect: bool,

    /// Sort object keys and scalar arrays before comparing
    #[arg(long)]
    sort_keys: bool,

    /// Treat numeric, boolean and null strings as typed values
    #[arg(long)]
    coerce_types: bool,

    /// Collapse whitespace runs inside strings
    #[arg(long)]
    ignore_whitespace: bool,

    /// Keep case differences in strings and keys
    #[arg(long)]
    case_sensitive: bool,

    /// Trim leading and trailing whitespace from strings
    #[arg(long)]
    trim_strings: bool,

    /// Dot path to remove before comparing (repeatable)
    #[arg(long = "ignore-path", value_name = "PATH")]
    ignore_paths: Vec<String>,

    /// Match array elements regardless of position
    #[arg(long)]
    ignore_array_order: bool,

    /// Object key to leave out of the comparison (repeatable)
    #[arg(long = "skip-key", value_name = "KEY")]
    skip_keys: Vec<String>,

    /// Key joining object elements when array order is ignored
    #[arg(long, value_name = "KEY")]
    array_item_key: Option<String>,

    /// Print only the differences, not the normalized documents
    #[arg(long)]
    show_only_differences: bool,

    /// Options file (YAML or JSON); .semcompare.yaml in the current directory is used otherwise
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    output: OutputFormatArg,

    /// Maximum length for displayed values
    #[arg(long, default_value = "80")]
    max_value_length: usize,

    /// Log pipeline steps to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Print the difference lines only
    #[arg(short, long)]
    quiet: bool,
}

/// Output format argument for clap
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormatArg {
    /// Colored terminal output
    Terminal,
    /// Plain text (no colors)
    Plain,
    /// JSON representation
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Terminal => OutputFormat::Terminal,
            OutputFormatArg::Plain => OutputFormat::Plain,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    fn flag_options(&self) -> CompareOptions {
        CompareOptions {
            sort_keys: self.sort_keys,
            coerce_types: self.coerce_types,
            ignore_whitespace: self.ignore_whitespace,
            case_sensitive: self.case_sensitive,
            trim_strings: self.trim_strings,
            ignore_paths: self.ignore_paths.clone(),
            ignore_array_order: self.ignore_array_order,
            keys_to_skip: self.skip_keys.clone(),
            array_item_key_name: self.array_item_key.clone(),
            show_only_differences: self.show_only_differences,
            auto_detect_format: self.auto_detect,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(2);
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    let options = resolve_options(&cli)?;

    let original = read_document(&cli.original)?;
    let modified = read_document(&cli.modified)?;

    let mut request = CompareRequest::new(original, modified).with_filenames(
        cli.original.to_str(),
        cli.modified.to_str(),
    );
    request.format = cli.format;
    request.options = options;

    let outcome = semantic_compare(&request)?;

    let output_options = OutputOptions {
        max_value_length: cli.max_value_length,
        quiet: cli.quiet,
    };
    let output = format_outcome(&outcome, &cli.output.into(), &output_options)?;

    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(if outcome.identical { 0 } else { 1 })
}

/// Options file (explicit or discovered) merged with the command-line flags.
fn resolve_options(cli: &Cli) -> Result<CompareOptions> {
    let file_options = match &cli.config {
        Some(path) => load_options(path)?,
        None => match discover_options_file(Path::new(".")) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using discovered options file");
                load_options(&path)?
            }
            None => CompareOptions::default(),
        },
    };
    Ok(merge_options(file_options, cli.flag_options()))
}

fn read_document(path: &Path) -> Result<String, SemcompareError> {
    fs::read_to_string(path).map_err(|e| SemcompareError::io(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_conversion() {
        assert_eq!(
            OutputFormat::from(OutputFormatArg::Terminal),
            OutputFormat::Terminal
        );
        assert_eq!(OutputFormat::from(OutputFormatArg::Json), OutputFormat::Json);
        assert_eq!(OutputFormat::from(OutputFormatArg::Plain), OutputFormat::Plain);
    }

    #[test]
    fn test_flag_options() {
        let cli = Cli::parse_from([
            "semcompare",
            "a.json",
            "b.json",
            "--sort-keys",
            "--ignore-path",
            "meta.ts",
            "--ignore-path",
            "id",
            "--skip-key",
            "updatedAt",
            "--array-item-key",
            "id",
            "--type",
            "yml",
        ]);
        let options = cli.flag_options();
        assert!(options.sort_keys);
        assert!(!options.coerce_types);
        assert_eq!(options.ignore_paths, vec!["meta.ts", "id"]);
        assert_eq!(options.keys_to_skip, vec!["updatedAt"]);
        assert_eq!(options.array_item_key_name.as_deref(), Some("id"));
        assert_eq!(cli.format, Some(Format::Yaml));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
