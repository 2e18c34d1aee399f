//! CLI argument parsing for Recuento

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "recuento")]
#[command(version)]
#[command(about = "Static reference-count field classifier for C codebases", long_about = None)]
pub struct Cli {
    /// Output format (text, json, or csv)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Restrict candidates to a comma-separated list of C type names
    /// (e.g. --categories atomic_t,kref)
    #[arg(long = "categories", value_name = "LIST")]
    pub categories: Option<String>,

    /// Only process source units whose path matches the regex
    #[arg(long = "include", value_name = "REGEX")]
    pub include: Option<String>,

    /// Write per-file logs here; the directory also persists the seen-set
    /// across runs
    #[arg(long = "log-dir", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Include full operation histories in text output
    #[arg(long = "show-ops")]
    pub show_ops: bool,

    /// Enable debug-level diagnostics on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Facts files to analyze (JSON arrays of source-unit facts)
    #[arg(required = true, value_name = "FACTS_FILES")]
    pub facts_files: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_facts_files() {
        let cli = Cli::parse_from(["recuento", "facts.json", "more.json"]);
        assert_eq!(cli.facts_files.len(), 2);
        assert_eq!(cli.facts_files[0], PathBuf::from("facts.json"));
    }

    #[test]
    fn test_cli_requires_facts_files() {
        assert!(Cli::try_parse_from(["recuento"]).is_err());
    }

    #[test]
    fn test_cli_format_default_text() {
        let cli = Cli::parse_from(["recuento", "facts.json"]);
        assert!(matches!(cli.format, OutputFormat::Text));
    }

    #[test]
    fn test_cli_format_json() {
        let cli = Cli::parse_from(["recuento", "--format", "json", "facts.json"]);
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn test_cli_categories_option() {
        let cli = Cli::parse_from(["recuento", "--categories", "atomic_t,kref", "facts.json"]);
        assert_eq!(cli.categories.as_deref(), Some("atomic_t,kref"));
    }

    #[test]
    fn test_cli_log_dir_option() {
        let cli = Cli::parse_from(["recuento", "--log-dir", "/tmp/recuento-log", "facts.json"]);
        assert_eq!(cli.log_dir, Some(PathBuf::from("/tmp/recuento-log")));
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::parse_from(["recuento", "-v", "facts.json"]);
        assert!(cli.verbose);
        let cli = Cli::parse_from(["recuento", "facts.json"]);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_show_ops_flag() {
        let cli = Cli::parse_from(["recuento", "--show-ops", "facts.json"]);
        assert!(cli.show_ops);
    }
}
