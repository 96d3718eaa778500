use std::path::PathBuf;

use clap::{ArgGroup, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "classify-doc",
    about = "Tag legal-document clauses by category and surface red flags",
    version
)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["input", "list_terms", "explain"])
))]
pub struct Cli {
    /// Document to analyze: a PDF or text file, `-` for stdin, or the text itself
    #[arg(short, long, value_name = "PATH-OR-TEXT")]
    pub input: Option<String>,

    /// Classify at most N clauses [default: 20, or the config value]
    #[arg(long, value_name = "N")]
    pub max_clauses: Option<usize>,

    /// Drop clauses shorter than L characters [default: 50, or the config value]
    #[arg(long, value_name = "L")]
    pub min_clause_length: Option<usize>,

    /// Term dictionary [default: ./.legalease/terms.toml, fallback ~/.config/legalease/terms.toml, then built-in]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// PDF output path; use without value to default to legal-report.pdf
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "legal-report.pdf")]
    pub pdf: Option<PathBuf>,

    /// List the known terms and their keywords
    #[arg(long)]
    pub list_terms: bool,

    /// Show the full guidance for one term
    #[arg(long, value_name = "TERM")]
    pub explain: Option<String>,

    /// Show detailed explanations and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, PartialEq, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Pdf,
}
