//! `classify-doc` — tag the clauses of a legal document by category.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load the term dictionary ([`legalease::config::load_config`]).
//! 3. `--list-terms` / `--explain` print the glossary and stop.
//! 4. Read the document ([`legalease::document::load`]).
//! 5. Segment and classify ([`legalease::analyze`]).
//! 6. Render the requested report ([`legalease::report`]).
//! 7. Exit `0`, or `1` when the input is unreadable or yields no clauses.

mod cli;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, ReportFormat};
use legalease::config::load_config;
use legalease::document::{self, Input};
use legalease::report;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = load_config(&cwd, cli.config.as_deref())?;

    if cli.list_terms {
        report::terminal::render_glossary(&config);
        return Ok(());
    }

    if let Some(name) = &cli.explain {
        match config.term(name) {
            Some(term) => report::terminal::render_term(term),
            None => {
                let known: Vec<&str> = config.terms.iter().map(|t| t.name.as_str()).collect();
                fail(&format!("unknown term `{}` (known: {})", name, known.join(", ")));
            }
        }
        return Ok(());
    }

    let settings = config
        .analysis
        .clone()
        .with_overrides(cli.max_clauses, cli.min_clause_length);
    settings.validate()?;
    debug!(?settings, "effective analysis settings");

    let arg = cli.input.as_deref().context("--input is required")?;
    let document = match document::load(&Input::from_arg(arg)) {
        Ok(doc) => doc,
        Err(e) => fail(&e.to_string()),
    };

    let analysis = legalease::analyze(&document, &config.terms, &settings);
    info!(
        source = %analysis.source,
        clauses = analysis.clause_count,
        matched_terms = analysis.matched_terms(),
        "analysis complete"
    );

    if analysis.clause_count == 0 {
        fail(&format!(
            "no content to analyze: no clause of at least {} characters in {}",
            settings.min_clause_length, analysis.source
        ));
    }

    // --pdf implies PDF format
    let report_format = match &cli.pdf {
        Some(_) => ReportFormat::Pdf,
        None => cli.report,
    };
    let pdf_path = cli
        .pdf
        .unwrap_or_else(|| PathBuf::from("legal-report.pdf"));

    match report_format {
        ReportFormat::Terminal => {
            report::terminal::render(&analysis, &config, &settings, cli.verbose, cli.quiet);
        }
        ReportFormat::Json => {
            println!("{}", report::json::render(&analysis, &config, &settings)?);
        }
        ReportFormat::Pdf => {
            report::pdf::render(&analysis, &config, &settings, &pdf_path)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so JSON on stdout stays parseable. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "legalease=debug,classify_doc=debug"
    } else {
        "legalease=warn,classify_doc=warn"
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}

fn fail(message: &str) -> ! {
    eprintln!("{} {}", "error:".red().bold(), message);
    std::process::exit(1);
}
