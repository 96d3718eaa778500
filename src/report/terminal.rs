use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::config::{AnalysisSettings, Config};
use crate::models::{Analysis, TermDefinition, TermMatch};

/// Render a colored terminal report.
pub fn render(
    analysis: &Analysis,
    config: &Config,
    settings: &AnalysisSettings,
    verbose: bool,
    quiet: bool,
) {
    if quiet {
        println!("{}", summary_line(analysis, config));
        return;
    }

    println!(
        "\n {} v{}",
        "classify-doc".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Analyzing: {}\n", analysis.source);

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<49} │", "SUMMARY".bold());
    println!(
        " │  {:<49} │",
        format!("Clauses analyzed : {:>4}", analysis.clause_count)
    );
    println!(
        " │  {:<49} │",
        format!(
            "Terms matched    : {:>4} of {}",
            analysis.matched_terms(),
            config.terms.len()
        )
    );
    for term in &config.terms {
        let count = analysis
            .classification
            .get(&term.name)
            .map_or(0, |m| m.total);
        let mark = if count > 0 { "●".cyan() } else { "○".dimmed() };
        // pad before colouring: escape codes must not count toward the width
        println!(" │  {}  {:<46} │", mark, term_count_label(term, count));
    }
    println!(" └────────────────────────────────────────────────────┘\n");

    if analysis.classification.is_empty() {
        println!(
            " {} None of the known clause categories were found.\n",
            "[INFO]".cyan().bold()
        );
        return;
    }

    for m in &analysis.classification {
        // every matched term comes from this dictionary
        let Some(term) = config.term(&m.term) else {
            continue;
        };
        render_term_match(term, m, settings, verbose);
    }
}

fn term_count_label(term: &TermDefinition, count: usize) -> String {
    format!("{:<14}: {:>4}", term.title(), count)
}

/// One-line summary used by `--quiet`.
pub fn summary_line(analysis: &Analysis, config: &Config) -> String {
    let counts: Vec<String> = config
        .terms
        .iter()
        .map(|t| {
            let n = analysis.classification.get(&t.name).map_or(0, |m| m.total);
            let n = if n > 0 {
                n.to_string().yellow()
            } else {
                n.to_string().normal()
            };
            format!("{}: {}", t.name, n)
        })
        .collect();

    format!("Clauses: {}  {}", analysis.clause_count, counts.join("  "))
}

fn render_term_match(term: &TermDefinition, m: &TermMatch, settings: &AnalysisSettings, verbose: bool) {
    println!(
        " {} {} Clauses ({})",
        format!("[{}]", term.name.to_uppercase()).cyan().bold(),
        term.title(),
        m.total
    );
    println!(" {}", term.explanation.bold());

    if verbose {
        for line in term.detailed_explanation.lines().filter(|l| !l.trim().is_empty()) {
            println!("   {}", line.trim());
        }
    }
    if !term.legal_reference.is_empty() {
        println!(" {} {}", "Reference:".dimmed(), term.legal_reference);
    }
    println!();
    println!("{}", sample_table(m, settings));

    if !term.scrutiny_areas.is_empty() {
        println!(" {} Areas to scrutinize:", "[WARN]".yellow().bold());
        for area in &term.scrutiny_areas {
            println!("   {} {}", "⚑".red(), area);
        }
    }
    println!();
}

/// Every retained preview, plus a row counting the clauses left out.
fn sample_table(m: &TermMatch, settings: &AnalysisSettings) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Sample clause").add_attribute(Attribute::Bold),
        ]);

    for (i, preview) in m.previews(settings.preview_length).iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Right),
            Cell::new(preview),
        ]);
    }
    if m.total > m.clauses.len() {
        table.add_row(vec![
            Cell::new(""),
            Cell::new(format!("… {} more", m.total - m.clauses.len())).fg(Color::DarkGrey),
        ]);
    }
    table
}

/// Print every term in the dictionary with its keywords (`--list-terms`).
pub fn render_glossary(config: &Config) {
    println!("\n {} ({})\n", "Legal terms".bold(), config.origin);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Term").add_attribute(Attribute::Bold),
            Cell::new("Explanation").add_attribute(Attribute::Bold),
            Cell::new("Keywords").add_attribute(Attribute::Bold),
        ]);

    for term in &config.terms {
        table.add_row(vec![
            Cell::new(&term.name).fg(Color::Cyan),
            Cell::new(&term.explanation),
            Cell::new(term.keywords.join(", ")),
        ]);
    }

    println!("{}", table);
}

/// Print the full guidance for one term (`--explain`).
pub fn render_term(term: &TermDefinition) {
    println!("\n {} Terms\n", term.title().bold());
    println!(" {}", term.explanation.bold());
    for line in term.detailed_explanation.lines().filter(|l| !l.trim().is_empty()) {
        println!("   {}", line.trim());
    }
    if !term.legal_reference.is_empty() {
        println!("\n {} {}", "Reference:".dimmed(), term.legal_reference);
    }
    println!(" {} {}", "Keywords:".dimmed(), term.keywords.join(", "));

    if !term.scrutiny_areas.is_empty() {
        println!("\n {} Areas to scrutinize:", "[WARN]".yellow().bold());
        for area in &term.scrutiny_areas {
            println!("   {} {}", "⚑".red(), area);
        }
    }
    println!();
}
