use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::config::AnalysisSettings;
use crate::models::Clause;

lazy_static! {
    /// A line break, optional whitespace, then another line break.
    static ref PARAGRAPH_BREAK: Regex = Regex::new(r"\n\s*\n").unwrap();

    /// A period followed by whitespace. The period belongs to the sentence it ends.
    static ref SENTENCE_END: Regex = Regex::new(r"\.\s+").unwrap();
}

/// Split `text` into clauses using the default limits.
pub fn segment(text: &str) -> Vec<Clause> {
    segment_with(text, &AnalysisSettings::default())
}

/// Split `text` into clauses.
///
/// Paragraph breaks are applied first, then each paragraph is split at
/// sentence-ending periods. Pieces are trimmed, pieces shorter than
/// `min_clause_length` characters are dropped, and only the first
/// `max_clauses` survivors are returned.
pub fn segment_with(text: &str, settings: &AnalysisSettings) -> Vec<Clause> {
    let clauses: Vec<Clause> = PARAGRAPH_BREAK
        .split(text)
        .flat_map(split_sentences)
        .map(str::trim)
        .filter(|piece| piece.chars().count() >= settings.min_clause_length)
        .take(settings.max_clauses)
        .map(Clause::new)
        .collect();

    debug!(
        clauses = clauses.len(),
        max_clauses = settings.max_clauses,
        min_clause_length = settings.min_clause_length,
        "segmented document"
    );

    clauses
}

fn split_sentences(paragraph: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_END.find_iter(paragraph) {
        // keep the period, drop the whitespace
        sentences.push(&paragraph[start..m.start() + 1]);
        start = m.end();
    }
    sentences.push(&paragraph[start..]);

    sentences
}
