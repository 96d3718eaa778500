//! `legalease` — tag legal-document clauses by category using keyword matching.
//!
//! # Flow
//! 1. Read the document text ([`document::load`]).
//! 2. Load the validated term dictionary ([`config::load_config`]).
//! 3. Split the text into clauses ([`clause::segment_with`]).
//! 4. Tag clauses with matching terms ([`clause::classify_with`]).
//! 5. Render the [`models::Analysis`] ([`report`]).
//!
//! Steps 3 and 4 are pure functions of their inputs; [`analyze`] runs both.

pub mod clause;
pub mod config;
pub mod document;
pub mod models;
pub mod report;

use config::AnalysisSettings;
use document::Document;
use models::{Analysis, TermDefinition};

/// Segment and classify one document.
pub fn analyze(document: &Document, terms: &[TermDefinition], settings: &AnalysisSettings) -> Analysis {
    let clauses = clause::segment_with(&document.text, settings);
    let classification = clause::classify_with(&clauses, terms, settings);

    Analysis {
        source: document.source.clone(),
        clause_count: clauses.len(),
        classification,
    }
}
