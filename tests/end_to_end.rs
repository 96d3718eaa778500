// End-to-end tests: raw text → segment → classify, against the built-in
// term dictionary, plus property checks of the classifier against a simple
// tokenizing oracle.

use proptest::prelude::*;

use legalease::clause::{classify, classify_with, segment};
use legalease::config::{AnalysisSettings, Config};
use legalease::document::Document;
use legalease::models::{Clause, TermDefinition};

fn builtin_terms() -> Vec<TermDefinition> {
    Config::builtin().unwrap().terms
}

fn texts(clauses: &[Clause]) -> Vec<&str> {
    clauses.iter().map(Clause::as_str).collect()
}

// ============================================================
// Scenarios
// ============================================================

#[test]
fn termination_and_payment_paragraphs() {
    let text = "This agreement may be terminated by either party with 30 days notice.\n\n\
                Payment of the annual fee is due within 30 days of invoice.";

    let clauses = segment(text);
    assert_eq!(
        texts(&clauses),
        vec![
            "This agreement may be terminated by either party with 30 days notice.",
            "Payment of the annual fee is due within 30 days of invoice.",
        ]
    );

    let result = classify(&clauses, &builtin_terms());
    assert_eq!(result.terms().collect::<Vec<_>>(), vec!["termination", "payment"]);
    assert_eq!(result.get("termination").unwrap().clauses, vec![clauses[0].clone()]);
    assert_eq!(result.get("payment").unwrap().clauses, vec![clauses[1].clone()]);
    assert!(!result.contains("data"));
}

#[test]
fn short_input_yields_nothing() {
    let clauses = segment("Payment due on receipt.");
    assert!(clauses.is_empty());
    assert!(classify(&clauses, &builtin_terms()).is_empty());
}

#[test]
fn clause_with_two_categories_listed_under_both() {
    let text = "Either party may terminate this agreement if any fee remains unpaid after sixty days.";
    let clauses = segment(text);
    assert_eq!(clauses.len(), 1);

    let result = classify(&clauses, &builtin_terms());
    assert_eq!(result.get("termination").unwrap().clauses[0].as_str(), text);
    assert_eq!(result.get("payment").unwrap().clauses[0].as_str(), text);
}

#[test]
fn phrase_keyword_matches_data_term() {
    let text = "The provider will process Personal Information solely for delivering the service.";
    let result = classify(&segment(text), &builtin_terms());
    assert_eq!(result.terms().collect::<Vec<_>>(), vec!["data"]);
}

#[test]
fn clauses_past_the_cap_are_ignored() {
    let filler: Vec<String> = (0..20)
        .map(|i| format!("Filler clause {:02} describes the scope of services in neutral words", i))
        .collect();
    let text = format!(
        "{}\n\nA late fee applies to every invoice not settled within thirty days.",
        filler.join("\n\n")
    );

    let clauses = segment(&text);
    assert_eq!(clauses.len(), 20);
    assert!(classify(&clauses, &builtin_terms()).is_empty());
}

#[test]
fn analyze_runs_both_stages() {
    let config = Config::builtin().unwrap();
    let document = Document {
        source: "contract.txt".to_string(),
        text: "We may share your data with affiliates that help us deliver the service. \
               Either party may cancel the subscription at the end of any billing period."
            .to_string(),
    };

    let analysis = legalease::analyze(&document, &config.terms, &config.analysis);
    assert_eq!(analysis.source, "contract.txt");
    assert_eq!(analysis.clause_count, 2);
    assert_eq!(analysis.matched_terms(), 2);
    assert_eq!(analysis.classification.get("data").unwrap().total, 1);
    assert_eq!(analysis.classification.get("termination").unwrap().total, 1);
}

#[test]
fn long_clause_preview_is_truncated() {
    let text = format!("The annual fee {}", "is payable in advance ".repeat(10));
    let result = classify(&segment(&text), &builtin_terms());
    let previews = result.get("payment").unwrap().previews(150);

    let preview = &previews[0];
    assert!(preview.ends_with("..."));
    assert_eq!(preview.trim_end_matches("...").chars().count(), 150);
}

// ============================================================
// Properties
// ============================================================

fn test_terms() -> Vec<TermDefinition> {
    let term = |name: &str, keywords: &[&str]| TermDefinition {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        explanation: String::new(),
        detailed_explanation: String::new(),
        legal_reference: String::new(),
        scrutiny_areas: vec![],
    };
    vec![
        term("termination", &["cancel"]),
        term("payment", &["fee"]),
        term("data", &["data", "personal information", "share"]),
    ]
}

/// Independent check: single words are compared token by token, phrases as substrings.
fn oracle(clause: &str, term: &TermDefinition) -> bool {
    let lower = clause.to_lowercase();
    let tokens: Vec<&str> = lower
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .collect();

    term.keywords.iter().any(|k| {
        let k = k.to_lowercase();
        if k.contains(' ') {
            lower.contains(&k)
        } else {
            tokens.contains(&k.as_str())
        }
    })
}

fn word() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "the", "Fee", "fees", "feedback", "party", "CANCEL", "cancelled", "data", "database",
        "personal", "information", "share", "shared", "notice",
    ])
}

fn separator() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![" ", " ", ", ", "-", "; "])
}

fn clause_text() -> impl Strategy<Value = String> {
    prop::collection::vec((word(), separator()), 1..12).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(w, s)| format!("{}{}", w, s))
            .collect::<String>()
            .trim_end()
            .to_string()
    })
}

proptest! {
    #[test]
    fn clause_listed_iff_a_keyword_matches(raw in prop::collection::vec(clause_text(), 0..8)) {
        let clauses: Vec<Clause> = raw.iter().map(|t| Clause::new(t.clone())).collect();
        let terms = test_terms();
        let settings = AnalysisSettings { max_previews: 100, ..AnalysisSettings::default() };
        let result = classify_with(&clauses, &terms, &settings);

        for term in &terms {
            let expected: Vec<&Clause> = clauses.iter().filter(|c| oracle(c.as_str(), term)).collect();
            match result.get(&term.name) {
                Some(m) => {
                    prop_assert_eq!(m.total, expected.len());
                    prop_assert_eq!(m.clauses.iter().collect::<Vec<_>>(), expected);
                }
                None => prop_assert!(expected.is_empty()),
            }
        }
    }

    #[test]
    fn display_cap_keeps_full_count(raw in prop::collection::vec(clause_text(), 0..10)) {
        let clauses: Vec<Clause> = raw.iter().map(|t| Clause::new(t.clone())).collect();
        for m in &classify(&clauses, &test_terms()) {
            prop_assert!(m.total >= 1);
            prop_assert_eq!(m.clauses.len(), m.total.min(3));
        }
    }

    #[test]
    fn preview_rule(text in "\\PC{1,300}") {
        let clause = Clause::new(text.clone());
        let preview = clause.preview(150);
        if text.chars().count() > 150 {
            prop_assert_eq!(preview.chars().count(), 153);
            prop_assert!(preview.ends_with("..."));
            prop_assert!(text.starts_with(&preview[..preview.len() - 3]));
        } else {
            prop_assert_eq!(preview, text);
        }
    }
}
