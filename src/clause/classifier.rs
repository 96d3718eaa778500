use tracing::{debug, warn};

use crate::clause::keyword::TermMatcher;
use crate::config::AnalysisSettings;
use crate::models::{Classification, Clause, TermDefinition, TermMatch};

/// Tag `clauses` with every term whose keywords they contain, using the default limits.
pub fn classify(clauses: &[Clause], terms: &[TermDefinition]) -> Classification {
    classify_with(clauses, terms, &AnalysisSettings::default())
}

/// Tag `clauses` with every term whose keywords they contain.
///
/// Classification is non-exclusive: a clause is listed under each term it
/// matches, once per term, in input order. Each [`TermMatch`] keeps at most
/// `max_previews` clauses alongside the full match count. Terms with no match
/// are left out of the result.
pub fn classify_with(
    clauses: &[Clause],
    terms: &[TermDefinition],
    settings: &AnalysisSettings,
) -> Classification {
    let mut classification = Classification::default();

    for term in terms {
        let matcher = match TermMatcher::new(term) {
            Ok(m) => m,
            Err(e) => {
                warn!(term = %term.name, error = %e, "skipping term with unusable keywords");
                continue;
            }
        };

        let mut total = 0;
        let mut kept = Vec::new();

        for clause in clauses.iter().filter(|c| matcher.matches(c.as_str())) {
            total += 1;
            if kept.len() < settings.max_previews {
                kept.push(clause.clone());
            }
        }

        debug!(term = matcher.name(), matches = total, "classified term");

        if total > 0 {
            classification.push(TermMatch {
                term: term.name.clone(),
                total,
                clauses: kept,
            });
        }
    }

    classification
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(name: &str, keywords: &[&str]) -> TermDefinition {
        TermDefinition {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            explanation: String::new(),
            detailed_explanation: String::new(),
            legal_reference: String::new(),
            scrutiny_areas: vec![],
        }
    }

    fn clauses(texts: &[&str]) -> Vec<Clause> {
        texts.iter().map(|t| Clause::new(*t)).collect()
    }

    #[test]
    fn test_empty_inputs() {
        let terms = vec![term("payment", &["fee"])];
        assert!(classify(&[], &terms).is_empty());
        assert!(classify(&clauses(&["a fee applies"]), &[]).is_empty());
    }

    #[test]
    fn test_unmatched_terms_are_absent() {
        let terms = vec![term("payment", &["fee"]), term("data", &["privacy"])];
        let result = classify(&clauses(&["A late fee of five percent applies."]), &terms);
        assert!(result.contains("payment"));
        assert!(!result.contains("data"));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_clause_recorded_once_per_term() {
        let terms = vec![term("payment", &["fee", "invoice", "payment"])];
        let result = classify(&clauses(&["Payment of the fee follows the invoice."]), &terms);
        let m = result.get("payment").unwrap();
        assert_eq!(m.total, 1);
        assert_eq!(m.clauses.len(), 1);
    }

    #[test]
    fn test_non_exclusive_classification() {
        let terms = vec![term("termination", &["terminate"]), term("payment", &["fee"])];
        let text = "Either party may terminate if the fee remains unpaid.";
        let result = classify(&clauses(&[text]), &terms);
        assert_eq!(result.get("termination").unwrap().clauses[0].as_str(), text);
        assert_eq!(result.get("payment").unwrap().clauses[0].as_str(), text);
    }

    #[test]
    fn test_encounter_order_and_display_cap() {
        let terms = vec![term("payment", &["fee"])];
        let input = clauses(&[
            "fee one",
            "nothing here",
            "fee two",
            "fee three",
            "fee four",
            "fee five",
        ]);
        let m = classify(&input, &terms).get("payment").cloned().unwrap();
        assert_eq!(m.total, 5);
        let kept: Vec<&str> = m.clauses.iter().map(Clause::as_str).collect();
        assert_eq!(kept, vec!["fee one", "fee two", "fee three"]);
    }

    #[test]
    fn test_custom_preview_cap() {
        let settings = AnalysisSettings {
            max_previews: 1,
            ..AnalysisSettings::default()
        };
        let terms = vec![term("payment", &["fee"])];
        let m = classify_with(&clauses(&["fee a", "fee b"]), &terms, &settings)
            .get("payment")
            .cloned()
            .unwrap();
        assert_eq!(m.total, 2);
        assert_eq!(m.clauses.len(), 1);
    }

    #[test]
    fn test_result_follows_dictionary_order() {
        let terms = vec![term("zeta", &["fee"]), term("alpha", &["fee"])];
        let result = classify(&clauses(&["a fee"]), &terms);
        assert_eq!(result.terms().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_inputs_untouched_and_deterministic() {
        let terms = vec![term("payment", &["fee"])];
        let input = clauses(&["a fee", "no match"]);
        let before = input.clone();
        let first = classify(&input, &terms);
        let second = classify(&input, &terms);
        assert_eq!(input, before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_previews_truncate_long_clauses() {
        let long = format!("The fee {}", "x".repeat(200));
        let terms = vec![term("payment", &["fee"])];
        let m = classify(&clauses(&[&long, "short fee"]), &terms)
            .get("payment")
            .cloned()
            .unwrap();
        let previews = m.previews(150);
        assert_eq!(previews[0].chars().count(), 153);
        assert!(previews[0].ends_with("..."));
        assert_eq!(previews[1], "short fee");
    }
}
