use serde::Serialize;

use crate::config::{AnalysisSettings, Config};
use crate::models::Analysis;

/// Machine-readable report: analysis results joined with term guidance.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub source: &'a str,
    pub clause_count: usize,
    pub settings: &'a AnalysisSettings,
    pub terms: Vec<JsonTerm<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonTerm<'a> {
    pub name: &'a str,
    pub explanation: &'a str,
    pub legal_reference: &'a str,
    pub scrutiny_areas: &'a [String],
    pub total: usize,
    pub previews: Vec<String>,
}

impl<'a> JsonReport<'a> {
    /// Only matched terms are listed, in dictionary order.
    pub fn new(analysis: &'a Analysis, config: &'a Config, settings: &'a AnalysisSettings) -> Self {
        let terms = analysis
            .classification
            .iter()
            .filter_map(|m| {
                let term = config.term(&m.term)?;
                Some(JsonTerm {
                    name: &term.name,
                    explanation: &term.explanation,
                    legal_reference: &term.legal_reference,
                    scrutiny_areas: &term.scrutiny_areas,
                    total: m.total,
                    previews: m.previews(settings.preview_length),
                })
            })
            .collect();

        JsonReport {
            source: &analysis.source,
            clause_count: analysis.clause_count,
            settings,
            terms,
        }
    }
}

pub fn render(analysis: &Analysis, config: &Config, settings: &AnalysisSettings) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::new(analysis, config, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::{classify, segment};

    #[test]
    fn test_json_lists_matched_terms_only() {
        let config = Config::builtin().unwrap();
        let clauses = segment("Payment of the annual fee is due within 30 days of invoice.");
        let analysis = Analysis {
            source: "<text>".to_string(),
            clause_count: clauses.len(),
            classification: classify(&clauses, &config.terms),
        };

        let out = render(&analysis, &config, &config.analysis).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["clause_count"], 1);
        assert_eq!(value["settings"]["max_clauses"], 20);
        let terms = value["terms"].as_array().unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0]["name"], "payment");
        assert_eq!(terms[0]["total"], 1);
        assert_eq!(terms[0]["scrutiny_areas"][0], "Hidden charges");
        assert_eq!(
            terms[0]["previews"][0],
            "Payment of the annual fee is due within 30 days of invoice."
        );
    }
}
