use serde::{Deserialize, Serialize};

/// Truncation marker appended to clause previews that were cut short.
pub const PREVIEW_MARKER: &str = "...";

/// A named legal-concept category and the keywords that identify it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermDefinition {
    pub name: String,
    pub keywords: Vec<String>,
    pub explanation: String,
    #[serde(default)]
    pub detailed_explanation: String,
    #[serde(default)]
    pub legal_reference: String,
    #[serde(default)]
    pub scrutiny_areas: Vec<String>,
}

impl TermDefinition {
    /// Display title, e.g. `termination` → `Termination`.
    pub fn title(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// A trimmed chunk of document text considered for classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Clause(String);

impl Clause {
    /// Wrap already-trimmed text. Length filtering is the segmenter's job.
    pub fn new(text: impl Into<String>) -> Self {
        Clause(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, not bytes.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// First `len` characters, with [`PREVIEW_MARKER`] appended if anything was cut.
    pub fn preview(&self, len: usize) -> String {
        match self.0.char_indices().nth(len) {
            Some((cut, _)) => format!("{}{}", &self.0[..cut], PREVIEW_MARKER),
            None => self.0.clone(),
        }
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Clause {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Clauses matched for one term.
///
/// `clauses` holds at most `max_previews` entries in encounter order;
/// `total` is the uncapped number of matching clauses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermMatch {
    pub term: String,
    pub total: usize,
    pub clauses: Vec<Clause>,
}

impl TermMatch {
    pub fn previews(&self, len: usize) -> Vec<String> {
        self.clauses.iter().map(|c| c.preview(len)).collect()
    }
}

/// Per-term match results in dictionary order. Terms without matches are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Classification {
    matches: Vec<TermMatch>,
}

impl Classification {
    pub(crate) fn push(&mut self, m: TermMatch) {
        self.matches.push(m);
    }

    pub fn get(&self, term: &str) -> Option<&TermMatch> {
        self.matches.iter().find(|m| m.term == term)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.get(term).is_some()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.matches.iter().map(|m| m.term.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TermMatch> {
        self.matches.iter()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl<'a> IntoIterator for &'a Classification {
    type Item = &'a TermMatch;
    type IntoIter = std::slice::Iter<'a, TermMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

/// Outcome of one analysis run, consumed by the report renderers.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Human-readable description of where the text came from.
    pub source: String,
    /// Number of clauses that survived segmentation.
    pub clause_count: usize,
    pub classification: Classification,
}

impl Analysis {
    pub fn matched_terms(&self) -> usize {
        self.classification.len()
    }
}
