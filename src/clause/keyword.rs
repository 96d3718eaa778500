use regex::{Regex, RegexBuilder};

use crate::models::TermDefinition;

/// A single compiled keyword.
#[derive(Debug, Clone)]
pub enum KeywordMatcher {
    /// One word, matched between word boundaries (`\bfee\b`).
    Word(Regex),
    /// Several words, matched as a literal substring.
    Phrase(Regex),
}

impl KeywordMatcher {
    /// Compile `keyword` case-insensitively. Surrounding whitespace is ignored.
    pub fn new(keyword: &str) -> Result<Self, regex::Error> {
        let keyword = keyword.trim();
        let escaped = regex::escape(keyword);

        if is_phrase(keyword) {
            let re = RegexBuilder::new(&escaped).case_insensitive(true).build()?;
            Ok(KeywordMatcher::Phrase(re))
        } else {
            let re = RegexBuilder::new(&format!(r"\b{}\b", escaped))
                .case_insensitive(true)
                .build()?;
            Ok(KeywordMatcher::Word(re))
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            KeywordMatcher::Word(re) | KeywordMatcher::Phrase(re) => re.is_match(text),
        }
    }
}

/// A keyword containing inner whitespace is a phrase.
pub fn is_phrase(keyword: &str) -> bool {
    keyword.trim().contains(char::is_whitespace)
}

/// All keyword matchers of one term.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    name: String,
    keywords: Vec<KeywordMatcher>,
}

impl TermMatcher {
    pub fn new(term: &TermDefinition) -> Result<Self, regex::Error> {
        let keywords = term
            .keywords
            .iter()
            .map(|k| KeywordMatcher::new(k))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: term.name.clone(),
            keywords,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if any keyword of the term occurs in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| k.is_match(text))
    }
}
