use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::clause::keyword::KeywordMatcher;
use crate::models::TermDefinition;

/// Term dictionary shipped with the binary.
pub const BUILTIN_TERMS: &str = include_str!("../terms.toml");

/// Root configuration structure, deserialized from `terms.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Segmentation and display limits.
    #[serde(default)]
    pub analysis: AnalysisSettings,
    /// Term definitions in display order (`[[term]]` tables).
    #[serde(rename = "term", default)]
    pub terms: Vec<TermDefinition>,
    /// Where this configuration was loaded from.
    #[serde(skip)]
    pub origin: String,
}

/// Limits applied while segmenting and reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Only the first `max_clauses` clauses are classified.
    pub max_clauses: usize,
    /// Clauses shorter than this many characters are discarded.
    pub min_clause_length: usize,
    /// Characters shown per clause preview before the truncation marker.
    pub preview_length: usize,
    /// Clauses retained per term for display.
    pub max_previews: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_clauses: 20,
            min_clause_length: 50,
            preview_length: 150,
            max_previews: 3,
        }
    }
}

impl AnalysisSettings {
    /// Apply command-line overrides on top of the configured values.
    pub fn with_overrides(mut self, max_clauses: Option<usize>, min_clause_length: Option<usize>) -> Self {
        if let Some(n) = max_clauses {
            self.max_clauses = n;
        }
        if let Some(n) = min_clause_length {
            self.min_clause_length = n;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("max_clauses", self.max_clauses),
            ("min_clause_length", self.min_clause_length),
            ("preview_length", self.preview_length),
            ("max_previews", self.max_previews),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(ConfigError::InvalidLimit(name));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed term dictionary ({origin}): {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("term dictionary defines no terms")]
    NoTerms,

    #[error("term #{0} has an empty name")]
    EmptyName(usize),

    #[error("term `{0}` is defined more than once")]
    DuplicateTerm(String),

    #[error("term `{0}` has no keywords")]
    EmptyKeywords(String),

    #[error("term `{0}` has a blank keyword")]
    BlankKeyword(String),

    #[error("term `{term}` lists keyword `{keyword}` more than once")]
    DuplicateKeyword { term: String, keyword: String },

    #[error("term `{term}` has an unusable keyword `{keyword}`: {source}")]
    InvalidKeyword {
        term: String,
        keyword: String,
        #[source]
        source: regex::Error,
    },

    #[error("analysis.{0} must be greater than zero")]
    InvalidLimit(&'static str),
}

impl Config {
    /// Parse and validate a TOML term dictionary. `origin` names the source in errors.
    pub fn from_toml(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        config.origin = origin.to_string();
        config.validate()?;
        Ok(config)
    }

    /// The embedded dictionary: termination, payment and data.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml(BUILTIN_TERMS, "built-in")
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, &path.display().to_string())
    }

    /// Check the dictionary once so lookups and matching can rely on it.
    ///
    /// Rejects an empty dictionary, empty or duplicate term names (compared
    /// case-insensitively), empty keyword lists, blank or duplicate keywords
    /// within a term, keywords that cannot be compiled, and zero limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis.validate()?;

        if self.terms.is_empty() {
            return Err(ConfigError::NoTerms);
        }

        let mut names = HashSet::new();
        for (index, term) in self.terms.iter().enumerate() {
            let name = term.name.trim();
            if name.is_empty() {
                return Err(ConfigError::EmptyName(index));
            }
            if !names.insert(fold_name(name)) {
                return Err(ConfigError::DuplicateTerm(name.to_string()));
            }
            validate_keywords(term)?;
        }

        Ok(())
    }

    /// Look up a term by name, ignoring case and surrounding whitespace.
    pub fn term(&self, name: &str) -> Option<&TermDefinition> {
        let wanted = fold_name(name);
        self.terms.iter().find(|t| fold_name(&t.name) == wanted)
    }
}

/// Term-name key shared by duplicate detection and lookup.
fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn validate_keywords(term: &TermDefinition) -> Result<(), ConfigError> {
    if term.keywords.is_empty() {
        return Err(ConfigError::EmptyKeywords(term.name.clone()));
    }

    let mut seen = HashSet::new();
    for keyword in &term.keywords {
        if keyword.trim().is_empty() {
            return Err(ConfigError::BlankKeyword(term.name.clone()));
        }
        if !seen.insert(keyword.trim().to_lowercase()) {
            return Err(ConfigError::DuplicateKeyword {
                term: term.name.clone(),
                keyword: keyword.clone(),
            });
        }
        KeywordMatcher::new(keyword).map_err(|source| ConfigError::InvalidKeyword {
            term: term.name.clone(),
            keyword: keyword.clone(),
            source,
        })?;
    }

    Ok(())
}

/// Load the term dictionary, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<base_dir>/.legalease/terms.toml`
/// 3. `~/.config/legalease/terms.toml`
/// 4. Built-in [`Config::builtin`]
pub fn load_config(base_dir: &Path, config_override: Option<&Path>) -> Result<Config, ConfigError> {
    let config = if let Some(path) = config_override {
        Config::from_file(path)?
    } else if let Some(path) = discover(base_dir) {
        Config::from_file(&path)?
    } else {
        Config::builtin()?
    };

    info!(
        origin = %config.origin,
        terms = config.terms.len(),
        "loaded term dictionary"
    );

    Ok(config)
}

fn discover(base_dir: &Path) -> Option<PathBuf> {
    let local = base_dir.join(".legalease").join("terms.toml");
    if local.exists() {
        return Some(local);
    }

    let home = dirs::home_dir()?
        .join(".config")
        .join("legalease")
        .join("terms.toml");
    home.exists().then_some(home)
}
