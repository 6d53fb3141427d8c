//! Configuration for brand-core
//!
//! Relation parsing options, the static word lists the matcher gates
//! candidates with, and candidate ordering. Loaded once per run and passed
//! explicitly to the components that need it.

use serde::{Deserialize, Serialize};

use crate::error::{BrandError, Result};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandConfig {
    /// How relation records are parsed
    pub relations: RelationConfig,
    /// Ignore and positional word lists
    pub word_lists: WordLists,
    /// Where candidates absent from the title sort
    pub ordering: OccurrenceOrder,
}

/// What to do with a relation record missing a field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedRecordPolicy {
    /// Log and continue without the record
    #[default]
    Skip,
    /// Abort the build with [`BrandError::MalformedRelation`]
    FailFast,
}

/// Relation record parsing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationConfig {
    /// Separator between alternate names in the secondaries field
    pub delimiter: char,
    pub malformed: MalformedRecordPolicy,
}

impl Default for RelationConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            malformed: MalformedRecordPolicy::Skip,
        }
    }
}

/// Static word lists used to gate matched candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordLists {
    /// Brands never eligible as a match (compared upper-cased)
    pub ignore: Vec<String>,
    /// Brands eligible only when the title starts with one of these words
    pub front_words: Vec<String>,
    /// Brands eligible when the title starts with, or has as its second
    /// word, one of these words
    pub front_or_second_words: Vec<String>,
    /// Brand that must appear in its exact casing when the title is all caps
    pub capitalized: Option<String>,
}

impl WordLists {
    fn validate(&self) -> Result<()> {
        let lists = [
            ("ignore", &self.ignore),
            ("front_words", &self.front_words),
            ("front_or_second_words", &self.front_or_second_words),
        ];
        for (name, list) in lists {
            if list.iter().any(|w| w.trim().is_empty()) {
                return Err(BrandError::Config(format!(
                    "{} contains an empty entry",
                    name
                )));
            }
        }
        if let Some(sentinel) = &self.capitalized {
            if sentinel.trim().is_empty() {
                return Err(BrandError::Config(
                    "capitalized must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Sort position of a candidate that cannot be located in the title
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceOrder {
    #[default]
    NotFoundLast,
    NotFoundFirst,
}

impl BrandConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| BrandError::Config(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| BrandError::Config(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str).map_err(|e| BrandError::Config(e.to_string()))
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| BrandError::Config(e.to_string()))
    }

    /// Load and validate a TOML or JSON file, chosen by extension.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| BrandError::io(path, e))?;
        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| BrandError::parse(path, e))?
            }
            _ => toml::from_str(&content).map_err(|e| BrandError::parse(path, e))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.relations.delimiter.is_whitespace() {
            return Err(BrandError::Config(
                "delimiter must not be whitespace".to_string(),
            ));
        }
        self.word_lists.validate()
    }
}
