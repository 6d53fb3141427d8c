//! Raw "brand A relates to brands B;C" records.

use serde::{Deserialize, Serialize};

use crate::config::{MalformedRecordPolicy, RelationConfig};
use crate::error::{BrandError, Result};

/// One pairwise relation row as it arrives from storage.
///
/// Both fields are optional so a single bad row does not reject the whole
/// file; [`RelationRecord::parse`] decides what a missing field means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRecord {
    #[serde(default, alias = "manufacturer_p1")]
    pub primary: Option<String>,
    #[serde(default, alias = "manufacturers_p2")]
    pub secondaries: Option<String>,
}

/// A relation record split into lower-cased node names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRelation {
    pub primary: String,
    pub secondaries: Vec<String>,
}

impl RelationRecord {
    pub fn new(primary: &str, secondaries: &str) -> Self {
        Self {
            primary: Some(primary.to_string()),
            secondaries: Some(secondaries.to_string()),
        }
    }

    /// Lower-case the primary and split the secondaries on `delimiter`.
    ///
    /// Tokens are trimmed; empty tokens are dropped. Returns the reason the
    /// record is unusable when a field is missing or blank.
    pub fn parse(&self, delimiter: char) -> std::result::Result<ParsedRelation, String> {
        let primary = match self.primary.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => p.to_lowercase(),
            Some(_) => return Err("blank primary".to_string()),
            None => return Err("missing primary".to_string()),
        };
        let secondaries = self
            .secondaries
            .as_deref()
            .ok_or_else(|| "missing secondaries".to_string())?;

        let secondaries = secondaries
            .split(delimiter)
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(ParsedRelation {
            primary,
            secondaries,
        })
    }
}

/// Parse every record, applying the configured malformed-record policy.
pub fn parse_relations(
    records: &[RelationRecord],
    config: &RelationConfig,
) -> Result<Vec<ParsedRelation>> {
    let mut parsed = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match record.parse(config.delimiter) {
            Ok(relation) => parsed.push(relation),
            Err(reason) => match config.malformed {
                MalformedRecordPolicy::Skip => {
                    tracing::warn!(index, %reason, "Skipping malformed relation record");
                }
                MalformedRecordPolicy::FailFast => {
                    return Err(BrandError::MalformedRelation { index, reason });
                }
            },
        }
    }
    Ok(parsed)
}
