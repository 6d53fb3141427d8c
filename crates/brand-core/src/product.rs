//! Catalog products, output records and their keys.

use serde::{Deserialize, Deserializer, Serialize};
use sha2::{Digest, Sha256};

/// A catalog product to assign a brand to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product title; null or missing reads as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    pub source_id: String,
    /// Brand already assigned upstream; such products are not matched again
    #[serde(default, alias = "m_id")]
    pub existing_brand_id: Option<serde_json::Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Product {
    pub fn new(source_id: &str, title: &str) -> Self {
        Self {
            title: title.to_string(),
            source_id: source_id.to_string(),
            existing_brand_id: None,
        }
    }

    /// Whether an upstream brand assignment exists.
    pub fn is_assigned(&self) -> bool {
        match &self.existing_brand_id {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::String(s)) => !s.is_empty(),
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::Number(n)) => n.as_f64() != Some(0.0),
            Some(_) => true,
        }
    }
}

/// The (source, country) pair a catalog belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogScope {
    pub source: String,
    pub country: String,
}

impl CatalogScope {
    pub fn new(source: &str, country: &str) -> Self {
        Self {
            source: source.to_string(),
            country: country.to_string(),
        }
    }

    /// Composite key of a product within this scope.
    pub fn composite_key(&self, source_id: &str) -> String {
        format!("{}_{}_{}", self.source, self.country, source_id)
    }

    /// File name results for this scope are persisted under.
    pub fn output_file_name(&self) -> String {
        format!("brand_mapping_{}_{}.json", self.source, self.country)
    }
}

/// Turns a composite key into the product key written to the output.
///
/// Must be deterministic across runs.
pub trait KeyHasher: Send + Sync {
    fn hash(&self, input: &str) -> String;
}

/// Hex-encoded SHA-256 of the composite key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256KeyHasher;

impl KeyHasher for Sha256KeyHasher {
    fn hash(&self, input: &str) -> String {
        format!("{:x}", Sha256::digest(input.as_bytes()))
    }
}

/// Uses the composite key as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainKeyHasher;

impl KeyHasher for PlainKeyHasher {
    fn hash(&self, input: &str) -> String {
        input.to_string()
    }
}

/// Brand assignment for one product. Written once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub key: String,
    /// Chosen brand, `null` when nothing matched
    pub brand: Option<String>,
    /// `"{title} -> {candidates}"` for auditing
    pub data: String,
    #[serde(skip)]
    pub candidates: Vec<String>,
}

impl MatchResult {
    pub fn new(key: String, title: &str, candidates: Vec<String>) -> Self {
        let brand = candidates.first().cloned();
        let data = format!("{} -> {}", title, candidates.join(","));
        Self {
            key,
            brand,
            data,
            candidates,
        }
    }
}
