//! Data sources and sinks around the matcher.
//!
//! The core only talks to these traits; the JSON file implementations
//! cover the batch runner.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{BrandError, Result};
use crate::product::{CatalogScope, MatchResult, Product};
use crate::relation::RelationRecord;

/// Supplies the raw relation list.
pub trait RelationSource {
    fn load_relations(&self) -> Result<Vec<RelationRecord>>;
}

/// Supplies the catalog for one (source, country) pair.
pub trait ProductSource {
    fn load_products(&self, scope: &CatalogScope) -> Result<Vec<Product>>;
}

/// Persists the results for one (source, country) pair.
pub trait ResultSink {
    fn persist(&self, scope: &CatalogScope, results: &[MatchResult]) -> Result<()>;
}

/// A JSON array of relation records on disk.
#[derive(Debug, Clone)]
pub struct JsonRelationFile {
    path: PathBuf,
}

impl JsonRelationFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RelationSource for JsonRelationFile {
    fn load_relations(&self) -> Result<Vec<RelationRecord>> {
        read_json(&self.path)
    }
}

/// A JSON array of products on disk.
///
/// The file is the whole catalog of the scope it is asked for.
#[derive(Debug, Clone)]
pub struct JsonProductFile {
    path: PathBuf,
}

impl JsonProductFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProductSource for JsonProductFile {
    fn load_products(&self, scope: &CatalogScope) -> Result<Vec<Product>> {
        let products: Vec<Product> = read_json(&self.path)?;
        tracing::debug!(
            source = %scope.source,
            country = %scope.country,
            products = products.len(),
            "Loaded catalog"
        );
        Ok(products)
    }
}

/// Writes `brand_mapping_{source}_{country}.json` into a directory,
/// creating the directory when missing.
#[derive(Debug, Clone)]
pub struct JsonDirectorySink {
    dir: PathBuf,
}

impl JsonDirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn output_path(&self, scope: &CatalogScope) -> PathBuf {
        self.dir.join(scope.output_file_name())
    }
}

impl ResultSink for JsonDirectorySink {
    fn persist(&self, scope: &CatalogScope, results: &[MatchResult]) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| BrandError::io(&self.dir, e))?;
        let path = self.output_path(scope);
        let json = serde_json::to_string(results).map_err(|e| BrandError::parse(&path, e))?;
        fs::write(&path, json).map_err(|e| BrandError::io(&path, e))?;
        tracing::info!(path = %path.display(), results = results.len(), "Wrote brand mapping");
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| BrandError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| BrandError::parse(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_creates_directory_and_writes_array() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = JsonDirectorySink::new(tmp.path().join("output"));
        let scope = CatalogScope::new("shop", "sk");
        let results = vec![MatchResult::new(
            "k1".to_string(),
            "Bayer Aspirin",
            vec!["bayer".to_string()],
        )];

        sink.persist(&scope, &results).unwrap();

        let written = fs::read_to_string(sink.output_path(&scope)).unwrap();
        assert_eq!(
            written,
            r#"[{"key":"k1","brand":"bayer","data":"Bayer Aspirin -> bayer"}]"#
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = JsonRelationFile::new("/nonexistent/relations.json");
        assert!(matches!(source.load_relations(), Err(BrandError::Io { .. })));
    }

    #[test]
    fn bad_json_is_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("products.json");
        fs::write(&path, "{not json").unwrap();
        let source = JsonProductFile::new(&path);
        let scope = CatalogScope::new("shop", "sk");
        assert!(matches!(
            source.load_products(&scope),
            Err(BrandError::Parse { .. })
        ));
    }
}
