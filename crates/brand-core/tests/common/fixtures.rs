//! Test fixture loading utilities

use std::path::PathBuf;

use brand_core::{BrandConfig, Product, RelationRecord};

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a fixture file as a string
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Relation records in the legacy `manufacturer_p1` shape
#[allow(dead_code)]
pub fn load_relations() -> Vec<RelationRecord> {
    serde_json::from_str(&load_fixture("relations.json")).expect("relations.json")
}

#[allow(dead_code)]
pub fn load_products() -> Vec<Product> {
    serde_json::from_str(&load_fixture("products.json")).expect("products.json")
}

#[allow(dead_code)]
pub fn load_config() -> BrandConfig {
    BrandConfig::load(fixture_path("brand_config.toml")).expect("brand_config.toml")
}
