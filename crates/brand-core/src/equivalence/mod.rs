//! Brand equivalence classes
//!
//! Turns pairwise relation records into disjoint classes of brand names
//! (connected components of the relation graph), keeping one key per
//! distinct class.

mod graph;

pub use graph::{NodeId, RelationGraph};

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::config::RelationConfig;
use crate::error::Result;
use crate::relation::{parse_relations, ParsedRelation, RelationRecord};

/// One retained class: the surviving key and every member, sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceClass {
    pub key: String,
    pub brands: Vec<String>,
}

/// Lower-cased brand name -> all brands transitively related to it.
///
/// Entries keep the order in which their keys were first seen while the
/// graph was built. Read-only once constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<EquivalenceClass>", into = "Vec<EquivalenceClass>")]
pub struct BrandEquivalenceMapping {
    entries: Vec<EquivalenceClass>,
    key_index: HashMap<String, usize>,
    member_index: HashMap<String, usize>,
}

impl BrandEquivalenceMapping {
    /// Build the mapping from raw relation records.
    pub fn build(records: &[RelationRecord], config: &RelationConfig) -> Result<Self> {
        let relations = parse_relations(records, config)?;
        let mapping = Self::from_relations(&relations);
        tracing::info!(
            records = records.len(),
            used = relations.len(),
            classes = mapping.len(),
            "Built brand equivalence mapping"
        );
        Ok(mapping)
    }

    /// Build the mapping from already parsed relations.
    pub fn from_relations(relations: &[ParsedRelation]) -> Self {
        let graph = RelationGraph::from_relations(relations);
        Self::from_graph(&graph)
    }

    /// Collect each node's component and drop keys whose sorted member
    /// list was already emitted by an earlier node.
    pub fn from_graph(graph: &RelationGraph) -> Self {
        let labels = graph.component_labels();

        let mut members_by_label: HashMap<usize, Vec<String>> = HashMap::new();
        for id in graph.node_ids() {
            members_by_label
                .entry(labels[id])
                .or_default()
                .push(graph.name(id).to_string());
        }
        for members in members_by_label.values_mut() {
            members.sort();
        }

        let mut emitted: HashSet<&[String]> = HashSet::new();
        let mut entries = Vec::new();
        for id in graph.node_ids() {
            let canonical = members_by_label[&labels[id]].as_slice();
            if emitted.insert(canonical) {
                entries.push(EquivalenceClass {
                    key: graph.name(id).to_string(),
                    brands: canonical.to_vec(),
                });
            }
        }

        Self::from_entries(entries)
    }

    /// Wrap pre-built classes. Later duplicates of a member are ignored by
    /// [`class_of`](Self::class_of).
    pub fn from_entries(entries: Vec<EquivalenceClass>) -> Self {
        let mut key_index = HashMap::new();
        let mut member_index = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            key_index.entry(entry.key.clone()).or_insert(i);
            member_index.entry(entry.key.clone()).or_insert(i);
            for brand in &entry.brands {
                member_index.entry(brand.clone()).or_insert(i);
            }
        }
        Self {
            entries,
            key_index,
            member_index,
        }
    }

    /// Related brands for a retained key.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.key_index
            .get(key)
            .map(|&i| self.entries[i].brands.as_slice())
    }

    /// The retained class containing `brand`, matched case-insensitively.
    pub fn class_of(&self, brand: &str) -> Option<&EquivalenceClass> {
        self.member_index
            .get(&brand.to_lowercase())
            .map(|&i| &self.entries[i])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.key_index.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &EquivalenceClass> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<EquivalenceClass>> for BrandEquivalenceMapping {
    fn from(entries: Vec<EquivalenceClass>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<BrandEquivalenceMapping> for Vec<EquivalenceClass> {
    fn from(mapping: BrandEquivalenceMapping) -> Self {
        mapping.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(records: &[(&str, &str)]) -> BrandEquivalenceMapping {
        let records: Vec<RelationRecord> = records
            .iter()
            .map(|(p, s)| RelationRecord::new(p, s))
            .collect();
        BrandEquivalenceMapping::build(&records, &RelationConfig::default()).unwrap()
    }

    #[test]
    fn single_record_keeps_first_key() {
        let mapping = build(&[("Bayer", "Aspirin;Rexall")]);
        assert_eq!(mapping.len(), 1);
        assert_eq!(
            mapping.get("bayer"),
            Some(&["aspirin".to_string(), "bayer".to_string(), "rexall".to_string()][..])
        );
        assert!(!mapping.contains_key("aspirin"));
        assert!(!mapping.contains_key("rexall"));
    }

    #[test]
    fn separate_components_stay_separate() {
        let mapping = build(&[("Bayer", "Aspirin"), ("Pfizer", "Advil")]);
        let keys: Vec<&str> = mapping.keys().collect();
        assert_eq!(keys, vec!["bayer", "pfizer"]);
    }

    #[test]
    fn records_joined_through_shared_member() {
        let mapping = build(&[("Bayer", "Aspirin"), ("Pfizer", "Advil"), ("Advil", "aspirin")]);
        assert_eq!(mapping.len(), 1);
        let class = mapping.class_of("PFIZER").unwrap();
        assert_eq!(class.key, "bayer");
        assert_eq!(class.brands, vec!["advil", "aspirin", "bayer", "pfizer"]);
    }

    #[test]
    fn class_of_unknown_brand() {
        let mapping = build(&[("Bayer", "Aspirin")]);
        assert!(mapping.class_of("tylenol").is_none());
    }

    #[test]
    fn key_lookup_uses_first_duplicate_key() {
        let mapping = BrandEquivalenceMapping::from_entries(vec![
            EquivalenceClass {
                key: "bayer".to_string(),
                brands: vec!["aspirin".to_string(), "bayer".to_string()],
            },
            EquivalenceClass {
                key: "bayer".to_string(),
                brands: vec!["bayer".to_string()],
            },
        ]);
        assert!(mapping.contains_key("bayer"));
        assert!(!mapping.contains_key("BAYER"));
        assert_eq!(mapping.get("bayer").map(|b| b.len()), Some(2));
        assert_eq!(mapping.get("aspirin"), None);
    }

    #[test]
    fn serializes_as_ordered_entries() {
        let mapping = build(&[("Bayer", "Aspirin")]);
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r#"[{"key":"bayer","brands":["aspirin","bayer"]}]"#);
        let back: BrandEquivalenceMapping = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mapping);
    }
}
