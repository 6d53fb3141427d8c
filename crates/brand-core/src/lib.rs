//! brand-core: brand alias equivalence classes and title matching.
//!
//! Pairwise "brand A relates to brands B;C" records are folded into
//! disjoint equivalence classes (connected components), one retained key
//! per class. A [`BrandMatcher`] then tests every known brand against a
//! product title and picks the brand that is genuinely referenced:
//!
//! - whole-word occurrence only ([`is_separate_term`])
//! - ignore list, positional word lists and an all-caps sentinel guard
//! - ties broken by first occurrence in the title
//!
//! # Example
//!
//! ```
//! use brand_core::{BrandEquivalenceMapping, BrandMatcher, BrandConfig, RelationRecord};
//!
//! let config = BrandConfig::default();
//! let records = vec![RelationRecord::new("Bayer", "Aspirin;Rexall")];
//! let mapping = BrandEquivalenceMapping::build(&records, &config.relations).unwrap();
//! let matcher = BrandMatcher::from_config(&mapping, &config).unwrap();
//!
//! let found = matcher.match_title("Aspirin Protect by Bayer");
//! assert_eq!(found.brand.as_deref(), Some("aspirin"));
//! assert_eq!(found.candidates, vec!["aspirin", "bayer"]);
//! ```

pub mod boundary;
pub mod config;
pub mod equivalence;
pub mod error;
pub mod io;
pub mod matcher;
pub mod normalize;
pub mod pipeline;
pub mod product;
pub mod relation;

pub use boundary::{is_separate_term, SeparateTerm};
pub use config::{BrandConfig, MalformedRecordPolicy, OccurrenceOrder, RelationConfig, WordLists};
pub use equivalence::{BrandEquivalenceMapping, EquivalenceClass, RelationGraph};
pub use error::{BrandError, Result};
pub use io::{
    JsonDirectorySink, JsonProductFile, JsonRelationFile, ProductSource, RelationSource,
    ResultSink,
};
pub use matcher::{order_by_occurrence, BrandMatcher, TitleMatch};
pub use normalize::deburr;
pub use pipeline::{run, RunSummary};
pub use product::{
    CatalogScope, KeyHasher, MatchResult, PlainKeyHasher, Product, Sha256KeyHasher,
};
pub use relation::{parse_relations, ParsedRelation, RelationRecord};
