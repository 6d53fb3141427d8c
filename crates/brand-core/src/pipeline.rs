//! One matching run over a (source, country) catalog.

use serde::Serialize;

use crate::config::BrandConfig;
use crate::equivalence::BrandEquivalenceMapping;
use crate::error::Result;
use crate::io::{ProductSource, RelationSource, ResultSink};
use crate::matcher::BrandMatcher;
use crate::product::{CatalogScope, KeyHasher};

/// Counts from a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub skipped_assigned: usize,
    pub matched: usize,
    pub unmatched: usize,
}

/// Build the mapping, match every unassigned product and persist the
/// results. A sink failure aborts the run.
pub fn run(
    relations: &dyn RelationSource,
    products: &dyn ProductSource,
    sink: &dyn ResultSink,
    scope: &CatalogScope,
    config: &BrandConfig,
    hasher: &dyn KeyHasher,
) -> Result<RunSummary> {
    let records = relations.load_relations()?;
    let mapping = BrandEquivalenceMapping::build(&records, &config.relations)?;
    let matcher = BrandMatcher::from_config(&mapping, config)?;

    let catalog = products.load_products(scope)?;
    let results = matcher.assign_all(&catalog, scope, hasher);

    let matched = results.iter().filter(|r| r.brand.is_some()).count();
    let summary = RunSummary {
        total: catalog.len(),
        skipped_assigned: catalog.len() - results.len(),
        matched,
        unmatched: results.len() - matched,
    };

    sink.persist(scope, &results)?;

    tracing::info!(
        source = %scope.source,
        country = %scope.country,
        total = summary.total,
        skipped = summary.skipped_assigned,
        matched = summary.matched,
        unmatched = summary.unmatched,
        "Brand assignment finished"
    );
    Ok(summary)
}
