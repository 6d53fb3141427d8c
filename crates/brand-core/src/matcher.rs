//! Title-to-brand matching and disambiguation
//!
//! Every brand in the equivalence mapping is tested against a product
//! title. Candidates that occur as separate terms and pass the ignore,
//! capitalization and positional gates are collected, ordered by where
//! they first appear in the title, and the first one wins.

use std::collections::HashSet;

use crate::boundary::SeparateTerm;
use crate::config::{BrandConfig, OccurrenceOrder, WordLists};
use crate::equivalence::BrandEquivalenceMapping;
use crate::error::Result;
use crate::normalize::{deburr, fold};
use crate::product::{CatalogScope, KeyHasher, MatchResult, Product};

/// Candidates found in one title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleMatch {
    /// First candidate after ordering, if any
    pub brand: Option<String>,
    /// All accepted candidates, deduplicated, in title order
    pub candidates: Vec<String>,
}

/// Matcher over a fixed mapping and word lists.
///
/// Construction compiles one [`SeparateTerm`] per distinct eligible brand;
/// afterwards the matcher is read-only and can be shared across threads.
#[derive(Debug, Clone)]
pub struct BrandMatcher {
    terms: Vec<SeparateTerm>,
    positional: HashSet<String>,
    front_words: Vec<String>,
    front_or_second_words: Vec<String>,
    capitalized: Option<String>,
    ordering: OccurrenceOrder,
}

impl BrandMatcher {
    pub fn new(
        mapping: &BrandEquivalenceMapping,
        word_lists: &WordLists,
        ordering: OccurrenceOrder,
    ) -> Result<Self> {
        let ignore: HashSet<String> = word_lists
            .ignore
            .iter()
            .map(|w| w.to_uppercase())
            .collect();
        let front_words = lowercase_all(&word_lists.front_words);
        let front_or_second_words = lowercase_all(&word_lists.front_or_second_words);
        let positional = front_words
            .iter()
            .chain(front_or_second_words.iter())
            .cloned()
            .collect();

        // Scan order: mapping keys in order, related brands as stored.
        let mut seen = HashSet::new();
        let mut terms = Vec::new();
        for class in mapping.iter() {
            for brand in &class.brands {
                if !seen.insert(brand.as_str()) || ignore.contains(&brand.to_uppercase()) {
                    continue;
                }
                terms.push(SeparateTerm::new(brand)?);
            }
        }

        tracing::debug!(
            brands = terms.len(),
            ignored = ignore.len(),
            "Compiled brand matcher"
        );

        Ok(Self {
            terms,
            positional,
            front_words,
            front_or_second_words,
            capitalized: word_lists.capitalized.clone(),
            ordering,
        })
    }

    pub fn from_config(mapping: &BrandEquivalenceMapping, config: &BrandConfig) -> Result<Self> {
        Self::new(mapping, &config.word_lists, config.ordering)
    }

    /// Number of brands the matcher tests per title.
    pub fn brand_count(&self) -> usize {
        self.terms.len()
    }

    /// Find every eligible brand in `title` and pick the earliest.
    pub fn match_title(&self, title: &str) -> TitleMatch {
        let positional_open = self.title_opens_positional(title);
        let mut candidates: Vec<String> = Vec::new();

        for term in &self.terms {
            let brand = term.brand();
            if !term.is_match(title) {
                continue;
            }
            if self.is_capitalization_collision(brand, title) {
                continue;
            }
            if !positional_open && self.positional.contains(&brand.to_lowercase()) {
                continue;
            }
            let stored = deburr(brand);
            if !candidates.contains(&stored) {
                candidates.push(stored);
            }
        }

        if candidates.len() > 1 {
            order_by_occurrence(title, &mut candidates, self.ordering);
        }

        TitleMatch {
            brand: candidates.first().cloned(),
            candidates,
        }
    }

    /// Match one product. `None` when the product already has a brand.
    pub fn assign_brand(
        &self,
        product: &Product,
        scope: &CatalogScope,
        hasher: &dyn KeyHasher,
    ) -> Option<MatchResult> {
        if product.is_assigned() {
            return None;
        }
        let matched = self.match_title(&product.title);
        let key = hasher.hash(&scope.composite_key(&product.source_id));
        tracing::debug!(
            source_id = %product.source_id,
            brand = ?matched.brand,
            candidates = matched.candidates.len(),
            "Matched product"
        );
        Some(MatchResult::new(key, &product.title, matched.candidates))
    }

    /// Match a batch, preserving input order and dropping assigned products.
    pub fn assign_all(
        &self,
        products: &[Product],
        scope: &CatalogScope,
        hasher: &dyn KeyHasher,
    ) -> Vec<MatchResult> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            products
                .par_iter()
                .filter_map(|p| self.assign_brand(p, scope, hasher))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            products
                .iter()
                .filter_map(|p| self.assign_brand(p, scope, hasher))
                .collect()
        }
    }

    /// A title in all caps can contain the sentinel brand only by accident
    /// unless the sentinel's own casing is present.
    fn is_capitalization_collision(&self, brand: &str, title: &str) -> bool {
        let Some(sentinel) = &self.capitalized else {
            return false;
        };
        brand.to_lowercase() == sentinel.to_lowercase()
            && title.to_uppercase().contains(&sentinel.to_uppercase())
            && !title.contains(sentinel.as_str())
    }

    /// Whether positionally constrained brands may match in this title.
    fn title_opens_positional(&self, title: &str) -> bool {
        let lower = title.to_lowercase();
        if self.front_words.iter().any(|w| lower.starts_with(w.as_str())) {
            return true;
        }
        let second_word = lower.split_whitespace().nth(1);
        self.front_or_second_words
            .iter()
            .any(|w| lower.starts_with(w.as_str()) || second_word == Some(w.as_str()))
    }
}

fn lowercase_all(words: &[String]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

/// Stable-sort candidates by their first position in `title`.
///
/// Positions are looked up case- and accent-insensitively.
pub fn order_by_occurrence(
    title: &str,
    candidates: &mut Vec<String>,
    ordering: OccurrenceOrder,
) {
    let folded = fold(title);
    let mut keyed: Vec<(Option<usize>, String)> = candidates
        .drain(..)
        .map(|c| (folded.find(&fold(&c)), c))
        .collect();

    match ordering {
        OccurrenceOrder::NotFoundLast => {
            keyed.sort_by_key(|(pos, _)| pos.unwrap_or(usize::MAX))
        }
        OccurrenceOrder::NotFoundFirst => keyed.sort_by_key(|(pos, _)| *pos),
    }

    candidates.extend(keyed.into_iter().map(|(_, c)| c));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RelationConfig;
    use crate::product::PlainKeyHasher;
    use crate::relation::RelationRecord;

    fn mapping(records: &[(&str, &str)]) -> BrandEquivalenceMapping {
        let records: Vec<RelationRecord> = records
            .iter()
            .map(|(p, s)| RelationRecord::new(p, s))
            .collect();
        BrandEquivalenceMapping::build(&records, &RelationConfig::default()).unwrap()
    }

    fn matcher(records: &[(&str, &str)], word_lists: WordLists) -> BrandMatcher {
        BrandMatcher::new(&mapping(records), &word_lists, OccurrenceOrder::NotFoundLast).unwrap()
    }

    #[test]
    fn earliest_candidate_wins() {
        let m = matcher(&[("Advil", "Pfizer"), ("Bayer", "Aspirin")], WordLists::default());
        let result = m.match_title("Bayer Aspirin Advil");
        assert_eq!(result.candidates, vec!["bayer", "aspirin", "advil"]);
        assert_eq!(result.brand.as_deref(), Some("bayer"));
    }

    #[test]
    fn order_by_occurrence_is_case_insensitive() {
        let mut candidates = vec!["Advil".to_string(), "Bayer".to_string()];
        order_by_occurrence(
            "Bayer Aspirin Advil",
            &mut candidates,
            OccurrenceOrder::NotFoundLast,
        );
        assert_eq!(candidates, vec!["Bayer", "Advil"]);
    }

    #[test]
    fn not_found_ordering() {
        let mut last = vec!["zzz".to_string(), "advil".to_string()];
        order_by_occurrence("Advil", &mut last, OccurrenceOrder::NotFoundLast);
        assert_eq!(last, vec!["advil", "zzz"]);

        let mut first = vec!["advil".to_string(), "zzz".to_string()];
        order_by_occurrence("Advil", &mut first, OccurrenceOrder::NotFoundFirst);
        assert_eq!(first, vec!["zzz", "advil"]);
    }

    #[test]
    fn substring_is_not_a_match() {
        let m = matcher(&[("Tylenol", "McNeil")], WordLists::default());
        assert_eq!(m.match_title("Tylenolol 200"), TitleMatch::default());
    }

    #[test]
    fn ignore_list_is_case_insensitive() {
        let word_lists = WordLists {
            ignore: vec!["Aspirin".to_string()],
            ..Default::default()
        };
        let m = matcher(&[("Bayer", "Aspirin")], word_lists);
        let result = m.match_title("Aspirin 500mg");
        assert!(result.candidates.is_empty());
        assert_eq!(result.brand, None);
    }

    #[test]
    fn front_word_requires_title_start() {
        let word_lists = WordLists {
            front_words: vec!["kids".to_string()],
            ..Default::default()
        };
        let m = matcher(&[("Kids", "Kids Co")], word_lists);
        assert_eq!(m.match_title("Kids Tylenol 500mg").brand.as_deref(), Some("kids"));
        assert_eq!(m.match_title("Adult Kids Tylenol").brand, None);
    }

    #[test]
    fn front_or_second_word_allows_second_position() {
        let word_lists = WordLists {
            front_or_second_words: vec!["kids".to_string()],
            ..Default::default()
        };
        let m = matcher(&[("Kids", "Kids Co")], word_lists);
        assert_eq!(m.match_title("Adult Kids Tylenol").brand.as_deref(), Some("kids"));
        assert_eq!(m.match_title("Tylenol for Kids").brand, None);
    }

    #[test]
    fn unlisted_brands_bypass_positional_gate() {
        let word_lists = WordLists {
            front_words: vec!["kids".to_string()],
            ..Default::default()
        };
        let m = matcher(&[("Kids", "Tylenol")], word_lists);
        let result = m.match_title("Adult Kids Tylenol");
        assert_eq!(result.candidates, vec!["tylenol"]);
    }

    #[test]
    fn capitalized_sentinel_needs_exact_casing() {
        let word_lists = WordLists {
            capitalized: Some("NOW".to_string()),
            ..Default::default()
        };
        let m = matcher(&[("Now", "Now Foods")], word_lists);
        assert_eq!(m.match_title("NOW Vitamin D3").brand.as_deref(), Some("now"));
        assert_eq!(m.match_title("Buy now vitamin").brand, None);
    }

    #[test]
    fn accents_are_stripped_and_deduplicated() {
        let m = matcher(&[("Nestlé", "Nestle")], WordLists::default());
        let result = m.match_title("Nestlé Nestle cereal");
        assert_eq!(result.candidates, vec!["nestle"]);
    }

    #[test]
    fn non_latin_brands_are_stored_verbatim() {
        let m = matcher(&[("한미약품", "ガスター;йод")], WordLists::default());
        assert_eq!(m.match_title("한미약품 비타민").brand.as_deref(), Some("한미약품"));
        assert_eq!(m.match_title("ガスター 10").brand.as_deref(), Some("ガスター"));
        assert_eq!(m.match_title("йод 5%").brand.as_deref(), Some("йод"));
    }

    #[test]
    fn empty_title_matches_nothing() {
        let m = matcher(&[("Bayer", "Aspirin")], WordLists::default());
        assert_eq!(m.match_title(""), TitleMatch::default());
    }

    #[test]
    fn assigned_products_are_skipped() {
        let m = matcher(&[("Bayer", "Aspirin")], WordLists::default());
        let scope = CatalogScope::new("shop", "cz");
        let mut assigned = Product::new("1", "Bayer Aspirin");
        assigned.existing_brand_id = Some(serde_json::json!(7));
        let open = Product::new("2", "Bayer Aspirin");

        let results = m.assign_all(&[assigned, open], &scope, &PlainKeyHasher);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].key, "shop_cz_2");
        assert_eq!(results[0].brand.as_deref(), Some("bayer"));
        assert_eq!(results[0].data, "Bayer Aspirin -> bayer,aspirin");
    }
}
