//! Whole-word occurrence test for a brand inside a product title.

use regex::{Regex, RegexBuilder};

use crate::error::{BrandError, Result};

/// Compiled whole-word patterns for one brand name.
///
/// A brand counts as present when it is the leading word, the trailing
/// word, a whitespace-delimited word in the middle, or a case-insensitive
/// `\b`-bounded token anywhere. The brand is always matched literally.
#[derive(Debug, Clone)]
pub struct SeparateTerm {
    brand: String,
    positional: Regex,
    word_bounded: Regex,
}

impl SeparateTerm {
    pub fn new(brand: &str) -> Result<Self> {
        let escaped = regex::escape(brand);

        let positional = compile(
            brand,
            &format!(r"^(?:{0}(?:\s.*)?|.*\s{0}\s.*|.*\s{0})$", escaped),
        )?;
        let word_bounded = compile(brand, &format!(r"\b{}\b", escaped))?;

        Ok(Self {
            brand: brand.to_string(),
            positional,
            word_bounded,
        })
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Whether the brand occurs in `title` as a separate term.
    pub fn is_match(&self, title: &str) -> bool {
        self.positional.is_match(title) || self.word_bounded.is_match(title)
    }
}

fn compile(brand: &str, pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .map_err(|e| BrandError::InvalidPattern {
            brand: brand.to_string(),
            message: e.to_string(),
        })
}

/// One-shot form of [`SeparateTerm::is_match`].
///
/// Compiles the patterns on every call; use [`SeparateTerm`] when testing
/// the same brand against many titles.
pub fn is_separate_term(title: &str, brand: &str) -> bool {
    match SeparateTerm::new(brand) {
        Ok(term) => term.is_match(title),
        Err(e) => {
            tracing::debug!(error = %e, "Brand pattern rejected");
            false
        }
    }
}
