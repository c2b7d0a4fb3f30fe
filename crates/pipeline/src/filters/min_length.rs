//! Drops tokens that are too short to carry meaning.
//!
//! The default of 2 chars matches the conventional word pattern used by
//! TF-IDF tooling, so single letters left over from "don't" disappear.

use crate::traits::TokenFilter;

/// Removes tokens shorter than `min_len` characters.
pub struct MinLengthFilter {
    min_len: usize,
}

impl MinLengthFilter {
    pub fn new(min_len: usize) -> Self {
        Self { min_len }
    }
}

impl TokenFilter for MinLengthFilter {
    fn name(&self) -> &str {
        "MinLengthFilter"
    }

    fn apply(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|token| token.chars().count() >= self.min_len)
            .collect()
    }
}
