//! Vectorizer configuration.
//!
//! The vocabulary cap and the stop-word list depend on the corpus and its
//! language, so both are set here instead of inside the vectorizer.

use crate::filters::stop_words::ENGLISH_STOP_WORDS;

/// Vocabulary cap used when none is configured
pub const DEFAULT_MAX_FEATURES: usize = 10_000;

/// Which stop words the tokenizer drops
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StopWords {
    #[default]
    English,
    None,
    Custom(Vec<String>),
}

impl StopWords {
    /// The words in this list, lowercased
    pub fn words(&self) -> Vec<String> {
        match self {
            StopWords::English => ENGLISH_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            StopWords::None => Vec::new(),
            StopWords::Custom(words) => words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }
}

/// Settings for [`ContentIndex::build`](crate::ContentIndex::build).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Keep at most this many terms, by corpus frequency. `None` keeps all.
    pub max_features: Option<usize>,
    pub stop_words: StopWords,
    /// Tokens shorter than this (in chars) are dropped
    pub min_token_len: usize,
}

impl IndexConfig {
    pub fn new() -> Self {
        Self {
            max_features: Some(DEFAULT_MAX_FEATURES),
            stop_words: StopWords::English,
            min_token_len: 2,
        }
    }

    /// Configure the vocabulary cap (default: 10,000)
    pub fn with_max_features(mut self, max_features: Option<usize>) -> Self {
        self.max_features = max_features;
        self
    }

    /// Configure the stop-word list (default: English)
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Configure the shortest kept token (default: 2)
    pub fn with_min_token_len(mut self, min_token_len: usize) -> Self {
        self.min_token_len = min_token_len;
        self
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IndexConfig::default();
        assert_eq!(config.max_features, Some(10_000));
        assert_eq!(config.stop_words, StopWords::English);
        assert_eq!(config.min_token_len, 2);
    }

    #[test]
    fn test_custom_stop_words_are_lowercased() {
        let words = StopWords::Custom(vec!["The".to_string()]).words();
        assert_eq!(words, vec!["the"]);
        assert!(StopWords::None.words().is_empty());
    }
}
