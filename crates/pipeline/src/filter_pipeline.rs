//! The FilterPipeline chains token filters after tokenization.

use crate::config::IndexConfig;
use crate::filters::{MinLengthFilter, StopWordFilter};
use crate::traits::TokenFilter;

/// Splits text into lowercase word tokens.
///
/// A token is a maximal run of alphanumeric characters or underscores.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Chains multiple token filters together.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(MinLengthFilter::new(2))
///     .add_filter(StopWordFilter::english());
///
/// let tokens = pipeline.analyze("The Dark Knight rises");
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn TokenFilter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The pipeline an [`IndexConfig`] describes: length filter, then stop words.
    pub fn from_config(config: &IndexConfig) -> Self {
        let pipeline = Self::new().add_filter(MinLengthFilter::new(config.min_token_len));
        let stop_words = config.stop_words.words();
        if stop_words.is_empty() {
            pipeline
        } else {
            pipeline.add_filter(StopWordFilter::new(stop_words))
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl TokenFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the filters, in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Apply all filters in sequence to already split tokens.
    pub fn apply(&self, tokens: Vec<String>) -> Vec<String> {
        let mut current = tokens;
        for filter in &self.filters {
            let before = current.len();
            current = filter.apply(current);
            tracing::trace!(
                "Filter {} kept {} of {} tokens",
                filter.name(),
                current.len(),
                before
            );
        }
        current
    }

    /// Tokenize a document and run it through every filter.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        self.apply(tokenize(text))
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
