//! Core traits for the tokenization pipeline.
//!
//! A `TokenFilter` removes or rewrites tokens after the raw text has been
//! split. Filters are chained in a [`FilterPipeline`](crate::FilterPipeline).

/// Core trait for filtering tokens.
///
/// `Send + Sync` because documents are tokenized from rayon workers.
pub trait TokenFilter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to the tokens of one document, keeping order.
    fn apply(&self, tokens: Vec<String>) -> Vec<String>;
}
