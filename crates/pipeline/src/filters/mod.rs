//! Token filter implementations.
//!
//! Each filter can be composed into a FilterPipeline.

pub mod min_length;
pub mod stop_words;

// Re-export for convenience
pub use min_length::MinLengthFilter;
pub use stop_words::StopWordFilter;
