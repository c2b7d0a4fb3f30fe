//! Preprocessing and indexing for content-based recommendations.
//!
//! This crate provides:
//! - soup composition (`features`)
//! - tokenization with composable token filters (`FilterPipeline`)
//! - a TF-IDF vectorizer producing sparse unit vectors
//! - the dense cosine `SimilarityMatrix`
//! - a case-insensitive `TitleIndex`
//! - `ContentIndex`, which ties them together for one corpus
//!
//! ## Architecture
//! ```text
//! Corpus -> compose -> soups -> TfidfVectorizer -> SimilarityMatrix
//!        \-> titles -> TitleIndex
//! ```
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{ContentIndex, IndexConfig};
//!
//! let index = ContentIndex::build(&corpus, &IndexConfig::default())?;
//! let row = index.resolve("Avatar").unwrap();
//! let scores = index.similarities(row).unwrap();
//! ```

pub mod config;
pub mod content_index;
pub mod error;
pub mod features;
pub mod filter_pipeline;
pub mod filters;
pub mod similarity;
pub mod title_index;
pub mod traits;
pub mod vectorizer;

// Re-export main types
pub use config::{DEFAULT_MAX_FEATURES, IndexConfig, StopWords};
pub use content_index::ContentIndex;
pub use error::{IndexError, Result};
pub use features::{compose, compose_all};
pub use filter_pipeline::{FilterPipeline, tokenize};
pub use similarity::SimilarityMatrix;
pub use title_index::{DEFAULT_SUGGESTIONS, TitleIndex};
pub use traits::TokenFilter;
pub use vectorizer::{SparseVector, TfidfVectorizer};
