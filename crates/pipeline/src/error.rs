//! Error types for index building.

use thiserror::Error;

/// Errors that stop a [`ContentIndex`](crate::ContentIndex) from being built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// Nothing to index; a 0x0 similarity matrix is never produced
    #[error("Cannot build index: corpus is empty")]
    EmptyCorpus,

    /// `transform` was called before `fit`
    #[error("Vectorizer has not been fitted")]
    NotFitted,

    /// The configuration cannot produce a usable vocabulary
    #[error("Invalid index configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, IndexError>;
