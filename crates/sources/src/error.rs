use thiserror::Error;

/// Outcomes of a source query that produce no ranking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The query title is not in the corpus. Callers fall back to popularity.
    #[error("Title not found: {0}")]
    NotFound(String),

    #[error("Corpus is empty")]
    EmptyCorpus,
}

pub type Result<T> = std::result::Result<T, SourceError>;
