//! Shared candidate types

use data_loader::{MovieId, Row};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of results returned when the caller does not ask for a count
pub const DEFAULT_TOP_N: usize = 18;

/// Which ranking produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateSource {
    /// Cosine similarity to the query movie
    Similarity,
    /// Popularity, used when there is no usable query
    Popularity,
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateSource::Similarity => write!(f, "similarity"),
            CandidateSource::Popularity => write!(f, "popularity"),
        }
    }
}

/// A ranked movie, identified by its corpus row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub row: Row,
    pub movie_id: MovieId,
    pub source: CandidateSource,
    /// Similarity in [0, 1], or the raw popularity value
    pub score: f64,
}

impl Candidate {
    pub fn new(row: Row, movie_id: MovieId, source: CandidateSource, score: f64) -> Self {
        Self {
            row,
            movie_id,
            source,
            score,
        }
    }
}
