//! Similar Source - content-based recommendations
//!
//! Ranks every movie by its precomputed cosine similarity to the query movie.
//!
//! ## Algorithm
//! 1. Resolve the query title to a row (case-insensitive, trimmed)
//! 2. Read that row of the similarity matrix
//! 3. Stable sort descending by score, so ties keep corpus order
//! 4. Drop the query row itself and take the first `top_n`

use crate::error::{Result, SourceError};
use crate::types::{Candidate, CandidateSource};
use data_loader::Corpus;
use pipeline::ContentIndex;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Similarity-ranked recommendations over one corpus and its index.
pub struct SimilarSource {
    corpus: Arc<Corpus>,
    index: Arc<ContentIndex>,
}

impl SimilarSource {
    /// `index` must have been built from `corpus`; rows are shared.
    pub fn new(corpus: Arc<Corpus>, index: Arc<ContentIndex>) -> Self {
        Self { corpus, index }
    }

    /// The `top_n` movies most similar to `title`, best first.
    ///
    /// Returns `SourceError::NotFound` when the title is unknown. A corpus of
    /// one movie yields an empty list.
    #[instrument(skip(self))]
    pub fn recommend(&self, title: &str, top_n: usize) -> Result<Vec<Candidate>> {
        let query_row = self
            .index
            .resolve(title)
            .ok_or_else(|| SourceError::NotFound(title.trim().to_string()))?;
        let scores = self
            .index
            .similarities(query_row)
            .ok_or_else(|| SourceError::NotFound(title.trim().to_string()))?;

        let mut ranked: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let candidates: Vec<Candidate> = ranked
            .into_iter()
            .filter(|&(row, _)| row != query_row)
            .filter_map(|(row, score)| {
                self.corpus.movie_at(row).map(|movie| {
                    Candidate::new(row, movie.id, CandidateSource::Similarity, f64::from(score))
                })
            })
            .take(top_n)
            .collect();

        debug!(query_row, count = candidates.len(), "Ranked similar movies");
        Ok(candidates)
    }
}
