//! Popular Source - the fallback ranking
//!
//! Used when a query title cannot be resolved or no query was given. Movies
//! are ranked by the `popularity` column alone, highest first, with ties in
//! corpus order.

use crate::error::{Result, SourceError};
use crate::types::{Candidate, CandidateSource};
use data_loader::Corpus;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Popularity-ranked movies over one corpus.
pub struct PopularSource {
    corpus: Arc<Corpus>,
}

impl PopularSource {
    pub fn new(corpus: Arc<Corpus>) -> Self {
        Self { corpus }
    }

    /// The `top_n` most popular movies; fewer if the corpus is smaller.
    #[instrument(skip(self))]
    pub fn top(&self, top_n: usize) -> Result<Vec<Candidate>> {
        if self.corpus.is_empty() {
            return Err(SourceError::EmptyCorpus);
        }

        let mut ranked: Vec<Candidate> = self
            .corpus
            .movies()
            .iter()
            .enumerate()
            .map(|(row, movie)| {
                Candidate::new(row, movie.id, CandidateSource::Popularity, movie.popularity)
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(top_n);

        debug!(count = ranked.len(), "Ranked popular movies");
        Ok(ranked)
    }
}
