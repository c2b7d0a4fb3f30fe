//! The built index: similarity matrix plus title lookup for one corpus.

use crate::config::IndexConfig;
use crate::error::{IndexError, Result};
use crate::features::compose_all;
use crate::similarity::SimilarityMatrix;
use crate::title_index::TitleIndex;
use crate::vectorizer::TfidfVectorizer;
use data_loader::{Corpus, Row};
use std::time::Instant;
use tracing::{info, instrument};

/// Everything a query needs besides the corpus itself.
///
/// Read-only after `build`; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ContentIndex {
    matrix: SimilarityMatrix,
    titles: TitleIndex,
    vocabulary_size: usize,
}

impl ContentIndex {
    /// Compose soups, fit TF-IDF, compute all pairwise similarities and the
    /// title lookup.
    ///
    /// Fails on an empty corpus.
    #[instrument(skip_all, fields(movies = corpus.len()))]
    pub fn build(corpus: &Corpus, config: &IndexConfig) -> Result<Self> {
        if corpus.is_empty() {
            return Err(IndexError::EmptyCorpus);
        }
        let start = Instant::now();

        let soups = compose_all(corpus);
        let mut vectorizer = TfidfVectorizer::new(config);
        let vectors = vectorizer.fit_transform(&soups)?;
        let matrix = SimilarityMatrix::from_vectors(&vectors);
        let titles = TitleIndex::build(corpus.movies().iter().map(|m| m.title.clone()));

        info!(
            movies = corpus.len(),
            vocabulary = vectorizer.vocabulary_size(),
            elapsed = ?start.elapsed(),
            "Content index built"
        );

        Ok(Self {
            matrix,
            titles,
            vocabulary_size: vectorizer.vocabulary_size(),
        })
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn titles(&self) -> &TitleIndex {
        &self.titles
    }

    /// Row for a title, case-insensitive
    pub fn resolve(&self, title: &str) -> Option<Row> {
        self.titles.resolve(title)
    }

    /// Similarity of `row` to every row
    pub fn similarities(&self, row: Row) -> Option<&[f32]> {
        self.matrix.row(row)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    /// Number of indexed movies
    pub fn len(&self) -> usize {
        self.matrix.size()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Movie;

    fn movie(id: u32, title: &str, overview: &str) -> Movie {
        let mut movie = Movie::new(id, title);
        movie.overview = overview.to_string();
        movie
    }

    #[test]
    fn test_empty_corpus_fails() {
        let err = ContentIndex::build(&Corpus::new(), &IndexConfig::default()).unwrap_err();
        assert_eq!(err, IndexError::EmptyCorpus);
    }

    #[test]
    fn test_build_small_corpus() {
        let corpus = Corpus::from_movies(vec![
            movie(1, "Alien", "crew of a spaceship hunted by an alien"),
            movie(2, "Aliens", "marines fight alien hive on a colony"),
            movie(3, "Notting Hill", "bookshop owner falls for a film star"),
        ]);
        let index = ContentIndex::build(&corpus, &IndexConfig::default()).unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(index.resolve("ALIENS"), Some(1));
        let row = index.similarities(0).unwrap();
        assert_eq!(row[0], 1.0);
        assert!(row[1] > row[2]);
        assert_eq!(row[2], 0.0);
    }

    #[test]
    fn test_all_stop_word_corpus_still_builds() {
        let corpus = Corpus::from_movies(vec![movie(1, "The", "the and of"), movie(2, "It", "")]);
        let index = ContentIndex::build(&corpus, &IndexConfig::default()).unwrap();
        assert_eq!(index.vocabulary_size(), 0);
        assert_eq!(index.matrix().get(0, 0), Some(1.0));
        assert_eq!(index.matrix().get(0, 1), Some(0.0));
    }
}
