//! Core domain types for the TMDB movie corpus.
//!
//! This module defines:
//! - `Movie`, the flat per-item record every later stage reads
//! - typed entries for the JSON-encoded sub-fields (genres, keywords, cast, crew)
//! - `Corpus`, the ordered in-memory collection produced by the loader

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie (TMDB id, the join key between both files)
pub type MovieId = u32;

/// Position of a movie in corpus order. Similarity rows use the same numbering.
pub type Row = usize;

// =============================================================================
// Structured sub-field entries
// =============================================================================

/// One element of the `genres` column, e.g. `{"id": 28, "name": "Action"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreEntry {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One element of the `keywords` column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordEntry {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One element of the `cast` column, listed in billing order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub order: Option<u32>,
}

/// One element of the `crew` column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

/// Cast and crew for one movie, as projected from the credits file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credits {
    pub cast: Vec<CastEntry>,
    pub crew: Vec<CrewEntry>,
}

// =============================================================================
// Movie
// =============================================================================

/// A movie after the join, with every derived field already flattened.
///
/// All fields are always present. Anything that failed to decode is empty,
/// never missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub genre_names: Vec<String>,
    pub keyword_names: Vec<String>,
    /// Top three billed cast members
    pub cast_names: Vec<String>,
    /// Empty when no crew entry has job "Director"
    pub director: String,
    pub popularity: f64,
    pub vote_average: f64,
    /// Kept as found in the source, e.g. "2009-12-10" (may be empty)
    pub release_date: String,
}

impl Movie {
    /// A movie with only id and title set; everything else empty.
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            overview: String::new(),
            genre_names: Vec::new(),
            keyword_names: Vec::new(),
            cast_names: Vec::new(),
            director: String::new(),
            popularity: 0.0,
            vote_average: 0.0,
            release_date: String::new(),
        }
    }
}

// =============================================================================
// Load report
// =============================================================================

/// Counters collected while loading, logged once at the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub movie_rows: usize,
    pub credit_rows: usize,
    /// Movies that found a credits row
    pub credits_matched: usize,
    /// Structured fields that failed to decode and were replaced by `[]`
    pub degraded_fields: usize,
}

// =============================================================================
// Corpus - ordered in-memory collection
// =============================================================================

/// The loaded movies, in the row order of the movies file.
///
/// Row numbers here are the row numbers of the similarity matrix, so the
/// order must never change after load.
#[derive(Debug, Default)]
pub struct Corpus {
    pub(crate) movies: Vec<Movie>,
    pub(crate) rows_by_id: HashMap<MovieId, Row>,
    pub(crate) report: LoadReport,
}

impl Corpus {
    /// Creates a new, empty Corpus
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus straight from movies already in memory.
    ///
    /// Ids must be unique; a repeated id replaces the lookup entry but both
    /// rows stay in the corpus. Use `validate` to reject that.
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        let mut corpus = Self::new();
        for movie in movies {
            corpus.insert_movie(movie);
        }
        corpus
    }

    /// Append a movie at the next row
    pub fn insert_movie(&mut self, movie: Movie) -> Row {
        let row = self.movies.len();
        self.rows_by_id.insert(movie.id, row);
        self.movies.push(movie);
        row
    }

    /// Get a movie by TMDB id
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.rows_by_id.get(&id).map(|&row| &self.movies[row])
    }

    /// Get a movie by row
    pub fn movie_at(&self, row: Row) -> Option<&Movie> {
        self.movies.get(row)
    }

    /// All movies in row order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_insertion_order() {
        let mut corpus = Corpus::new();
        assert_eq!(corpus.insert_movie(Movie::new(19995, "Avatar")), 0);
        assert_eq!(corpus.insert_movie(Movie::new(285, "Pirates")), 1);

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.movie_at(1).unwrap().id, 285);
        assert_eq!(corpus.get_movie(19995).unwrap().title, "Avatar");
        assert!(corpus.get_movie(1).is_none());
        assert!(corpus.movie_at(2).is_none());
    }

    #[test]
    fn test_new_movie_has_empty_fields() {
        let movie = Movie::new(1, "Blank");
        assert!(movie.overview.is_empty());
        assert!(movie.cast_names.is_empty());
        assert!(movie.director.is_empty());
        assert_eq!(movie.popularity, 0.0);
    }
}
