//! Soup composition.
//!
//! Each movie becomes one string the vectorizer can read: the overview
//! followed by genre, cast and director tokens. Multi-word names are glued
//! into single tokens so "Tom Hanks" cannot match some other "Tom".

use data_loader::{Corpus, Movie};
use rayon::prelude::*;

/// Lowercase and drop every whitespace character: "Science Fiction" -> "sciencefiction"
pub fn entity_token(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Build the soup for one movie.
///
/// Order is fixed: overview, genres, cast, director. Empty parts are
/// skipped so no doubled or trailing separators appear.
pub fn compose(movie: &Movie) -> String {
    let overview = movie.overview.to_lowercase();

    let entities = movie
        .genre_names
        .iter()
        .chain(movie.cast_names.iter())
        .chain(std::iter::once(&movie.director))
        .map(|name| entity_token(name));

    std::iter::once(overview)
        .chain(entities)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compose soups for every movie, in row order.
pub fn compose_all(corpus: &Corpus) -> Vec<String> {
    corpus.movies().par_iter().map(compose).collect()
}
