//! Example: Generate recommendations for a title
//!
//! Run with: cargo run --package sources --example generate_candidates -- "The Dark Knight"
//!
//! This example shows how to:
//! 1. Load the TMDB 5000 dataset
//! 2. Build the content index
//! 3. Rank similar movies, falling back to popular ones
//! 4. Display the results

use data_loader::Corpus;
use pipeline::{ContentIndex, IndexConfig};
use sources::{PopularSource, SimilarSource, SourceError, DEFAULT_TOP_N};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let title = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Avatar".to_string());

    println!("=== Content-Based Candidate Generation Example ===\n");

    println!("Loading TMDB dataset...");
    let start = Instant::now();
    let corpus = Arc::new(Corpus::load_from_dir(Path::new("data"))?);
    println!("Loaded {} movies in {:?}\n", corpus.len(), start.elapsed());

    println!("Building content index...");
    let start = Instant::now();
    let index = Arc::new(ContentIndex::build(&corpus, &IndexConfig::default())?);
    println!(
        "Built index in {:?} ({} terms)\n",
        start.elapsed(),
        index.vocabulary_size()
    );

    let similar = SimilarSource::new(corpus.clone(), index);
    let popular = PopularSource::new(corpus.clone());

    let start = Instant::now();
    let candidates = match similar.recommend(&title, DEFAULT_TOP_N) {
        Ok(candidates) => {
            println!("Movies similar to '{}':", title);
            candidates
        }
        Err(SourceError::NotFound(_)) => {
            println!("'{}' not found, showing popular movies:", title);
            popular.top(DEFAULT_TOP_N)?
        }
        Err(e) => return Err(e.into()),
    };
    let elapsed = start.elapsed();

    for (i, candidate) in candidates.iter().enumerate() {
        if let Some(movie) = corpus.movie_at(candidate.row) {
            println!(
                "  {:2}. {} (Score: {:.3}, {})",
                i + 1,
                movie.title,
                candidate.score,
                candidate.source
            );
        }
    }

    println!("\nRanked {} candidates in {:?}", candidates.len(), elapsed);
    Ok(())
}
