//! Simple test harness for the recommendation orchestrator.
//!
//! Loads the dataset, asks for recommendations for one title and prints
//! them with artwork when a TMDB key is available.
//!
//! Usage: server [TITLE]
//! Environment: DATA_DIR (default "data"), TMDB_API_KEY (optional)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use artwork_client::{TmdbClient, TmdbConfig};
use pipeline::IndexConfig;
use server::{DataPaths, RecommendationOrchestrator};
use sources::DEFAULT_TOP_N;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,server=debug")),
        )
        .init();

    info!("Starting recommendation server test harness");

    let data_dir = PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()));
    let query = std::env::args().nth(1).unwrap_or_default();

    let mut orchestrator =
        RecommendationOrchestrator::load(DataPaths::from_dir(&data_dir), IndexConfig::default())
            .await
            .context("Failed to start orchestrator")?;

    match std::env::var("TMDB_API_KEY") {
        Ok(key) if !key.trim().is_empty() => {
            let client = TmdbClient::new(TmdbConfig::new(key))?;
            orchestrator = orchestrator.with_artwork(Arc::new(client));
            info!("Artwork lookups enabled");
        }
        _ => warn!("TMDB_API_KEY not set, artwork will use placeholders"),
    }

    let results = orchestrator.recommend_or_fallback(&query, DEFAULT_TOP_N)?;
    info!(
        "Received {} recommendations ranked by {}:",
        results.recommendations.len(),
        results.source
    );

    let enriched = orchestrator.enrich(results.recommendations).await;
    for (i, item) in enriched.iter().enumerate() {
        let rec = &item.recommendation;
        info!(
            "{}. {} ({}) - Score: {:.3}, Rating: {:.1}",
            i + 1,
            rec.title,
            rec.release_date.get(..4).unwrap_or("????"),
            rec.score,
            rec.vote_average
        );
        info!("   Poster: {}", item.artwork.poster_url);
        if let Some(trailer) = &item.artwork.trailer_url {
            info!("   Trailer: {}", trailer);
        }
    }

    Ok(())
}
