//! # Recommendation Orchestrator
//!
//! This module owns the loaded engine and coordinates every query:
//! 1. Load both CSV files and build the content index (blocking worker)
//! 2. Publish the result as an immutable `Engine` snapshot
//! 3. Answer similarity queries, falling back to popularity
//! 4. Optionally attach artwork, one concurrent lookup per title
//!
//! Queries take an `Arc` to the current snapshot and never block a reload.
//! A reload builds a complete new snapshot off to the side and swaps it in,
//! so in-flight queries finish against the snapshot they started with.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use artwork_client::{Artwork, ArtworkLookup};
use data_loader::{CREDITS_FILE, Corpus, LoadReport, MOVIES_FILE, MovieId};
use pipeline::{ContentIndex, IndexConfig};
use sources::{Candidate, CandidateSource, PopularSource, SimilarSource, SourceError};

/// Locations of the two input files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub movies: PathBuf,
    pub credits: PathBuf,
}

impl DataPaths {
    pub fn new(movies: impl Into<PathBuf>, credits: impl Into<PathBuf>) -> Self {
        Self {
            movies: movies.into(),
            credits: credits.into(),
        }
    }

    /// The standard TMDB 5000 file names inside `dir`
    pub fn from_dir(dir: &Path) -> Self {
        Self::new(dir.join(MOVIES_FILE), dir.join(CREDITS_FILE))
    }
}

/// Final recommendation returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub vote_average: f64,
    pub release_date: String,
    pub overview: String,
    pub score: f64,
    pub source: CandidateSource,
}

/// Results of the combined query, tagged with the ranking that produced them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationSet {
    pub source: CandidateSource,
    pub recommendations: Vec<MovieRecommendation>,
}

impl RecommendationSet {
    pub fn is_fallback(&self) -> bool {
        self.source == CandidateSource::Popularity
    }
}

/// A recommendation with its poster and trailer attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecommendation {
    pub recommendation: MovieRecommendation,
    pub artwork: Artwork,
}

/// One immutable build of corpus, index and sources.
pub struct Engine {
    corpus: Arc<Corpus>,
    index: Arc<ContentIndex>,
    similar: SimilarSource,
    popular: PopularSource,
    generation: u64,
}

impl Engine {
    /// Load both files and build the index. Blocking and CPU heavy.
    #[instrument(skip(paths, config))]
    fn build(paths: &DataPaths, config: &IndexConfig, generation: u64) -> Result<Self> {
        let start = Instant::now();

        let corpus = Corpus::load_from_files(&paths.movies, &paths.credits)
            .context("Failed to load movie data")?;
        let index =
            ContentIndex::build(&corpus, config).context("Failed to build content index")?;

        let corpus = Arc::new(corpus);
        let index = Arc::new(index);
        info!(
            generation,
            movies = corpus.len(),
            elapsed = ?start.elapsed(),
            "Engine ready"
        );

        Ok(Self {
            similar: SimilarSource::new(corpus.clone(), index.clone()),
            popular: PopularSource::new(corpus.clone()),
            corpus,
            index,
            generation,
        })
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn index(&self) -> &ContentIndex {
        &self.index
    }

    /// Starts at 1 and increases with every successful reload
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn project(&self, candidates: Vec<Candidate>) -> Vec<MovieRecommendation> {
        candidates
            .into_iter()
            .filter_map(|candidate| {
                let movie = self.corpus.movie_at(candidate.row)?;
                Some(MovieRecommendation {
                    movie_id: movie.id,
                    title: movie.title.clone(),
                    vote_average: movie.vote_average,
                    release_date: movie.release_date.clone(),
                    overview: movie.overview.clone(),
                    score: candidate.score,
                    source: candidate.source,
                })
            })
            .collect()
    }
}

/// Main orchestrator; construct once at startup and pass by reference.
pub struct RecommendationOrchestrator {
    paths: DataPaths,
    config: IndexConfig,
    engine: RwLock<Arc<Engine>>,
    reload_lock: Mutex<()>,
    generations: AtomicU64,
    artwork: Option<Arc<dyn ArtworkLookup>>,
}

impl RecommendationOrchestrator {
    /// Load the data and build the first engine.
    ///
    /// Fails if either file is missing or malformed, or the corpus is empty.
    pub async fn load(paths: DataPaths, config: IndexConfig) -> Result<Self> {
        info!(
            movies = %paths.movies.display(),
            credits = %paths.credits.display(),
            "Loading recommendation engine"
        );
        let engine = Self::build_engine(paths.clone(), config.clone(), 1).await?;

        Ok(Self {
            paths,
            config,
            engine: RwLock::new(Arc::new(engine)),
            reload_lock: Mutex::new(()),
            generations: AtomicU64::new(1),
            artwork: None,
        })
    }

    /// Attach an artwork client used by [`enrich`](Self::enrich)
    pub fn with_artwork(mut self, artwork: Arc<dyn ArtworkLookup>) -> Self {
        self.artwork = Some(artwork);
        self
    }

    async fn build_engine(
        paths: DataPaths,
        config: IndexConfig,
        generation: u64,
    ) -> Result<Engine> {
        tokio::task::spawn_blocking(move || Engine::build(&paths, &config, generation))
            .await
            .context("Engine build task panicked")?
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Arc<Engine> {
        // a poisoned lock still holds a complete snapshot
        let guard = self.engine.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    /// Rebuild from the same files and swap the new engine in.
    ///
    /// Reloads run one at a time. On failure the previous engine stays active.
    pub async fn reload(&self) -> Result<LoadReport> {
        let _guard = self.reload_lock.lock().await;
        let generation = self.generations.load(Ordering::SeqCst) + 1;
        info!(generation, "Reloading recommendation engine");

        let build = Self::build_engine(self.paths.clone(), self.config.clone(), generation);
        let engine = match build.await {
            Ok(engine) => engine,
            Err(e) => {
                warn!(error = %e, "Reload failed, keeping current engine");
                return Err(e);
            }
        };
        let report = *engine.corpus().report();

        let mut slot = self.engine.write().unwrap_or_else(|e| e.into_inner());
        *slot = Arc::new(engine);
        self.generations.store(generation, Ordering::SeqCst);
        Ok(report)
    }

    /// Movies most similar to `title`, or `SourceError::NotFound`.
    pub fn recommend(
        &self,
        title: &str,
        top_n: usize,
    ) -> std::result::Result<Vec<MovieRecommendation>, SourceError> {
        let engine = self.snapshot();
        let candidates = engine.similar.recommend(title, top_n)?;
        Ok(engine.project(candidates))
    }

    /// The most popular movies
    pub fn fallback(&self, top_n: usize) -> Result<Vec<MovieRecommendation>> {
        let engine = self.snapshot();
        let candidates = engine
            .popular
            .top(top_n)
            .context("Failed to rank popular movies")?;
        Ok(engine.project(candidates))
    }

    /// Similar movies for a title, or popular movies when the query is blank
    /// or unknown. Both paths read the same snapshot.
    #[instrument(skip(self))]
    pub fn recommend_or_fallback(&self, query: &str, top_n: usize) -> Result<RecommendationSet> {
        let engine = self.snapshot();

        if !query.trim().is_empty() {
            match engine.similar.recommend(query, top_n) {
                Ok(candidates) => {
                    return Ok(RecommendationSet {
                        source: CandidateSource::Similarity,
                        recommendations: engine.project(candidates),
                    });
                }
                Err(SourceError::NotFound(title)) => {
                    info!(title = %title, "Title not found, using popular movies");
                }
                Err(e) => return Err(e.into()),
            }
        }

        let candidates = engine
            .popular
            .top(top_n)
            .context("Failed to rank popular movies")?;
        Ok(RecommendationSet {
            source: CandidateSource::Popularity,
            recommendations: engine.project(candidates),
        })
    }

    /// Titles containing `fragment`, for autocomplete
    pub fn suggest(&self, fragment: &str, limit: usize) -> Vec<String> {
        let engine = self.snapshot();
        engine
            .index
            .titles()
            .suggest(fragment, limit)
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Attach artwork to each recommendation, looking titles up concurrently.
    ///
    /// Order is preserved. Without an artwork client, or when a lookup fails,
    /// the recommendation gets a placeholder.
    pub async fn enrich(
        &self,
        recommendations: Vec<MovieRecommendation>,
    ) -> Vec<EnrichedRecommendation> {
        let Some(artwork) = &self.artwork else {
            debug!("No artwork client configured");
            return recommendations
                .into_iter()
                .map(|recommendation| EnrichedRecommendation {
                    recommendation,
                    artwork: Artwork::no_image(),
                })
                .collect();
        };

        let start = Instant::now();
        let tasks: Vec<_> = recommendations
            .iter()
            .map(|rec| {
                let client = Arc::clone(artwork);
                let title = rec.title.clone();
                tokio::spawn(async move { client.lookup_or_placeholder(&title).await })
            })
            .collect();

        let mut enriched = Vec::with_capacity(recommendations.len());
        for (recommendation, task) in recommendations.into_iter().zip(tasks) {
            let artwork = match task.await {
                Ok(artwork) => artwork,
                Err(e) => {
                    warn!(title = %recommendation.title, error = %e, "Artwork task failed");
                    Artwork::error()
                }
            };
            enriched.push(EnrichedRecommendation {
                recommendation,
                artwork,
            });
        }

        debug!(count = enriched.len(), elapsed = ?start.elapsed(), "Enriched recommendations");
        enriched
    }

    /// Counters from the load that produced the current engine
    pub fn load_report(&self) -> LoadReport {
        *self.snapshot().corpus().report()
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }
}
