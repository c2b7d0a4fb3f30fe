use anyhow::{Context, Result, bail};
use artwork_client::{TmdbClient, TmdbConfig};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pipeline::{DEFAULT_MAX_FEATURES, DEFAULT_SUGGESTIONS, IndexConfig, StopWords};
use rand::Rng;
use server::{DataPaths, EnrichedRecommendation, MovieRecommendation, RecommendationOrchestrator};
use sources::DEFAULT_TOP_N;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

/// cine-recs - Content-based movie recommendations
#[derive(Parser)]
#[command(name = "cine-recs")]
#[command(about = "Movie recommendations from plot, genres, cast and director", long_about = None)]
struct Cli {
    /// Directory holding tmdb_5000_movies.csv and tmdb_5000_credits.csv
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Movies CSV, overrides the file in --data-dir
    #[arg(long)]
    movies: Option<PathBuf>,

    /// Credits CSV, overrides the file in --data-dir
    #[arg(long)]
    credits: Option<PathBuf>,

    /// Vocabulary size cap
    #[arg(long, default_value_t = DEFAULT_MAX_FEATURES)]
    max_features: usize,

    /// Keep every term instead of capping the vocabulary
    #[arg(long)]
    unbounded_vocabulary: bool,

    /// Keep English stop words in the vocabulary
    #[arg(long)]
    no_stop_words: bool,

    /// TMDB API key for posters and trailers
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    tmdb_api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title
    Recommend {
        /// Movie title (case-insensitive); blank shows popular movies
        #[arg(long, default_value = "")]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,

        /// Look up posters and trailers (needs a TMDB API key)
        #[arg(long)]
        artwork: bool,
    },

    /// Suggest titles containing a fragment
    Search {
        /// Part of a title
        fragment: String,

        /// Maximum number of suggestions
        #[arg(long, default_value_t = DEFAULT_SUGGESTIONS)]
        limit: usize,
    },

    /// Show the most popular movies
    Popular {
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,
    },

    /// Run benchmark to test query latency
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

impl Cli {
    fn data_paths(&self) -> DataPaths {
        let defaults = DataPaths::from_dir(&self.data_dir);
        DataPaths::new(
            self.movies.clone().unwrap_or(defaults.movies),
            self.credits.clone().unwrap_or(defaults.credits),
        )
    }

    fn index_config(&self) -> IndexConfig {
        let max_features = (!self.unbounded_vocabulary).then_some(self.max_features);
        let stop_words = if self.no_stop_words {
            StopWords::None
        } else {
            StopWords::English
        };
        IndexConfig::default()
            .with_max_features(max_features)
            .with_stop_words(stop_words)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let paths = cli.data_paths();

    // Load and index the dataset (this may take a moment)
    println!("Loading TMDB dataset from {}...", paths.movies.display());
    let start = Instant::now();
    let mut orchestrator = RecommendationOrchestrator::load(paths, cli.index_config())
        .await
        .context("Failed to load TMDB dataset")?;
    let report = orchestrator.load_report();
    println!(
        "{} Indexed {} movies in {:?} ({} with credits, {} degraded fields)",
        "✓".green(),
        report.movie_rows,
        start.elapsed(),
        report.credits_matched,
        report.degraded_fields
    );

    let has_artwork = match cli.tmdb_api_key.as_deref().filter(|k| !k.trim().is_empty()) {
        Some(key) => {
            let client =
                TmdbClient::new(TmdbConfig::new(key)).context("Failed to create TMDB client")?;
            orchestrator = orchestrator.with_artwork(Arc::new(client));
            true
        }
        None => false,
    };

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            title,
            top_n,
            artwork,
        } => {
            if artwork && !has_artwork {
                warn!("--artwork needs TMDB_API_KEY, showing results without artwork");
            }
            handle_recommend(&orchestrator, &title, top_n, artwork && has_artwork).await?
        }
        Commands::Search { fragment, limit } => handle_search(&orchestrator, &fragment, limit),
        Commands::Popular { top_n } => handle_popular(&orchestrator, top_n)?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(Arc::new(orchestrator), requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    orchestrator: &RecommendationOrchestrator,
    title: &str,
    top_n: usize,
    artwork: bool,
) -> Result<()> {
    let results = orchestrator.recommend_or_fallback(title, top_n)?;

    if results.is_fallback() {
        if !title.trim().is_empty() {
            println!("{}", format!("'{}' was not found.", title.trim()).yellow());
            let suggestions = orchestrator.suggest(title, DEFAULT_SUGGESTIONS);
            if !suggestions.is_empty() {
                println!("Did you mean: {}", suggestions.join(", ").cyan());
            }
        }
        println!("{}", "Popular movies:".bold().blue());
    } else {
        println!("{}", format!("Because you liked '{}':", title.trim()).bold().blue());
    }

    if artwork {
        let enriched = orchestrator.enrich(results.recommendations).await;
        print_enriched(&enriched);
    } else {
        print_recommendations(&results.recommendations);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(orchestrator: &RecommendationOrchestrator, fragment: &str, limit: usize) {
    let suggestions = orchestrator.suggest(fragment, limit);
    if suggestions.is_empty() {
        println!("{}", format!("No titles contain '{}'", fragment).yellow());
        return;
    }

    println!("{}", format!("Titles matching '{}':", fragment).bold().blue());
    for title in suggestions {
        println!("{}{}", "• ".green(), title);
    }
}

/// Handle the 'popular' command
fn handle_popular(orchestrator: &RecommendationOrchestrator, top_n: usize) -> Result<()> {
    let popular = orchestrator.fallback(top_n)?;
    println!("{}", "Popular movies:".bold().blue());
    print_recommendations(&popular);
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    orchestrator: Arc<RecommendationOrchestrator>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 || concurrent == 0 {
        bail!("requests and concurrent must both be at least 1");
    }

    // Random titles from the loaded corpus
    let titles: Vec<String> = {
        let snapshot = orchestrator.snapshot();
        let movies = snapshot.corpus().movies();
        let mut rng = rand::rng();
        (0..requests)
            .map(|_| movies[rng.random_range(0..movies.len())].title.clone())
            .collect()
    };

    let wall_clock = Instant::now();
    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    for batch in titles.chunks(concurrent) {
        let mut handles = Vec::with_capacity(batch.len());
        for title in batch {
            let orchestrator = Arc::clone(&orchestrator);
            let title = title.clone();
            handles.push(tokio::spawn(async move {
                let start = Instant::now();
                orchestrator.recommend_or_fallback(&title, DEFAULT_TOP_N)?;
                Ok::<_, anyhow::Error>(start.elapsed())
            }));
        }
        for handle in handles {
            timings.push(handle.await??);
        }
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let avg_latency = timings.iter().sum::<Duration>() / timings.len() as u32;
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

fn year(release_date: &str) -> &str {
    release_date.get(..4).unwrap_or("????")
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[MovieRecommendation]) {
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} ({}) - Rating: {:.1} - Score: {:.3}",
            (i + 1).to_string().green(),
            rec.title.bold(),
            year(&rec.release_date),
            rec.vote_average,
            rec.score
        );
    }
}

fn print_enriched(items: &[EnrichedRecommendation]) {
    for (i, item) in items.iter().enumerate() {
        let rec = &item.recommendation;
        println!(
            "{}. {} ({}) - Rating: {:.1} - Score: {:.3}",
            (i + 1).to_string().green(),
            rec.title.bold(),
            year(&rec.release_date),
            rec.vote_average,
            rec.score
        );
        println!("   Poster: {}", item.artwork.poster_url);
        if let Some(trailer) = &item.artwork.trailer_url {
            println!("   Trailer: {}", trailer.cyan());
        }
    }
}
