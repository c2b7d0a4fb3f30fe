use data_loader::Corpus;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data");

    println!("Loading TMDB 5000 dataset...\n");

    let start = Instant::now();
    let corpus = Corpus::load_from_dir(data_dir)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let report = corpus.report();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", report.movie_rows);
    println!("Credits: {}", report.credit_rows);
    println!("Matched credits: {}", report.credits_matched);
    println!("Degraded fields: {}", report.degraded_fields);
    println!("\nPerformance: {:.0} movies/second",
             corpus.len() as f64 / elapsed.as_secs_f64());
}
