//! Corpus building: joining movies against credits and flattening fields.
//!
//! Steps:
//! 1. Parse both files in parallel
//! 2. Project credits by movie id
//! 3. Left-join in movies-file order, deriving cast names, director, genres
//! 4. Validate that ids are unique

use crate::error::{DataLoadError, Result};
use crate::parser::{self, CreditRecord, MovieRecord};
use crate::types::*;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Default file name of the movies dataset inside a data directory
pub const MOVIES_FILE: &str = "tmdb_5000_movies.csv";
/// Default file name of the credits dataset inside a data directory
pub const CREDITS_FILE: &str = "tmdb_5000_credits.csv";

/// How many billed cast members feed the soup
pub const TOP_CAST: usize = 3;

const DIRECTOR_JOB: &str = "Director";

impl Corpus {
    /// Load both TMDB files from a directory using the default file names
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        Self::load_from_files(&data_dir.join(MOVIES_FILE), &data_dir.join(CREDITS_FILE))
    }

    /// Load and join the movies and credits files.
    ///
    /// This is the main entry point for loading data.
    #[instrument(
        skip_all,
        fields(movies = %movies_path.display(), credits = %credits_path.display())
    )]
    pub fn load_from_files(movies_path: &Path, credits_path: &Path) -> Result<Self> {
        // Both files are independent until the join
        let (movies, credits) = rayon::join(
            || parser::parse_movies(movies_path),
            || parser::parse_credits(credits_path),
        );
        let movies = movies?;
        let credits = credits?;

        let mut corpus = join(movies.records, credits.records);
        corpus.report.degraded_fields = movies.degraded_fields + credits.degraded_fields;
        corpus.validate()?;

        let report = corpus.report;
        info!(
            movies = report.movie_rows,
            credits = report.credit_rows,
            matched = report.credits_matched,
            degraded = report.degraded_fields,
            "Corpus loaded"
        );
        Ok(corpus)
    }

    /// Validate data integrity
    ///
    /// Movie ids are the join key and the id lookup; a repeat is fatal.
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashMap<MovieId, Row> = HashMap::with_capacity(self.movies.len());
        for (row, movie) in self.movies.iter().enumerate() {
            if let Some(first) = seen.insert(movie.id, row) {
                return Err(DataLoadError::ValidationError(format!(
                    "movie id {} appears at rows {} and {}",
                    movie.id, first, row
                )));
            }
        }
        Ok(())
    }
}

/// Left-join movies against credits, keeping movies-file order.
///
/// Movies without credits get empty cast and director. When the credits
/// file repeats an id, the first row is used.
pub fn join(movies: Vec<MovieRecord>, credits: Vec<CreditRecord>) -> Corpus {
    let credit_rows = credits.len();
    let mut by_id: HashMap<MovieId, Credits> = HashMap::with_capacity(credit_rows);
    for record in credits {
        match by_id.entry(record.movie_id) {
            Entry::Occupied(_) => {
                warn!("Duplicate credits for movie {}, keeping first", record.movie_id);
            }
            Entry::Vacant(slot) => {
                slot.insert(record.credits);
            }
        }
    }

    let mut corpus = Corpus::new();
    corpus.report.movie_rows = movies.len();
    corpus.report.credit_rows = credit_rows;

    for record in movies {
        let credits = by_id.remove(&record.id);
        if credits.is_some() {
            corpus.report.credits_matched += 1;
        }
        corpus.insert_movie(flatten(record, credits.unwrap_or_default()));
    }
    corpus
}

/// Turn a joined row into a `Movie` with derived fields.
fn flatten(record: MovieRecord, credits: Credits) -> Movie {
    Movie {
        id: record.id,
        title: record.title,
        overview: record.overview,
        genre_names: record.genres.into_iter().filter_map(|g| g.name).collect(),
        keyword_names: record.keywords.into_iter().filter_map(|k| k.name).collect(),
        cast_names: top_cast(&credits.cast, TOP_CAST),
        director: director(&credits.crew),
        popularity: record.popularity,
        vote_average: record.vote_average,
        release_date: record.release_date,
    }
}

/// Names of the first `n` cast entries, skipping entries without a name.
///
/// Only the first `n` entries are looked at, so a nameless entry shortens
/// the list rather than pulling in the fourth-billed actor.
pub fn top_cast(cast: &[CastEntry], n: usize) -> Vec<String> {
    cast.iter()
        .take(n)
        .filter_map(|entry| entry.name.clone())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Name of the first crew entry whose job is exactly "Director".
pub fn director(crew: &[CrewEntry]) -> String {
    crew.iter()
        .find(|entry| entry.job.as_deref() == Some(DIRECTOR_JOB))
        .and_then(|entry| entry.name.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn cast(name: Option<&str>) -> CastEntry {
        CastEntry {
            name: name.map(str::to_string),
            character: None,
            order: None,
        }
    }

    fn crew(name: &str, job: &str) -> CrewEntry {
        CrewEntry {
            name: Some(name.to_string()),
            job: Some(job.to_string()),
            department: None,
        }
    }

    fn record(id: MovieId, title: &str) -> MovieRecord {
        MovieRecord {
            id,
            title: title.to_string(),
            overview: String::new(),
            genres: vec![],
            keywords: vec![],
            popularity: 0.0,
            vote_average: 0.0,
            release_date: String::new(),
        }
    }

    #[test]
    fn test_top_cast_skips_nameless_within_first_three() {
        let list = vec![
            cast(Some("Sam Worthington")),
            cast(None),
            cast(Some("Sigourney Weaver")),
            cast(Some("Stephen Lang")),
        ];
        assert_eq!(top_cast(&list, 3), vec!["Sam Worthington", "Sigourney Weaver"]);
    }

    #[test]
    fn test_director_is_case_sensitive_first_match() {
        let list = vec![
            crew("Jon Landau", "Producer"),
            crew("Someone", "director"),
            crew("James Cameron", "Director"),
            crew("Other", "Director"),
        ];
        assert_eq!(director(&list), "James Cameron");
        assert_eq!(director(&[crew("Jon Landau", "Producer")]), "");
    }

    #[test]
    fn test_join_keeps_movie_order_and_defaults_missing_credits() {
        let movies = vec![record(2, "Second"), record(1, "First")];
        let credits = vec![CreditRecord {
            movie_id: 1,
            credits: Credits {
                cast: vec![cast(Some("Tom Hanks"))],
                crew: vec![crew("Robert Zemeckis", "Director")],
            },
        }];

        let corpus = join(movies, credits);
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.movie_at(0).unwrap().title, "Second");
        assert!(corpus.movie_at(0).unwrap().cast_names.is_empty());
        assert_eq!(corpus.movie_at(0).unwrap().director, "");
        assert_eq!(corpus.movie_at(1).unwrap().director, "Robert Zemeckis");
        assert_eq!(corpus.report().credits_matched, 1);
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let corpus = join(vec![record(7, "A"), record(7, "B")], vec![]);
        assert!(matches!(
            corpus.validate(),
            Err(DataLoadError::ValidationError(_))
        ));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = TempDir::new().unwrap();
        let mut movies = std::fs::File::create(dir.path().join(MOVIES_FILE)).unwrap();
        writeln!(
            movies,
            "id,title,overview,genres,keywords,popularity,vote_average,release_date"
        )
        .unwrap();
        let genres = r#""[{""id"": 878, ""name"": ""Science Fiction""}]""#;
        writeln!(
            movies,
            "19995,Avatar,In the 22nd century.,{genres},[],150.4,7.2,2009-12-10"
        )
        .unwrap();
        let mut credits = std::fs::File::create(dir.path().join(CREDITS_FILE)).unwrap();
        writeln!(credits, "movie_id,title,cast,crew").unwrap();
        let cast = r#""[{""name"": ""Sam Worthington""}]""#;
        let crew = r#""[{""name"": ""James Cameron"", ""job"": ""Director""}]""#;
        writeln!(credits, "19995,Avatar,{cast},{crew}").unwrap();
        drop(movies);
        drop(credits);

        let corpus = Corpus::load_from_dir(dir.path()).unwrap();
        let avatar = corpus.get_movie(19995).unwrap();
        assert_eq!(avatar.genre_names, vec!["Science Fiction"]);
        assert_eq!(avatar.cast_names, vec!["Sam Worthington"]);
        assert_eq!(avatar.director, "James Cameron");
        assert_eq!(avatar.release_date, "2009-12-10");
        assert_eq!(corpus.report().degraded_fields, 0);
    }

    #[test]
    fn test_malformed_cast_counts_as_degraded() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(MOVIES_FILE),
            "id,title,overview\n42,Solo,A lone pilot\n",
        )
        .unwrap();
        let crew = r#""[{""name"": ""Jane Doe"", ""job"": ""Director""}]""#;
        std::fs::write(
            dir.path().join(CREDITS_FILE),
            format!("movie_id,title,cast,crew\n42,Solo,not json,{crew}\n"),
        )
        .unwrap();

        let corpus = Corpus::load_from_dir(dir.path()).unwrap();
        let solo = corpus.get_movie(42).unwrap();
        assert!(solo.cast_names.is_empty());
        assert_eq!(solo.director, "Jane Doe");
        assert_eq!(corpus.report().degraded_fields, 1);
    }

    #[test]
    fn test_load_missing_credits_file_fails() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(MOVIES_FILE), "id,title\n1,A\n").unwrap();
        let err = Corpus::load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
