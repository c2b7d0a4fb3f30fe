//! Parser for the TMDB 5000 CSV files.
//!
//! - movies file: id, title, overview, genres, keywords, popularity,
//!   vote_average, release_date, ... (extra columns are ignored)
//! - credits file: movie_id, title, cast, crew
//!
//! Columns are located by header name, not position. The structured columns
//! hold JSON lists of objects; those are decoded here into typed entries.

use crate::error::{DataLoadError, FieldDecodeError, Result};
use crate::types::*;
use csv::StringRecord;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::{debug, warn};

/// A movies-file row before the join. Structured fields are already decoded.
#[derive(Debug, Clone)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub genres: Vec<GenreEntry>,
    pub keywords: Vec<KeywordEntry>,
    pub popularity: f64,
    pub vote_average: f64,
    pub release_date: String,
}

/// A credits-file row before the join.
#[derive(Debug, Clone)]
pub struct CreditRecord {
    pub movie_id: MovieId,
    pub credits: Credits,
}

/// Parsed rows plus how many structured fields fell back to empty.
#[derive(Debug)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub degraded_fields: usize,
}

/// Decode a JSON-encoded list of objects into typed entries.
///
/// Blank input is an empty list, not an error.
pub fn decode_entries<T: DeserializeOwned>(
    field: &'static str,
    raw: &str,
) -> std::result::Result<Vec<T>, FieldDecodeError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|e| FieldDecodeError {
        field,
        reason: e.to_string(),
    })
}

/// Header positions for one CSV file
struct Columns {
    file: String,
    positions: HashMap<String, usize>,
}

impl Columns {
    fn from_headers(file: &str, headers: &StringRecord) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().to_string(), idx))
            .collect();
        Self {
            file: file.to_string(),
            positions,
        }
    }

    fn required(&self, column: &str) -> Result<usize> {
        self.positions
            .get(column)
            .copied()
            .ok_or_else(|| DataLoadError::MissingColumn {
                file: self.file.clone(),
                column: column.to_string(),
            })
    }

    fn optional(&self, column: &str) -> Option<usize> {
        let position = self.positions.get(column).copied();
        if position.is_none() {
            warn!("Column '{}' absent from {}, using empty values", column, self.file);
        }
        position
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn open_reader(path: &Path) -> Result<(csv::Reader<File>, String)> {
    let label = file_label(path);
    let file = File::open(path).map_err(|_| DataLoadError::FileNotFound {
        path: path.display().to_string(),
    })?;
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);
    Ok((reader, label))
}

fn field<'r>(record: &'r StringRecord, position: Option<usize>) -> &'r str {
    position.and_then(|idx| record.get(idx)).unwrap_or("")
}

fn parse_id(file: &str, line: usize, column: &str, raw: &str) -> Result<MovieId> {
    raw.trim().parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Invalid {} '{}': {}", column, raw, e),
    })
}

/// Numeric metadata is not a join key: blank or garbage becomes 0.0.
fn parse_score(file: &str, line: usize, column: &str, raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0.0;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            warn!("{} line {}: invalid {} '{}', using 0.0", file, line, column, raw);
            0.0
        }
    }
}

/// Decode one structured field, counting the failure instead of propagating it.
fn decode_or_default<T: DeserializeOwned>(
    file: &str,
    line: usize,
    column: &'static str,
    raw: &str,
    degraded: &mut usize,
) -> Vec<T> {
    decode_entries(column, raw).unwrap_or_else(|e| {
        warn!("{} line {}: {}; using empty list", file, line, e);
        *degraded += 1;
        Vec::new()
    })
}

fn csv_error(file: &str, source: csv::Error) -> DataLoadError {
    DataLoadError::Csv {
        file: file.to_string(),
        source,
    }
}

/// Parse the movies CSV file
///
/// Required columns: `id`, `title`. Everything else is optional and
/// defaults to empty.
pub fn parse_movies(path: &Path) -> Result<Parsed<MovieRecord>> {
    let (mut reader, file) = open_reader(path)?;
    let headers = reader.headers().map_err(|e| csv_error(&file, e))?.clone();
    let columns = Columns::from_headers(&file, &headers);

    let id_col = columns.required("id")?;
    let title_col = columns.required("title")?;
    let overview_col = columns.optional("overview");
    let genres_col = columns.optional("genres");
    let keywords_col = columns.optional("keywords");
    let popularity_col = columns.optional("popularity");
    let vote_col = columns.optional("vote_average");
    let release_col = columns.optional("release_date");

    let mut records = Vec::new();
    let mut degraded_fields = 0;

    for (idx, result) in reader.records().enumerate() {
        // Line 1 is the header
        let line_no = idx + 2;
        let record = result.map_err(|e| csv_error(&file, e))?;

        let movie = MovieRecord {
            id: parse_id(&file, line_no, "id", field(&record, Some(id_col)))?,
            title: field(&record, Some(title_col)).to_string(),
            overview: field(&record, overview_col).to_string(),
            genres: decode_or_default(
                &file,
                line_no,
                "genres",
                field(&record, genres_col),
                &mut degraded_fields,
            ),
            keywords: decode_or_default(
                &file,
                line_no,
                "keywords",
                field(&record, keywords_col),
                &mut degraded_fields,
            ),
            popularity: parse_score(&file, line_no, "popularity", field(&record, popularity_col)),
            vote_average: parse_score(&file, line_no, "vote_average", field(&record, vote_col)),
            release_date: field(&record, release_col).trim().to_string(),
        };
        records.push(movie);
    }

    debug!("Parsed {} movie rows from {}", records.len(), file);
    Ok(Parsed {
        records,
        degraded_fields,
    })
}

/// Parse the credits CSV file
///
/// Required columns: `movie_id`, `cast`, `crew`.
pub fn parse_credits(path: &Path) -> Result<Parsed<CreditRecord>> {
    let (mut reader, file) = open_reader(path)?;
    let headers = reader.headers().map_err(|e| csv_error(&file, e))?.clone();
    let columns = Columns::from_headers(&file, &headers);

    let id_col = columns.required("movie_id")?;
    let cast_col = columns.required("cast")?;
    let crew_col = columns.required("crew")?;

    let mut records = Vec::new();
    let mut degraded_fields = 0;

    for (idx, result) in reader.records().enumerate() {
        let line_no = idx + 2;
        let record = result.map_err(|e| csv_error(&file, e))?;

        let credit = CreditRecord {
            movie_id: parse_id(&file, line_no, "movie_id", field(&record, Some(id_col)))?,
            credits: Credits {
                cast: decode_or_default(
                    &file,
                    line_no,
                    "cast",
                    field(&record, Some(cast_col)),
                    &mut degraded_fields,
                ),
                crew: decode_or_default(
                    &file,
                    line_no,
                    "crew",
                    field(&record, Some(crew_col)),
                    &mut degraded_fields,
                ),
            },
        };
        records.push(credit);
    }

    debug!("Parsed {} credit rows from {}", records.len(), file);
    Ok(Parsed {
        records,
        degraded_fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_decode_genres() {
        let genres: Vec<GenreEntry> = decode_entries(
            "genres",
            r#"[{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}]"#,
        )
        .unwrap();
        assert_eq!(genres.len(), 2);
        assert_eq!(genres[1].name.as_deref(), Some("Science Fiction"));
    }

    #[test]
    fn test_decode_blank_is_empty() {
        let cast: Vec<CastEntry> = decode_entries("cast", "   ").unwrap();
        assert!(cast.is_empty());
    }

    #[test]
    fn test_decode_malformed_is_error() {
        let result: std::result::Result<Vec<CrewEntry>, _> =
            decode_entries("crew", "[{'job': 'Director'");
        let err = result.unwrap_err();
        assert_eq!(err.field, "crew");
    }

    #[test]
    fn test_parse_movies_degrades_bad_fields() {
        let file = write_csv(
            "id,title,overview,genres,keywords,popularity,vote_average,release_date\n\
             1,Good,\"A tale.\",\"[{\"\"id\"\": 18, \"\"name\"\": \"\"Drama\"\"}]\",\
             [],10.5,7.1,2001-01-01\n\
             2,Broken,,not json,[],,abc,\n",
        );

        let parsed = parse_movies(file.path()).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.degraded_fields, 1);

        let good = &parsed.records[0];
        assert_eq!(good.genres[0].name.as_deref(), Some("Drama"));
        assert_eq!(good.popularity, 10.5);

        let broken = &parsed.records[1];
        assert!(broken.genres.is_empty());
        assert_eq!(broken.popularity, 0.0);
        assert_eq!(broken.vote_average, 0.0);
        assert_eq!(broken.overview, "");
    }

    #[test]
    fn test_parse_movies_missing_id_column() {
        let file = write_csv("movie,title\n1,Thing\n");
        let err = parse_movies(file.path()).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::MissingColumn { ref column, .. } if column == "id"
        ));
    }

    #[test]
    fn test_parse_movies_bad_id_is_fatal() {
        let file = write_csv("id,title\nabc,Thing\n");
        let err = parse_movies(file.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { line: 2, .. }));
    }

    #[test]
    fn test_parse_credits_degrades_bad_cast() {
        let crew = r#""[{""name"": ""Jane Doe"", ""job"": ""Director""}]""#;
        let file = write_csv(&format!(
            "movie_id,title,cast,crew\n1,Broken,not json,{crew}\n2,Empty,[],[{{'job'\n"
        ));

        let parsed = parse_credits(file.path()).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.degraded_fields, 2);

        let broken = &parsed.records[0].credits;
        assert!(broken.cast.is_empty());
        assert_eq!(broken.crew[0].name.as_deref(), Some("Jane Doe"));

        let empty = &parsed.records[1].credits;
        assert!(empty.cast.is_empty());
        assert!(empty.crew.is_empty());
    }

    #[test]
    fn test_parse_credits_requires_crew() {
        let file = write_csv("movie_id,title,cast\n1,Thing,[]\n");
        let err = parse_credits(file.path()).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::MissingColumn { ref column, .. } if column == "crew"
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_movies(Path::new("/nonexistent/tmdb_5000_movies.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
