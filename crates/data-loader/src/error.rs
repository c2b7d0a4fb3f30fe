//! Error types for the data-loader crate.
//!
//! Two families live here:
//! - `DataLoadError` aborts the whole load (missing file, missing column,
//!   bad join key)
//! - `FieldDecodeError` is per-row and never aborts; the loader swaps in an
//!   empty default and counts it

use thiserror::Error;

/// Errors that abort loading of the movie corpus.
///
/// Every variant names the file (and column or line where it applies) so a
/// caller can tell which input is broken.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected the file structure
    #[error("CSV error in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// A column the join depends on is absent from the header row
    #[error("Missing required column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// Line in data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// A structured sub-field (genres, keywords, cast, crew) that did not decode.
///
/// Never fatal: the loader logs it and substitutes an empty list.
#[derive(Error, Debug)]
#[error("Malformed {field} field: {reason}")]
pub struct FieldDecodeError {
    pub field: &'static str,
    pub reason: String,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
