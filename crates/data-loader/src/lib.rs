//! # Data Loader Crate
//!
//! Loads the TMDB 5000 movies and credits CSV files and joins them into a
//! single ordered [`Corpus`] of flat [`Movie`] records.
//!
//! ## Main Components
//!
//! - **types**: Domain types (Movie, typed sub-field entries, Corpus)
//! - **parser**: CSV parsing and JSON sub-field decoding
//! - **index**: The join and derived-field extraction
//! - **error**: Fatal load errors and non-fatal field decode errors
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Corpus;
//! use std::path::Path;
//!
//! let corpus = Corpus::load_from_dir(Path::new("data"))?;
//! let avatar = corpus.get_movie(19995).unwrap();
//! println!("{} directed by {}", avatar.title, avatar.director);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, FieldDecodeError, Result};
pub use index::{CREDITS_FILE, MOVIES_FILE, TOP_CAST};
pub use types::{
    // Type aliases
    MovieId,
    Row,
    // Core types
    Movie,
    Corpus,
    Credits,
    LoadReport,
    // Sub-field entries
    CastEntry,
    CrewEntry,
    GenreEntry,
    KeywordEntry,
};
