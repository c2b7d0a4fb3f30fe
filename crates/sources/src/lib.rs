//! # Sources Crate
//!
//! Ranking sources for content-based movie recommendations.
//!
//! ## Components
//!
//! ### Similar Source
//! "Movies like this one": every movie ranked by cosine similarity of its
//! soup to the query movie's soup. Unknown titles return `NotFound`.
//!
//! ### Popular Source
//! The fallback: movies ranked by TMDB popularity, used for unknown or
//! blank queries.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{PopularSource, SimilarSource, SourceError, DEFAULT_TOP_N};
//! use std::sync::Arc;
//!
//! let similar = SimilarSource::new(corpus.clone(), index.clone());
//! let popular = PopularSource::new(corpus.clone());
//!
//! let candidates = match similar.recommend("Avatar", DEFAULT_TOP_N) {
//!     Ok(candidates) => candidates,
//!     Err(SourceError::NotFound(_)) => popular.top(DEFAULT_TOP_N)?,
//!     Err(e) => return Err(e.into()),
//! };
//! ```

pub mod error;
pub mod popular;
pub mod similar;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SourceError};
pub use popular::PopularSource;
pub use similar::SimilarSource;
pub use types::{Candidate, CandidateSource, DEFAULT_TOP_N};
