//! Poster and trailer lookup for movie titles.
//!
//! This crate provides a client for The Movie Database (TMDB) API. It handles:
//! - Searching a title and taking the first match
//! - Building the poster URL from the poster or backdrop path
//! - Finding an embeddable YouTube trailer
//! - Caching results per title
//! - Placeholder artwork when nothing is found or the service fails
//!
//! Recommendations never depend on this crate succeeding; callers use
//! [`ArtworkLookup::lookup_or_placeholder`] to keep failures contained.

pub mod client;
pub mod error;
pub mod types;

pub use client::{
    ArtworkLookup, DEFAULT_API_URL, DEFAULT_IMAGE_BASE_URL, DEFAULT_TIMEOUT, TmdbClient,
    TmdbConfig,
};
pub use error::{ArtworkError, Result};
pub use types::{Artwork, ERROR_POSTER, NO_IMAGE_POSTER};
