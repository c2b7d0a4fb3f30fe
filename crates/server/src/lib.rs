//! Server crate for the content-based recommendation engine.
//!
//! This crate contains the orchestrator that owns the loaded engine and
//! answers queries against it.

pub mod orchestrator;

pub use orchestrator::{
    DataPaths, EnrichedRecommendation, Engine, MovieRecommendation, RecommendationOrchestrator,
    RecommendationSet,
};

pub use data_loader::{CREDITS_FILE, MOVIES_FILE};
