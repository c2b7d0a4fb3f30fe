use thiserror::Error;

/// Errors that can occur when talking to the artwork service
#[derive(Error, Debug)]
pub enum ArtworkError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Artwork service returned status {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("Invalid response from artwork service: {0}")]
    InvalidResponse(String),

    #[error("No API key configured")]
    MissingApiKey,
}

pub type Result<T> = std::result::Result<T, ArtworkError>;
