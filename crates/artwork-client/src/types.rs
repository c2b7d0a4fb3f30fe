use serde::{Deserialize, Serialize};

/// Poster shown when the service has no match for a title
pub const NO_IMAGE_POSTER: &str = "https://via.placeholder.com/500x750?text=No+Image";
/// Poster shown when the lookup itself failed
pub const ERROR_POSTER: &str = "https://via.placeholder.com/500x750?text=Error";

/// Poster and optional trailer for one title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub poster_url: String,
    /// Embeddable YouTube URL
    pub trailer_url: Option<String>,
}

impl Artwork {
    pub fn no_image() -> Self {
        Self {
            poster_url: NO_IMAGE_POSTER.to_string(),
            trailer_url: None,
        }
    }

    pub fn error() -> Self {
        Self {
            poster_url: ERROR_POSTER.to_string(),
            trailer_url: None,
        }
    }

    /// True for either placeholder poster
    pub fn is_placeholder(&self) -> bool {
        self.poster_url == NO_IMAGE_POSTER || self.poster_url == ERROR_POSTER
    }
}

// TMDB wire types, only the fields we read

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchHit {
    pub id: Option<u64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideosResponse {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Video {
    pub key: Option<String>,
    pub site: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
