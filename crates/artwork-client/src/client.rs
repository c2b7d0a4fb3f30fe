//! TMDB-backed artwork lookup.
//!
//! One lookup is two requests:
//! 1. `GET {api_url}/search/movie?query=...` and take the first hit
//! 2. `GET {api_url}/movie/{id}/videos` and take the first YouTube trailer or teaser
//!
//! Results are cached in memory by title. Failures are not cached, so a
//! later call retries.

use crate::error::{ArtworkError, Result};
use crate::types::{Artwork, SearchHit, SearchResponse, VideosResponse};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

pub const DEFAULT_API_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const YOUTUBE_EMBED_URL: &str = "https://www.youtube.com/embed";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Anything that can find a poster and trailer for a title.
#[async_trait::async_trait]
pub trait ArtworkLookup: Send + Sync {
    /// Artwork for `title`. A title with no match is `Ok` with the
    /// no-image placeholder; only transport and protocol failures are `Err`.
    async fn lookup(&self, title: &str) -> Result<Artwork>;

    /// Like `lookup`, but failures become the error placeholder.
    async fn lookup_or_placeholder(&self, title: &str) -> Artwork {
        match self.lookup(title).await {
            Ok(artwork) => artwork,
            Err(e) => {
                warn!(title = %title, error = %e, "Artwork lookup failed");
                Artwork::error()
            }
        }
    }
}

/// Connection settings for [`TmdbClient`]
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub api_url: String,
    pub image_base_url: String,
    pub timeout: Duration,
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the TMDB search and videos endpoints.
pub struct TmdbClient {
    http_client: HttpClient,
    config: TmdbConfig,
    cache: RwLock<HashMap<String, Artwork>>,
}

impl TmdbClient {
    /// Build a client. Fails when the API key is blank.
    pub fn new(config: TmdbConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ArtworkError::MissingApiKey);
        }
        let http_client = HttpClient::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http_client,
            config,
            cache: RwLock::new(HashMap::new()),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }

    /// Number of cached titles
    pub async fn cached(&self) -> usize {
        self.cache.read().await.len()
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.config.api_url.trim_end_matches('/'), endpoint);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ArtworkError::Status {
                endpoint: endpoint.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            ArtworkError::InvalidResponse(format!("{} returned malformed JSON: {}", endpoint, e))
        })
    }

    async fn fetch(&self, title: &str) -> Result<Artwork> {
        let search: SearchResponse = self.get_json("/search/movie", &[("query", title)]).await?;
        let Some(hit) = search.results.into_iter().next() else {
            debug!(title = %title, "No search results");
            return Ok(Artwork::no_image());
        };

        let poster_url = poster_url(&self.config.image_base_url, &hit);
        let Some(id) = hit.id else {
            return Ok(Artwork {
                poster_url,
                trailer_url: None,
            });
        };

        let videos: VideosResponse = self.get_json(&format!("/movie/{}/videos", id), &[]).await?;
        Ok(Artwork {
            poster_url,
            trailer_url: trailer_url(&videos),
        })
    }
}

#[async_trait::async_trait]
impl ArtworkLookup for TmdbClient {
    #[instrument(skip(self))]
    async fn lookup(&self, title: &str) -> Result<Artwork> {
        let key = title.trim().to_lowercase();
        if key.is_empty() {
            return Ok(Artwork::no_image());
        }
        if let Some(artwork) = self.cache.read().await.get(&key) {
            return Ok(artwork.clone());
        }

        let artwork = self.fetch(title.trim()).await?;
        self.cache.write().await.insert(key, artwork.clone());
        Ok(artwork)
    }
}

/// Poster from `poster_path`, else `backdrop_path`, else the no-image placeholder
fn poster_url(image_base_url: &str, hit: &SearchHit) -> String {
    let path = [&hit.poster_path, &hit.backdrop_path]
        .into_iter()
        .flatten()
        .find(|p| !p.is_empty());
    match path {
        Some(path) => format!("{}{}", image_base_url.trim_end_matches('/'), path),
        None => Artwork::no_image().poster_url,
    }
}

/// First YouTube video whose type is Trailer or Teaser
fn trailer_url(videos: &VideosResponse) -> Option<String> {
    videos
        .results
        .iter()
        .find(|v| {
            v.site.as_deref() == Some("YouTube")
                && matches!(v.kind.as_deref(), Some("Trailer") | Some("Teaser"))
                && v.key.is_some()
        })
        .and_then(|v| v.key.as_ref())
        .map(|key| format!("{}/{}", YOUTUBE_EMBED_URL, key))
}
