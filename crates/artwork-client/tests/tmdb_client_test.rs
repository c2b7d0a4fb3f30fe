//! Tests against a mock TMDB API.

use artwork_client::{
    Artwork, ArtworkError, ArtworkLookup, ERROR_POSTER, NO_IMAGE_POSTER, TmdbClient, TmdbConfig,
};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(api_url: &str) -> TmdbClient {
    let config = TmdbConfig::new("test-key")
        .with_api_url(api_url)
        .with_timeout(Duration::from_secs(2));
    TmdbClient::new(config).unwrap()
}

fn search_avatar() -> Value {
    json!({
        "results": [
            {"id": 19995, "poster_path": "/avatar.jpg", "backdrop_path": "/bg.jpg"},
            {"id": 2}
        ]
    })
}

fn videos_avatar() -> Value {
    json!({
        "results": [
            {"key": "clip", "site": "YouTube", "type": "Clip"},
            {"key": "5PSNL1qE6VY", "site": "YouTube", "type": "Trailer"}
        ]
    })
}

/// Search answers with `search` and the Avatar videos endpoint with its trailers.
async fn mount_avatar(server: &MockServer, search: Value) {
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/19995/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(videos_avatar()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_lookup_poster_and_trailer() {
    let server = MockServer::start().await;
    mount_avatar(&server, search_avatar()).await;

    let artwork = client(&server.uri()).lookup("Avatar").await.unwrap();
    assert_eq!(
        artwork,
        Artwork {
            poster_url: "https://image.tmdb.org/t/p/w500/avatar.jpg".to_string(),
            trailer_url: Some("https://www.youtube.com/embed/5PSNL1qE6VY".to_string()),
        }
    );
}

#[tokio::test]
async fn test_no_results_is_no_image_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "Nothing Like This"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let artwork = client(&server.uri())
        .lookup("Nothing Like This")
        .await
        .unwrap();
    assert_eq!(artwork.poster_url, NO_IMAGE_POSTER);
    assert!(artwork.trailer_url.is_none());
}

#[tokio::test]
async fn test_server_error_is_reported_and_placeholder_used() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let client = client(&server.uri());

    let err = client.lookup("Avatar").await.unwrap_err();
    assert!(matches!(err, ArtworkError::Status { status: 500, .. }));

    let artwork = client.lookup_or_placeholder("Avatar").await;
    assert_eq!(artwork.poster_url, ERROR_POSTER);
    assert!(artwork.is_placeholder());
    assert_eq!(client.cached().await, 0);
}

#[tokio::test]
async fn test_malformed_json_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server.uri()).lookup("Avatar").await.unwrap_err();
    assert!(matches!(err, ArtworkError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_results_are_cached_per_title() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_avatar()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/19995/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(videos_avatar()))
        .expect(1)
        .mount(&server)
        .await;
    let client = client(&server.uri());

    let first = client.lookup("Avatar").await.unwrap();
    let second = client.lookup("  avatar ").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(client.cached().await, 1);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    server.verify().await;
}

#[tokio::test]
async fn test_unreachable_service_is_http_error() {
    // bind then drop so the port is closed
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client(&url).lookup("Avatar").await.unwrap_err();
    assert!(matches!(err, ArtworkError::Http(_)));
}
