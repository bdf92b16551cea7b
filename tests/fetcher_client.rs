use novynar::fetcher::{FeedFetcher, FetchError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header_exists, method, path},
};

const FEED_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>t</title></channel></rss>"#;

#[tokio::test]
async fn test_fetch_success_returns_raw_bytes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(FEED_BODY.as_bytes())
                .insert_header("Content-Type", "application/rss+xml"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/feed.xml", mock_server.uri());
    let body = FeedFetcher::new().fetch(&url).await.unwrap();

    assert!(body.starts_with(b"<?xml"));
}

#[tokio::test]
async fn test_fetch_presents_a_browser_identity() {
    let mock_server = MockServer::start().await;

    // Requests that do not look like a browser never match this mock, so the
    // expectation fails on drop if identity headers are missing.
    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .and(header_exists("user-agent"))
        .and(header_exists("accept"))
        .and(header_exists("accept-language"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(FEED_BODY.as_bytes()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/feed.xml", mock_server.uri());
    FeedFetcher::new().fetch(&url).await.unwrap();
}

#[tokio::test]
async fn test_fetch_404_is_a_failure_value() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing", mock_server.uri());
    let result = FeedFetcher::new().fetch(&url).await;

    match result {
        Err(FetchError::Http { status }) => assert_eq!(status.as_u16(), 404),
        other => panic!("Expected HTTP 404 error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_503_is_a_failure_value() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let url = format!("{}/down", mock_server.uri());
    let result = FeedFetcher::new().fetch(&url).await;

    match result {
        Err(FetchError::Http { status }) => assert_eq!(status.as_u16(), 503),
        other => panic!("Expected HTTP 503 error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_follows_redirects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/feed.xml"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(FEED_BODY.as_bytes()))
        .mount(&mock_server)
        .await;

    let url = format!("{}/moved", mock_server.uri());
    let body = FeedFetcher::new().fetch(&url).await.unwrap();

    assert!(body.starts_with(b"<?xml"));
}

#[tokio::test]
async fn test_fetch_invalid_url() {
    let result = FeedFetcher::new().fetch("not-a-valid-url").await;

    match result {
        Err(FetchError::InvalidUrl(_)) => {}
        other => panic!("Expected InvalidUrl error, got {other:?}"),
    }
}
