use super::*;

fn test_client(base_url: &str) -> ReviewsClient {
    ReviewsClient::with_base_url(base_url, 30).expect("client construction should not fail")
}

#[test]
fn endpoint_appends_segments_to_origin() {
    let client = test_client("http://localhost:8000");
    let url = client.endpoint(&["api", "reviews", "stats", "dashboard"]);
    assert_eq!(url.as_str(), "http://localhost:8000/api/reviews/stats/dashboard");
}

#[test]
fn endpoint_keeps_mount_prefix_and_strips_trailing_slash() {
    let client = test_client("https://example.com/backend/");
    let url = client.endpoint(&["api", "reviews"]);
    assert_eq!(url.as_str(), "https://example.com/backend/api/reviews");
}

#[test]
fn endpoint_encodes_review_id_as_single_segment() {
    let client = test_client("http://localhost:8000");
    let url = client.endpoint(&["api", "reviews", "a/b c"]);
    assert_eq!(url.as_str(), "http://localhost:8000/api/reviews/a%2Fb%20c");
}

#[test]
fn rejects_non_http_base_url() {
    let err = ReviewsClient::with_base_url("not a url", 30).unwrap_err();
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
    let err = ReviewsClient::with_base_url("ftp://files.example.com", 30).unwrap_err();
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
}

#[test]
fn from_config_uses_configured_origin() {
    let config = AppConfig {
        api_url: "http://reviews.internal:9000".to_string(),
        env: revdash_core::Environment::Test,
        log_level: "info".to_string(),
        request_timeout_secs: 5,
        user_agent: "test-agent".to_string(),
        page_size: 10,
    };
    let client = ReviewsClient::from_config(&config).unwrap();
    assert_eq!(client.base_url().as_str(), "http://reviews.internal:9000/");
}
