mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::post,
};
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::SqlitePool;
use expiring_shortener::api::handlers::shorten_handler;
use expiring_shortener::state::AppState;
use tower::ServiceExt;

fn make_app(state: AppState) -> Router {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .with_state(state)
}

fn make_server(state: AppState) -> TestServer {
    TestServer::new(make_app(state)).unwrap()
}

fn parse_time(value: &serde_json::Value) -> DateTime<Utc> {
    value
        .as_str()
        .unwrap()
        .parse::<DateTime<Utc>>()
        .unwrap()
}

#[sqlx::test]
async fn test_shorten_success(pool: SqlitePool) {
    let server = make_server(common::create_test_state(pool.clone()));

    let response = server
        .post("/shorten")
        .add_header("Host", "s.example.com")
        .json(&json!({ "url": "https://example.com/some/long/path", "expiryMinutes": 60 }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    let shortened = json["shortenedUrl"].as_str().unwrap();
    let short_id = shortened.strip_prefix("http://s.example.com/").unwrap();

    assert_eq!(short_id.len(), 8);
    assert!(short_id.chars().all(|c| c.is_ascii_alphanumeric()));
    assert!(json["expiresAt"].is_string());
    assert_eq!(common::count_mappings(&pool).await, 1);
}

#[sqlx::test]
async fn test_shorten_host_with_port(pool: SqlitePool) {
    let server = make_server(common::create_test_state(pool));

    let response = server
        .post("/shorten")
        .add_header("Host", "localhost:3000")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert!(
        json["shortenedUrl"]
            .as_str()
            .unwrap()
            .starts_with("http://localhost:3000/")
    );
}

#[sqlx::test]
async fn test_shorten_default_expiry_is_one_day(pool: SqlitePool) {
    let server = make_server(common::create_test_state(pool));
    let before = Utc::now();

    let response = server
        .post("/shorten")
        .add_header("Host", "s.example.com")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let expires_at = parse_time(&response.json::<serde_json::Value>()["expiresAt"]);
    let window = expires_at - before;

    assert!(window <= chrono::Duration::minutes(1440));
    assert!(window > chrono::Duration::minutes(1439));
}

#[sqlx::test]
async fn test_shorten_zero_expiry_uses_default(pool: SqlitePool) {
    let server = make_server(common::create_test_state(pool));
    let before = Utc::now();

    let response = server
        .post("/shorten")
        .add_header("Host", "s.example.com")
        .json(&json!({ "url": "https://example.com", "expiryMinutes": 0 }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let expires_at = parse_time(&response.json::<serde_json::Value>()["expiresAt"]);
    assert!(expires_at - before > chrono::Duration::minutes(1439));
}

#[sqlx::test]
async fn test_shorten_expiry_as_string(pool: SqlitePool) {
    let server = make_server(common::create_test_state(pool));
    let before = Utc::now();

    let response = server
        .post("/shorten")
        .add_header("Host", "s.example.com")
        .json(&json!({ "url": "https://example.com", "expiryMinutes": "5" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let expires_at = parse_time(&response.json::<serde_json::Value>()["expiresAt"]);
    assert!(expires_at - before <= chrono::Duration::minutes(5));
    assert!(expires_at - before > chrono::Duration::minutes(4));
}

#[sqlx::test]
async fn test_shorten_missing_url(pool: SqlitePool) {
    let server = make_server(common::create_test_state(pool.clone()));

    let response = server
        .post("/shorten")
        .add_header("Host", "s.example.com")
        .json(&json!({ "expiryMinutes": 60 }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(common::count_mappings(&pool).await, 0);
}

#[sqlx::test]
async fn test_shorten_empty_url(pool: SqlitePool) {
    let server = make_server(common::create_test_state(pool.clone()));

    let response = server
        .post("/shorten")
        .add_header("Host", "s.example.com")
        .json(&json!({ "url": "" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(common::count_mappings(&pool).await, 0);
}

#[sqlx::test]
async fn test_shorten_invalid_url(pool: SqlitePool) {
    let server = make_server(common::create_test_state(pool.clone()));

    let response = server
        .post("/shorten")
        .add_header("Host", "s.example.com")
        .json(&json!({ "url": "not a url" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(common::count_mappings(&pool).await, 0);
}

#[sqlx::test]
async fn test_shorten_negative_expiry(pool: SqlitePool) {
    let server = make_server(common::create_test_state(pool.clone()));

    let response = server
        .post("/shorten")
        .add_header("Host", "s.example.com")
        .json(&json!({ "url": "https://example.com", "expiryMinutes": -5 }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(common::count_mappings(&pool).await, 0);
}

#[sqlx::test]
async fn test_shorten_uses_public_base_url(pool: SqlitePool) {
    let mut state = common::create_test_state(pool);
    state.public_base_url = Some("https://sho.rt/".to_string());
    let server = make_server(state);

    let response = server
        .post("/shorten")
        .add_header("Host", "internal:8080")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    let shortened = json["shortenedUrl"].as_str().unwrap();
    assert!(shortened.starts_with("https://sho.rt/"));
    assert_eq!(shortened.len(), "https://sho.rt/".len() + 8);
}

#[sqlx::test]
async fn test_shorten_behind_proxy(pool: SqlitePool) {
    let mut state = common::create_test_state(pool);
    state.behind_proxy = true;
    let server = make_server(state);

    let response = server
        .post("/shorten")
        .add_header("Host", "127.0.0.1:3000")
        .add_header("X-Forwarded-Proto", "https")
        .add_header("X-Forwarded-Host", "s.example.com")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert!(
        json["shortenedUrl"]
            .as_str()
            .unwrap()
            .starts_with("https://s.example.com/")
    );
}

#[sqlx::test]
async fn test_shorten_same_url_twice_yields_distinct_ids(pool: SqlitePool) {
    let server = make_server(common::create_test_state(pool.clone()));

    let mut urls = Vec::new();
    for _ in 0..2 {
        let response = server
            .post("/shorten")
            .add_header("Host", "s.example.com")
            .json(&json!({ "url": "https://example.com" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        urls.push(response.json::<serde_json::Value>()["shortenedUrl"].clone());
    }

    assert_ne!(urls[0], urls[1]);
    assert_eq!(common::count_mappings(&pool).await, 2);
}

#[sqlx::test]
async fn test_shorten_host_from_uri_authority(pool: SqlitePool) {
    // HTTP/2 requests carry the host as `:authority`, with no Host header.
    let app = make_app(common::create_test_state(pool));
    let request = Request::builder()
        .method("POST")
        .uri("https://s.example.com:8443/shorten")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"url":"https://example.com"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(
        json["shortenedUrl"]
            .as_str()
            .unwrap()
            .starts_with("https://s.example.com:8443/")
    );
}

#[sqlx::test]
async fn test_shorten_malformed_body_uses_error_shape(pool: SqlitePool) {
    let server = make_server(common::create_test_state(pool.clone()));

    let wrong_type = server
        .post("/shorten")
        .add_header("Host", "s.example.com")
        .json(&json!({ "url": 123 }))
        .await;
    let not_json = server
        .post("/shorten")
        .add_header("Host", "s.example.com")
        .add_header("Content-Type", "application/json")
        .text("url=https://example.com")
        .await;
    let no_content_type = server
        .post("/shorten")
        .add_header("Host", "s.example.com")
        .bytes(r#"{"url":"https://example.com"}"#.into())
        .await;

    for response in [wrong_type, not_json, no_content_type] {
        response.assert_status_bad_request();
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"]["code"], "validation_error");
        assert!(json["error"]["details"]["reason"].is_string());
    }
    assert_eq!(common::count_mappings(&pool).await, 0);
}
