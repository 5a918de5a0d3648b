mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use sqlx::SqlitePool;
use expiring_shortener::api::handlers::resolve_handler;

fn make_server(pool: SqlitePool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/{short_id}", get(resolve_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_resolve_active(pool: SqlitePool) {
    let server = make_server(pool.clone());
    common::create_active_mapping(&pool, "Act1ve00", "https://example.com/target").await;

    let response = server.get("/Act1ve00").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["fullUrl"], "https://example.com/target");
}

#[sqlx::test]
async fn test_resolve_not_found(pool: SqlitePool) {
    let server = make_server(pool);

    let response = server.get("/Nope1234").await;

    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["message"], "Shortened URL not found");
}

#[sqlx::test]
async fn test_resolve_expired(pool: SqlitePool) {
    let server = make_server(pool.clone());
    common::create_expired_mapping(&pool, "Gone0000", "https://example.com").await;

    let response = server.get("/Gone0000").await;

    response.assert_status(StatusCode::GONE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "expired");
    assert_eq!(json["error"]["message"], "Shortened URL has expired");
}

#[sqlx::test]
async fn test_resolve_expired_leaves_row(pool: SqlitePool) {
    let server = make_server(pool.clone());
    common::create_expired_mapping(&pool, "Gone0001", "https://example.com").await;

    server.get("/Gone0001").await.assert_status(StatusCode::GONE);
    server.get("/Gone0001").await.assert_status(StatusCode::GONE);

    assert_eq!(common::count_mappings(&pool).await, 1);
}

#[sqlx::test]
async fn test_resolve_is_case_sensitive(pool: SqlitePool) {
    let server = make_server(pool.clone());
    common::create_active_mapping(&pool, "MiXeD123", "https://example.com").await;

    server.get("/MiXeD123").await.assert_status_ok();
    server.get("/mixed123").await.assert_status_not_found();
}

#[sqlx::test]
async fn test_resolve_malformed_id_is_not_found(pool: SqlitePool) {
    let server = make_server(pool);

    server.get("/abc").await.assert_status_not_found();
    server.get("/much-too-long-id").await.assert_status_not_found();
}
