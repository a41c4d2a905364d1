//! Health, test and fallback routes

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{app, body_json, body_text, get, send, InMemoryCatalog};
use streamhost_core::{config::RuntimeEnvironment, Config};

#[tokio::test]
async fn test_health_reports_connected_database() {
    let response = get(app(Config::default(), InMemoryCatalog::healthy()), "/api/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "connected");
    assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_health_reports_disconnected_database() {
    let response = get(app(Config::default(), InMemoryCatalog::default()), "/api/health").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["database"], "disconnected");
    assert!(json["error"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_api_test_route() {
    let response = get(app(Config::default(), InMemoryCatalog::healthy()), "/api/test").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "API working");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_unknown_api_route_is_json_404() {
    let response = get(app(Config::default(), InMemoryCatalog::healthy()), "/api/nope").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Route not found");
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn test_unknown_route_without_dashboard_is_json_404() {
    let response = get(app(Config::default(), InMemoryCatalog::healthy()), "/dashboard").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Route not found");
}

#[tokio::test]
async fn test_production_serves_dashboard_with_spa_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>dashboard</html>").unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log(1)").unwrap();

    let mut config = Config::default();
    config.environment = RuntimeEnvironment::Production;
    config.cors.allowed_origins = vec!["https://dash.example.com".to_string()];
    config.server.static_dir = Some(dir.path().to_string_lossy().into_owned());

    let asset = get(app(config.clone(), InMemoryCatalog::healthy()), "/app.js").await;
    assert_eq!(asset.status(), StatusCode::OK);
    assert_eq!(body_text(asset).await, "console.log(1)");

    let route = get(app(config.clone(), InMemoryCatalog::healthy()), "/players/live").await;
    assert_eq!(route.status(), StatusCode::OK);
    assert!(body_text(route).await.contains("dashboard"));

    let api = get(app(config, InMemoryCatalog::healthy()), "/api/missing").await;
    assert_eq!(api.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(api).await["error"], "Route not found");
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mut config = Config::default();
    config.server.body_limit_bytes = 16;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/upload")
        .header(header::CONTENT_LENGTH, "64")
        .body(Body::from(vec![b'x'; 64]))
        .unwrap();
    let response = send(app(config, InMemoryCatalog::healthy()), request).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_cors_allows_configured_dev_origin() {
    let request = Request::builder()
        .uri("/api/test")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = send(app(Config::default(), InMemoryCatalog::healthy()), request).await;

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}
