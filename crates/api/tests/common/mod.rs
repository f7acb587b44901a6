#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use notekeeper_api::config::{ServerConfig, StoreKind};
use notekeeper_api::router::build_app_router;
use notekeeper_api::state::AppState;
use notekeeper_core::memory::InMemoryNoteRepository;
use notekeeper_core::service::NoteService;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store: StoreKind::Memory,
        database_url: None,
        database_max_connections: 1,
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// Goes through `build_app_router`, so tests exercise the same middleware
/// stack (CORS, request ID, timeout, tracing, panic recovery) as production.
pub fn build_test_app() -> Router {
    let config = test_config();
    let state = AppState {
        notes: NoteService::new(Arc::new(InMemoryNoteRepository::new())),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_empty(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a raw body with an explicit content type.
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    content_type: &str,
    body: &str,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Create a note through the API and return its JSON.
pub async fn create_note(app: &Router, title: &str, content: &str) -> serde_json::Value {
    let response = post_json(
        app,
        "/api/notes",
        serde_json::json!({ "title": title, "content": content }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}

/// Ids of the notes in a JSON array body.
pub fn ids(json: &serde_json::Value) -> Vec<i64> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|note| note["id"].as_i64().unwrap())
        .collect()
}
