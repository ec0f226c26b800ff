#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use entidto_api::config::ServerConfig;
use entidto_api::routes;
use entidto_api::state::AppState;
use entidto_core::StoredRow;
use entidto_db::MemoryStore;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

pub fn person_row(id: i64, username: &str, email: &str, years: i64) -> StoredRow {
    StoredRow::new("Person")
        .with_column("id", id)
        .with_column("username", username)
        .with_column("email", email)
        .with_column("years", years)
}

/// Build the application router over an in-memory `people` store.
pub fn build_test_app() -> Router {
    let people = MemoryStore::with_rows(
        "Person",
        vec![
            person_row(1, "ada", "ada@example.com", 36),
            person_row(2, "grace", "shared@example.com", 45),
            person_row(3, "linus", "shared@example.com", 28),
        ],
    );

    routes::app(AppState {
        people: Arc::new(people),
        config: Arc::new(test_config()),
    })
}

/// Send a request and return the status plus parsed JSON body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
