#![allow(dead_code)] // each test binary uses a subset of these helpers

//! Shared harness for API integration tests.
//!
//! Mirrors the router construction in `main.rs` so tests exercise the
//! same middleware stack (CORS, request ID, timeout, rate limit, panic
//! recovery) that production uses. Uploads go to a per-test temp dir.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use toyshop_api::config::ServerConfig;
use toyshop_api::router::build_app_router;
use toyshop_api::state::AppState;
use toyshop_core::ratelimit::FixedWindowLimiter;
use toyshop_core::uploads::UploadStore;

/// Build a test `ServerConfig` with safe defaults.
///
/// The rate limit is set high enough that ordinary tests never trip it
/// (oneshot-driven requests all share one limiter bucket).
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        upload_dir: "uploads".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        rate_limit_max: 10_000,
        rate_limit_window_secs: 900,
    }
}

/// Build the full application router plus the temp dir backing its
/// upload store. Keep the `TempDir` alive for the duration of the test.
pub fn build_test_app(pool: SqlitePool) -> (Router, TempDir) {
    build_test_app_with_limit(pool, 10_000)
}

/// Same as [`build_test_app`] but with a custom rate limit ceiling.
pub fn build_test_app_with_limit(pool: SqlitePool, rate_limit_max: u32) -> (Router, TempDir) {
    let dir = tempfile::tempdir().expect("temp upload dir");
    std::fs::create_dir_all(dir.path().join("images")).unwrap();
    std::fs::create_dir_all(dir.path().join("sounds")).unwrap();

    let mut config = test_config();
    config.rate_limit_max = rate_limit_max;

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        uploads: Arc::new(UploadStore::new(dir.path())),
        limiter: Arc::new(FixedWindowLimiter::new(
            config.rate_limit_max,
            Duration::from_secs(config.rate_limit_window_secs),
        )),
        started_at: Instant::now(),
    };

    (build_app_router(state), dir)
}

/// Drive a GET request through the router.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Drive a DELETE request through the router.
pub async fn delete(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Drive a multipart request (POST or PUT) through the router.
pub async fn send_multipart(
    app: Router,
    method: Method,
    uri: &str,
    form: MultipartBuilder,
) -> Response {
    let (content_type, body) = form.build();
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", content_type)
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body into raw bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Hand-rolled multipart/form-data body builder.
pub struct MultipartBuilder {
    boundary: &'static str,
    body: Vec<u8>,
}

impl Default for MultipartBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self {
            boundary: "toyshop-test-boundary",
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn build(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.body,
        )
    }
}
