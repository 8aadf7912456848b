#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use shelter_api::config::ServerConfig;
use shelter_api::router::build_app_router;
use shelter_api::state::AppState;

pub const BOUNDARY: &str = "shelter-test-boundary";

/// Build a test `ServerConfig` with safe defaults and the given upload directory.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_timeout_secs: 300,
        upload_dir: upload_dir.to_path_buf(),
        max_upload_bytes: 16 * 1024 * 1024,
    }
}

/// Build the full application router (same middleware stack as `main.rs`).
pub fn build_test_app(pool: PgPool, upload_dir: &Path) -> Router {
    build_app_router(AppState::new(pool, test_config(upload_dir)))
}

/// Shared state for tests that drive the router and the state side by side.
pub fn test_state(pool: PgPool, upload_dir: &Path) -> AppState {
    AppState::new(pool, test_config(upload_dir))
}

/// Build the router from a custom configuration.
pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    build_app_router(AppState::new(pool, config))
}

/// Same as [`build_test_app`] with a custom body cap.
pub fn build_test_app_with_limit(pool: PgPool, upload_dir: &Path, max_bytes: usize) -> Router {
    let mut config = test_config(upload_dir);
    config.max_upload_bytes = max_bytes;
    build_app_router(AppState::new(pool, config))
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::post(uri).body(Body::empty()).unwrap()).await
}

/// POST an `application/x-www-form-urlencoded` body.
pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// A file part for [`multipart_body`].
pub struct FilePart<'a> {
    pub field: &'a str,
    pub filename: &'a str,
    pub data: &'a [u8],
}

/// Encode text fields and an optional file as `multipart/form-data`.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<FilePart<'_>>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n",
                file.field, file.filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(app: Router, uri: &str, body: Vec<u8>) -> Response<Body> {
    let request = Request::post(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Standard valid add-dog text fields.
pub fn dog_fields(name: &str) -> Vec<(&str, &str)> {
    vec![
        ("name", name),
        ("breed", "Labrador"),
        ("age", "4"),
        ("description", "Loves long walks"),
    ]
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
