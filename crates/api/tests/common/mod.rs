#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use fence_core::catalog::Catalog;
use http_body_util::BodyExt;
use tower::ServiceExt;

use fence_api::config::ServerConfig;
use fence_api::router::build_app_router;
use fence_api::state::AppState;

/// Build a test `ServerConfig` rooted at `static_dir`.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(static_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        static_dir: static_dir.to_path_buf(),
        asset_dir: "Ogrodzenie".to_string(),
        max_upload_bytes: 1024 * 1024,
        catalog_path: None,
    }
}

/// Build the full application router, with the same middleware stack
/// production uses, serving files from `static_dir`.
pub fn build_test_app(static_dir: &Path) -> Router {
    let config = test_config(static_dir);
    std::fs::create_dir_all(config.asset_path()).unwrap();
    let state = AppState::new(config.clone(), Catalog::builtin().unwrap());
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Write a small RGB TIFF into the asset directory.
pub fn write_tiff(static_dir: &Path, name: &str) {
    let img = image::RgbImage::from_pixel(2, 2, image::Rgb([200, 10, 10]));
    img.save_with_format(
        static_dir.join("Ogrodzenie").join(name),
        image::ImageFormat::Tiff,
    )
    .unwrap();
}
