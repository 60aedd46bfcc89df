pub mod catalog;
pub mod health;
pub mod textures;

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::config::ServerConfig;
use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                  service status
///
/// /systems                                 fence system descriptors
/// /house-styles                            house style descriptors
/// /catalog                                 typed product catalog
/// /catalog/{id}                            one catalog entry
///
/// /upload-system                           multipart model upload (POST)
/// /export-pdf                              PDF export placeholder (POST)
/// /quote                                   cost breakdown (POST)
///
/// /convert-tif/{filename}                  TIFF -> PNG conversion
/// /texture-info/{filename}                 TIFF/PNG pair status
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(catalog::router())
        .merge(textures::router())
        .route(
            "/upload-system",
            post(handlers::upload::upload_system)
                .layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
        .route("/export-pdf", post(handlers::export::export_pdf))
        .route("/quote", post(handlers::quote::build_quote))
}
