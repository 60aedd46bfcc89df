//! Handlers for TIFF texture inspection and PNG conversion.

use axum::extract::{Path, State};
use axum::Json;
use fence_core::error::CoreError;
use fence_core::texture::{ConversionStatus, TextureInfo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub message: &'static str,
    pub png_url: String,
    pub filename: String,
}

/// GET /api/convert-tif/{filename}
///
/// Returns the existing PNG if one was produced earlier, otherwise decodes
/// the TIFF on the blocking pool and writes the PNG next to it.
pub async fn convert_tif(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Json<ConvertResponse>> {
    let store = state.textures.clone();
    let name = filename.clone();
    let outcome = tokio::task::spawn_blocking(move || store.convert_to_png(&name))
        .await
        .map_err(|e| AppError::failed("TIF conversion failed", e))?
        .map_err(|e| match e {
            CoreError::NotFound { .. } => AppError::NotFound("TIF file not found".to_string()),
            CoreError::Validation(msg) => AppError::BadRequest(msg),
            other => AppError::failed("TIF conversion failed", other),
        })?;

    let message = match outcome.status {
        ConversionStatus::AlreadyExists => {
            tracing::debug!(png = %outcome.filename, "PNG already exists");
            "PNG already exists"
        }
        ConversionStatus::Converted => {
            tracing::info!(tif = %filename, png = %outcome.filename, "Converted TIF to PNG");
            "TIF converted to PNG successfully"
        }
    };

    Ok(Json(ConvertResponse {
        message,
        png_url: outcome.png_url,
        filename: outcome.filename,
    }))
}

/// GET /api/texture-info/{filename}
pub async fn texture_info(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Json<TextureInfo>> {
    let info = state.textures.info(&filename).map_err(|e| match e {
        CoreError::Validation(msg) => AppError::BadRequest(msg),
        other => AppError::failed("Failed to get texture info", other),
    })?;
    Ok(Json(info))
}
