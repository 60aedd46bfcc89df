//! Handler for uploading a new fence system model bundle.

use axum::extract::{Multipart, State};
use axum::Json;
use fence_core::catalog::FenceSystem;
use fence_core::upload::{build_uploaded_system, sanitize_upload_name, UploadedFiles};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    pub system: FenceSystem,
}

/// A file part held in memory until the whole form has been read.
struct FilePart {
    name: String,
    data: Vec<u8>,
}

/// POST /api/upload-system
///
/// Multipart fields: `objFile` and `mtlFile` (required), `textureFile`
/// (optional), `name` and `basePrice`. Files are written into the asset
/// directory under their original names, replacing any existing file.
pub async fn upload_system(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut obj: Option<FilePart> = None;
    let mut mtl: Option<FilePart> = None;
    let mut texture: Option<FilePart> = None;
    let mut name: Option<String> = None;
    let mut base_price: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "objFile" | "mtlFile" | "textureFile" => {
                // Browsers send an empty part for a file input left blank.
                let raw_name = field.file_name().unwrap_or("").to_string();
                if raw_name.is_empty() {
                    continue;
                }
                let file_name = sanitize_upload_name(&raw_name)?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let part = Some(FilePart {
                    name: file_name,
                    data: data.to_vec(),
                });
                match field_name.as_str() {
                    "objFile" => obj = part,
                    "mtlFile" => mtl = part,
                    _ => texture = part,
                }
            }
            "name" | "basePrice" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if field_name == "name" {
                    name = Some(text);
                } else {
                    base_price = Some(text);
                }
            }
            _ => {} // ignore unknown fields
        }
    }

    let (Some(obj), Some(mtl)) = (obj, mtl) else {
        return Err(AppError::BadRequest(
            "OBJ and MTL files are required".to_string(),
        ));
    };
    let name = name.ok_or_else(|| AppError::BadRequest("Missing required 'name' field".into()))?;

    let files = UploadedFiles {
        obj_file: obj.name.clone(),
        mtl_file: mtl.name.clone(),
        texture_file: texture.as_ref().map(|t| t.name.clone()),
    };
    let system = build_uploaded_system(
        &name,
        base_price.as_deref(),
        &files,
        &state.config.asset_url_prefix(),
    )?;

    let dir = state.config.asset_path();
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::failed("Upload failed", e))?;
    for part in [Some(obj), Some(mtl), texture].into_iter().flatten() {
        tokio::fs::write(dir.join(&part.name), &part.data)
            .await
            .map_err(|e| AppError::failed("Upload failed", e))?;
    }

    tracing::info!(
        system_id = %system.id,
        obj = %files.obj_file,
        mtl = %files.mtl_file,
        texture = ?files.texture_file,
        "Uploaded fence system"
    );

    Ok(Json(UploadResponse {
        message: "System uploaded successfully",
        system,
    }))
}
