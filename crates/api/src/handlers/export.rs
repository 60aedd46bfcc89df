//! Handler for the PDF export placeholder.

use axum::body::Bytes;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Optional request body for `POST /api/export-pdf`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPdfRequest {
    #[serde(default)]
    pub project_data: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPdfResponse {
    pub message: &'static str,
    pub download_url: &'static str,
}

/// POST /api/export-pdf
///
/// No document is generated yet; the response points at the fixed location
/// a generated PDF will be published under.
pub async fn export_pdf(body: Bytes) -> AppResult<Json<ExportPdfResponse>> {
    let request: ExportPdfRequest = if body.is_empty() {
        ExportPdfRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::failed("Export failed", e))?
    };

    let element_count = request
        .project_data
        .as_ref()
        .and_then(|p| p.get("elements"))
        .and_then(|e| e.as_array())
        .map_or(0, Vec::len);
    tracing::info!(element_count, "PDF export requested");

    Ok(Json(ExportPdfResponse {
        message: "PDF export initiated",
        download_url: "/exports/fence-project.pdf",
    }))
}
