//! Handlers for the read-only catalog endpoints.

use axum::extract::{Path, State};
use axum::Json;
use fence_core::catalog::{FenceCatalogEntry, FenceSystem, HouseStyle};
use fence_core::error::CoreError;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/systems
pub async fn list_systems(State(state): State<AppState>) -> Json<Vec<FenceSystem>> {
    Json((*state.systems).clone())
}

/// GET /api/house-styles
pub async fn list_house_styles(State(state): State<AppState>) -> Json<Vec<HouseStyle>> {
    Json((*state.house_styles).clone())
}

/// GET /api/catalog
pub async fn list_catalog(State(state): State<AppState>) -> Json<Vec<FenceCatalogEntry>> {
    Json(state.catalog.entries().to_vec())
}

/// GET /api/catalog/{id}
pub async fn get_catalog_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<FenceCatalogEntry>> {
    let entry = state
        .catalog
        .get(&id)
        .cloned()
        .ok_or(CoreError::NotFound {
            entity: "FenceCatalogEntry",
            id,
        })?;
    Ok(Json(entry))
}
