use std::sync::Arc;

use fence_core::catalog::{Catalog, FenceSystem, HouseStyle};
use fence_core::texture::TextureStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is a small value.
/// Catalog data is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Typed product definitions.
    pub catalog: Arc<Catalog>,
    /// Fence systems listed by `GET /api/systems`.
    pub systems: Arc<Vec<FenceSystem>>,
    /// House styles listed by `GET /api/house-styles`.
    pub house_styles: Arc<Vec<HouseStyle>>,
    /// TIFF/PNG textures inside the asset directory.
    pub textures: TextureStore,
}

impl AppState {
    /// Assemble state from configuration and an already loaded catalog.
    pub fn new(config: ServerConfig, catalog: Catalog) -> Self {
        let textures = TextureStore::new(config.asset_path(), config.asset_url_prefix());
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            systems: Arc::new(fence_core::catalog::builtin_systems()),
            house_styles: Arc::new(fence_core::catalog::builtin_house_styles()),
            textures,
        }
    }
}
