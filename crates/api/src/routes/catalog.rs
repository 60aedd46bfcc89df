use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Read-only catalog routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/systems", get(catalog::list_systems))
        .route("/house-styles", get(catalog::list_house_styles))
        .route("/catalog", get(catalog::list_catalog))
        .route("/catalog/{id}", get(catalog::get_catalog_entry))
}
