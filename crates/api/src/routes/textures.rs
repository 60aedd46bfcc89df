use axum::routing::get;
use axum::Router;

use crate::handlers::texture;
use crate::state::AppState;

/// Texture lookup and conversion routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/convert-tif/{filename}", get(texture::convert_tif))
        .route("/texture-info/{filename}", get(texture::texture_info))
}
