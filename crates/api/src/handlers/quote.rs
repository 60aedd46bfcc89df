//! Handler for the cost breakdown endpoint.

use axum::Json;
use fence_core::element::FenceElement;
use fence_core::quote::{self, Quote, QuoteSettings};
use serde::Deserialize;

use crate::error::AppResult;

/// Request body for `POST /api/quote`.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub elements: Vec<FenceElement>,
    #[serde(default)]
    pub settings: QuoteSettings,
}

/// POST /api/quote
///
/// Pure computation over the submitted elements; nothing is stored.
pub async fn build_quote(Json(body): Json<QuoteRequest>) -> AppResult<Json<Quote>> {
    let quote = quote::build_quote(&body.elements, &body.settings)?;
    tracing::debug!(
        elements = quote.element_count,
        grand_total = quote.grand_total,
        "Built quote"
    );
    Ok(Json(quote))
}
