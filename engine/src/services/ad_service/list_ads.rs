// Handler for GET /api/ads
use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;

use super::helpers::{to_ad_response, AdResponse};
use super::AdService;
use crate::error::EngineError;

pub async fn handle_list_ads(
    State(service): State<Arc<AdService>>,
) -> Result<Json<Vec<AdResponse>>, EngineError> {
    let records = service.store.list().await?;
    tracing::debug!(count = records.len(), "Listing ad records");
    Ok(Json(records.iter().map(to_ad_response).collect()))
}
