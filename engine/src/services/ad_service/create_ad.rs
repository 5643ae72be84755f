// Handler for POST /api/ads
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Json;

use super::helpers::{from_ad_payload, to_ad_response, AdPayload, AdResponse};
use super::AdService;
use crate::error::EngineError;

pub async fn handle_create_ad(
    State(service): State<Arc<AdService>>,
    payload: Result<Json<AdPayload>, JsonRejection>,
) -> Result<Json<AdResponse>, EngineError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected ad payload");
        EngineError::InvalidRequest(rejection.body_text())
    })?;

    let stored = service.store.create(from_ad_payload(payload)).await?;
    tracing::info!(
        id = stored.id,
        date = %stored.record.date,
        cost = stored.record.cost,
        lead_count = stored.record.lead_count,
        message_count = stored.record.message_count,
        "Stored ad record"
    );
    Ok(Json(to_ad_response(&stored)))
}
