// engine/src/services/ad_service/mod.rs
// Router and shared state for /api/ads. Each verb has its handler in a sibling module.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::data::record_store::RecordStore;

pub mod create_ad;
pub mod helpers;
pub mod list_ads;

pub struct AdService {
    store: Arc<dyn RecordStore>,
}

impl AdService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        AdService { store }
    }
}

pub fn router(store: Arc<dyn RecordStore>) -> Router {
    let service = Arc::new(AdService::new(store));
    Router::new()
        .route(
            "/api/ads",
            get(list_ads::handle_list_ads).post(create_ad::handle_create_ad),
        )
        .layer(CorsLayer::permissive())
        .with_state(service)
}
