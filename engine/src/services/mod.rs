// REST surface over the record store
pub mod ad_service;

pub use ad_service::{router, AdService};
