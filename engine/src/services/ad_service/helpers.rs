// Wire types for /api/ads and their mapping to the domain records
use serde::{Deserialize, Deserializer, Serialize};
use shared::models::{CampaignRecord, StoredRecord};

use crate::data::cell::{parse_number, to_count};

/// Record as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdResponse {
    pub id: i64,
    pub date: String,
    pub cost: f64,
    pub lead_count: u32,
    pub message_count: u32,
}

/// Record as accepted by the API. Absent or null fields read as empty/zero;
/// numbers may also arrive as strings, as HTML form values do.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdPayload {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub cost: f64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub lead_count: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub message_count: u32,
}

pub fn to_ad_response(stored: &StoredRecord) -> AdResponse {
    AdResponse {
        id: stored.id,
        date: stored.record.date.clone(),
        cost: stored.record.cost,
        lead_count: stored.record.lead_count,
        message_count: stored.record.message_count,
    }
}

pub fn from_ad_payload(payload: AdPayload) -> CampaignRecord {
    CampaignRecord {
        date: payload.date.unwrap_or_default(),
        cost: payload.cost,
        lead_count: payload.lead_count,
        message_count: payload.message_count,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) => n,
        Some(NumberOrText::Text(s)) => parse_number(&s),
        None => 0.0,
    })
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    lenient_number(deserializer).map(to_count)
}
