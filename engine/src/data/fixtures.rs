// Seed records for demos and for running the report without an input file
use shared::models::CampaignRecord;

pub fn sample_records() -> Vec<CampaignRecord> {
    vec![
        CampaignRecord::new("2025-9-28", 5000.0, 10, 50),
        CampaignRecord::new("2025-9-29", 6000.0, 15, 60),
    ]
}
