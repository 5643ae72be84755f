// Cost per lead: spend divided by submitted leads
use super::{ratio_or_zero, MetricCalculator};
use shared::models::CampaignRecord;

pub fn cost_per_lead(record: &CampaignRecord) -> f64 {
    ratio_or_zero(record.cost, record.lead_count)
}

pub struct CostPerLead;

impl MetricCalculator for CostPerLead {
    fn name(&self) -> &str {
        "Cost per Lead"
    }

    fn calculate(&self, record: &CampaignRecord) -> f64 {
        cost_per_lead(record)
    }
}
