// Cost per message: spend divided by received private messages
use super::{ratio_or_zero, MetricCalculator};
use shared::models::CampaignRecord;

pub fn cost_per_message(record: &CampaignRecord) -> f64 {
    ratio_or_zero(record.cost, record.message_count)
}

pub struct CostPerMessage;

impl MetricCalculator for CostPerMessage {
    fn name(&self) -> &str {
        "Cost per Message"
    }

    fn calculate(&self, record: &CampaignRecord) -> f64 {
        cost_per_message(record)
    }
}
