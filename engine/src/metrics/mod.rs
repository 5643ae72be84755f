// Per-record derived metrics
pub mod cost_per_lead;
pub mod cost_per_message;

pub use cost_per_lead::{cost_per_lead, CostPerLead};
pub use cost_per_message::{cost_per_message, CostPerMessage};

use shared::models::CampaignRecord;

// Common trait for all per-record metrics
pub trait MetricCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn calculate(&self, record: &CampaignRecord) -> f64; // zero when the denominator is zero

    fn calculate_series(&self, records: &[CampaignRecord]) -> Vec<f64> {
        records.iter().map(|r| self.calculate(r)).collect()
    }
}

/// `numerator / denominator`, or 0 when there is nothing to divide by.
pub(crate) fn ratio_or_zero(numerator: f64, denominator: u32) -> f64 {
    if denominator > 0 {
        numerator / f64::from(denominator)
    } else {
        0.0
    }
}
