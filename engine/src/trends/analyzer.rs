use shared::models::CampaignRecord;

use super::types::{Delta, PairTrend, TrendAnalysis, TrendReport};
use crate::metrics::{cost_per_lead, cost_per_message};

/// Compares each record with the one before it.
///
/// Records must already be in date order; the analyzer never reorders or
/// mutates them.
pub struct TrendAnalyzer {
    min_records: usize,
}

impl TrendAnalyzer {
    pub fn new() -> Self {
        Self { min_records: 2 }
    }

    pub fn analyze_pair(
        &self,
        previous: Option<&CampaignRecord>,
        current: &CampaignRecord,
    ) -> TrendReport {
        let Some(previous) = previous else {
            return TrendReport::no_history();
        };
        TrendReport {
            cost: Delta::change(previous.cost, current.cost),
            cost_per_lead: Delta::between(cost_per_lead(previous), cost_per_lead(current)),
            cost_per_message: Delta::between(cost_per_message(previous), cost_per_message(current)),
        }
    }

    pub fn analyze_sequence(&self, records: &[CampaignRecord]) -> TrendAnalysis {
        if records.len() < self.min_records {
            tracing::info!(available = records.len(), "Not enough records for trend analysis");
            return TrendAnalysis::InsufficientData { available: records.len() };
        }

        let pairs = records
            .windows(2)
            .map(|pair| PairTrend {
                previous_date: pair[0].date.clone(),
                current_date: pair[1].date.clone(),
                report: self.analyze_pair(Some(&pair[0]), &pair[1]),
            })
            .collect::<Vec<_>>();
        tracing::debug!(pairs = pairs.len(), "Trend analysis complete");
        TrendAnalysis::Pairs(pairs)
    }
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
