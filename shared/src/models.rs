use serde::{Deserialize, Serialize};

/// One day of advertising spend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    /// Display and sort key. Not validated as a calendar date.
    pub date: String,
    pub cost: f64,
    pub lead_count: u32,
    pub message_count: u32,
}

impl CampaignRecord {
    pub fn new(date: impl Into<String>, cost: f64, lead_count: u32, message_count: u32) -> Self {
        Self {
            date: date.into(),
            cost,
            lead_count,
            message_count,
        }
    }
}

/// A record after a store has assigned it an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: i64,
    pub record: CampaignRecord,
}

/// Sorts records by their date label. The sort is stable, so rows sharing a
/// date keep their load order.
pub fn sort_by_date(records: &mut [CampaignRecord]) {
    records.sort_by(|a, b| a.date.cmp(&b.date));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_by_date_is_lexicographic_and_stable() {
        let mut records = vec![
            CampaignRecord::new("2025-09-29", 1.0, 0, 0),
            CampaignRecord::new("2025-09-28", 2.0, 0, 0),
            CampaignRecord::new("2025-09-29", 3.0, 0, 0),
        ];
        sort_by_date(&mut records);
        let costs: Vec<f64> = records.iter().map(|r| r.cost).collect();
        assert_eq!(costs, vec![2.0, 1.0, 3.0]);
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = CampaignRecord::new("2025-9-28", 5000.0, 10, 50);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"lead_count\":10"));
        let back: CampaignRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
