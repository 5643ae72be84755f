use shared::models::CampaignRecord;

use crate::metrics::{CostPerLead, CostPerMessage, MetricCalculator};
use crate::trends::{Delta, MetricKind, TrendAnalysis};

const SEPARATOR: &str = "-------------------------------------------------";

/// Fixed-width table: date, cost, lead count, cost per lead, cost per message.
pub fn format_record_table(records: &[CampaignRecord]) -> String {
    let per_lead = CostPerLead.calculate_series(records);
    let per_message = CostPerMessage.calculate_series(records);

    let mut lines = vec![
        String::new(),
        "Campaign Data Summary".to_string(),
        SEPARATOR.to_string(),
        format!(
            "{:<10} {:<10} {:<15} {:<20} {:<25}",
            "Date",
            "Cost",
            "Leads",
            CostPerLead.name(),
            CostPerMessage.name()
        ),
        SEPARATOR.to_string(),
    ];
    lines.extend(records.iter().zip(per_lead.iter().zip(&per_message)).map(|(r, (cpl, cpm))| {
        format!(
            "{:<10} {:<10.2} {:<15} {:<20.2} {:<25.2}",
            r.date, r.cost, r.lead_count, cpl, cpm
        )
    }));
    lines.push(SEPARATOR.to_string());
    finish(lines)
}

pub fn format_trend_line(kind: MetricKind, delta: &Delta) -> String {
    match delta {
        Delta::Change { .. } => format!("{} change: {}", kind, delta),
        Delta::NoBaseline | Delta::NoHistory => format!("{}: {}", kind, delta),
    }
}

/// Trend section: one heading per consecutive pair followed by its three deltas.
pub fn format_trend_section(analysis: &TrendAnalysis) -> String {
    let pairs = match analysis {
        TrendAnalysis::InsufficientData { .. } => {
            return finish(vec![
                String::new(),
                "Not enough data for trend analysis (need at least 2 days)".to_string(),
            ]);
        }
        TrendAnalysis::Pairs(pairs) => pairs,
    };

    let mut lines = vec![
        String::new(),
        "Campaign Trend Analysis".to_string(),
        SEPARATOR.to_string(),
    ];
    for pair in pairs {
        lines.push(String::new());
        lines.push(format!("From {} to {}:", pair.previous_date, pair.current_date));
        lines.extend(
            pair.report
                .entries()
                .iter()
                .map(|(kind, delta)| format_trend_line(*kind, delta)),
        );
    }
    lines.push(SEPARATOR.to_string());
    finish(lines)
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
