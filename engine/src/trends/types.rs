use std::fmt;

use shared::utils::format_signed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Cost,
    CostPerLead,
    CostPerMessage,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Cost => write!(f, "Cost"),
            MetricKind::CostPerLead => write!(f, "Cost per lead"),
            MetricKind::CostPerMessage => write!(f, "Cost per message"),
        }
    }
}

/// Change of one metric between two consecutive records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Delta {
    Change {
        previous: f64,
        current: f64,
        amount: f64,
        /// `None` when the previous value is exactly zero.
        percent: Option<f64>,
    },
    /// The previous value is zero or negative, so no rate can be computed.
    NoBaseline,
    /// There is no previous record at all.
    NoHistory,
}

impl Delta {
    /// Plain change: the amount is always known, the rate only when `previous != 0`.
    pub fn change(previous: f64, current: f64) -> Self {
        let amount = current - previous;
        let percent = if previous != 0.0 {
            Some(amount / previous * 100.0)
        } else {
            None
        };
        Delta::Change {
            previous,
            current,
            amount,
            percent,
        }
    }

    /// Change of a ratio. A ratio of zero or less has no baseline to compare with.
    pub fn between(previous: f64, current: f64) -> Self {
        if previous <= 0.0 {
            return Delta::NoBaseline;
        }
        Self::change(previous, current)
    }

    pub fn amount(&self) -> Option<f64> {
        match self {
            Delta::Change { amount, .. } => Some(*amount),
            _ => None,
        }
    }

    pub fn percent(&self) -> Option<f64> {
        match self {
            Delta::Change { percent, .. } => *percent,
            _ => None,
        }
    }
}

/// `+1000.00 (+20.00%)`
impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delta::Change {
                amount,
                percent: Some(percent),
                ..
            } => write!(f, "{} ({}%)", format_signed(*amount, 2), format_signed(*percent, 2)),
            Delta::Change {
                amount,
                percent: None,
                ..
            } => write!(
                f,
                "{} (previous value is 0, change rate not computable)",
                format_signed(*amount, 2)
            ),
            Delta::NoBaseline => write!(f, "previous value is 0, change rate not computable"),
            Delta::NoHistory => write!(f, "no historical data to compare"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendReport {
    pub cost: Delta,
    pub cost_per_lead: Delta,
    pub cost_per_message: Delta,
}

impl TrendReport {
    pub fn no_history() -> Self {
        TrendReport {
            cost: Delta::NoHistory,
            cost_per_lead: Delta::NoHistory,
            cost_per_message: Delta::NoHistory,
        }
    }

    pub fn entries(&self) -> [(MetricKind, Delta); 3] {
        [
            (MetricKind::Cost, self.cost),
            (MetricKind::CostPerLead, self.cost_per_lead),
            (MetricKind::CostPerMessage, self.cost_per_message),
        ]
    }
}

/// Trend between two consecutive dates.
#[derive(Debug, Clone, PartialEq)]
pub struct PairTrend {
    pub previous_date: String,
    pub current_date: String,
    pub report: TrendReport,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrendAnalysis {
    /// Fewer records than a comparison needs. Informational, not an error.
    InsufficientData { available: usize },
    Pairs(Vec<PairTrend>),
}
