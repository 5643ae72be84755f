pub mod analyzer;
pub mod types;

pub use analyzer::TrendAnalyzer;
pub use types::{Delta, MetricKind, PairTrend, TrendAnalysis, TrendReport};
