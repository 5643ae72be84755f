// Batch report: load, sort by date, print the table, print the trends
use std::io::Write;
use std::path::PathBuf;

use shared::models::{sort_by_date, CampaignRecord};

use crate::data::fixtures::sample_records;
use crate::data::sheet_reader::{load_records, SheetOptions};
use crate::error::EngineError;
use crate::report::{format_record_table, format_trend_section};
use crate::trends::{TrendAnalysis, TrendAnalyzer};

#[derive(Debug, Clone, PartialEq)]
pub enum RecordSource {
    File(PathBuf),
    /// The built-in sample records.
    Fixtures,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub records: usize,
    pub compared_pairs: usize,
}

pub fn load_sorted(
    source: &RecordSource,
    options: &SheetOptions,
) -> Result<Vec<CampaignRecord>, EngineError> {
    let mut records = match source {
        RecordSource::File(path) => load_records(path, options)?,
        RecordSource::Fixtures => sample_records(),
    };
    sort_by_date(&mut records);
    Ok(records)
}

/// Full report text for records that are already in date order.
pub fn render_report(records: &[CampaignRecord]) -> (String, TrendAnalysis) {
    let analysis = TrendAnalyzer::new().analyze_sequence(records);
    let mut text = format_record_table(records);
    text.push_str(&format_trend_section(&analysis));
    (text, analysis)
}

pub fn run_report<W: Write>(
    source: &RecordSource,
    options: &SheetOptions,
    out: &mut W,
) -> Result<ReportSummary, EngineError> {
    let records = load_sorted(source, options)?;
    let (text, analysis) = render_report(&records);
    out.write_all(text.as_bytes())?;
    out.flush()?;

    let compared_pairs = match &analysis {
        TrendAnalysis::Pairs(pairs) => pairs.len(),
        TrendAnalysis::InsufficientData { .. } => 0,
    };
    Ok(ReportSummary {
        records: records.len(),
        compared_pairs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::Builder;

    fn csv_source(content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_fixture_report() {
        let mut out = Vec::new();
        let summary = run_report(&RecordSource::Fixtures, &SheetOptions::default(), &mut out).unwrap();
        assert_eq!(summary, ReportSummary { records: 2, compared_pairs: 1 });

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("From 2025-9-28 to 2025-9-29:"));
        assert!(text.contains("Cost change: +1000.00 (+20.00%)"));
    }

    #[test]
    fn test_records_are_sorted_before_analysis() {
        let file = csv_source("date,cost,leads,messages\n2025-09-29,6000,15,60\n2025-09-28,5000,10,50\n");
        let source = RecordSource::File(file.path().to_path_buf());
        let records = load_sorted(&source, &SheetOptions::default()).unwrap();
        assert_eq!(records[0].date, "2025-09-28");
        assert_eq!(records[1].date, "2025-09-29");
    }

    #[test]
    fn test_header_only_source_reports_insufficient_data() {
        let file = csv_source("date,cost,leads,messages\n");
        let mut out = Vec::new();
        let summary = run_report(&RecordSource::File(file.path().to_path_buf()), &SheetOptions::default(), &mut out)
            .unwrap();
        assert_eq!(summary, ReportSummary { records: 0, compared_pairs: 0 });
        assert!(String::from_utf8(out).unwrap().contains("Not enough data for trend analysis"));
    }

    #[test]
    fn test_missing_source_aborts_without_output() {
        let mut out = Vec::new();
        let source = RecordSource::File(PathBuf::from("/nonexistent/data.xlsx"));
        let result = run_report(&source, &SheetOptions::default(), &mut out);
        assert!(matches!(result, Err(EngineError::SourceUnavailable { .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn test_report_is_idempotent() {
        let file = csv_source("date,cost,leads,messages\n2025-09-28,5000,10,50\n2025-09-29,6000,15,60\n2025-09-30,500,0,0\n");
        let source = RecordSource::File(file.path().to_path_buf());
        let mut first = Vec::new();
        let mut second = Vec::new();
        run_report(&source, &SheetOptions::default(), &mut first).unwrap();
        run_report(&source, &SheetOptions::default(), &mut second).unwrap();
        assert_eq!(first, second);
    }
}
