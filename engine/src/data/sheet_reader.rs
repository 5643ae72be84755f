//! Record loading from spreadsheets and delimited text.
//!
//! Sources are read into rows of typed [`Cell`]s first; [`records_from_rows`]
//! then applies the row rules: skip the header, stop at the first row with
//! an empty date, coerce the remaining cells.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use shared::models::CampaignRecord;

use super::cell::{excel_serial, Cell};
use super::csv_parser::CampaignCsvParser;
use crate::error::EngineError;

/// Column positions in the sheet
mod cols {
    pub const DATE: usize = 0;
    pub const COST: usize = 1;
    pub const LEAD_COUNT: usize = 2;
    pub const MESSAGE_COUNT: usize = 3;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetOptions {
    /// Use cached formula results instead of the formula text.
    pub evaluate_formulas: bool,
    pub csv_delimiter: u8,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            evaluate_formulas: false,
            csv_delimiter: b',',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Workbook,
    Csv,
}

fn source_kind(path: &Path) -> Option<SourceKind> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(SourceKind::Workbook),
        "csv" | "txt" => Some(SourceKind::Csv),
        _ => None,
    }
}

/// Loads campaign records from `path`, in file order.
pub fn load_records(
    path: &Path,
    options: &SheetOptions,
) -> Result<Vec<CampaignRecord>, EngineError> {
    let source_path = path.display().to_string();
    let kind = source_kind(path).ok_or_else(|| {
        EngineError::UnsupportedSource(format!(
            "'{}' (expected .xlsx, .xls, .ods or .csv)",
            source_path
        ))
    })?;

    let rows = match kind {
        SourceKind::Workbook => read_workbook_rows(path, options.evaluate_formulas),
        SourceKind::Csv => CampaignCsvParser::read_rows(path, options.csv_delimiter),
    }
    .map_err(|e| EngineError::source_unavailable(source_path.clone(), format!("{:#}", e)))?;

    let records = records_from_rows(&rows);
    tracing::info!(
        path = %source_path,
        rows = rows.len(),
        records = records.len(),
        "Loaded campaign records"
    );
    Ok(records)
}

/// Applies the row rules to already-read rows. The first row is the header.
pub fn records_from_rows(rows: &[Vec<Cell>]) -> Vec<CampaignRecord> {
    let mut records = Vec::new();
    for (idx, row) in rows.iter().enumerate().skip(1) {
        let date = cell_at(row, cols::DATE);
        if date.is_blank() {
            tracing::debug!(row = idx + 1, "Empty date cell, end of data");
            break;
        }
        records.push(CampaignRecord {
            date: date.as_text(),
            cost: cell_at(row, cols::COST).as_number(),
            lead_count: cell_at(row, cols::LEAD_COUNT).as_count(),
            message_count: cell_at(row, cols::MESSAGE_COUNT).as_count(),
        });
    }
    records
}

fn cell_at(row: &[Cell], col: usize) -> &Cell {
    row.get(col).unwrap_or(&Cell::Empty)
}

/// Reads the first sheet of a workbook into cell rows, starting at its first used row.
fn read_workbook_rows(path: &Path, evaluate_formulas: bool) -> Result<Vec<Vec<Cell>>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("Workbook has no sheets"))?;

    let values = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    let formulas = if evaluate_formulas {
        None
    } else {
        match workbook.worksheet_formula(&sheet_name) {
            Ok(range) => Some(range),
            Err(e) => {
                tracing::warn!(
                    sheet = %sheet_name,
                    error = %e,
                    "Could not read formulas, using cached values"
                );
                None
            }
        }
    };

    let grid = SheetGrid { values, formulas };
    Ok(grid.rows())
}

struct SheetGrid {
    values: Range<Data>,
    formulas: Option<Range<String>>,
}

impl SheetGrid {
    fn row_bounds(&self) -> Option<(u32, u32)> {
        let mut bounds = self.values.start().zip(self.values.end()).map(|(s, e)| (s.0, e.0));
        if let Some(formulas) = &self.formulas {
            if let (Some(s), Some(e)) = (formulas.start(), formulas.end()) {
                bounds = Some(match bounds {
                    Some((first, last)) => (first.min(s.0), last.max(e.0)),
                    None => (s.0, e.0),
                });
            }
        }
        bounds
    }

    fn rows(&self) -> Vec<Vec<Cell>> {
        let Some((first, last)) = self.row_bounds() else {
            return Vec::new();
        };
        (first..=last)
            .map(|row| {
                (0..=cols::MESSAGE_COUNT as u32)
                    .map(|col| self.cell(row, col))
                    .collect()
            })
            .collect()
    }

    fn cell(&self, row: u32, col: u32) -> Cell {
        let formula = self
            .formulas
            .as_ref()
            .and_then(|f| f.get_value((row, col)))
            .filter(|f| !f.is_empty());
        if let Some(formula) = formula {
            return Cell::Formula(formula.clone());
        }
        self.values
            .get_value((row, col))
            .map(cell_from_data)
            .unwrap_or(Cell::Empty)
    }
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::DateTime {
            serial: dt.as_f64(),
            at: dt.as_datetime(),
        },
        Data::DateTimeIso(s) => match parse_iso_datetime(s) {
            Some(at) => Cell::DateTime { serial: excel_serial(&at), at: Some(at) },
            None => Cell::Text(s.clone()),
        },
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::{ExcelDateTime, Format, Formula, Workbook};
    use std::io::Write;
    use tempfile::{Builder, TempDir};

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn header() -> Vec<Cell> {
        vec![text("date"), text("cost"), text("leads"), text("messages")]
    }

    #[test]
    fn test_header_only_yields_no_records() {
        let records = records_from_rows(&[header()]);
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_source_yields_no_records() {
        assert!(records_from_rows(&[]).is_empty());
    }

    #[test]
    fn test_stops_at_first_empty_date() {
        let rows = vec![
            header(),
            vec![text("2025-9-28"), Cell::Number(5000.0), Cell::Number(10.0), Cell::Number(50.0)],
            vec![Cell::Empty, Cell::Number(1.0), Cell::Number(1.0), Cell::Number(1.0)],
            vec![text("2025-9-30"), Cell::Number(7000.0), Cell::Number(20.0), Cell::Number(70.0)],
        ];
        let records = records_from_rows(&rows);
        assert_eq!(records, vec![CampaignRecord::new("2025-9-28", 5000.0, 10, 50)]);
    }

    #[test]
    fn test_empty_date_on_first_data_row() {
        let rows = vec![
            header(),
            vec![text(""), Cell::Number(5000.0)],
            vec![text("2025-9-29"), Cell::Number(6000.0)],
        ];
        assert!(records_from_rows(&rows).is_empty());
    }

    #[test]
    fn test_missing_cells_read_as_zero() {
        let rows = vec![header(), vec![text("2025-9-28"), text("oops")]];
        let records = records_from_rows(&rows);
        assert_eq!(records, vec![CampaignRecord::new("2025-9-28", 0.0, 0, 0)]);
    }

    #[test]
    fn test_bool_date_is_stringified() {
        let rows = vec![header(), vec![Cell::Bool(true), Cell::Number(1.0), Cell::Number(1.0), Cell::Number(1.0)]];
        assert_eq!(records_from_rows(&rows)[0].date, "true");
    }

    #[test]
    fn test_unsupported_extension() {
        let result = load_records(Path::new("ads.json"), &SheetOptions::default());
        assert!(matches!(result, Err(EngineError::UnsupportedSource(_))));
    }

    #[test]
    fn test_missing_workbook_is_source_unavailable() {
        let result = load_records(Path::new("/nonexistent/data.xlsx"), &SheetOptions::default());
        assert!(matches!(result, Err(EngineError::SourceUnavailable { .. })));
    }

    #[test]
    fn test_load_csv_source() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "date,cost,lead_count,message_count").unwrap();
        writeln!(file, "2025-9-28,5000,10,50").unwrap();
        writeln!(file, "2025-9-29, 6000.5 ,15,abc").unwrap();
        let records = load_records(file.path(), &SheetOptions::default()).unwrap();
        assert_eq!(
            records,
            vec![
                CampaignRecord::new("2025-9-28", 5000.0, 10, 50),
                CampaignRecord::new("2025-9-29", 6000.5, 15, 0),
            ]
        );
    }

    fn write_sample_workbook(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("data.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");

        sheet.write_string(0, 0, "日期").unwrap();
        sheet.write_string(0, 1, "花费").unwrap();
        sheet.write_string(0, 2, "线索数").unwrap();
        sheet.write_string(0, 3, "私信数").unwrap();

        sheet.write_string(1, 0, "2025-9-28").unwrap();
        sheet.write_number(1, 1, 5000.0).unwrap();
        sheet.write_number(1, 2, 10.0).unwrap();
        sheet.write_number(1, 3, 50.0).unwrap();

        let day = ExcelDateTime::from_ymd(2025, 9, 29).unwrap();
        sheet.write_datetime_with_format(2, 0, &day, &date_format).unwrap();
        sheet.write_string(2, 1, "6000").unwrap();
        sheet.write_number(2, 2, 15.0).unwrap();
        sheet.write_formula(2, 3, Formula::new("=20+40").set_result("60")).unwrap();

        workbook.save(&path).unwrap();
        path
    }

    #[test]
    fn test_load_workbook_source() {
        let dir = TempDir::new().unwrap();
        let path = write_sample_workbook(&dir);

        let records = load_records(&path, &SheetOptions::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], CampaignRecord::new("2025-9-28", 5000.0, 10, 50));
        assert_eq!(records[1].date, "2025-09-29");
        assert_eq!(records[1].cost, 6000.0);
        assert_eq!(records[1].lead_count, 15);
        // formula text "20+40" does not parse as a number
        assert_eq!(records[1].message_count, 0);
    }

    #[test]
    fn test_workbook_formula_text_is_returned() {
        let dir = TempDir::new().unwrap();
        let path = write_sample_workbook(&dir);

        let rows = read_workbook_rows(&path, false).unwrap();
        assert_eq!(rows[2][3], Cell::Formula("20+40".to_string()));

        let evaluated = read_workbook_rows(&path, true).unwrap();
        assert_eq!(evaluated[2][3], Cell::Number(60.0));
    }

    #[test]
    fn test_evaluated_formula_uses_cached_result() {
        let dir = TempDir::new().unwrap();
        let path = write_sample_workbook(&dir);

        let options = SheetOptions {
            evaluate_formulas: true,
            ..SheetOptions::default()
        };
        let records = load_records(&path, &options).unwrap();
        assert_eq!(records[1].message_count, 60);

        let records = load_records(&path, &SheetOptions::default()).unwrap();
        assert_eq!(records[1].message_count, 0);
    }
}
