use anyhow::{anyhow, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::cell::Cell;

/// Reads delimited exports of the campaign sheet.
///
/// Every field comes back as a text cell; empty fields are empty cells. The
/// header row is returned like any other row, the sheet reader skips it.
pub struct CampaignCsvParser;

impl CampaignCsvParser {
    // Header: date,cost,lead_count,message_count (names are not checked)
    // Example Row: 2025-9-28,5000,10,50
    pub fn read_rows(file_path: &Path, delimiter: u8) -> Result<Vec<Vec<Cell>>> {
        let file = File::open(file_path)
            .map_err(|e| anyhow!("Failed to open CSV file '{}': {}", file_path.display(), e))?;
        Self::read_rows_from(BufReader::new(file), delimiter)
    }

    pub fn read_rows_from<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Vec<Cell>>> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true) // short rows read as missing cells
            .from_reader(reader);

        let mut rows = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record =
                result.map_err(|e| anyhow!("Error reading CSV record at line {}: {}", idx + 1, e))?;
            let row = record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect();
            rows.push(row);
        }
        Ok(rows)
    }
}
