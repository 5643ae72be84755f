// Typed spreadsheet cells and the coercion rules that turn them into record fields
use chrono::{NaiveDate, NaiveDateTime, Timelike};

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    /// A numeric cell carrying a date format. `serial` is the spreadsheet
    /// day number; `at` is absent when the serial is outside chrono's range.
    DateTime { serial: f64, at: Option<NaiveDateTime> },
    Bool(bool),
    /// Formula text, without the leading `=`.
    Formula(String),
}

impl Cell {
    /// A missing cell and an empty string both end the input when found in the date column.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Value of the cell when read as the date label.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::DateTime { serial, at } => match at {
                Some(at) => render_datetime(at),
                None => serial.to_string(),
            },
            Cell::Bool(b) => b.to_string(),
            Cell::Formula(f) => f.clone(),
        }
    }

    /// Value of the cell when read as a numeric field. Never fails: anything
    /// that is not a number reads as zero.
    pub fn as_number(&self) -> f64 {
        match self {
            Cell::Number(n) => *n,
            Cell::DateTime { serial, .. } => *serial,
            Cell::Text(s) | Cell::Formula(s) => parse_number(s),
            Cell::Empty | Cell::Bool(_) => 0.0,
        }
    }

    /// Numeric value truncated into a count.
    pub fn as_count(&self) -> u32 {
        to_count(self.as_number())
    }
}

/// Lenient float parsing: surrounding whitespace is ignored, anything else
/// that does not parse to a finite number is zero.
pub fn parse_number(s: &str) -> f64 {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Truncates toward zero. `as` saturates, so negatives and NaN become 0.
pub fn to_count(value: f64) -> u32 {
    value as u32
}

/// `2025-09-28` for whole days, `2025-09-28 13:45:00` otherwise.
pub fn render_datetime(at: &NaiveDateTime) -> String {
    if at.hour() == 0 && at.minute() == 0 && at.second() == 0 {
        at.format("%Y-%m-%d").to_string()
    } else {
        at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Day number of `at` in the 1900 date system (day 0 is 1899-12-30).
pub fn excel_serial(at: &NaiveDateTime) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    let elapsed = *at - epoch;
    elapsed.num_milliseconds() as f64 / 86_400_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn test_text_cell() {
        let cell = Cell::Text("2025-9-28".to_string());
        assert_eq!(cell.as_text(), "2025-9-28");
        assert_eq!(cell.as_number(), 0.0);
        assert_eq!(Cell::Text(" 5000.5 ".to_string()).as_number(), 5000.5);
    }

    #[test]
    fn test_unparseable_text_is_zero() {
        assert_eq!(Cell::Text("abc".to_string()).as_number(), 0.0);
        assert_eq!(Cell::Text("NaN".to_string()).as_number(), 0.0);
        assert_eq!(Cell::Text("".to_string()).as_count(), 0);
    }

    #[test]
    fn test_number_cell() {
        assert_eq!(Cell::Number(45928.0).as_text(), "45928");
        assert_eq!(Cell::Number(12.5).as_text(), "12.5");
        assert_eq!(Cell::Number(6000.0).as_number(), 6000.0);
        assert_eq!(Cell::Number(15.9).as_count(), 15);
    }

    #[test]
    fn test_negative_count_saturates() {
        assert_eq!(Cell::Number(-3.0).as_count(), 0);
    }

    #[test]
    fn test_bool_cell() {
        assert_eq!(Cell::Bool(true).as_text(), "true");
        assert_eq!(Cell::Bool(false).as_text(), "false");
        assert_eq!(Cell::Bool(true).as_number(), 0.0);
    }

    #[test]
    fn test_empty_cell() {
        assert!(Cell::Empty.is_blank());
        assert!(Cell::Text(String::new()).is_blank());
        assert!(!Cell::Number(0.0).is_blank());
        assert_eq!(Cell::Empty.as_text(), "");
        assert_eq!(Cell::Empty.as_number(), 0.0);
    }

    #[test]
    fn test_formula_cell_yields_formula_text() {
        let cell = Cell::Formula("SUM(B2:B3)".to_string());
        assert_eq!(cell.as_text(), "SUM(B2:B3)");
        assert_eq!(cell.as_number(), 0.0);
    }

    #[test]
    fn test_datetime_rendering() {
        let day = Cell::DateTime { serial: 45928.0, at: Some(datetime(2025, 9, 28, 0, 0)) };
        assert_eq!(day.as_text(), "2025-09-28");
        assert_eq!(day.as_number(), 45928.0);

        let with_time = Cell::DateTime { serial: 45928.5, at: Some(datetime(2025, 9, 28, 12, 0)) };
        assert_eq!(with_time.as_text(), "2025-09-28 12:00:00");
    }

    #[test]
    fn test_excel_serial() {
        assert_eq!(excel_serial(&datetime(2025, 9, 28, 0, 0)), 45928.0);
        assert_eq!(excel_serial(&datetime(2025, 9, 28, 12, 0)), 45928.5);
    }
}
