// Console presentation of records and trends
pub mod presenter;

pub use presenter::{format_record_table, format_trend_line, format_trend_section};
