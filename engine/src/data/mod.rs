// Record loading and storage
pub mod cell;
pub mod csv_parser;
pub mod fixtures;
pub mod record_store;
pub mod sheet_reader;

pub use record_store::{InMemoryRecordStore, RecordStore, SqliteRecordStore};
pub use sheet_reader::{load_records, SheetOptions};
