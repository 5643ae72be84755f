// Engine library root
// Loading, metrics, trends and presentation for the report; storage and HTTP for the server.

pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod services;
pub mod trends;

pub use error::EngineError;
