// Engine settings, loaded from a JSON file and overridden by command-line flags
use crate::error::EngineError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub host: String,
    pub port: u16,
    /// Spreadsheet or CSV file used by the report when none is given on the command line.
    pub data_file: Option<PathBuf>,
    /// When false, formula cells yield their formula text instead of the cached result.
    pub evaluate_formulas: bool,
    /// Field delimiter for CSV sources. JSON has no char type, so this is a one-character string.
    pub csv_delimiter: String,
    /// SQLite connection URL for the record store. In-memory store when absent.
    pub database_url: Option<String>,
    pub seed_sample_data: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_file: None,
            evaluate_formulas: false,
            csv_delimiter: ",".to_string(),
            database_url: None,
            seed_sample_data: false,
        }
    }
}

impl EngineSettings {
    /// Reads settings from a JSON file. Missing fields take their default values.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_json(&raw).map_err(|e| match e {
            EngineError::ConfigError(msg) => {
                EngineError::ConfigError(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        let settings: EngineSettings = serde_json::from_str(raw)
            .map_err(|e| EngineError::ConfigError(format!("Invalid settings JSON: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads from `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, EngineError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn delimiter_byte(&self) -> Result<u8, EngineError> {
        match self.csv_delimiter.as_bytes() {
            [b] => Ok(*b),
            _ => Err(EngineError::ConfigError(format!(
                "csv_delimiter must be a single ASCII character, got '{}'",
                self.csv_delimiter
            ))),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn validate(&self) -> Result<(), EngineError> {
        self.delimiter_byte()?;
        if self.host.trim().is_empty() {
            return Err(EngineError::ConfigError("host must not be empty".to_string()));
        }
        Ok(())
    }
}
