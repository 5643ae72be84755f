use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Source '{path}' is unavailable: {reason}")]
    SourceUnavailable { path: String, reason: String },

    #[error("Unsupported source format: {0}")]
    UnsupportedSource(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Record store error: {0}")]
    StoreError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl EngineError {
    pub fn source_unavailable(path: impl Into<String>, reason: impl ToString) -> Self {
        EngineError::SourceUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// True for every failure that means the input could not be read at all.
    pub fn is_source_failure(&self) -> bool {
        matches!(
            self,
            EngineError::SourceUnavailable { .. } | EngineError::UnsupportedSource(_)
        )
    }

    fn status(&self) -> StatusCode {
        match self {
            EngineError::ConfigError(_) => StatusCode::PRECONDITION_FAILED,
            EngineError::SourceUnavailable { .. } | EngineError::UnsupportedSource(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            EngineError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            EngineError::IoError { .. } | EngineError::StoreError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<sqlx::Error> for EngineError {
    fn from(err: sqlx::Error) -> Self {
        EngineError::StoreError(err.to_string())
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        tracing::error!("Mapping EngineError to HTTP response: {:?}", self);
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
