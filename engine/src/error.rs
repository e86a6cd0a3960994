use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    // Wraps anyhow errors from helpers that don't fit the categories above
    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    /// Process exit code for the audit binary.
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineError::ConfigError(_) | EngineError::JsonError { .. } => 2,
            EngineError::IoError { .. } => 3,
            EngineError::CsvSystemError { .. } | EngineError::CsvDataFormatError(_) => 4,
            EngineError::AnyhowError(_) => 1,
        }
    }
}
