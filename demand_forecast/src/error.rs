//! Error types for the demand_forecast crate

use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the demand_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Malformed method configuration (alpha, window or weights out of range)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Series shorter than the method's minimum history
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The input table lacks a required column
    #[error("Missing column: '{0}'")]
    MissingColumn(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Configuration value outside the range offered to users
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),

    /// Error reading or writing a spreadsheet
    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(String),

    /// Error from JSON (de)serialization
    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl ForecastError {
    /// Whether this error is an engine parameter rejection
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, ForecastError::InvalidParameter(_))
    }

    /// Whether this error reports a too-short series
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, ForecastError::InsufficientData(_))
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<calamine::Error> for ForecastError {
    fn from(err: calamine::Error) -> Self {
        ForecastError::SpreadsheetError(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ForecastError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ForecastError::SpreadsheetError(err.to_string())
    }
}
