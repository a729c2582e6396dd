//! Error types for the stock_forecast crate

use thiserror::Error;

/// Custom error types for the stock_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// No data available for the requested symbol/date range
    #[error("No data available: {0}")]
    DataUnavailable(String),

    /// Series too short to build at least one training pair
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Constant-valued series, min-max normalization is undefined
    #[error("Degenerate range: min and max are both {value}, cannot normalize a constant series")]
    DegenerateRange { value: f64 },

    /// No trained artifact for the symbol
    #[error("Model or scaler not found for {symbol}, train first")]
    ArtifactMissing { symbol: String },

    /// Trailing history shorter than the model's input window
    #[error("Insufficient history: model expects a window of {required} points, got {actual}")]
    InsufficientHistory { required: usize, actual: usize },

    /// No training job record for the symbol
    #[error("No training job found for {symbol}")]
    JobNotFound { symbol: String },

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from serializing or deserializing artifacts
    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<polars::prelude::PolarsError> for ForecastError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::DataError(err.to_string())
    }
}
