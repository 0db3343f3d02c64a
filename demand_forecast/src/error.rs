//! Error types for the demand_forecast crate

use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the demand_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Uploaded table is missing columns or holds unusable values
    #[error("Ingestion error: {0}")]
    Ingestion(String),

    /// Horizon outside the accepted range
    #[error("Invalid horizon: {0}")]
    InvalidHorizon(String),

    /// Configuration could not be parsed or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// No model artifact exists for a parent category code
    #[error("No model found for COICOP {code}")]
    ModelNotFound { code: String },

    /// A model artifact exists but could not be turned into a predictor
    #[error("Failed to load model for COICOP {code}: {reason}")]
    ModelLoad { code: String, reason: String },

    /// The predictor failed while producing a forecast
    #[error("Prediction failed for COICOP {code}: {reason}")]
    PredictionFailed { code: String, reason: String },

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),

    /// Error from CSV reading or writing
    #[error("CSV error: {0}")]
    CsvError(String),
}

impl ForecastError {
    /// Whether the error belongs to a single category rather than the whole run
    pub fn is_category_scoped(&self) -> bool {
        matches!(
            self,
            ForecastError::ModelNotFound { .. }
                | ForecastError::ModelLoad { .. }
                | ForecastError::PredictionFailed { .. }
        )
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}

impl From<retail_calendar::CalendarError> for ForecastError {
    fn from(err: retail_calendar::CalendarError) -> Self {
        ForecastError::DataError(err.to_string())
    }
}
