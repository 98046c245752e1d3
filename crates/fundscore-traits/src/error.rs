//! Error types for the fundscore engine.
//!
//! Degenerate numeric conditions (short windows, zero variance, zero
//! denominators) are never errors: they resolve to documented sentinels.
//! This module only covers the surfaces that can genuinely fail, namely
//! ingestion of tabular data and validation of configuration.

use thiserror::Error;

/// The main error type for fundscore operations.
#[derive(Debug, Error)]
pub enum FundscoreError {
    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a required column is missing from the data.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error when a date cannot be parsed or is out of range.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error when a configuration value is out of its allowed range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for FundscoreError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for FundscoreError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for fundscore operations.
pub type Result<T> = std::result::Result<T, FundscoreError>;
