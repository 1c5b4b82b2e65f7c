//! Error types for statement operations.

use thiserror::Error;

use crate::statement::StatementKind;

/// Result type for statement operations.
pub type Result<T> = std::result::Result<T, FmpError>;

/// Errors that can occur while fetching or reshaping statements.
#[derive(Debug, Error)]
pub enum FmpError {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// FMP API error
    #[error("FMP API error: {0}")]
    Api(String),

    /// Ticker not present in the provider's symbol list
    #[error("Invalid ticker: {0}")]
    InvalidTicker(String),

    /// Provider data did not match the expected shape
    #[error("Malformed provider data: {0}")]
    Schema(String),

    /// Statement requested before it was fetched
    #[error("No {kind} fetched for {ticker}")]
    NotFetched {
        /// Ticker the session is bound to
        ticker: String,
        /// Statement kind that was requested
        kind: StatementKind,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
