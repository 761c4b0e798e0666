//! Error types for the amortization engine and the CLI around it.

use thiserror::Error;

/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// The only failure the amortization engine can produce.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmortizationError {
    /// The number of periods is zero or negative.
    #[error("Invalid term: {term} periods (must be a positive number of months)")]
    InvalidTerm { term: i64 },
}

/// Errors surfaced by input validation, reporting and export.
#[derive(Error, Debug)]
pub enum AppError {
    /// Failed to write the report or the export file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The engine rejected the loan terms
    #[error(transparent)]
    Amortization(#[from] AmortizationError),

    /// A user-supplied value failed validation before reaching the engine
    #[error("Invalid {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },
}

impl AppError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        AppError::InvalidInput {
            field,
            message: message.into(),
        }
    }
}
