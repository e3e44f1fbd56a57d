//! Error types for transfer construction.

use thiserror::Error;

/// Result type alias for transfer operations
pub type Result<T> = std::result::Result<T, TransferError>;

/// Errors that can occur while building transfer records.
#[derive(Error, Debug)]
pub enum TransferError {
    /// Exact decimal arithmetic is required but not enabled
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An argument lies outside its permitted values
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The amount could not be interpreted as a non-negative quantity
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Normalized amount outside 0.01 ..= 999,999,999.99 major units
    #[error("Amount of {0} minor units is outside the range 1..=99999999999")]
    AmountOutOfRange(u64),

    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: sepa-transfers <input.csv>")]
    MissingArgument,
}
