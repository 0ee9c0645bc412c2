//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Bucket lists could not be paired.
    #[error("Invalid buckets: {0}")]
    InvalidBuckets(String),

    /// Unknown funding shock name.
    #[error("Unknown funding shock: {0}. Use moderate, bank-run, systemic, northern-rock or all.")]
    UnknownFundingShock(String),

    /// The loan file could not be read or parsed.
    #[error("Cannot load loans from {}: {reason}", .path.display())]
    InvalidLoans {
        /// File that was read.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// Analytics error.
    #[error(transparent)]
    Analytics(#[from] ballast_core::BallastError),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ballast_config::ConfigError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
