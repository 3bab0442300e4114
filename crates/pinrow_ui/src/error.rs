//! # Row Error Types
//!
//! Layout argument validation and configuration loading are the only
//! operations that fail. Input requests that cannot be honored (overflow,
//! removing from an empty input, touching an animating indicator) are
//! silently declined instead.

use thiserror::Error;

/// Errors that can occur in the password row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// Indicator count was negative.
    #[error("password count {0} must be greater than or equal to 0")]
    InvalidCount(i32),

    /// Indicator index was negative or past the end of the row.
    #[error("indicator index {index} is out of range for {count} indicators")]
    InvalidIndex {
        /// The requested index.
        index: i32,
        /// The indicator count it was checked against.
        count: i32,
    },

    /// Configuration file could not be read.
    #[error("cannot read configuration {path}: {reason}")]
    ConfigRead {
        /// Path that was read.
        path: String,
        /// Underlying I/O error message.
        reason: String,
    },

    /// Configuration text is not valid TOML for a `RowConfig`.
    #[error("cannot parse configuration: {0}")]
    ConfigParse(String),

    /// Configuration parsed but holds an unusable value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for row operations.
pub type RowResult<T> = Result<T, RowError>;
