//! Error types for the foundation crate.
//!
//! [`CoreError`] covers the failure modes of the geometry and validation
//! code in this crate: invalid calendar fields, invalid observer
//! coordinates, and degenerate numerical situations. Time-table and
//! pipeline failures have their own types in the crates that own them.

use thiserror::Error;

/// Unified error type for the foundation crate.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid calendar date (e.g. February 30, month 13).
    #[error("invalid date {year}-{month:02}-{day:02}: {message}")]
    InvalidDate {
        year: i32,
        month: i32,
        day: i32,
        message: String,
    },

    /// Observer coordinates outside their valid domain.
    #[error("invalid location: {0}")]
    InvalidLocation(String),

    /// Numerical computation failure.
    #[error("math error in {operation}: {message}")]
    Math { operation: String, message: String },
}

/// Convenience alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Creates an [`InvalidDate`](Self::InvalidDate) error.
    pub fn invalid_date(year: i32, month: i32, day: i32, reason: &str) -> Self {
        Self::InvalidDate {
            year,
            month,
            day,
            message: reason.to_string(),
        }
    }

    /// Creates a [`Math`](Self::Math) error.
    pub fn math(operation: &str, reason: &str) -> Self {
        Self::Math {
            operation: operation.to_string(),
            message: reason.to_string(),
        }
    }
}
