//! Error types for time representation and conversion.

use thiserror::Error;

/// Failures in calendar handling, epoch parsing and table lookup.
#[derive(Error, Debug)]
pub enum TimeError {
    /// Invalid calendar fields (e.g. February 30, hour 25).
    #[error("invalid date {year}-{month:02}-{day:02}: {message}")]
    InvalidDate {
        year: i32,
        month: i32,
        day: i32,
        message: String,
    },

    /// Malformed epoch string (expected "Jxxxx" or "Bxxxx").
    #[error("invalid epoch string {0:?}")]
    InvalidEpoch(String),

    /// Queried date outside the span covered by a correction table.
    ///
    /// Fatal to the conversion that raised it: it means the process was
    /// started without leap-second or earth-rotation data for this date.
    /// Callers report it; nothing in this workspace retries.
    #[error("{table} table has no entry covering MJD {mjd:.1}")]
    TableRange { table: &'static str, mjd: f64 },

    /// Numerical failure in a time computation.
    #[error("time calculation error: {0}")]
    Calculation(String),
}

/// Convenience alias for `Result<T, TimeError>`.
pub type TimeResult<T> = Result<T, TimeError>;

impl TimeError {
    /// Creates an [`InvalidDate`](Self::InvalidDate) error.
    pub fn invalid_date(year: i32, month: i32, day: i32, reason: &str) -> Self {
        Self::InvalidDate {
            year,
            month,
            day,
            message: reason.to_string(),
        }
    }
}
