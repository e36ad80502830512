//! Engine error taxonomy.
//!
//! Three families per the design: configuration errors (missing table
//! coverage, surfaced from [`skytrack_time::TimeError`]), convergence
//! failures in iterative stages, and invalid input (bad targets or
//! locations, surfaced from [`skytrack_core::CoreError`]).
//!
//! Stage functions are pure and propagate errors to the tick that invoked
//! them; a tick that hits an error skips publishing for that cycle instead
//! of crashing the scheduler, since every consumer tolerates one stale
//! cycle by design.

use thiserror::Error;

/// Failures surfaced by the tracking engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Time-scale or table failure (configuration errors live here).
    #[error(transparent)]
    Time(#[from] skytrack_time::TimeError),

    /// Geometry/validation failure from the foundation crate.
    #[error(transparent)]
    Core(#[from] skytrack_core::CoreError),

    /// An iterative stage failed to converge within its iteration bound.
    #[error("{stage} failed to converge after {iterations} iterations")]
    NotConverged {
        stage: &'static str,
        iterations: u32,
    },

    /// `current_pointing` was called before any target was installed.
    #[error("no target installed")]
    NoTarget,
}

/// Convenience alias for `Result<T, EngineError>`.
pub type EngineResult<T> = Result<T, EngineError>;
