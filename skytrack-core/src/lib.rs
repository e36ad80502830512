//! Foundation types for the skytrack workspace.
//!
//! This crate carries the pieces every other skytrack crate leans on:
//! astronomical constants, the unified [`CoreError`] type, small angle/math
//! helpers, and the observer's geodetic [`Location`] and site [`Weather`].
//! It deliberately has no I/O and no heavy dependencies so it can sit under
//! both the time crate and the realtime engine.

pub mod constants;
pub mod errors;
pub mod location;
pub mod math;
pub mod weather;

pub use errors::{CoreError, CoreResult};
pub use location::Location;
pub use weather::Weather;
