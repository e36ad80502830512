//! Astronomical time for the skytrack workspace.
//!
//! Provides the two-part [`JulianDay`] value type, the [`TimeTables`]
//! leap-second and earth-rotation data, conversions between the five
//! astronomical time scales ([`Scale`]) pivoting through Terrestrial Time,
//! and sidereal-time functions.
//!
//! # Time Scales
//!
//! | Scale | Meaning |
//! |-------|---------|
//! | UTC   | Civil time; atomic rate with leap seconds |
//! | UT1   | Earth-rotation time; UTC + dUT1 from IERS data |
//! | TAI   | International Atomic Time; no adjustments |
//! | TT    | Terrestrial Time; TAI + 32.184 s, the conversion pivot |
//! | TDB   | Barycentric Dynamical Time; TT + small periodic term |
//!
//! A `JulianDay` is only meaningful paired with a scale; the pairing is by
//! convention at the call site (the engine keeps one shared `TimeSnapshot`
//! with explicitly named UTC/UT1/TT fields rather than tagging each value).

pub mod errors;
pub mod julian;
pub mod scales;
pub mod sidereal;
pub mod tables;

pub use errors::{TimeError, TimeResult};
pub use julian::JulianDay;
pub use scales::{convert, Scale};
pub use tables::TimeTables;
