//! Pure pipeline stage functions.
//!
//! Each stage consumes upstream values and produces the next buffer or
//! scalar block, deterministically and without I/O. The scheduler in
//! [`crate::engine`] owns all locking; nothing in this module touches a
//! mutex, which is what keeps the stages independently testable and the
//! lock order auditable in one place.
//!
//! Pipeline order: catalog -> precessed -> nutated -> orbital motion ->
//! proper motion -> annual aberration -> diurnal aberration -> planetary
//! parallax -> refracted topocentric place.

pub mod aberration;
pub mod motion;
pub mod nutation;
pub mod parallax;
pub mod precession;
pub mod refraction;
pub mod time;
