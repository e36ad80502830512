//! Real-time target-position engine for a telescope mount.
//!
//! Continuously recomputes the topocentric pointing direction (hour angle
//! and apparent RA/Dec) of a celestial target while the underlying
//! astrometric corrections are refreshed at independently chosen rates,
//! because they vary on very different physical timescales:
//!
//! | Task | Nominal rate | Work |
//! |------|-------------|------|
//! | realtime | 100 Hz | time scales, sidereal time, hour angle |
//! | high     | 20 Hz  | refraction |
//! | medium   | 0.4 Hz | diurnal aberration / planetary parallax (alternating) |
//! | low      | 1/60 Hz | annual aberration, precession, nutation, orbital motion, proper motion (round-robin) |
//!
//! The engine does not own threads or timers: the application drives the
//! four [`TrackingEngine`] tick entry points at the stated cadences, from
//! one thread each or any arrangement it likes. All shared intermediates
//! live in per-datum locked slots with a documented total lock order, so
//! the 100 Hz task never blocks behind the 60-second one.
//!
//! ```no_run
//! use skytrack_core::Location;
//! use skytrack_engine::{Target, TrackingEngine};
//! use skytrack_time::TimeTables;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tables = TimeTables::bundled();
//! tables.push_ut1_utc(60000, -0.012);
//! // ... load the rest of the IERS span ...
//!
//! let engine = TrackingEngine::new(Arc::new(tables));
//! engine.set_location(Location::from_degrees(34.0, -118.0, 100.0)?);
//! engine.set_target(Target::stellar("Vega", 279.234735, 38.783689))?;
//!
//! engine.tick_realtime();
//! let pointing = engine.current_pointing()?;
//! println!("HA {:.6} rad, Dec {:.6} rad", pointing.hour_angle, pointing.dec);
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod coords;
pub mod engine;
pub mod errors;
pub mod shared;
pub mod stages;
pub mod target;

pub use clock::{Clock, ManualClock, SystemClock};
pub use coords::Equatorial;
pub use engine::{Pointing, TrackingEngine};
pub use errors::{EngineError, EngineResult};
pub use target::{ProperMotion, Target};
