//! Planetary-parallax stage.
//!
//! Geocentric parallax shifts a nearby body against the stars by up to
//! about a degree (the Moon) but is far below mount accuracy for
//! anything outside the solar system, and the solar-system target
//! variants here already carry externally supplied geocentric places.
//! The stage is therefore a copy-forward that keeps its slot in the
//! medium-rate rotation so a topocentric correction can be dropped in
//! when an ephemeris source is wired up.

use crate::coords::Equatorial;
use crate::target::Target;

pub fn apply(upstream: Equatorial, _target: &Target) -> Equatorial {
    upstream
}
