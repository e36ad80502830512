//! Equatorial coordinate pair.

use skytrack_core::constants::{DEG_TO_RAD, RAD_TO_DEG};
use skytrack_core::math::wrap_0_2pi;
use std::fmt;

/// A (right ascension, declination) pair in radians.
///
/// Which corrections have been applied is a property of the pipeline slot
/// holding the value, not of the type: the same pair flows through every
/// stage of the chain.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equatorial {
    /// Right ascension in radians, [0, 2pi).
    pub ra: f64,
    /// Declination in radians, [-pi/2, pi/2].
    pub dec: f64,
}

impl Equatorial {
    /// Creates a pair from radians, wrapping RA into [0, 2pi).
    pub fn new(ra: f64, dec: f64) -> Self {
        Self {
            ra: wrap_0_2pi(ra),
            dec,
        }
    }

    /// Creates a pair from degrees.
    pub fn from_degrees(ra_deg: f64, dec_deg: f64) -> Self {
        Self::new(ra_deg * DEG_TO_RAD, dec_deg * DEG_TO_RAD)
    }

    /// Right ascension in degrees.
    pub fn ra_degrees(&self) -> f64 {
        self.ra * RAD_TO_DEG
    }

    /// Declination in degrees.
    pub fn dec_degrees(&self) -> f64 {
        self.dec * RAD_TO_DEG
    }

    /// Angular separation from another pair, in radians (haversine form,
    /// stable for small separations).
    pub fn separation(&self, other: &Equatorial) -> f64 {
        let sin_half_ddec = ((other.dec - self.dec) / 2.0).sin();
        let sin_half_dra = ((other.ra - self.ra) / 2.0).sin();
        let a = sin_half_ddec * sin_half_ddec
            + self.dec.cos() * other.dec.cos() * sin_half_dra * sin_half_dra;
        2.0 * a.sqrt().asin()
    }
}

impl fmt::Display for Equatorial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RA {:.6} deg, Dec {:+.6} deg",
            self.ra_degrees(),
            self.dec_degrees()
        )
    }
}
