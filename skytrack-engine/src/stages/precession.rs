//! Precession stage: IAU 1976 rotation from the catalog equinox to the
//! mean equinox of date.
//!
//! The three accumulated Euler angles (zeta, z, theta) are polynomials in
//! Julian centuries of TDB since J2000.0 (Lieske et al. 1977). TT stands
//! in for TDB here; the difference (< 2 ms) is nine orders of magnitude
//! below the polynomial's own rate.

use crate::coords::Equatorial;
use skytrack_core::constants::ARCSEC_TO_RAD;
use skytrack_time::JulianDay;

/// The IAU 1976 equatorial precession angles, radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecessionAngles {
    pub zeta: f64,
    pub z: f64,
    pub theta: f64,
}

/// Accumulated precession from J2000.0 to the given TT date.
pub fn angles(tt: JulianDay) -> PrecessionAngles {
    let t = tt.centuries_since_j2000();

    let zeta = (2306.2181 + (0.30188 + 0.017998 * t) * t) * t * ARCSEC_TO_RAD;
    let z = (2306.2181 + (1.09468 + 0.018203 * t) * t) * t * ARCSEC_TO_RAD;
    let theta = (2004.3109 + (-0.42665 - 0.041833 * t) * t) * t * ARCSEC_TO_RAD;

    PrecessionAngles { zeta, z, theta }
}

/// Rotates a mean place at J2000.0 to the mean place of date.
pub fn apply(catalog: Equatorial, tt: JulianDay) -> Equatorial {
    let PrecessionAngles { zeta, z, theta } = angles(tt);

    let (sin_dec, cos_dec) = catalog.dec.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_razeta, cos_razeta) = (catalog.ra + zeta).sin_cos();

    let a = cos_dec * sin_razeta;
    let b = cos_theta * cos_dec * cos_razeta - sin_theta * sin_dec;
    let c = sin_theta * cos_dec * cos_razeta + cos_theta * sin_dec;

    Equatorial::new(a.atan2(b) + z, c.asin())
}
