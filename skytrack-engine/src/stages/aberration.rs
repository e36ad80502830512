//! Annual and diurnal aberration.
//!
//! # Background
//!
//! Aberration is the apparent displacement of a source toward the
//! observer's velocity vector. Two components matter at mount accuracy:
//! Earth's orbital velocity around the Sun (annual, up to ~20.5") and the
//! observer's rotation about Earth's axis (diurnal, up to ~0.32"). They
//! change on very different time scales and so live on different
//! schedules: annual on the low rate, diurnal on the medium rate.
//!
//! The annual component uses the classical first-order formulas of Meeus
//! chapter 23, including the eccentricity terms driven by the longitude
//! of perihelion. Solar position comes from the low-precision solar
//! theory of chapter 25, which is two orders of magnitude better than
//! needed here.

use crate::coords::Equatorial;
use crate::stages::nutation::NutationAngles;
use libm::sincos;
use skytrack_core::constants::{
    ABERRATION_CONSTANT_ARCSEC, ARCSEC_TO_RAD, DEG_TO_RAD, DIURNAL_ABERRATION_ARCSEC,
    WGS84_SEMI_MAJOR_AXIS_KM,
};
use skytrack_core::math::wrap_0_2pi;
use skytrack_core::{CoreResult, Location};
use skytrack_time::JulianDay;

/// Geometric (true) solar longitude and orbital eccentricity terms at
/// the given TT date.
struct SolarGeometry {
    /// True longitude of the Sun, radians.
    true_longitude: f64,
    /// Eccentricity of Earth's orbit.
    eccentricity: f64,
    /// Longitude of perihelion of Earth's orbit, radians.
    perihelion: f64,
}

fn solar_geometry(tt: JulianDay) -> SolarGeometry {
    let t = tt.centuries_since_j2000();

    // Geometric mean longitude and mean anomaly of the Sun, degrees.
    let l0 = 280.46646 + t * (36000.76983 + t * 0.0003032);
    let m = (357.52911 + t * (35999.05029 - t * 0.0001537)) * DEG_TO_RAD;

    // Equation of center.
    let c = (1.914602 - t * (0.004817 + t * 0.000014)) * m.sin()
        + (0.019993 - t * 0.000101) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();

    SolarGeometry {
        true_longitude: wrap_0_2pi((l0 + c) * DEG_TO_RAD),
        eccentricity: 0.016708634 - t * (0.000042037 + t * 0.0000001267),
        perihelion: (102.93735 + t * (1.71946 + t * 0.00046)) * DEG_TO_RAD,
    }
}

/// Applies annual aberration to `upstream` at the given TT date.
///
/// Takes the nutation output for its mean obliquity; the aberration
/// formulas are referred to the mean ecliptic of date.
pub fn annual(upstream: Equatorial, tt: JulianDay, angles: &NutationAngles) -> Equatorial {
    let sun = solar_geometry(tt);
    let kappa = ABERRATION_CONSTANT_ARCSEC * ARCSEC_TO_RAD;

    let (sin_ra, cos_ra) = sincos(upstream.ra);
    let (sin_dec, cos_dec) = sincos(upstream.dec);
    let (sin_lon, cos_lon) = sincos(sun.true_longitude);
    let (sin_pi, cos_pi) = sincos(sun.perihelion);
    let cos_eps = angles.mean_obliquity.cos();
    let tan_eps = angles.mean_obliquity.tan();

    // Meeus (23.3). The e-terms share the structure of the main terms
    // with the perihelion longitude in place of the solar longitude.
    let d_ra = -kappa * (cos_ra * cos_lon * cos_eps + sin_ra * sin_lon) / cos_dec
        + sun.eccentricity * kappa * (cos_ra * cos_pi * cos_eps + sin_ra * sin_pi) / cos_dec;
    let d_dec = -kappa
        * (cos_lon * cos_eps * (tan_eps * cos_dec - sin_ra * sin_dec)
            + cos_ra * sin_dec * sin_lon)
        + sun.eccentricity
            * kappa
            * (cos_pi * cos_eps * (tan_eps * cos_dec - sin_ra * sin_dec)
                + cos_ra * sin_dec * sin_pi);

    Equatorial::new(upstream.ra + d_ra, upstream.dec + d_dec)
}

/// Applies diurnal aberration to `upstream`.
///
/// `hour_angle` is the local hour angle of the upstream place in
/// radians. The 0.320" constant is scaled by the observer's distance
/// from Earth's spin axis, so the correction vanishes at the poles.
pub fn diurnal(
    upstream: Equatorial,
    hour_angle: f64,
    location: &Location,
) -> CoreResult<Equatorial> {
    let (axis_distance_km, _) = location.to_geocentric_km()?;
    let k = DIURNAL_ABERRATION_ARCSEC * ARCSEC_TO_RAD * axis_distance_km
        / WGS84_SEMI_MAJOR_AXIS_KM;

    let (sin_ha, cos_ha) = sincos(hour_angle);
    let (sin_dec, cos_dec) = sincos(upstream.dec);

    Ok(Equatorial::new(
        upstream.ra + k * cos_ha / cos_dec,
        upstream.dec + k * sin_ha * sin_dec,
    ))
}
