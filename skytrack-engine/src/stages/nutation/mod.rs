//! Nutation stage: IAU 1980 luni-solar series.
//!
//! Evaluates the 106-term series over the five Delaunay fundamental
//! arguments (mean anomalies of Moon and Sun, mean argument of latitude,
//! mean elongation, longitude of the ascending node) to get the nutation
//! in longitude and in obliquity, then rotates the precessed mean place of
//! date to the true place of date.
//!
//! Besides the coordinate rotation this stage publishes the scalar block
//! the time stage needs for apparent sidereal time (nutation in longitude
//! and true obliquity), the mean obliquity the aberration stage works in,
//! and the Sun's mean anomaly and node longitude for diagnostics.

mod table;

use crate::coords::Equatorial;
use skytrack_core::constants::{ARCSEC_TO_RAD, CIRCULAR_ARCSECONDS, TWOPI};
use skytrack_core::math::fmod;
use skytrack_time::JulianDay;
use table::LUNISOLAR_1980;

/// Scalar outputs of the nutation stage, radians.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NutationAngles {
    /// Nutation in longitude.
    pub dpsi: f64,
    /// Nutation in obliquity.
    pub deps: f64,
    /// Mean obliquity of the ecliptic (IAU 1980).
    pub mean_obliquity: f64,
    /// True obliquity: mean + nutation in obliquity.
    pub true_obliquity: f64,
    /// Mean anomaly of the Sun (Delaunay l').
    pub sun_mean_anomaly: f64,
    /// Mean longitude of the Moon's ascending node (Delaunay Omega).
    pub ascending_node: f64,
}

/// Evaluates the full series at the given TT date.
pub fn compute(tt: JulianDay) -> NutationAngles {
    let t = tt.centuries_since_j2000();

    // Delaunay arguments: arcsecond polynomials plus whole revolutions,
    // kept separate so the revolution count does not eat the precision of
    // the polynomial part.
    let el = delaunay(485_866.733 + (715_922.633 + (31.310 + 0.064 * t) * t) * t, 1325.0, t);
    let elp = delaunay(1_287_099.804 + (1_292_581.224 + (-0.577 - 0.012 * t) * t) * t, 99.0, t);
    let f = delaunay(335_778.877 + (295_263.137 + (-13.257 + 0.011 * t) * t) * t, 1342.0, t);
    let d = delaunay(1_072_261.307 + (1_105_601.328 + (-6.891 + 0.019 * t) * t) * t, 1236.0, t);
    let om = delaunay(450_160.280 + (-482_890.539 + (7.455 + 0.008 * t) * t) * t, -5.0, t);

    let mut dpsi = 0.0;
    let mut deps = 0.0;
    for &(nl, nlp, nf, nd, nom, sp, spt, ce, cet) in LUNISOLAR_1980.iter().rev() {
        let arg = fmod(
            f64::from(nl) * el
                + f64::from(nlp) * elp
                + f64::from(nf) * f
                + f64::from(nd) * d
                + f64::from(nom) * om,
            TWOPI,
        );
        let (sarg, carg) = libm::sincos(arg);
        dpsi += (sp + spt * t) * sarg;
        deps += (ce + cet * t) * carg;
    }
    // Table units are 0.0001 arcseconds.
    let dpsi = dpsi * 1e-4 * ARCSEC_TO_RAD;
    let deps = deps * 1e-4 * ARCSEC_TO_RAD;

    let mean_obliquity =
        (84_381.448 + (-46.8150 + (-0.00059 + 0.001_813 * t) * t) * t) * ARCSEC_TO_RAD;

    NutationAngles {
        dpsi,
        deps,
        mean_obliquity,
        true_obliquity: mean_obliquity + deps,
        sun_mean_anomaly: elp,
        ascending_node: om,
    }
}

fn delaunay(arcsec_poly: f64, revolutions_per_century: f64, t: f64) -> f64 {
    fmod(arcsec_poly, CIRCULAR_ARCSECONDS) * ARCSEC_TO_RAD
        + fmod(revolutions_per_century * t, 1.0) * TWOPI
}

/// Rotates a mean place of date to the true place of date.
///
/// First-order corrections in dpsi and deps; exact to well below a
/// milliarcsecond for targets more than a degree from the pole, which is
/// the mount's own exclusion zone.
pub fn apply(mean_of_date: Equatorial, angles: &NutationAngles) -> Equatorial {
    let (sin_ra, cos_ra) = mean_of_date.ra.sin_cos();
    let tan_dec = mean_of_date.dec.tan();
    let (sin_eps, cos_eps) = angles.mean_obliquity.sin_cos();

    let dra = (cos_eps + sin_eps * sin_ra * tan_dec) * angles.dpsi
        - cos_ra * tan_dec * angles.deps;
    let ddec = sin_eps * cos_ra * angles.dpsi + sin_ra * angles.deps;

    Equatorial::new(mean_of_date.ra + dra, mean_of_date.dec + ddec)
}
