//! Greenwich and local sidereal time.
//!
//! Sidereal time measures the rotation of the Earth against the stars, the
//! angle a telescope mount actually tracks. Greenwich Mean Sidereal Time
//! (GMST) comes from a polynomial in UT1; the apparent flavor (GAST) adds
//! the equation of the equinoxes, which needs the nutation in longitude
//! and the true obliquity from the pipeline's nutation stage.
//!
//! All angles are radians; right ascension and sidereal times share the
//! same [0, 2pi) convention so hour angles fall out by subtraction.

use crate::julian::JulianDay;
use skytrack_core::constants::{DAYS_PER_JULIAN_CENTURY, DEG_TO_RAD};
use skytrack_core::math::{wrap_0_2pi, wrap_pm_pi};

/// Greenwich Mean Sidereal Time at the given UT1 instant, in radians.
///
/// IAU 1982 expression in the continuous form (valid at any instant, not
/// just 0h UT1).
pub fn gmst(ut1: JulianDay) -> f64 {
    let d = ut1.days_since_j2000();
    let t = d / DAYS_PER_JULIAN_CENTURY;

    let gmst_deg = 280.460_618_37
        + 360.985_647_366_29 * d
        + t * t * (0.000_387_933 - t / 38_710_000.0);

    wrap_0_2pi(gmst_deg * DEG_TO_RAD)
}

/// GMST at the midnight (0h UT1) preceding the given instant, in radians.
pub fn gmst0(ut1: JulianDay) -> f64 {
    // Julian days begin at noon: midnight is whole - 0.5 or whole + 0.5
    // depending on which side of noon the fraction sits.
    let midnight = if ut1.fraction() >= 0.5 {
        JulianDay::new(ut1.whole(), 0.5)
    } else {
        JulianDay::new(ut1.whole() - 1.0, 0.5)
    };
    gmst(midnight)
}

/// Greenwich Apparent Sidereal Time: GMST plus the equation of the
/// equinoxes. `nut_longitude` and `true_obliquity` in radians.
pub fn gast(ut1: JulianDay, nut_longitude: f64, true_obliquity: f64) -> f64 {
    wrap_0_2pi(gmst(ut1) + nut_longitude * true_obliquity.cos())
}

/// Local sidereal time for an observer at the given east longitude.
pub fn local_sidereal(greenwich_sidereal: f64, longitude_east: f64) -> f64 {
    wrap_0_2pi(greenwich_sidereal + longitude_east)
}

/// Hour angle of a target: local sidereal time minus right ascension,
/// wrapped to (-pi, pi] (negative east of the meridian).
pub fn hour_angle(local_sidereal: f64, right_ascension: f64) -> f64 {
    wrap_pm_pi(local_sidereal - right_ascension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use skytrack_core::constants::{ARCSEC_TO_RAD, HOURS_PER_RAD};

    fn hours(rad: f64) -> f64 {
        rad * HOURS_PER_RAD
    }

    #[test]
    fn test_gmst_meeus_12a() {
        // 1987-04-10 0h UT1: GMST = 13h 10m 46.3668s.
        let ut1 = JulianDay::from_calendar(1987, 4, 10, 0, 0, 0.0).unwrap();
        let expected = 13.0 + 10.0 / 60.0 + 46.3668 / 3600.0;
        assert_abs_diff_eq!(hours(gmst(ut1)), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_gmst_meeus_12b() {
        // 1987-04-10 19:21:00 UT1: GMST = 8h 34m 57.0896s.
        let ut1 = JulianDay::from_calendar(1987, 4, 10, 19, 21, 0.0).unwrap();
        let expected = 8.0 + 34.0 / 60.0 + 57.0896 / 3600.0;
        assert_abs_diff_eq!(hours(gmst(ut1)), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_gmst0_matches_midnight_evaluation() {
        let midnight = JulianDay::from_calendar(1987, 4, 10, 0, 0, 0.0).unwrap();
        let later = JulianDay::from_calendar(1987, 4, 10, 19, 21, 0.0).unwrap();
        assert_abs_diff_eq!(gmst0(later), gmst(midnight), epsilon = 1e-12);
        // An instant in the morning (before noon) belongs to the same
        // civil day, even though the Julian day number already rolled.
        let morning = JulianDay::from_calendar(1987, 4, 10, 3, 0, 0.0).unwrap();
        assert_abs_diff_eq!(gmst0(morning), gmst(midnight), epsilon = 1e-12);
    }

    #[test]
    fn test_gast_meeus_12a() {
        // Same date with nutation dpsi = -3.788", eps = 23 26' 36.85":
        // apparent sidereal time 13h 10m 46.1351s.
        let ut1 = JulianDay::from_calendar(1987, 4, 10, 0, 0, 0.0).unwrap();
        let dpsi = -3.788 * ARCSEC_TO_RAD;
        let eps = (23.0 + 26.0 / 60.0 + 36.85 / 3600.0) * DEG_TO_RAD;
        let expected = 13.0 + 10.0 / 60.0 + 46.1351 / 3600.0;
        assert_abs_diff_eq!(hours(gast(ut1, dpsi, eps)), expected, epsilon = 1e-5);
    }

    #[test]
    fn test_local_sidereal_and_hour_angle() {
        let gst = 1.0;
        let lon_west = -118.0 * DEG_TO_RAD;
        let lst = local_sidereal(gst, lon_west);
        assert_abs_diff_eq!(lst, wrap_0_2pi(1.0 + lon_west), epsilon = 1e-15);

        // Target on the meridian: HA = 0.
        assert_abs_diff_eq!(hour_angle(lst, lst), 0.0, epsilon = 1e-15);
        // Target 1h east of the meridian: HA = -15 degrees.
        let ra = wrap_0_2pi(lst + 15.0 * DEG_TO_RAD);
        assert_abs_diff_eq!(hour_angle(lst, ra), -15.0 * DEG_TO_RAD, epsilon = 1e-12);
    }
}
