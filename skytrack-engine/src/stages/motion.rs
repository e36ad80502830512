//! Orbital-motion and proper-motion stages.
//!
//! Both are cheap linear stages on the low schedule. Orbital motion is a
//! copy-forward for stellar targets (their orbital motion around anything
//! is unobservable at mount accuracy) and for solar-system targets, whose
//! externally supplied geocentric place already includes it. Proper motion
//! applies the catalog linear rates over the years elapsed since J2000.0
//! when the target carries them.

use crate::coords::Equatorial;
use crate::target::Target;
use skytrack_core::constants::{ARCSEC_TO_RAD, DAYS_PER_JULIAN_YEAR};
use skytrack_time::JulianDay;

/// Orbital-motion correction. Copy-forward in every current target
/// variant; the slot exists so binary-star or ephemeris-driven motion can
/// be added without reshaping the pipeline.
pub fn orbital(upstream: Equatorial, _target: &Target) -> Equatorial {
    upstream
}

/// Applies linear proper motion over the interval J2000.0 to `tt`.
pub fn proper(upstream: Equatorial, target: &Target, tt: JulianDay) -> Equatorial {
    match target.proper_motion_params() {
        Some(pm) => {
            let years = tt.days_since_j2000() / DAYS_PER_JULIAN_YEAR;
            Equatorial::new(
                upstream.ra + pm.ra_arcsec_per_year * years * ARCSEC_TO_RAD,
                upstream.dec + pm.dec_arcsec_per_year * years * ARCSEC_TO_RAD,
            )
        }
        None => upstream,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::ProperMotion;
    use approx::assert_abs_diff_eq;

    fn theta_persei() -> Target {
        Target::Stellar {
            name: "theta Per".to_string(),
            catalog: Equatorial::from_degrees(41.049942, 49.228467),
            // mu_alpha = +0.03425 s/yr = +0.51375"/yr of RA.
            proper_motion: Some(ProperMotion {
                ra_arcsec_per_year: 0.51375,
                dec_arcsec_per_year: -0.0895,
            }),
            parallax_arcsec: None,
            radial_velocity_km_s: None,
        }
    }

    #[test]
    fn test_orbital_is_copy_forward() {
        let c = Equatorial::from_degrees(10.0, 20.0);
        assert_eq!(orbital(c, &Target::stellar("x", 10.0, 20.0)), c);
    }

    #[test]
    fn test_proper_motion_meeus_21b_interval() {
        // Meeus example 21.b: 28.86 Julian years of theta Persei's motion
        // gives alpha = 41.054063 deg, delta = +49.227750 deg.
        let target = theta_persei();
        let tt = JulianDay::from_f64(2462088.69);
        let moved = proper(target.catalog_place(), &target, tt);
        assert_abs_diff_eq!(moved.ra_degrees(), 41.054063, epsilon = 2e-5);
        assert_abs_diff_eq!(moved.dec_degrees(), 49.227750, epsilon = 2e-5);
    }

    #[test]
    fn test_no_rates_no_motion() {
        let target = Target::stellar("fixed", 100.0, -30.0);
        let c = target.catalog_place();
        assert_eq!(proper(c, &target, JulianDay::j2000() + 36525.0), c);
    }
}
