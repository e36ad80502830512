//! Atmospheric refraction, the last and fastest-changing correction.
//!
//! # Background
//!
//! Refraction lifts a source along the vertical circle, so the correction
//! is naturally expressed in altitude. The stage converts the upstream
//! equatorial place to horizontal coordinates, raises the altitude by the
//! Bennett refraction for the current weather, and converts back. Bennett
//! gives refraction as a function of *apparent* altitude while the
//! pipeline supplies the *true* one, so the apparent altitude is found by
//! fixed-point iteration, bounded and converged on the change in the
//! corrected declination.
//!
//! Sources more than a degree below the true horizon pass through
//! untouched; the formula is meaningless there and the mount cannot see
//! them anyway.

use crate::coords::Equatorial;
use crate::errors::{EngineError, EngineResult};
use libm::sincos;
use skytrack_core::constants::DEG_TO_RAD;
use skytrack_core::math::wrap_0_2pi;
use skytrack_core::{Location, Weather};

/// Iteration cap for the apparent-altitude fixed point.
const MAX_ITERATIONS: u32 = 20;

/// Convergence tolerance on the corrected declination, radians.
/// Roughly 0.2 milliarcseconds, far below every other error source.
const TOLERANCE: f64 = 1e-9;

/// True altitude below which the stage is a copy-forward.
const MIN_ALTITUDE: f64 = -1.0 * DEG_TO_RAD;

/// Bennett refraction for an apparent altitude, radians, scaled for
/// pressure and temperature. The base formula is for 1010 hPa and 10 C.
fn bennett(apparent_altitude: f64, weather: &Weather) -> f64 {
    let h = (apparent_altitude / DEG_TO_RAD).max(-1.0);
    let arcmin = 1.0 / ((h + 7.31 / (h + 4.4)) * DEG_TO_RAD).tan();
    let scale =
        (weather.pressure_hpa / 1010.0) * (283.0 / (273.0 + weather.temperature_c));
    arcmin * scale / 60.0 * DEG_TO_RAD
}

/// Applies refraction to `upstream`, returning the refracted place.
///
/// `local_sidereal` is the apparent local sidereal time in radians.
pub fn apply(
    upstream: Equatorial,
    local_sidereal: f64,
    location: &Location,
    weather: &Weather,
) -> EngineResult<Equatorial> {
    let hour_angle = skytrack_time::sidereal::hour_angle(local_sidereal, upstream.ra);
    let (sin_ha, cos_ha) = sincos(hour_angle);
    let (sin_dec, cos_dec) = sincos(upstream.dec);
    let (sin_lat, cos_lat) = sincos(location.latitude);

    let true_altitude =
        (sin_lat * sin_dec + cos_lat * cos_dec * cos_ha).asin();
    if true_altitude < MIN_ALTITUDE {
        return Ok(upstream);
    }

    // Azimuth measured from south, positive westward. Refraction moves a
    // source along the vertical circle, so the azimuth is unchanged.
    let azimuth = sin_ha.atan2(cos_ha * sin_lat - (sin_dec / cos_dec) * cos_lat);
    let (sin_az, cos_az) = sincos(azimuth);

    let mut apparent = true_altitude;
    let mut dec = upstream.dec;
    for _ in 0..MAX_ITERATIONS {
        apparent = true_altitude + bennett(apparent, weather);
        let (sin_alt, cos_alt) = sincos(apparent);
        let next_dec = (sin_lat * sin_alt - cos_lat * cos_alt * cos_az).asin();
        let converged = (next_dec - dec).abs() < TOLERANCE;
        dec = next_dec;
        if converged {
            let ha = sin_az.atan2(cos_az * sin_lat + (sin_alt / cos_alt) * cos_lat);
            return Ok(Equatorial::new(wrap_0_2pi(local_sidereal - ha), dec));
        }
    }

    Err(EngineError::NotConverged {
        stage: "refraction",
        iterations: MAX_ITERATIONS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use skytrack_core::constants::ARCSEC_PER_RAD;

    fn observer() -> Location {
        Location::from_degrees(34.0, -118.0, 300.0).unwrap()
    }

    #[test]
    fn test_bennett_horizon_and_altitude() {
        let w = Weather::default();
        // Apparent horizon: classic ~34.5 arcminutes.
        assert_abs_diff_eq!(bennett(0.0, &w) / DEG_TO_RAD * 60.0, 34.5, epsilon = 0.5);
        // 45 degrees: close to one arcminute.
        assert_abs_diff_eq!(
            bennett(45.0 * DEG_TO_RAD, &w) / DEG_TO_RAD * 60.0,
            0.98,
            epsilon = 0.05
        );
    }

    #[test]
    fn test_bennett_weather_scaling() {
        let cold_dense = Weather::new(-20.0, 1030.0, 0.5);
        let alt = 10.0 * DEG_TO_RAD;
        let ratio = bennett(alt, &cold_dense) / bennett(alt, &Weather::default());
        assert_abs_diff_eq!(ratio, (1030.0 / 1010.0) * (283.0 / 253.0), epsilon = 1e-9);
    }

    #[test]
    fn test_refraction_lifts_toward_zenith() {
        // A source rising in the east at about 15 degrees true altitude:
        // the total sky shift equals the refraction there, a few
        // arcminutes.
        let loc = observer();
        let place = Equatorial::from_degrees(150.0, 20.0);
        let lst = 65.0 * DEG_TO_RAD;
        let refracted = apply(place, lst, &loc, &Weather::default()).unwrap();
        let shift = place.separation(&refracted) * ARCSEC_PER_RAD;
        assert!(shift > 100.0 && shift < 400.0, "shift = {shift}\"");
    }

    #[test]
    fn test_zenith_nearly_unmoved() {
        let loc = observer();
        // Declination = latitude, on the meridian: the source is at the
        // zenith and refraction vanishes.
        let place = Equatorial::from_degrees(100.0, 34.0);
        let lst = 100.0 * DEG_TO_RAD;
        let refracted = apply(place, lst, &loc, &Weather::default()).unwrap();
        assert!(place.separation(&refracted) * ARCSEC_PER_RAD < 2.0);
    }

    #[test]
    fn test_below_horizon_pass_through() {
        let loc = observer();
        // Far south of a northern observer's horizon.
        let place = Equatorial::from_degrees(100.0, -80.0);
        let refracted = apply(place, 100.0 * DEG_TO_RAD, &loc, &Weather::default()).unwrap();
        assert_eq!(refracted, place);
    }

    #[test]
    fn test_inversion_round_trip() {
        // The apparent altitude of the refracted place minus the Bennett
        // refraction at that altitude must reproduce the true altitude.
        let loc = observer();
        let w = Weather::default();
        let place = Equatorial::from_degrees(150.0, 20.0);
        let lst = 65.0 * DEG_TO_RAD;
        let refracted = apply(place, lst, &loc, &w).unwrap();

        let altitude = |e: Equatorial| {
            let h = skytrack_time::sidereal::hour_angle(lst, e.ra);
            (loc.latitude.sin() * e.dec.sin()
                + loc.latitude.cos() * e.dec.cos() * h.cos())
            .asin()
        };
        let apparent = altitude(refracted);
        let true_alt = altitude(place);
        assert_abs_diff_eq!(apparent - bennett(apparent, &w), true_alt, epsilon = 1e-8);
    }

    #[test]
    fn test_azimuth_preserved() {
        // Converting the refracted place back to horizontal must land on
        // the same vertical circle.
        let loc = observer();
        let place = Equatorial::from_degrees(200.0, -5.0);
        let lst = 170.0 * DEG_TO_RAD;
        let refracted = apply(place, lst, &loc, &Weather::default()).unwrap();

        let az = |e: Equatorial| {
            let h = skytrack_time::sidereal::hour_angle(lst, e.ra);
            h.sin()
                .atan2(h.cos() * loc.latitude.sin() - e.dec.tan() * loc.latitude.cos())
        };
        assert_abs_diff_eq!(az(place), az(refracted), epsilon = 1e-9);
    }
}
