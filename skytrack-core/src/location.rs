//! Observer geodetic position and geocentric conversion.
//!
//! A [`Location`] holds the geodetic (GPS-style) latitude, longitude and
//! ellipsoidal height of the observing site. The topocentric corrections in
//! the engine (diurnal aberration, geocentric parallax) need the observer's
//! position relative to Earth's center of mass, not the ellipsoid surface,
//! so this module also provides the WGS84 geodetic-to-geocentric conversion
//! returning cylindrical `(u, v)` components:
//!
//! - `u`: perpendicular distance from Earth's rotation axis
//! - `v`: distance from the equatorial plane (positive north)
//!
//! At mid-latitudes the geodetic and geocentric latitudes differ by up to
//! ~11 arcminutes, which matters at the sub-arcsecond level the pipeline
//! works to.

use crate::constants::{
    DEG_TO_RAD, WGS84_ECCENTRICITY_SQUARED, WGS84_SEMI_MAJOR_AXIS_KM,
};
use crate::errors::{CoreError, CoreResult};

/// Geodetic observer position: latitude and longitude in radians
/// (longitude positive east), height in meters above the WGS84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub height: f64,
}

impl Location {
    /// Creates a location from degrees and meters, validating ranges.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidLocation`] when latitude is outside
    /// [-90, 90], longitude outside [-180, 360], or height outside a
    /// plausible terrestrial range.
    pub fn from_degrees(lat_deg: f64, lon_deg: f64, height_m: f64) -> CoreResult<Self> {
        if !(-90.0..=90.0).contains(&lat_deg) || !lat_deg.is_finite() {
            return Err(CoreError::InvalidLocation(format!(
                "latitude {lat_deg} out of range [-90, 90]"
            )));
        }
        if !(-180.0..=360.0).contains(&lon_deg) || !lon_deg.is_finite() {
            return Err(CoreError::InvalidLocation(format!(
                "longitude {lon_deg} out of range [-180, 360]"
            )));
        }
        if !(-500.0..=10_000.0).contains(&height_m) || !height_m.is_finite() {
            return Err(CoreError::InvalidLocation(format!(
                "height {height_m} m out of range [-500, 10000]"
            )));
        }
        Ok(Self {
            latitude: lat_deg * DEG_TO_RAD,
            longitude: lon_deg * DEG_TO_RAD,
            height: height_m,
        })
    }

    /// Converts to geocentric cylindrical coordinates in kilometers.
    ///
    /// Returns `(u, v)`: distance from the rotation axis and distance from
    /// the equatorial plane, accounting for Earth's equatorial bulge.
    ///
    /// # Errors
    ///
    /// Returns an error for degenerate latitude values that would divide by
    /// zero; unreachable with a validated `Location`.
    pub fn to_geocentric_km(&self) -> CoreResult<(f64, f64)> {
        let height_km = self.height / 1000.0;
        let (sin_lat, cos_lat) = self.latitude.sin_cos();

        let denominator = 1.0 - WGS84_ECCENTRICITY_SQUARED * sin_lat * sin_lat;
        if denominator <= f64::EPSILON {
            return Err(CoreError::math(
                "geocentric_conversion",
                "latitude too close to critical value, division by zero",
            ));
        }

        let n = WGS84_SEMI_MAJOR_AXIS_KM / denominator.sqrt();
        let u = (n + height_km) * cos_lat;
        let v = (n * (1.0 - WGS84_ECCENTRICITY_SQUARED) + height_km) * sin_lat;
        Ok((u, v))
    }

    /// Geocentric latitude in radians (angle of the geocentric radius
    /// vector above the equatorial plane).
    pub fn geocentric_latitude(&self) -> CoreResult<f64> {
        let (u, v) = self.to_geocentric_km()?;
        Ok(v.atan2(u))
    }
}
