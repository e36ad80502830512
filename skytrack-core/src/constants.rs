//! Astronomical and unit-conversion constants shared across the workspace.

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00:00 TT).
pub const J2000_JD: f64 = 2451545.0;

/// Julian Date of the B1950.0 Besselian epoch.
pub const B1950_JD: f64 = 2433282.4235;

/// JD of MJD zero: MJD = JD - 2400000.5.
pub const MJD_ZERO_POINT: f64 = 2_400_000.5;

pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

/// Length of the Besselian (tropical) year in days, used for Bxxxx epochs.
pub const DAYS_PER_BESSELIAN_YEAR: f64 = 365.242198781;

/// JD of the B1900.0 epoch, origin for Besselian epoch strings.
pub const B1900_JD: f64 = 2415020.31352;

pub const SECONDS_PER_DAY: i64 = 86_400;

pub const SECONDS_PER_DAY_F64: f64 = 86_400.0;

pub const HOURS_PER_DAY: f64 = 24.0;

/// Arcseconds in a full circle.
pub const CIRCULAR_ARCSECONDS: f64 = 1_296_000.0;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const PI: f64 = 3.141592653589793238462643;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const TWOPI: f64 = 6.283185307179586476925287;

#[allow(clippy::excessive_precision)]
pub const DEG_TO_RAD: f64 = 1.745329251994329576923691e-2;

#[allow(clippy::excessive_precision)]
pub const RAD_TO_DEG: f64 = 57.29577951308232087679815;

#[allow(clippy::excessive_precision)]
pub const ARCSEC_TO_RAD: f64 = 4.848136811095359935899141e-6;

#[allow(clippy::excessive_precision)]
pub const MILLIARCSEC_TO_RAD: f64 = 4.848136811095359935899141e-9;

#[allow(clippy::excessive_precision)]
pub const ARCSEC_PER_RAD: f64 = 206264.8062470963551564734;

/// Hours of right ascension per radian (24h / 2pi).
pub const HOURS_PER_RAD: f64 = 12.0 / PI;

/// TT - TAI, fixed by definition (seconds).
pub const TT_MINUS_TAI_SECONDS: f64 = 32.184;

/// Constant of annual aberration (arcseconds).
pub const ABERRATION_CONSTANT_ARCSEC: f64 = 20.496;

/// Constant of diurnal aberration for a sea-level equatorial observer
/// (arcseconds).
pub const DIURNAL_ABERRATION_ARCSEC: f64 = 0.320;

/// WGS84 semi-major axis in meters.
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS84 semi-major axis in kilometers.
pub const WGS84_SEMI_MAJOR_AXIS_KM: f64 = 6378.137;

/// WGS84 first eccentricity squared: e^2 = (a^2 - b^2) / a^2.
pub const WGS84_ECCENTRICITY_SQUARED: f64 = 6.6943799901413165e-3;
