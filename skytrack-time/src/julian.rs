//! Two-part Julian day value type.
//!
//! A [`JulianDay`] stores an instant as `(whole, fraction)` where, after
//! normalization, `whole` is an integral day number and `0 <= fraction < 1`.
//! The split exists to preserve sub-second precision across large day
//! numbers: a single f64 Julian Date has ~40 microsecond granularity near
//! the current epoch, the split form keeps nanoseconds.
//!
//! Value semantics are immutable: every operator produces a freshly
//! normalized result, and the compound-assignment operators re-normalize.
//! Equality and ordering are only defined on the normalized form, which the
//! private constructor guarantees — there is no way to build an
//! un-normalized value from outside this module.
//!
//! Note that a Julian day begins at noon: `fraction = 0.0` is 12:00 and
//! `fraction = 0.5` is midnight of the following calendar date.

use crate::errors::{TimeError, TimeResult};
use skytrack_core::constants::{
    B1900_JD, DAYS_PER_BESSELIAN_YEAR, DAYS_PER_JULIAN_YEAR, J2000_JD, MJD_ZERO_POINT,
    SECONDS_PER_DAY_F64,
};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// Normalized two-part Julian day: `whole` integral, `fraction` in [0, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JulianDay {
    whole: f64,
    fraction: f64,
}

impl JulianDay {
    /// Creates a normalized Julian day from an arbitrary two-part split.
    ///
    /// The parts may carry any values; the result satisfies the invariant
    /// `whole` integral, `0 <= fraction < 1`, with `whole + fraction`
    /// numerically equal to the input sum.
    pub fn new(whole: f64, fraction: f64) -> Self {
        let sum = whole + fraction;
        let w = sum.floor();
        // Recover the fraction from the original parts so no precision is
        // lost through the rounded sum.
        let mut f = (whole - w) + fraction;
        // Guard the half-open interval against floating-point edge cases.
        if f >= 1.0 {
            return Self::new(w + 1.0, f - 1.0);
        }
        if f < 0.0 {
            return Self::new(w - 1.0, f + 1.0);
        }
        Self { whole: w, fraction: f }
    }

    /// Creates a Julian day from a single f64 Julian Date.
    pub fn from_f64(jd: f64) -> Self {
        Self::new(jd, 0.0)
    }

    /// The J2000.0 epoch: JD 2451545.0 (2000-01-01 12:00:00).
    pub fn j2000() -> Self {
        Self::new(J2000_JD, 0.0)
    }

    /// Integral day component.
    pub fn whole(&self) -> f64 {
        self.whole
    }

    /// Fractional day component in [0, 1).
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Collapses to a single f64 Julian Date (loses sub-microsecond
    /// precision for current-epoch dates).
    pub fn to_f64(&self) -> f64 {
        self.whole + self.fraction
    }

    /// Modified Julian Day: JD - 2400000.5.
    pub fn mjd(&self) -> f64 {
        (self.whole - MJD_ZERO_POINT) + self.fraction
    }

    /// Days elapsed since J2000.0, full precision.
    pub fn days_since_j2000(&self) -> f64 {
        (self.whole - J2000_JD) + self.fraction
    }

    /// Julian centuries elapsed since J2000.0.
    pub fn centuries_since_j2000(&self) -> f64 {
        self.days_since_j2000() / skytrack_core::constants::DAYS_PER_JULIAN_CENTURY
    }

    /// Decomposes into the whole day number and seconds into that day
    /// (seconds since the preceding noon, `0 <= s < 86400`).
    pub fn split_day(&self) -> (f64, f64) {
        (self.whole, self.fraction * SECONDS_PER_DAY_F64)
    }

    /// Returns this instant shifted by the given number of days.
    pub fn add_days(&self, days: f64) -> Self {
        Self::new(self.whole, self.fraction + days)
    }

    /// Returns this instant shifted by the given number of seconds.
    pub fn add_seconds(&self, seconds: f64) -> Self {
        self.add_days(seconds / SECONDS_PER_DAY_F64)
    }

    /// Creates a Julian day from proleptic Gregorian calendar fields.
    ///
    /// `second` may reach into [60, 61) to express a leap second.
    ///
    /// # Errors
    ///
    /// [`TimeError::InvalidDate`] when any field is outside its range.
    pub fn from_calendar(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: f64,
    ) -> TimeResult<Self> {
        validate_calendar(year, month, day, hour, minute, second)?;

        // ERFA eraCal2jd integer algorithm: MJD at 0h of the given date.
        let my = (month as i32 - 14) / 12;
        let iypmy = year + my;
        let mjd = ((1461 * (iypmy + 4800)) / 4 + (367 * (month as i32 - 2 - 12 * my)) / 12
            - (3 * ((iypmy + 4900) / 100)) / 4
            + day as i32
            - 2432076) as f64;

        let jd_midnight = MJD_ZERO_POINT + mjd;
        let day_fraction =
            (60.0 * (60 * hour as i32 + minute as i32) as f64 + second) / SECONDS_PER_DAY_F64;

        Ok(Self::new(jd_midnight, day_fraction))
    }

    /// Converts to calendar fields `(year, month, day, day_fraction)` where
    /// `day_fraction` counts from midnight of the returned date.
    pub fn to_calendar(&self) -> (i32, u8, u8, f64) {
        // Shift the origin from noon to midnight without going through the
        // rounded total: whole is integral so the branch is exact.
        let (z, f) = if self.fraction < 0.5 {
            (self.whole, self.fraction + 0.5)
        } else {
            (self.whole + 1.0, self.fraction - 0.5)
        };

        let a = if z < 2_299_161.0 {
            z
        } else {
            let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
            z + 1.0 + alpha - (alpha / 4.0).floor()
        };

        let b = a + 1524.0;
        let c = ((b - 122.1) / DAYS_PER_JULIAN_YEAR).floor();
        let d = (DAYS_PER_JULIAN_YEAR * c).floor();
        let e = ((b - d) / 30.6001).floor();

        let day = (b - d - (30.6001 * e).floor()) as u8;
        let month = if e < 14.0 { e - 1.0 } else { e - 13.0 } as u8;
        let year = if month > 2 { c - 4716.0 } else { c - 4715.0 } as i32;

        (year, month, day, f)
    }

    /// Parses an epoch-relative string: "J2000.0" (Julian epoch, 365.25-day
    /// years from JD 2451545.0) or "B1950.0" (Besselian epoch, tropical
    /// years from JD 2415020.31352).
    pub fn from_epoch_str(s: &str) -> TimeResult<Self> {
        let s = s.trim();
        let mut chars = s.chars();
        let prefix = chars
            .next()
            .ok_or_else(|| TimeError::InvalidEpoch(s.to_string()))?;
        let year: f64 = chars
            .as_str()
            .parse()
            .map_err(|_| TimeError::InvalidEpoch(s.to_string()))?;
        if !year.is_finite() {
            return Err(TimeError::InvalidEpoch(s.to_string()));
        }
        match prefix {
            'J' | 'j' => Ok(Self::new(
                J2000_JD,
                (year - 2000.0) * DAYS_PER_JULIAN_YEAR,
            )),
            'B' | 'b' => Ok(Self::new(
                B1900_JD,
                (year - 1900.0) * DAYS_PER_BESSELIAN_YEAR,
            )),
            _ => Err(TimeError::InvalidEpoch(s.to_string())),
        }
    }
}

fn validate_calendar(
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: f64,
) -> TimeResult<()> {
    if !(1..=12).contains(&month) {
        return Err(TimeError::invalid_date(
            year,
            month as i32,
            day as i32,
            "month out of range",
        ));
    }
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    let days_in_month = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if leap => 29,
        _ => 28,
    };
    if day == 0 || day > days_in_month {
        return Err(TimeError::invalid_date(
            year,
            month as i32,
            day as i32,
            "day out of range for month",
        ));
    }
    if hour >= 24 || minute >= 60 || !second.is_finite() || !(0.0..61.0).contains(&second) {
        return Err(TimeError::invalid_date(
            year,
            month as i32,
            day as i32,
            "time of day out of range",
        ));
    }
    Ok(())
}

impl Add<f64> for JulianDay {
    type Output = JulianDay;

    fn add(self, days: f64) -> JulianDay {
        self.add_days(days)
    }
}

impl Sub<f64> for JulianDay {
    type Output = JulianDay;

    fn sub(self, days: f64) -> JulianDay {
        self.add_days(-days)
    }
}

impl AddAssign<f64> for JulianDay {
    fn add_assign(&mut self, days: f64) {
        *self = self.add_days(days);
    }
}

impl SubAssign<f64> for JulianDay {
    fn sub_assign(&mut self, days: f64) {
        *self = self.add_days(-days);
    }
}

/// Difference between two instants, in days, at full split precision.
impl Sub<JulianDay> for JulianDay {
    type Output = f64;

    fn sub(self, rhs: JulianDay) -> f64 {
        (self.whole - rhs.whole) + (self.fraction - rhs.fraction)
    }
}

impl PartialOrd for JulianDay {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        // Both sides are normalized, so lexicographic comparison of the
        // parts is exact where comparing the summed f64 would round.
        match self.whole.partial_cmp(&other.whole) {
            Some(std::cmp::Ordering::Equal) => self.fraction.partial_cmp(&other.fraction),
            ord => ord,
        }
    }
}

impl fmt::Display for JulianDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.9}", self.to_f64())
    }
}

impl From<f64> for JulianDay {
    fn from(jd: f64) -> Self {
        Self::from_f64(jd)
    }
}

impl FromStr for JulianDay {
    type Err = TimeError;

    fn from_str(s: &str) -> TimeResult<Self> {
        Self::from_epoch_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_normalized(jd: JulianDay) {
        assert_eq!(jd.whole(), jd.whole().floor(), "whole not integral: {jd:?}");
        assert!(
            (0.0..1.0).contains(&jd.fraction()),
            "fraction out of range: {jd:?}"
        );
    }

    #[test]
    fn test_normalization_invariant() {
        let cases = [
            (2451545.0, 0.0),
            (2451544.5, 0.75),
            (2451545.25, -0.5),
            (0.0, 2451545.993),
            (2451545.0, -3.25),
            (2451545.0, 1.0 - 1e-16),
        ];
        for (w, f) in cases {
            let jd = JulianDay::new(w, f);
            assert_normalized(jd);
            assert_abs_diff_eq!(jd.to_f64(), w + f, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_normalization_survives_arithmetic() {
        let mut jd = JulianDay::j2000();
        jd += 0.9;
        assert_normalized(jd);
        jd -= 2.7;
        assert_normalized(jd);
        assert_normalized(jd + 1234.56789);
        assert_normalized(jd - 0.999999999);
        assert_normalized(jd.add_seconds(-1.0));
    }

    #[test]
    fn test_known_julian_dates() {
        // Meeus, "Astronomical Algorithms", example 7.a and table values.
        let sputnik = JulianDay::from_calendar(1957, 10, 4, 19, 26, 24.0).unwrap();
        assert_abs_diff_eq!(sputnik.to_f64(), 2436116.31, epsilon = 1e-6);

        let j2000 = JulianDay::from_calendar(2000, 1, 1, 12, 0, 0.0).unwrap();
        assert_eq!(j2000.to_f64(), J2000_JD);

        let d1987 = JulianDay::from_calendar(1987, 1, 27, 0, 0, 0.0).unwrap();
        assert_eq!(d1987.to_f64(), 2446822.5);

        let d1988 = JulianDay::from_calendar(1988, 6, 19, 12, 0, 0.0).unwrap();
        assert_eq!(d1988.to_f64(), 2447332.0);
    }

    #[test]
    fn test_calendar_round_trip() {
        let cases = [
            (2000, 1, 1, 12, 0, 0.0),
            (1999, 12, 31, 23, 59, 59.5),
            (2024, 2, 29, 6, 30, 15.25),
            (1973, 1, 1, 0, 0, 0.0),
            (2028, 11, 13, 4, 33, 36.0),
        ];
        for (y, mo, d, h, mi, s) in cases {
            let jd = JulianDay::from_calendar(y, mo, d, h, mi, s).unwrap();
            let (ry, rmo, rd, frac) = jd.to_calendar();
            assert_eq!((ry, rmo, rd), (y, mo, d));
            let expected_frac =
                (60.0 * (60 * h as i32 + mi as i32) as f64 + s) / SECONDS_PER_DAY_F64;
            assert_abs_diff_eq!(frac, expected_frac, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_invalid_calendar_fields() {
        assert!(JulianDay::from_calendar(2023, 2, 29, 0, 0, 0.0).is_err());
        assert!(JulianDay::from_calendar(2023, 13, 1, 0, 0, 0.0).is_err());
        assert!(JulianDay::from_calendar(2023, 0, 1, 0, 0, 0.0).is_err());
        assert!(JulianDay::from_calendar(2023, 6, 31, 0, 0, 0.0).is_err());
        assert!(JulianDay::from_calendar(2023, 6, 15, 24, 0, 0.0).is_err());
        assert!(JulianDay::from_calendar(2023, 6, 15, 12, 60, 0.0).is_err());
        assert!(JulianDay::from_calendar(2023, 6, 15, 12, 0, 61.0).is_err());
        // Leap second second=60.x is representable.
        assert!(JulianDay::from_calendar(2016, 12, 31, 23, 59, 60.5).is_ok());
    }

    #[test]
    fn test_epoch_strings() {
        let j2000 = JulianDay::from_epoch_str("J2000.0").unwrap();
        assert_eq!(j2000.to_f64(), J2000_JD);

        let b1950 = JulianDay::from_epoch_str("B1950.0").unwrap();
        assert_abs_diff_eq!(b1950.to_f64(), 2433282.4235, epsilon = 1e-3);

        let j2025_5: JulianDay = "j2025.5".parse().unwrap();
        assert_abs_diff_eq!(
            j2025_5.to_f64(),
            J2000_JD + 25.5 * DAYS_PER_JULIAN_YEAR,
            epsilon = 1e-9
        );

        assert!(JulianDay::from_epoch_str("X2000").is_err());
        assert!(JulianDay::from_epoch_str("J").is_err());
        assert!(JulianDay::from_epoch_str("").is_err());
        assert!(JulianDay::from_epoch_str("Jtwo-thousand").is_err());
    }

    #[test]
    fn test_ordering_and_difference() {
        let a = JulianDay::from_calendar(2000, 1, 1, 12, 0, 0.0).unwrap();
        let b = a.add_seconds(1e-3);
        assert!(b > a);
        assert!(a < b);
        // Sub-millisecond difference survives the split representation.
        assert_abs_diff_eq!((b - a) * SECONDS_PER_DAY_F64, 1e-3, epsilon = 1e-9);
    }

    #[test]
    fn test_split_day() {
        let jd = JulianDay::new(2451545.0, 0.25);
        let (whole, seconds) = jd.split_day();
        assert_eq!(whole, 2451545.0);
        assert_abs_diff_eq!(seconds, 21600.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mjd() {
        let jd = JulianDay::from_calendar(2000, 1, 1, 0, 0, 0.0).unwrap();
        assert_abs_diff_eq!(jd.mjd(), 51544.0, epsilon = 1e-9);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let original = JulianDay::new(J2000_JD, 0.123456789);
        let json = serde_json::to_string(&original).unwrap();
        let back: JulianDay = serde_json::from_str(&json).unwrap();
        assert_eq!(original, back);
    }
}
