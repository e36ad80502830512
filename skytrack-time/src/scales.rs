//! Conversions between astronomical time scales.
//!
//! Every conversion is two hops through Terrestrial Time (TT) as the
//! common pivot: `from -> TT -> to`. Each hop is a named pure function so
//! the individual relationships stay testable in isolation.
//!
//! ```text
//! UTC <-> TT : leap-second table + 32.184 s
//! UT1 <-> TT : UT1-UTC table, then the UTC hop
//! TAI <-> TT : fixed 32.184 s
//! TDB <-> TT : single-term periodic correction, amplitude 1.657 ms
//! ```
//!
//! Table lookups can fail with [`TimeError::TableRange`] when the process
//! was started without data covering the queried date; that is a fatal,
//! reported condition, not something to retry.

use crate::errors::TimeResult;
use crate::julian::JulianDay;
use crate::tables::TimeTables;
use skytrack_core::constants::{DEG_TO_RAD, SECONDS_PER_DAY_F64, TT_MINUS_TAI_SECONDS};

/// The five time scales the engine works in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scale {
    /// Coordinated Universal Time: civil time with leap seconds.
    Utc,
    /// Universal Time: tracks Earth's rotation angle.
    Ut1,
    /// International Atomic Time.
    Tai,
    /// Terrestrial Time: TAI + 32.184 s, the conversion pivot.
    Tt,
    /// Barycentric Dynamical Time.
    Tdb,
}

/// Converts an instant between any two scales via the TT pivot.
pub fn convert(
    jd: JulianDay,
    from: Scale,
    to: Scale,
    tables: &TimeTables,
) -> TimeResult<JulianDay> {
    let tt = match from {
        Scale::Utc => utc_to_tt(jd, tables)?,
        Scale::Ut1 => ut1_to_tt(jd, tables)?,
        Scale::Tai => tai_to_tt(jd),
        Scale::Tt => jd,
        Scale::Tdb => tdb_to_tt(jd),
    };
    match to {
        Scale::Utc => tt_to_utc(tt, tables),
        Scale::Ut1 => tt_to_ut1(tt, tables),
        Scale::Tai => Ok(tt_to_tai(tt)),
        Scale::Tt => Ok(tt),
        Scale::Tdb => Ok(tt_to_tdb(tt)),
    }
}

/// UTC -> TT: add the accumulated leap seconds, then TAI -> TT.
pub fn utc_to_tt(utc: JulianDay, tables: &TimeTables) -> TimeResult<JulianDay> {
    let dat = tables.leap_second(utc.mjd())?;
    Ok(utc.add_seconds(dat + TT_MINUS_TAI_SECONDS))
}

/// TT -> UTC: invert the leap-second offset.
///
/// The offset is piecewise constant, so one re-evaluation at the shifted
/// date settles the table entry. Instants inside a leap second itself are
/// not representable on the UTC side; the engine never samples them.
pub fn tt_to_utc(tt: JulianDay, tables: &TimeTables) -> TimeResult<JulianDay> {
    let dat_guess = tables.leap_second(tt.mjd())?;
    let utc_guess = tt.add_seconds(-(dat_guess + TT_MINUS_TAI_SECONDS));
    let dat = tables.leap_second(utc_guess.mjd())?;
    Ok(tt.add_seconds(-(dat + TT_MINUS_TAI_SECONDS)))
}

/// UT1 -> TT: remove the earth-rotation offset, then the UTC hop.
pub fn ut1_to_tt(ut1: JulianDay, tables: &TimeTables) -> TimeResult<JulianDay> {
    // |dUT1| < 0.9 s, so indexing the day table by the UT1 MJD is safe.
    let dut1 = tables.ut1_utc(ut1.mjd())?;
    utc_to_tt(ut1.add_seconds(-dut1), tables)
}

/// TT -> UT1: the UTC hop, then apply the earth-rotation offset.
pub fn tt_to_ut1(tt: JulianDay, tables: &TimeTables) -> TimeResult<JulianDay> {
    let utc = tt_to_utc(tt, tables)?;
    let dut1 = tables.ut1_utc(utc.mjd())?;
    Ok(utc.add_seconds(dut1))
}

/// TAI -> TT: fixed 32.184 s offset, by definition.
pub fn tai_to_tt(tai: JulianDay) -> JulianDay {
    tai.add_seconds(TT_MINUS_TAI_SECONDS)
}

/// TT -> TAI.
pub fn tt_to_tai(tt: JulianDay) -> JulianDay {
    tt.add_seconds(-TT_MINUS_TAI_SECONDS)
}

/// TDB - TT in seconds at the given date.
///
/// Single-term approximation (annual term from Earth's orbital
/// eccentricity): 1.657 ms amplitude on the Sun's mean anomaly. Adequate
/// here because the pipeline's TDB use is limited to slow precession and
/// nutation arguments, where 30 microseconds of time error is
/// unobservable at mount accuracy.
fn tdb_minus_tt_seconds(jd: JulianDay) -> f64 {
    let g = (357.53 + 0.985_600_3 * jd.days_since_j2000()) * DEG_TO_RAD;
    0.001_657 * g.sin()
}

/// TT -> TDB.
pub fn tt_to_tdb(tt: JulianDay) -> JulianDay {
    tt.add_seconds(tdb_minus_tt_seconds(tt))
}

/// TDB -> TT.
pub fn tdb_to_tt(tdb: JulianDay) -> JulianDay {
    // The correction changes by < 1 ns over its own 1.7 ms span, so
    // evaluating the series at the TDB argument inverts it exactly enough.
    tdb.add_seconds(-tdb_minus_tt_seconds(tdb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn tables_with_ut1() -> TimeTables {
        let mut tables = TimeTables::bundled();
        // IERS values around J2000.0.
        tables.push_ut1_utc(51543, 0.3561);
        tables.push_ut1_utc(51544, 0.3555);
        tables.push_ut1_utc(51545, 0.3549);
        tables
    }

    fn seconds_between(a: JulianDay, b: JulianDay) -> f64 {
        (a - b) * SECONDS_PER_DAY_F64
    }

    #[test]
    fn test_utc_to_tt_at_j2000() {
        let tables = tables_with_ut1();
        let utc = JulianDay::j2000();
        let tt = utc_to_tt(utc, &tables).unwrap();
        // 32 leap seconds + 32.184 s.
        assert_abs_diff_eq!(seconds_between(tt, utc), 64.184, epsilon = 1e-9);
    }

    #[test]
    fn test_tai_tt_fixed_offset() {
        let tai = JulianDay::j2000();
        assert_abs_diff_eq!(
            seconds_between(tai_to_tt(tai), tai),
            32.184,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            seconds_between(tt_to_tai(tai_to_tt(tai)), tai),
            0.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_tdb_tt_small_periodic() {
        let tt = JulianDay::from_calendar(2004, 5, 17, 0, 0, 0.0).unwrap();
        let offset = seconds_between(tt_to_tdb(tt), tt);
        assert!(offset.abs() < 0.0017, "TDB-TT = {offset}");
        // Round trip well under a nanosecond.
        assert_abs_diff_eq!(
            seconds_between(tdb_to_tt(tt_to_tdb(tt)), tt),
            0.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_scale_round_trips_through_tt() {
        let tables = tables_with_ut1();
        let t = JulianDay::from_calendar(2000, 1, 1, 3, 30, 0.0).unwrap();
        for scale in [Scale::Utc, Scale::Ut1, Scale::Tai, Scale::Tt, Scale::Tdb] {
            let tt = convert(t, scale, Scale::Tt, &tables).unwrap();
            let back = convert(tt, Scale::Tt, scale, &tables).unwrap();
            assert_abs_diff_eq!(seconds_between(back, t), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_ut1_round_trip_uses_table() {
        let tables = tables_with_ut1();
        let utc = JulianDay::from_calendar(2000, 1, 1, 0, 0, 0.0).unwrap();
        let tt = utc_to_tt(utc, &tables).unwrap();
        let ut1 = tt_to_ut1(tt, &tables).unwrap();
        assert_abs_diff_eq!(seconds_between(ut1, utc), 0.3555, epsilon = 1e-9);
    }

    #[test]
    fn test_conversion_outside_tables_fails() {
        let tables = tables_with_ut1();
        // Before the 1972 leap-second era.
        let early = JulianDay::from_calendar(1970, 1, 1, 0, 0, 0.0).unwrap();
        assert!(convert(early, Scale::Utc, Scale::Tt, &tables).is_err());
        // A date with leap data but no UT1 data.
        let no_ut1 = JulianDay::from_calendar(2010, 6, 1, 0, 0, 0.0).unwrap();
        assert!(convert(no_ut1, Scale::Utc, Scale::Tt, &tables).is_ok());
        assert!(convert(no_ut1, Scale::Utc, Scale::Ut1, &tables).is_err());
    }

    #[test]
    fn test_identity_conversion() {
        let tables = tables_with_ut1();
        let t = JulianDay::j2000();
        let same = convert(t, Scale::Tt, Scale::Tt, &tables).unwrap();
        assert_eq!(same, t);
    }
}
