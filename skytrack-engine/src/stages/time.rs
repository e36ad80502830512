//! Time stage: the only stage on the 100 Hz schedule.
//!
//! From the current UTC instant it derives UT1 and TT, the Greenwich mean
//! sidereal time at 0h and now, the apparent sidereal time (using the
//! nutation scalars published by the nutation stage), and the local
//! sidereal time. The hour angle itself is formed by the scheduler from
//! this snapshot and the refracted right ascension.

use crate::stages::nutation::NutationAngles;
use skytrack_core::Location;
use skytrack_time::{scales, sidereal, JulianDay, TimeResult, TimeTables};

/// Scalar time block recomputed every realtime tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSnapshot {
    pub utc: JulianDay,
    pub ut1: JulianDay,
    pub tt: JulianDay,
    /// UT1 - UTC actually applied, seconds (table value or override).
    pub dut1_seconds: f64,
    /// Greenwich mean sidereal time at the preceding 0h UT1, radians.
    pub gmst_midnight: f64,
    /// Greenwich mean sidereal time now, radians.
    pub gmst: f64,
    /// Greenwich apparent sidereal time now, radians.
    pub gast: f64,
    /// Local apparent sidereal time now, radians.
    pub lst: f64,
}

/// Computes the time block for the given UTC instant.
///
/// `dut1_override`, when set, replaces the UT1-UTC table lookup (the
/// manual-override path exposed on the engine). `nutation` supplies the
/// equation-of-the-equinoxes inputs; before the nutation stage has run
/// once, mean sidereal time stands in for apparent.
///
/// # Errors
///
/// Table-range failures from the leap-second or UT1-UTC lookups.
pub fn snapshot(
    utc: JulianDay,
    tables: &TimeTables,
    dut1_override: Option<f64>,
    nutation: Option<&NutationAngles>,
    location: &Location,
) -> TimeResult<TimeSnapshot> {
    let dut1_seconds = match dut1_override {
        Some(value) => value,
        None => tables.ut1_utc(utc.mjd())?,
    };
    let ut1 = utc.add_seconds(dut1_seconds);
    let tt = scales::utc_to_tt(utc, tables)?;

    let gmst_midnight = sidereal::gmst0(ut1);
    let gmst = sidereal::gmst(ut1);
    let gast = match nutation {
        Some(angles) => sidereal::gast(ut1, angles.dpsi, angles.true_obliquity),
        None => gmst,
    };
    let lst = sidereal::local_sidereal(gast, location.longitude);

    Ok(TimeSnapshot {
        utc,
        ut1,
        tt,
        dut1_seconds,
        gmst_midnight,
        gmst,
        gast,
        lst,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use skytrack_core::constants::{ARCSEC_TO_RAD, DEG_TO_RAD, SECONDS_PER_DAY_F64};

    fn tables() -> TimeTables {
        let mut t = TimeTables::bundled();
        t.push_ut1_utc(51544, 0.3555);
        t.push_ut1_utc(51545, 0.3549);
        t
    }

    fn greenwich() -> Location {
        Location::from_degrees(51.477928, 0.0, 46.0).unwrap()
    }

    #[test]
    fn test_snapshot_derives_all_scales() {
        let utc = JulianDay::from_calendar(2000, 1, 1, 12, 0, 0.0).unwrap();
        let snap = snapshot(utc, &tables(), None, None, &greenwich()).unwrap();

        assert_abs_diff_eq!(snap.dut1_seconds, 0.3549, epsilon = 1e-12);
        assert_abs_diff_eq!(
            (snap.ut1 - snap.utc) * SECONDS_PER_DAY_F64,
            0.3549,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            (snap.tt - snap.utc) * SECONDS_PER_DAY_F64,
            64.184,
            epsilon = 1e-9
        );
        // Without nutation input, apparent == mean.
        assert_eq!(snap.gast, snap.gmst);
        // Greenwich longitude 0: LST == GAST.
        assert_abs_diff_eq!(snap.lst, snap.gast, epsilon = 1e-15);
    }

    #[test]
    fn test_dut1_override_wins() {
        let utc = JulianDay::from_calendar(2000, 1, 1, 12, 0, 0.0).unwrap();
        let snap = snapshot(utc, &tables(), Some(-0.2), None, &greenwich()).unwrap();
        assert_abs_diff_eq!(snap.dut1_seconds, -0.2, epsilon = 1e-15);
        // Override also rescues dates with no table entry.
        let bare = JulianDay::from_calendar(2010, 6, 1, 0, 0, 0.0).unwrap();
        assert!(snapshot(bare, &tables(), None, None, &greenwich()).is_err());
        assert!(snapshot(bare, &tables(), Some(0.0), None, &greenwich()).is_ok());
    }

    #[test]
    fn test_gast_uses_nutation_angles() {
        let utc = JulianDay::from_calendar(2000, 1, 1, 12, 0, 0.0).unwrap();
        let angles = NutationAngles {
            dpsi: -13.0 * ARCSEC_TO_RAD,
            deps: -5.8 * ARCSEC_TO_RAD,
            mean_obliquity: 23.439 * DEG_TO_RAD,
            true_obliquity: 23.437 * DEG_TO_RAD,
            sun_mean_anomaly: 0.0,
            ascending_node: 0.0,
        };
        let snap = snapshot(utc, &tables(), None, Some(&angles), &greenwich()).unwrap();
        let expected = snap.gmst + angles.dpsi * angles.true_obliquity.cos();
        assert_abs_diff_eq!(snap.gast, expected, epsilon = 1e-15);
    }
}
