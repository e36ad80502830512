//! Leap-second and earth-rotation correction tables.
//!
//! [`TimeTables`] holds the two mappings every UTC/UT1 conversion needs:
//!
//! - **leap seconds**: integer MJD -> TAI-UTC in seconds, effective from
//!   that MJD until superseded by the next entry. The bundled table covers
//!   the modern leap-second era, 1972-01-01 (TAI-UTC = 10 s) through
//!   2017-01-01 (37 s).
//! - **UT1-UTC**: one entry per integer MJD from IERS earth-orientation
//!   data. Earth's rotation is irregular, so there is no formula to fall
//!   back on; a query outside the loaded span fails with
//!   [`TimeError::TableRange`].
//!
//! The tables are an explicitly constructed object, populated once before
//! the engine starts and read-only afterward. The engine holds them behind
//! an `Arc` and never mutates them, so they need no lock.

use crate::errors::{TimeError, TimeResult};
use std::collections::BTreeMap;

/// Leap-second entries (MJD of effectivity, TAI-UTC seconds), 1972-2017.
const LEAP_SECONDS: &[(i64, f64)] = &[
    (41317, 10.0), // 1972-01-01
    (41499, 11.0), // 1972-07-01
    (41683, 12.0), // 1973-01-01
    (42048, 13.0), // 1974-01-01
    (42413, 14.0), // 1975-01-01
    (42778, 15.0), // 1976-01-01
    (43144, 16.0), // 1977-01-01
    (43509, 17.0), // 1978-01-01
    (43874, 18.0), // 1979-01-01
    (44239, 19.0), // 1980-01-01
    (44786, 20.0), // 1981-07-01
    (45151, 21.0), // 1982-07-01
    (45516, 22.0), // 1983-07-01
    (46247, 23.0), // 1985-07-01
    (47161, 24.0), // 1988-01-01
    (47892, 25.0), // 1990-01-01
    (48257, 26.0), // 1991-01-01
    (48804, 27.0), // 1992-07-01
    (49169, 28.0), // 1993-07-01
    (49534, 29.0), // 1994-07-01
    (50083, 30.0), // 1996-01-01
    (50630, 31.0), // 1997-07-01
    (51179, 32.0), // 1999-01-01
    (53736, 33.0), // 2006-01-01
    (54832, 34.0), // 2009-01-01
    (56109, 35.0), // 2012-07-01
    (57204, 36.0), // 2015-07-01
    (57754, 37.0), // 2017-01-01
];

/// Process-wide time correction data: leap seconds and UT1-UTC offsets.
#[derive(Debug, Clone, Default)]
pub struct TimeTables {
    leap_seconds: BTreeMap<i64, f64>,
    ut1_utc: BTreeMap<i64, f64>,
}

impl TimeTables {
    /// Creates empty tables. Every lookup fails until data is loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates tables pre-loaded with the bundled 1972-2017 leap-second
    /// history. UT1-UTC data must still be supplied by the application.
    pub fn bundled() -> Self {
        let mut tables = Self::new();
        for &(mjd, offset) in LEAP_SECONDS {
            tables.leap_seconds.insert(mjd, offset);
        }
        tables
    }

    /// Inserts or replaces a leap-second entry.
    pub fn push_leap_second(&mut self, mjd: i64, tai_utc_seconds: f64) {
        self.leap_seconds.insert(mjd, tai_utc_seconds);
    }

    /// Inserts or replaces a UT1-UTC entry for one day.
    pub fn push_ut1_utc(&mut self, mjd: i64, ut1_utc_seconds: f64) {
        self.ut1_utc.insert(mjd, ut1_utc_seconds);
    }

    /// Loads UT1-UTC entries from line-oriented text: one `MJD value` pair
    /// per line, `#` starts a comment. Returns the number of entries read.
    ///
    /// # Errors
    ///
    /// Fails on a malformed non-comment line or if no entries were found.
    pub fn parse_ut1_utc(&mut self, content: &str) -> TimeResult<usize> {
        let mut count = 0;
        for line in content.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let mjd: i64 = fields
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| TimeError::Calculation(format!("bad UT1-UTC line: {line:?}")))?;
            let value: f64 = fields
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| TimeError::Calculation(format!("bad UT1-UTC line: {line:?}")))?;
            self.ut1_utc.insert(mjd, value);
            count += 1;
        }
        if count == 0 {
            return Err(TimeError::Calculation(
                "no UT1-UTC records found in input".to_string(),
            ));
        }
        Ok(count)
    }

    /// TAI-UTC in seconds at the given MJD.
    ///
    /// Selects the entry with the greatest key not exceeding the query.
    ///
    /// # Errors
    ///
    /// [`TimeError::TableRange`] for dates before the first entry.
    pub fn leap_second(&self, mjd: f64) -> TimeResult<f64> {
        let day = mjd.floor() as i64;
        self.leap_seconds
            .range(..=day)
            .next_back()
            .map(|(_, &offset)| offset)
            .ok_or(TimeError::TableRange {
                table: "leap-second",
                mjd,
            })
    }

    /// UT1-UTC in seconds for the day containing the given MJD.
    ///
    /// The table has one entry per day; there is no extrapolation, so a
    /// day without an entry is an error (the source condition "cannot get
    /// dUT1 for dates before 1973").
    pub fn ut1_utc(&self, mjd: f64) -> TimeResult<f64> {
        let day = mjd.floor() as i64;
        self.ut1_utc
            .get(&day)
            .copied()
            .ok_or(TimeError::TableRange {
                table: "UT1-UTC",
                mjd,
            })
    }

    /// True once at least one UT1-UTC entry is loaded.
    pub fn has_ut1_utc(&self) -> bool {
        !self.ut1_utc.is_empty()
    }
}
