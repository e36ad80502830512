//! Wall-clock abstraction.
//!
//! The time stage needs "now" in UTC; everything downstream derives from
//! it. The trait seam exists so tests can drive the engine at a fixed
//! instant and so a host with a disciplined clock (GPS, NTP-steered) can
//! substitute its own source.

use skytrack_time::JulianDay;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// JD of the Unix epoch, 1970-01-01 00:00:00 UTC.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Source of the current UTC instant.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> JulianDay;
}

/// System wall clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> JulianDay {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let days = (duration.as_secs() / 86_400) as f64;
        let seconds_of_day = (duration.as_secs() % 86_400) as f64
            + f64::from(duration.subsec_nanos()) / 1e9;
        JulianDay::new(UNIX_EPOCH_JD + days, seconds_of_day / 86_400.0)
    }
}

/// Settable clock for tests and simulation.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<JulianDay>,
}

impl ManualClock {
    pub fn new(now: JulianDay) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: JulianDay) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance_seconds(&self, seconds: f64) {
        let mut guard = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *guard = guard.add_seconds(seconds);
    }
}

impl Clock for ManualClock {
    fn now_utc(&self) -> JulianDay {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_system_clock_is_current_era() {
        let now = SystemClock.now_utc();
        // Between 2020 and 2100.
        assert!(now.to_f64() > 2_458_849.5 && now.to_f64() < 2_488_069.5);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(JulianDay::j2000());
        assert_eq!(clock.now_utc(), JulianDay::j2000());
        clock.advance_seconds(86_400.0);
        assert_abs_diff_eq!(clock.now_utc().to_f64(), 2_451_546.0, epsilon = 1e-12);
    }
}
