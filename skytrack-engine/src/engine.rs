//! The tracking engine: scheduling, slot wiring, and the public API.
//!
//! The engine owns the shared state and exposes one tick entry point per
//! rate class. It deliberately does not own threads or timers: the host
//! decides how the four cadences are produced (dedicated threads, a
//! realtime executor, a test loop). Each tick is cheap, bounded, and
//! callable from any thread.
//!
//! A tick that hits a stage error (a date outside the bundled tables, a
//! refraction fixed point that will not settle) logs a warning and leaves
//! the previous output in place, so a transient problem degrades pointing
//! smoothly instead of tearing the pipeline down.

use crate::clock::{Clock, SystemClock};
use crate::errors::{EngineError, EngineResult};
use crate::shared::SharedState;
use crate::stages::{aberration, motion, nutation, parallax, precession, refraction, time};
use crate::target::Target;
use skytrack_core::{Location, Weather};
use skytrack_time::{sidereal, JulianDay, TimeTables};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Number of stages in the medium-rate rotation.
pub const MEDIUM_PHASES: usize = 2;
/// Number of stages in the low-rate rotation.
pub const LOW_PHASES: usize = 5;

/// The pointing answer the mount consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pointing {
    /// Local hour angle of the refracted place, radians, in [-pi, pi).
    pub hour_angle: f64,
    /// Refracted (apparent topocentric) right ascension, radians.
    pub ra: f64,
    /// Refracted declination, radians.
    pub dec: f64,
}

/// Four-rate target-position engine. See the crate docs for the task
/// layout and the locking discipline.
pub struct TrackingEngine {
    tables: Arc<TimeTables>,
    clock: Box<dyn Clock>,
    shared: SharedState,
    medium_phase: AtomicUsize,
    low_phase: AtomicUsize,
    quit: AtomicBool,
}

impl TrackingEngine {
    /// Creates an engine on the system wall clock.
    pub fn new(tables: Arc<TimeTables>) -> Self {
        Self::with_clock(tables, Box::new(SystemClock))
    }

    /// Creates an engine on a caller-supplied clock.
    pub fn with_clock(tables: Arc<TimeTables>, clock: Box<dyn Clock>) -> Self {
        Self {
            tables,
            clock,
            shared: SharedState::new(),
            medium_phase: AtomicUsize::new(0),
            low_phase: AtomicUsize::new(0),
            quit: AtomicBool::new(false),
        }
    }

    /// The shared slots, for hosts that want to observe intermediates.
    pub fn shared(&self) -> &SharedState {
        &self.shared
    }

    /// Asks every subsequent tick to return immediately. Idempotent;
    /// there is no way back short of building a new engine.
    pub fn request_quit(&self) {
        self.quit.store(true, Ordering::Release);
    }

    pub fn quit_requested(&self) -> bool {
        self.quit.load(Ordering::Acquire)
    }

    pub fn set_location(&self, location: Location) {
        self.shared.location.set(location);
    }

    pub fn location(&self) -> Location {
        self.shared.location.get()
    }

    pub fn set_weather(&self, weather: Weather) {
        self.shared.weather.set(weather);
    }

    pub fn weather(&self) -> Weather {
        self.shared.weather.get()
    }

    /// Sets or clears the manual UT1-UTC override, seconds. While set it
    /// replaces the table lookup on every subsequent realtime tick.
    pub fn set_dut1(&self, dut1_seconds: Option<f64>) {
        self.shared.dut1_override.set(dut1_seconds);
    }

    pub fn dut1(&self) -> Option<f64> {
        self.shared.dut1_override.get()
    }

    /// Installs a new target and runs the whole correction chain
    /// synchronously, so every slot holds a value consistent with the new
    /// target before this returns. The periodic ticks then keep the slots
    /// fresh.
    ///
    /// # Errors
    ///
    /// Any stage failure for the current instant: table range, invalid
    /// site geometry, refraction non-convergence. The target and the
    /// slots computed before the failure remain installed; the next
    /// successful ticks repair the rest.
    pub fn set_target(&self, target: Target) -> EngineResult<()> {
        self.shared.target.set(Some(target.clone()));
        self.shared.clear_coordinate_slots();

        let utc = self.clock.now_utc();
        let location = self.shared.location.get();
        let weather = self.shared.weather.get();
        let dut1 = self.shared.dut1_override.get();

        // First pass without nutation so TT is available for the angles;
        // recomputed below once the equation of the equinoxes is known.
        let snap = time::snapshot(utc, &self.tables, dut1, None, &location)?;
        self.shared.time.set(Some(snap));

        let catalog = target.catalog_place();
        self.shared.catalog.set(Some(catalog));

        let precessed = precession::apply(catalog, snap.tt);
        self.shared.precessed.set(Some(precessed));

        let angles = nutation::compute(snap.tt);
        self.shared.nutation_angles.set(Some(angles));

        let snap = time::snapshot(utc, &self.tables, dut1, Some(&angles), &location)?;
        self.shared.time.set(Some(snap));

        let nutated = nutation::apply(precessed, &angles);
        self.shared.nutated.set(Some(nutated));

        let orbital = motion::orbital(nutated, &target);
        self.shared.orbital_motion.set(Some(orbital));

        let proper = motion::proper(orbital, &target, snap.tt);
        self.shared.proper_motion.set(Some(proper));

        let annual = aberration::annual(proper, snap.tt, &angles);
        self.shared.annual_aberration.set(Some(annual));

        let hour_angle = sidereal::hour_angle(snap.lst, annual.ra);
        let diurnal = aberration::diurnal(annual, hour_angle, &location)?;
        self.shared.diurnal_aberration.set(Some(diurnal));

        let topocentric = parallax::apply(diurnal, &target);
        self.shared.planetary_parallax.set(Some(topocentric));

        let refracted = refraction::apply(topocentric, snap.lst, &location, &weather)?;
        self.shared.refracted.set(Some(refracted));

        Ok(())
    }

    /// The installed target, if any.
    pub fn target(&self) -> Option<Target> {
        self.shared.target.get()
    }

    /// Current hour angle and refracted place.
    ///
    /// Reads the time snapshot and the refracted slot under their locks
    /// (in rank order) so the pair is mutually coherent.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoTarget`] before the first successful
    /// [`set_target`](Self::set_target).
    pub fn current_pointing(&self) -> EngineResult<Pointing> {
        let time_guard = self.shared.time.lock();
        let refracted_guard = self.shared.refracted.lock();
        match (*time_guard, *refracted_guard) {
            (Some(snap), Some(place)) => Ok(Pointing {
                hour_angle: sidereal::hour_angle(snap.lst, place.ra),
                ra: place.ra,
                dec: place.dec,
            }),
            _ => Err(EngineError::NoTarget),
        }
    }

    /// 100 Hz task: refreshes the time snapshot from the clock.
    pub fn tick_realtime(&self) {
        if self.quit_requested() {
            return;
        }
        let utc = self.clock.now_utc();
        let location = self.shared.location.get();
        let dut1 = self.shared.dut1_override.get();
        let angles = self.shared.nutation_angles.get();

        match time::snapshot(utc, &self.tables, dut1, angles.as_ref(), &location) {
            Ok(snap) => self.shared.time.set(Some(snap)),
            Err(err) => log::warn!("time stage skipped: {err}"),
        }
    }

    /// 20 Hz task: refreshes refraction.
    pub fn tick_high(&self) {
        if self.quit_requested() {
            return;
        }
        let location = self.shared.location.get();
        let weather = self.shared.weather.get();
        let Some(snap) = self.shared.time.get() else {
            return;
        };
        let Some(upstream) = self.shared.planetary_parallax.get() else {
            return;
        };

        match refraction::apply(upstream, snap.lst, &location, &weather) {
            Ok(place) => self.shared.refracted.set(Some(place)),
            Err(err) => log::warn!("refraction stage skipped: {err}"),
        }
    }

    /// 0.4 Hz task: alternates diurnal aberration and planetary
    /// parallax, one stage per tick.
    pub fn tick_medium(&self) {
        if self.quit_requested() {
            return;
        }
        let phase = self.medium_phase.fetch_add(1, Ordering::AcqRel) % MEDIUM_PHASES;
        match phase {
            0 => self.run_diurnal_aberration(),
            _ => self.run_planetary_parallax(),
        }
    }

    /// 1/60 Hz task: round-robins the slow corrections, one per tick.
    pub fn tick_low(&self) {
        if self.quit_requested() {
            return;
        }
        let phase = self.low_phase.fetch_add(1, Ordering::AcqRel) % LOW_PHASES;
        match phase {
            0 => self.run_annual_aberration(),
            1 => self.run_precession(),
            2 => self.run_nutation(),
            3 => self.run_orbital_motion(),
            _ => self.run_proper_motion(),
        }
    }

    fn run_precession(&self) {
        let Some(target) = self.shared.target.get() else {
            return;
        };
        let Some(snap) = self.shared.time.get() else {
            return;
        };
        let catalog = target.catalog_place();
        self.shared.catalog.set(Some(catalog));
        self.shared
            .precessed
            .set(Some(precession::apply(catalog, snap.tt)));
    }

    fn run_nutation(&self) {
        let Some(snap) = self.shared.time.get() else {
            return;
        };
        let angles = nutation::compute(snap.tt);
        self.shared.nutation_angles.set(Some(angles));
        if let Some(upstream) = self.shared.precessed.get() {
            self.shared
                .nutated
                .set(Some(nutation::apply(upstream, &angles)));
        }
    }

    fn run_orbital_motion(&self) {
        let Some(target) = self.shared.target.get() else {
            return;
        };
        let Some(upstream) = self.shared.nutated.get() else {
            return;
        };
        self.shared
            .orbital_motion
            .set(Some(motion::orbital(upstream, &target)));
    }

    fn run_proper_motion(&self) {
        let Some(target) = self.shared.target.get() else {
            return;
        };
        let Some(snap) = self.shared.time.get() else {
            return;
        };
        let Some(upstream) = self.shared.orbital_motion.get() else {
            return;
        };
        self.shared
            .proper_motion
            .set(Some(motion::proper(upstream, &target, snap.tt)));
    }

    fn run_annual_aberration(&self) {
        let Some(snap) = self.shared.time.get() else {
            return;
        };
        let Some(angles) = self.shared.nutation_angles.get() else {
            return;
        };
        let Some(upstream) = self.shared.proper_motion.get() else {
            return;
        };
        self.shared
            .annual_aberration
            .set(Some(aberration::annual(upstream, snap.tt, &angles)));
    }

    fn run_diurnal_aberration(&self) {
        let location = self.shared.location.get();
        let Some(snap) = self.shared.time.get() else {
            return;
        };
        let Some(upstream) = self.shared.annual_aberration.get() else {
            return;
        };
        let hour_angle = sidereal::hour_angle(snap.lst, upstream.ra);
        match aberration::diurnal(upstream, hour_angle, &location) {
            Ok(place) => self.shared.diurnal_aberration.set(Some(place)),
            Err(err) => log::warn!("diurnal aberration stage skipped: {err}"),
        }
    }

    fn run_planetary_parallax(&self) {
        let Some(target) = self.shared.target.get() else {
            return;
        };
        let Some(upstream) = self.shared.diurnal_aberration.get() else {
            return;
        };
        self.shared
            .planetary_parallax
            .set(Some(parallax::apply(upstream, &target)));
    }
}

impl std::fmt::Debug for TrackingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingEngine")
            .field("quit", &self.quit_requested())
            .field("medium_phase", &self.medium_phase.load(Ordering::Relaxed))
            .field("low_phase", &self.low_phase.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn tables() -> Arc<TimeTables> {
        let mut t = TimeTables::bundled();
        // Span a few days around the test epoch.
        for (offset, dut1) in [(0i64, 0.1053), (1, 0.1044), (2, 0.1035)] {
            t.push_ut1_utc(53736 + offset, dut1);
        }
        Arc::new(t)
    }

    fn engine_at(jd: f64) -> TrackingEngine {
        TrackingEngine::with_clock(
            tables(),
            Box::new(ManualClock::new(JulianDay::from_f64(jd))),
        )
    }

    #[test]
    fn test_pointing_requires_target() {
        let engine = engine_at(2453736.5);
        engine.tick_realtime();
        assert!(matches!(
            engine.current_pointing(),
            Err(EngineError::NoTarget)
        ));
    }

    #[test]
    fn test_set_target_primes_every_slot() {
        let engine = engine_at(2453736.5);
        engine
            .set_target(Target::stellar("test", 150.0, 20.0))
            .unwrap();

        let shared = engine.shared();
        assert!(shared.time.get().is_some());
        assert!(shared.nutation_angles.get().is_some());
        assert!(shared.catalog.get().is_some());
        assert!(shared.precessed.get().is_some());
        assert!(shared.nutated.get().is_some());
        assert!(shared.orbital_motion.get().is_some());
        assert!(shared.proper_motion.get().is_some());
        assert!(shared.annual_aberration.get().is_some());
        assert!(shared.diurnal_aberration.get().is_some());
        assert!(shared.planetary_parallax.get().is_some());
        assert!(shared.refracted.get().is_some());
        assert!(engine.current_pointing().is_ok());
    }

    #[test]
    fn test_quit_freezes_ticks() {
        let clock = Arc::new(ManualClock::new(JulianDay::from_f64(2453736.5)));
        let engine = TrackingEngine::with_clock(
            tables(),
            Box::new(SharedClock(Arc::clone(&clock))),
        );
        engine
            .set_target(Target::stellar("test", 150.0, 20.0))
            .unwrap();
        let before = engine.shared().time.get().unwrap();

        engine.request_quit();
        clock.advance_seconds(10.0);
        engine.tick_realtime();
        engine.tick_high();
        engine.tick_medium();
        engine.tick_low();
        assert_eq!(engine.shared().time.get().unwrap(), before);
    }

    #[test]
    fn test_out_of_table_tick_keeps_previous_snapshot() {
        let clock = Arc::new(ManualClock::new(JulianDay::from_f64(2453736.5)));
        let engine = TrackingEngine::with_clock(
            tables(),
            Box::new(SharedClock(Arc::clone(&clock))),
        );
        engine
            .set_target(Target::stellar("test", 150.0, 20.0))
            .unwrap();
        let before = engine.shared().time.get().unwrap();

        // A century ahead: no UT1-UTC entry, so the tick must warn and
        // keep the old snapshot.
        clock.set(JulianDay::from_f64(2490000.5));
        engine.tick_realtime();
        assert_eq!(engine.shared().time.get().unwrap(), before);
    }

    struct SharedClock(Arc<ManualClock>);

    impl Clock for SharedClock {
        fn now_utc(&self) -> JulianDay {
            self.0.now_utc()
        }
    }
}
