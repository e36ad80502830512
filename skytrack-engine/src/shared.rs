//! Shared pipeline state with per-datum locking.
//!
//! Every coordinate buffer and scalar intermediate lives in its own
//! [`Slot`]: a value paired with its own mutex, so the realtime task never
//! blocks behind a slow task holding some unrelated datum. Ordinary
//! mutexes suffice — each slot has one writer (its producer stage) and few
//! readers, at no more than 100 Hz.
//!
//! # Lock order
//!
//! Deadlock between tasks is prevented by a documented total order over
//! the slots, derived from the producer/consumer graph: inputs first, then
//! the scalar intermediates, then the coordinate buffers in pipeline
//! order. A task holding more than one lock must have acquired them in
//! strictly ascending rank:
//!
//! | rank | slot |
//! |------|------|
//! | 0 | target |
//! | 1 | location |
//! | 2 | weather |
//! | 3 | dUT1 override |
//! | 4 | time snapshot |
//! | 5 | nutation angles |
//! | 6..14 | catalog, precessed, nutated, orbital motion, proper motion, annual aberration, diurnal aberration, planetary parallax, refracted |
//!
//! The hour angle has no slot of its own: it is a pure function of the
//! time snapshot and a place's right ascension, so consumers derive it on
//! demand from slots they already hold (the diurnal aberration phase from
//! its copied snapshot, `current_pointing` under the time and refracted
//! locks) rather than publish a third copy that could fall out of step.
//!
//! Debug builds enforce the order mechanically: a thread-local stack of
//! held ranks panics on any out-of-order acquisition, so the concurrency
//! tests catch violations without needing to provoke an actual deadlock.
//! Most stage code holds a single lock at a time anyway (copy inputs out,
//! compute, write output); the discipline matters for the snapshot paths
//! that read two slots coherently.

use crate::coords::Equatorial;
use crate::stages::nutation::NutationAngles;
use crate::stages::time::TimeSnapshot;
use crate::target::Target;
use skytrack_core::constants::DEG_TO_RAD;
use skytrack_core::{Location, Weather};
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard};

#[cfg(debug_assertions)]
thread_local! {
    static HELD_RANKS: std::cell::RefCell<Vec<u8>> = const { std::cell::RefCell::new(Vec::new()) };
}

/// A shared datum paired with its own mutex and its position in the
/// workspace-wide lock order.
#[derive(Debug)]
pub struct Slot<T> {
    name: &'static str,
    rank: u8,
    value: Mutex<T>,
}

impl<T> Slot<T> {
    pub fn new(rank: u8, name: &'static str, value: T) -> Self {
        Self {
            name,
            rank,
            value: Mutex::new(value),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Acquires this slot's lock.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the calling thread already holds a slot
    /// of equal or higher rank (lock-order violation).
    pub fn lock(&self) -> SlotGuard<'_, T> {
        #[cfg(debug_assertions)]
        HELD_RANKS.with(|held| {
            let held = held.borrow();
            if let Some(&top) = held.last() {
                assert!(
                    self.rank > top,
                    "lock-order violation: acquiring {:?} (rank {}) while holding rank {}",
                    self.name,
                    self.rank,
                    top
                );
            }
        });
        let guard = self.value.lock().unwrap_or_else(|e| e.into_inner());
        #[cfg(debug_assertions)]
        HELD_RANKS.with(|held| held.borrow_mut().push(self.rank));
        SlotGuard {
            guard,
            #[cfg(debug_assertions)]
            rank: self.rank,
        }
    }
}

impl<T: Clone> Slot<T> {
    /// Locks, clones the value out, unlocks.
    pub fn get(&self) -> T {
        self.lock().clone()
    }

    /// Locks, stores the value, unlocks.
    pub fn set(&self, value: T) {
        *self.lock() = value;
    }
}

/// RAII guard for a [`Slot`]; releases the lock (and, in debug builds,
/// retires the rank) on drop.
pub struct SlotGuard<'a, T> {
    guard: MutexGuard<'a, T>,
    #[cfg(debug_assertions)]
    rank: u8,
}

impl<T> Deref for SlotGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> DerefMut for SlotGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}

#[cfg(debug_assertions)]
impl<T> Drop for SlotGuard<'_, T> {
    fn drop(&mut self) {
        HELD_RANKS.with(|held| {
            let mut held = held.borrow_mut();
            if let Some(pos) = held.iter().rposition(|&r| r == self.rank) {
                held.remove(pos);
            }
        });
    }
}

pub const RANK_TARGET: u8 = 0;
pub const RANK_LOCATION: u8 = 1;
pub const RANK_WEATHER: u8 = 2;
pub const RANK_DUT1: u8 = 3;
pub const RANK_TIME: u8 = 4;
pub const RANK_NUTATION_ANGLES: u8 = 5;
pub const RANK_CATALOG: u8 = 6;
pub const RANK_PRECESSED: u8 = 7;
pub const RANK_NUTATED: u8 = 8;
pub const RANK_ORBITAL_MOTION: u8 = 9;
pub const RANK_PROPER_MOTION: u8 = 10;
pub const RANK_ANNUAL_ABERRATION: u8 = 11;
pub const RANK_DIURNAL_ABERRATION: u8 = 12;
pub const RANK_PLANETARY_PARALLAX: u8 = 13;
pub const RANK_REFRACTED: u8 = 14;

/// All state shared between the four tasks and the owning application.
///
/// Coordinate slots hold `Option<Equatorial>`: `None` is the
/// not-yet-computed sentinel, replaced the first time the producer stage
/// runs (which `set_target` forces synchronously).
#[derive(Debug)]
pub struct SharedState {
    pub target: Slot<Option<Target>>,
    pub location: Slot<Location>,
    pub weather: Slot<Weather>,
    pub dut1_override: Slot<Option<f64>>,
    pub time: Slot<Option<TimeSnapshot>>,
    pub nutation_angles: Slot<Option<NutationAngles>>,

    pub catalog: Slot<Option<Equatorial>>,
    pub precessed: Slot<Option<Equatorial>>,
    pub nutated: Slot<Option<Equatorial>>,
    pub orbital_motion: Slot<Option<Equatorial>>,
    pub proper_motion: Slot<Option<Equatorial>>,
    pub annual_aberration: Slot<Option<Equatorial>>,
    pub diurnal_aberration: Slot<Option<Equatorial>>,
    pub planetary_parallax: Slot<Option<Equatorial>>,
    pub refracted: Slot<Option<Equatorial>>,
}

impl SharedState {
    pub fn new() -> Self {
        // Greenwich until the application installs the real site.
        let greenwich = Location {
            latitude: 51.477928 * DEG_TO_RAD,
            longitude: 0.0,
            height: 46.0,
        };
        Self {
            target: Slot::new(RANK_TARGET, "target", None),
            location: Slot::new(RANK_LOCATION, "location", greenwich),
            weather: Slot::new(RANK_WEATHER, "weather", Weather::default()),
            dut1_override: Slot::new(RANK_DUT1, "dut1-override", None),
            time: Slot::new(RANK_TIME, "time-snapshot", None),
            nutation_angles: Slot::new(RANK_NUTATION_ANGLES, "nutation-angles", None),
            catalog: Slot::new(RANK_CATALOG, "catalog", None),
            precessed: Slot::new(RANK_PRECESSED, "precessed", None),
            nutated: Slot::new(RANK_NUTATED, "nutated", None),
            orbital_motion: Slot::new(RANK_ORBITAL_MOTION, "orbital-motion", None),
            proper_motion: Slot::new(RANK_PROPER_MOTION, "proper-motion", None),
            annual_aberration: Slot::new(RANK_ANNUAL_ABERRATION, "annual-aberration", None),
            diurnal_aberration: Slot::new(RANK_DIURNAL_ABERRATION, "diurnal-aberration", None),
            planetary_parallax: Slot::new(RANK_PLANETARY_PARALLAX, "planetary-parallax", None),
            refracted: Slot::new(RANK_REFRACTED, "refracted", None),
        }
    }

    /// Clears every coordinate slot back to the not-yet-computed sentinel.
    /// Called when the target changes, before the synchronous recompute.
    pub fn clear_coordinate_slots(&self) {
        self.catalog.set(None);
        self.precessed.set(None);
        self.nutated.set(None);
        self.orbital_motion.set(None);
        self.proper_motion.set(None);
        self.annual_aberration.set(None);
        self.diurnal_aberration.set(None);
        self.planetary_parallax.set(None);
        self.refracted.set(None);
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
