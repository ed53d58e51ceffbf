//! Clock utilities for session timing.
//!
//! Sessions read time through the [`Clock`] trait so the same tracking code
//! runs against a live monotonic clock or against recorded frame timestamps:
//! - [`MonotonicClock`] is anchored to the moment it was created
//! - [`ManualClock`] is advanced explicitly (replays and tests)

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Source of monotonic nanoseconds.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Nanoseconds since this clock's epoch. Never decreases.
    fn now_ns(&self) -> u64;
}

/// A clock that provides monotonic timestamps relative to a fixed epoch
/// (the moment it was started).
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    /// The instant the clock started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl MonotonicClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Wall-clock time at the epoch.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }
}

impl Clock for MonotonicClock {
    fn now_ns(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// A clock whose reading only changes when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ns: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock already reading `ns`.
    pub fn at(ns: u64) -> Self {
        Self {
            now_ns: AtomicU64::new(ns),
        }
    }

    /// Move the clock to `ns`. Earlier readings are ignored so the clock
    /// stays monotonic.
    pub fn set_ns(&self, ns: u64) {
        self.now_ns.fetch_max(ns, Ordering::SeqCst);
    }

    /// Advance the clock by `delta_ns`.
    pub fn advance_ns(&self, delta_ns: u64) {
        self.now_ns.fetch_add(delta_ns, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ns(&self) -> u64 {
        self.now_ns.load(Ordering::SeqCst)
    }
}

/// Convert a nanosecond value to seconds.
pub fn ns_to_secs(ns: u64) -> f64 {
    ns as f64 / 1_000_000_000.0
}
