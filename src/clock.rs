//! Monotonic time sources
//!
//! Animations never read the hardware timer directly. They ask a [`Clock`]
//! for the current instant and express every deadline as an absolute
//! "timeout at" value, so a skipped render call never accumulates drift.

use core::cell::Cell;

use embassy_time::{Duration, Instant};

pub trait Clock {
    /// Current monotonic instant
    fn now(&self) -> Instant;

    /// Deadline `duration` from now
    fn timeout_after(&self, duration: Duration) -> Instant {
        self.now() + duration
    }

    /// Check if `deadline` has passed
    fn reached(&self, deadline: Instant) -> bool {
        self.now() >= deadline
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Clock backed by the `embassy-time` driver
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
///
/// Used for host-side simulation and tests.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Instant::from_millis(0))
    }
}

impl ManualClock {
    pub const fn new(start: Instant) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: Instant) {
        self.now.set(now);
    }

    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}
