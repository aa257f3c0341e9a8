//! Time sources sampled by the frame clock.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// A source of timestamps, measured from an arbitrary fixed origin.
///
/// Implementations are free to go backwards; the frame clock clamps that.
pub trait TimeSource {
    /// Returns the current timestamp.
    fn now(&mut self) -> Duration;
}

/// Monotonic time since construction. Never regresses.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicTimeSource {
    origin: Instant,
}

impl MonotonicTimeSource {
    /// Starts a new monotonic source at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTimeSource {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

/// Wall-clock time since the Unix epoch.
///
/// Follows NTP adjustments and manual clock changes, so it can regress.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&mut self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
    }
}

/// Manually driven time for tests and replays.
///
/// Clones share the same timestamp, so a test can keep a handle while the
/// clock owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualTimeSource {
    now: Rc<Cell<Duration>>,
}

impl ManualTimeSource {
    /// Creates a source at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward.
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }

    /// Jumps to an absolute timestamp, possibly backwards.
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    /// Returns the current timestamp without sampling.
    #[must_use]
    pub fn peek(&self) -> Duration {
        self.now.get()
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&mut self) -> Duration {
        self.now.get()
    }
}
