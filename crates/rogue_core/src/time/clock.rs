//! Frame clock with anomaly clamping.

use std::time::Duration;

use super::{TimeSource, STALL_FACTOR};

/// Samples elapsed time once per frame.
///
/// ## Anomaly Policy
///
/// | Raw delta                       | Reported delta    |
/// |---------------------------------|-------------------|
/// | negative (clock regression)     | zero              |
/// | > `STALL_FACTOR` x tick         | exactly one tick  |
/// | anything else                   | unchanged         |
///
/// No other smoothing is applied. The previous timestamp is updated on every
/// call, including anomalous ones.
#[derive(Debug)]
pub struct FrameClock<T: TimeSource> {
    /// Where timestamps come from.
    source: T,
    /// Timestamp of the previous sample.
    previous: Duration,
    /// Desired duration of one simulation tick.
    tick_duration: Duration,
    /// Stalls replaced by a single tick.
    stalls: u64,
    /// Regressions clamped to zero.
    regressions: u64,
}

impl<T: TimeSource> FrameClock<T> {
    /// Creates a clock, taking the first timestamp immediately.
    #[must_use]
    pub fn new(mut source: T, tick_duration: Duration) -> Self {
        let previous = source.now();
        Self {
            source,
            previous,
            tick_duration,
            stalls: 0,
            regressions: 0,
        }
    }

    /// Returns the clamped time elapsed since the previous sample.
    pub fn sample(&mut self) -> Duration {
        let now = self.source.now();
        let previous = std::mem::replace(&mut self.previous, now);

        match now.checked_sub(previous) {
            None => {
                self.regressions += 1;
                tracing::trace!(
                    regressed_us = (previous - now).as_micros() as u64,
                    "clock regression clamped to zero"
                );
                Duration::ZERO
            }
            Some(raw) if raw > self.tick_duration * STALL_FACTOR => {
                self.stalls += 1;
                tracing::trace!(
                    raw_ms = raw.as_millis() as u64,
                    "stall replaced by a single tick"
                );
                self.tick_duration
            }
            Some(raw) => raw,
        }
    }

    /// Desired duration of one simulation tick.
    #[inline]
    #[must_use]
    pub const fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    /// Number of stalls substituted so far.
    #[inline]
    #[must_use]
    pub const fn stalls(&self) -> u64 {
        self.stalls
    }

    /// Number of regressions clamped so far.
    #[inline]
    #[must_use]
    pub const fn regressions(&self) -> u64 {
        self.regressions
    }

    /// Mutable access to the underlying source.
    pub fn source_mut(&mut self) -> &mut T {
        &mut self.source
    }
}
