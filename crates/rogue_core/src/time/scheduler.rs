//! # Fixed-Step Scheduler
//!
//! Accumulator-based tick loop.
//!
//! ## Per Frame
//!
//! ```text
//! accumulator += delta
//! if accumulator > STALL_FACTOR * tick:      // spiral of death
//!     accumulator = 0
//!     run exactly one tick
//! else:
//!     while accumulator >= tick * M:
//!         run M ticks
//!         accumulator -= tick * M
//! ```
//!
//! Worst case per frame is bounded by the threshold, never by how far behind
//! the simulation has fallen.

use std::time::Duration;

use crate::error::TimingError;
use super::STALL_FACTOR;

/// Highest supported update rate, in ticks per second.
pub const MAX_UPDATE_RATE: u32 = 10_000;

/// Scheduler configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Simulation ticks per second.
    update_rate: u32,
    /// Ticks performed per inner batch.
    multiplicity: u32,
}

impl SchedulerConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TimingError`] if the rate is zero or above
    /// [`MAX_UPDATE_RATE`], or if the multiplicity is zero or reaches
    /// [`STALL_FACTOR`]. A batch as long as the backlog limit would trip the
    /// stall guard before it ever became due.
    pub const fn new(update_rate: u32, multiplicity: u32) -> Result<Self, TimingError> {
        if update_rate == 0 || update_rate > MAX_UPDATE_RATE {
            return Err(TimingError::InvalidUpdateRate(update_rate));
        }
        if multiplicity == 0 {
            return Err(TimingError::ZeroMultiplicity);
        }
        if multiplicity >= STALL_FACTOR {
            return Err(TimingError::MultiplicityTooLarge(multiplicity));
        }
        Ok(Self {
            update_rate,
            multiplicity,
        })
    }

    /// Simulation ticks per second.
    #[inline]
    #[must_use]
    pub const fn update_rate(&self) -> u32 {
        self.update_rate
    }

    /// Ticks performed per inner batch.
    #[inline]
    #[must_use]
    pub const fn multiplicity(&self) -> u32 {
        self.multiplicity
    }

    /// Desired wall-clock duration of one tick (`1000 / rate` ms).
    #[inline]
    #[must_use]
    pub const fn tick_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.update_rate as u64)
    }

    /// Logical seconds advanced by one tick (`1 / rate`).
    #[inline]
    #[must_use]
    pub fn fixed_delta(&self) -> f64 {
        1.0 / f64::from(self.update_rate)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            update_rate: 60,
            multiplicity: 1,
        }
    }
}

/// One simulation step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// Zero-based tick number since the scheduler was created.
    pub index: u64,
    /// Logical time in seconds at the start of this tick.
    pub time: f64,
    /// Fixed step in seconds. Identical for every tick.
    pub dt: f64,
}

/// What happened to the simulation during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameTicks {
    /// Ticks run this frame.
    pub ticks: u32,
    /// True if the backlog was discarded by the spiral-of-death guard.
    pub backlog_dropped: bool,
}

/// Decouples simulation ticks from rendered frames.
#[derive(Clone, Debug)]
pub struct FixedStepScheduler {
    /// Validated configuration.
    config: SchedulerConfig,
    /// Desired duration of one tick.
    tick_duration: Duration,
    /// `tick_duration * multiplicity`.
    batch_duration: Duration,
    /// Backlog threshold for the spiral-of-death guard.
    backlog_limit: Duration,
    /// Seconds per tick.
    fixed_delta: f64,
    /// Unconsumed elapsed time.
    accumulator: Duration,
    /// Total ticks run.
    tick_count: u64,
    /// Times the backlog was dropped.
    backlog_drops: u64,
}

impl FixedStepScheduler {
    /// Creates a scheduler with an empty accumulator.
    #[must_use]
    pub fn new(config: SchedulerConfig) -> Self {
        let tick_duration = config.tick_duration();
        Self {
            config,
            tick_duration,
            batch_duration: tick_duration * config.multiplicity,
            backlog_limit: tick_duration * STALL_FACTOR,
            fixed_delta: config.fixed_delta(),
            accumulator: Duration::ZERO,
            tick_count: 0,
            backlog_drops: 0,
        }
    }

    /// Feeds one frame's (already clamped) delta and runs the due ticks.
    ///
    /// `on_tick` is invoked once per tick, in order, always with the same
    /// `dt`. Returns how many ticks ran.
    pub fn advance<F>(&mut self, delta: Duration, mut on_tick: F) -> FrameTicks
    where
        F: FnMut(Tick),
    {
        self.accumulator += delta;

        if self.accumulator > self.backlog_limit {
            tracing::debug!(
                backlog_ms = self.accumulator.as_millis() as u64,
                "simulation behind, dropping backlog"
            );
            self.accumulator = Duration::ZERO;
            self.backlog_drops += 1;
            self.run_tick(&mut on_tick);
            return FrameTicks {
                ticks: 1,
                backlog_dropped: true,
            };
        }

        let mut ticks = 0;
        while self.accumulator >= self.batch_duration {
            for _ in 0..self.config.multiplicity {
                self.run_tick(&mut on_tick);
                ticks += 1;
            }
            self.accumulator -= self.batch_duration;
        }

        FrameTicks {
            ticks,
            backlog_dropped: false,
        }
    }

    fn run_tick<F: FnMut(Tick)>(&mut self, on_tick: &mut F) {
        let index = self.tick_count;
        self.tick_count += 1;
        on_tick(Tick {
            index,
            time: index as f64 * self.fixed_delta,
            dt: self.fixed_delta,
        });
    }

    /// Unconsumed elapsed time.
    #[inline]
    #[must_use]
    pub const fn accumulator(&self) -> Duration {
        self.accumulator
    }

    /// Fraction of a tick left in the accumulator, for render interpolation.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.accumulator.as_secs_f64() / self.tick_duration.as_secs_f64()
    }

    /// Desired duration of one tick.
    #[inline]
    #[must_use]
    pub const fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    /// Seconds per tick.
    #[inline]
    #[must_use]
    pub const fn fixed_delta(&self) -> f64 {
        self.fixed_delta
    }

    /// Total ticks run.
    #[inline]
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Logical simulation time in seconds.
    #[must_use]
    pub fn logical_time(&self) -> f64 {
        self.tick_count as f64 * self.fixed_delta
    }

    /// Times the backlog was dropped.
    #[inline]
    #[must_use]
    pub const fn backlog_drops(&self) -> u64 {
        self.backlog_drops
    }

    /// The active configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> SchedulerConfig {
        self.config
    }
}

impl Default for FixedStepScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}
