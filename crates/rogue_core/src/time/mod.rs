//! # Frame Timing
//!
//! Fixed-timestep simulation decoupled from the display refresh rate.
//!
//! ## Design
//!
//! ```text
//! wall clock ──> FrameClock ──(clamped delta)──> FixedStepScheduler ──> N x Tick(fixed dt)
//! ```
//!
//! - Every tick uses the same `dt`; nothing ever simulates a variable delta
//! - A single stall (debugger, window drag) costs at most one tick
//! - A scheduler that falls behind drops its backlog instead of spiralling

mod clock;
mod scheduler;
mod source;

pub use clock::FrameClock;
pub use scheduler::{FixedStepScheduler, FrameTicks, SchedulerConfig, Tick, MAX_UPDATE_RATE};
pub use source::{ManualTimeSource, MonotonicTimeSource, SystemTimeSource, TimeSource};

/// Multiple of the tick duration beyond which a delta or backlog is
/// treated as an anomaly.
pub const STALL_FACTOR: u32 = 8;
