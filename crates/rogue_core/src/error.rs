//! # Grid Error Types

use thiserror::Error;

use crate::grid::{GridDims, TileCoord};

/// Errors raised by checked grid operations.
///
/// The unchecked `set` path never produces these; only `try_set` and
/// dimension construction do.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate fell outside the grid's fixed domain.
    #[error("coordinate ({}, {}) outside {}x{} grid", coord.x, coord.y, dims.width(), dims.height())]
    OutOfBounds {
        /// The rejected coordinate.
        coord: TileCoord,
        /// The grid's dimensions.
        dims: GridDims,
    },

    /// Grid dimensions must both be non-zero.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDims {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;

/// Errors raised when configuring the fixed-step scheduler.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingError {
    /// Update rate outside `1..=MAX_UPDATE_RATE` ticks per second.
    #[error("update rate {0} Hz outside supported range 1..={max}", max = crate::time::MAX_UPDATE_RATE)]
    InvalidUpdateRate(u32),

    /// A batch must contain at least one tick.
    #[error("update multiplicity must be at least 1")]
    ZeroMultiplicity,

    /// A batch must be shorter than the stall guard's backlog limit.
    #[error("update multiplicity {0} must be below {max}", max = crate::time::STALL_FACTOR)]
    MultiplicityTooLarge(u32),
}
