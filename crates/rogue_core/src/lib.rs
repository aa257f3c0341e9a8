//! # ROGUE Core
//!
//! The simulation kernel of a tile-based real-time game:
//! - A sparse tile grid addressed by packed coordinates
//! - A frame clock that swallows stalls and clock regressions
//! - A fixed-timestep scheduler that decouples ticks from rendered frames
//!
//! ## Frame Order
//!
//! ```text
//! FrameClock::sample ──> FixedStepScheduler::advance ──> (ticks mutate grid)
//!                                                              │
//!                          render cache rebuild if dirty <─────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rogue_core::{GridDims, SparseTileGrid, Tile, TileCoord};
//!
//! let mut grid = SparseTileGrid::new(GridDims::DEFAULT);
//! grid.set(TileCoord::new(5, 2), Tile::new(17));
//! assert_eq!(grid.get(TileCoord::new(5, 2)).map(|t| t.sprite_index), Some(17));
//! assert!(grid.is_dirty());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod grid;
pub mod time;

pub use error::{GridError, GridResult, TimingError};
pub use grid::{
    pack, unpack, Flip, GridDims, PackedIndex, SparseTileGrid, Tile, TileCoord, MAX_HEIGHT,
    MAX_WIDTH,
};
pub use time::{
    FixedStepScheduler, FrameClock, FrameTicks, ManualTimeSource, MonotonicTimeSource,
    SchedulerConfig, SystemTimeSource, Tick, TimeSource, MAX_UPDATE_RATE, STALL_FACTOR,
};
