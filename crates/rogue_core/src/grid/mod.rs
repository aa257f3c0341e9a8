//! # Sparse Tile Grid
//!
//! World tiles live in a hash map keyed by a packed coordinate index.
//! Absent keys are empty space: nothing is allocated or rendered for them.
//!
//! ## Packed Index
//!
//! ```text
//! index = x + width * y
//!
//!   width = 128:  (5, 2) -> 5 + 128 * 2 = 261 -> (261 % 128, 261 / 128) = (5, 2)
//! ```
//!
//! The row stride is the grid width itself, so `pack` and `unpack` are exact
//! inverses over the whole `[0, width) x [0, height)` domain.

mod coord;
mod sparse;
mod tile;

pub use coord::{pack, unpack, GridDims, PackedIndex, TileCoord, MAX_HEIGHT, MAX_WIDTH};
pub use sparse::SparseTileGrid;
pub use tile::{Flip, Tile};
