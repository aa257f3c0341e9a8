//! # ROGUE Procedural Generation
//!
//! Deterministic dungeon generation into a sparse tile grid.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed and config always produce the same grid
//! 2. **Explicit seeding**: No hidden global RNG; the caller owns the seed
//! 3. **Sparse output**: Only carved cells are stored
//!
//! ## Example
//!
//! ```rust
//! use rogue_core::{GridDims, SparseTileGrid};
//! use rogue_procedural::{DungeonConfig, DungeonGenerator, WorldSeed};
//!
//! let generator = DungeonGenerator::new(DungeonConfig::default(), WorldSeed::new(42)).unwrap();
//! let mut grid = SparseTileGrid::new(GridDims::DEFAULT);
//! let stats = generator.generate(&mut grid);
//! assert!(stats.cells_written() > 0);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod dungeon;
pub mod error;
pub mod seed;

pub use dungeon::{DungeonConfig, DungeonGenerator, GenerationStats, RoomClipping};
pub use error::{ProceduralError, ProceduralResult};
pub use seed::WorldSeed;
