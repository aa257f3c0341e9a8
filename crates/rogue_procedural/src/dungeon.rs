//! # Dungeon Generator
//!
//! Scatters square rooms and straight corridors over a sparse grid.
//!
//! ## Algorithm
//!
//! ```text
//! repeat room_count:
//!     anchor = (rand(0..anchor_range), rand(0..anchor_range))
//!     for each cell of a room_size x room_size block at anchor:
//!         set(cell, rand(0..sprite_range))              // last write wins
//!
//! repeat corridor_count:
//!     start = random; carve corridor_length cells east   (x checked against width)
//!     start = random; carve corridor_length cells south  (y checked against height)
//! ```
//!
//! ## Known Gaps
//!
//! - Rooms are not bounds-checked unless [`RoomClipping::Clipped`] is
//!   selected. With the default 100-cell anchor range and a 256x256 grid
//!   they always fit; on smaller grids an unchecked room cell aliases into
//!   another packed index.
//! - Corridor starts are independent of rooms and of each other. The layout
//!   is scattered and may be disconnected; nothing here guarantees that any
//!   two floor cells are reachable from one another.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

use rogue_core::{SparseTileGrid, Tile, TileCoord};

use crate::error::{ProceduralError, ProceduralResult};
use crate::seed::{streams, WorldSeed};

/// How room cells that fall outside the grid are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomClipping {
    /// Write every room cell without checking the domain.
    #[default]
    Unchecked,
    /// Skip room cells outside the domain.
    Clipped,
}

/// Generator knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    /// Number of rooms to carve.
    pub room_count: u32,
    /// Side length of each square room.
    pub room_size: u32,
    /// Room anchors and corridor starts are drawn from `0..anchor_range`.
    pub anchor_range: u32,
    /// Number of corridor pairs (one horizontal, one vertical each).
    pub corridor_count: u32,
    /// Maximum cells per corridor.
    pub corridor_length: u32,
    /// Sprite indices are drawn from `0..sprite_range`.
    pub sprite_range: u32,
    /// Room bounds policy.
    pub room_clipping: RoomClipping,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            room_count: 30,
            room_size: 10,
            anchor_range: 100,
            corridor_count: 10,
            corridor_length: 30,
            sprite_range: 140,
            room_clipping: RoomClipping::Unchecked,
        }
    }
}

impl DungeonConfig {
    /// Checks that every sampled range is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ProceduralError::EmptyRange`] naming the first bad field.
    pub fn validate(&self) -> ProceduralResult<()> {
        if self.anchor_range == 0 {
            return Err(ProceduralError::EmptyRange {
                field: "anchor_range",
            });
        }
        if self.sprite_range == 0 {
            return Err(ProceduralError::EmptyRange {
                field: "sprite_range",
            });
        }
        Ok(())
    }
}

/// Counters from one generation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Rooms carved.
    pub rooms: u32,
    /// Room cells written (overlaps count every write).
    pub room_cells: u32,
    /// Room cells skipped by [`RoomClipping::Clipped`].
    pub room_cells_clipped: u32,
    /// Corridor cells written.
    pub corridor_cells: u32,
    /// Corridor cells skipped by the bounds check.
    pub corridor_cells_skipped: u32,
}

impl GenerationStats {
    /// Total `set` calls made.
    #[must_use]
    pub const fn cells_written(&self) -> u32 {
        self.room_cells + self.corridor_cells
    }
}

/// Seeded dungeon carver.
#[derive(Clone, Debug)]
pub struct DungeonGenerator {
    /// Validated knobs.
    config: DungeonConfig,
    /// Source of all randomness.
    seed: WorldSeed,
}

impl DungeonGenerator {
    /// Creates a generator.
    ///
    /// # Errors
    ///
    /// Returns [`ProceduralError`] if the config has an empty range.
    pub fn new(config: DungeonConfig, seed: WorldSeed) -> ProceduralResult<Self> {
        config.validate()?;
        Ok(Self { config, seed })
    }

    /// The generator's seed.
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// The generator's config.
    #[must_use]
    pub const fn config(&self) -> &DungeonConfig {
        &self.config
    }

    /// Carves rooms then corridors into `grid`.
    ///
    /// Reserves capacity for the whole domain first. Existing tiles are kept
    /// unless overwritten. Calling this twice on fresh grids with the same
    /// generator produces identical grids.
    pub fn generate(&self, grid: &mut SparseTileGrid) -> GenerationStats {
        let dims = grid.dims();
        grid.reserve(dims.cell_count());

        let mut rng = self.seed.rng(streams::DUNGEON);
        let mut stats = GenerationStats::default();

        for _ in 0..self.config.room_count {
            self.carve_room(grid, &mut rng, &mut stats);
        }

        let length = self.config.corridor_length;
        for _ in 0..self.config.corridor_count {
            let start = self.random_anchor(&mut rng);
            for step in 0..length {
                let coord = TileCoord::new(start.x.saturating_add(step), start.y);
                self.carve_corridor_cell(grid, &mut rng, &mut stats, coord, coord.x < dims.width());
            }

            let start = self.random_anchor(&mut rng);
            for step in 0..length {
                let coord = TileCoord::new(start.x, start.y.saturating_add(step));
                self.carve_corridor_cell(grid, &mut rng, &mut stats, coord, coord.y < dims.height());
            }
        }

        tracing::debug!(
            seed = self.seed.value(),
            rooms = stats.rooms,
            room_cells = stats.room_cells,
            room_cells_clipped = stats.room_cells_clipped,
            corridor_cells = stats.corridor_cells,
            corridor_cells_skipped = stats.corridor_cells_skipped,
            populated = grid.len(),
            "dungeon generated"
        );

        stats
    }

    fn carve_room(&self, grid: &mut SparseTileGrid, rng: &mut ChaCha8Rng, stats: &mut GenerationStats) {
        let anchor = self.random_anchor(rng);
        let size = self.config.room_size;

        for dy in 0..size {
            for dx in 0..size {
                let coord = TileCoord::new(anchor.x.saturating_add(dx), anchor.y.saturating_add(dy));
                // Drawn before the bounds decision: both modes consume the same stream.
                let tile = self.random_tile(rng);
                match self.config.room_clipping {
                    RoomClipping::Unchecked => {
                        grid.set(coord, tile);
                        stats.room_cells += 1;
                    }
                    RoomClipping::Clipped => match grid.try_set(coord, tile) {
                        Ok(_) => stats.room_cells += 1,
                        Err(_) => stats.room_cells_clipped += 1,
                    },
                }
            }
        }
        stats.rooms += 1;
    }

    /// Writes one corridor cell if it passes the carve-axis check.
    ///
    /// The sprite is only drawn for cells that get written. Under
    /// [`RoomClipping::Clipped`] the cross axis is checked as well.
    fn carve_corridor_cell(
        &self,
        grid: &mut SparseTileGrid,
        rng: &mut ChaCha8Rng,
        stats: &mut GenerationStats,
        coord: TileCoord,
        in_bounds: bool,
    ) {
        let in_bounds = match self.config.room_clipping {
            RoomClipping::Unchecked => in_bounds,
            RoomClipping::Clipped => in_bounds && grid.contains(coord),
        };
        if in_bounds {
            let tile = self.random_tile(rng);
            grid.set(coord, tile);
            stats.corridor_cells += 1;
        } else {
            stats.corridor_cells_skipped += 1;
        }
    }

    fn random_anchor(&self, rng: &mut ChaCha8Rng) -> TileCoord {
        let x = rng.gen_range(0..self.config.anchor_range);
        let y = rng.gen_range(0..self.config.anchor_range);
        TileCoord::new(x, y)
    }

    fn random_tile(&self, rng: &mut ChaCha8Rng) -> Tile {
        Tile::new(rng.gen_range(0..self.config.sprite_range))
    }
}
