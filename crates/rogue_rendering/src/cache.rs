//! # Render Cache
//!
//! Ordered draw operations derived from a grid. Rebuilt wholesale, only when
//! the grid is dirty:
//!
//! ```text
//! for (coord, tile) in grid.iter():
//!     source = atlas cell of tile.sprite_index   (row stride: width_in_tiles - 1)
//!     dest   = coord * tile_size                 (grid's own packing)
//!     push { source, dest, tile.flip, tile.angle }
//! grid.clear_dirty()
//! ```
//!
//! Draw order is the grid's iteration order for that build; later operations
//! paint over earlier ones on overlap.

use rogue_core::{unpack, Flip, PackedIndex, SparseTileGrid, TileCoord};

use crate::atlas::AtlasMeta;
use crate::geometry::Rect;

/// One derived draw instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOperation {
    /// Cell in the atlas.
    pub source: Rect,
    /// Target on screen.
    pub dest: Rect,
    /// Mirroring, copied from the tile.
    pub flip: Flip,
    /// Clockwise rotation in degrees about the centre of `dest`.
    pub angle: f64,
}

#[inline]
fn to_pixels(cells: u32, size: u32) -> i32 {
    i32::try_from(cells.saturating_mul(size)).unwrap_or(i32::MAX)
}

/// Atlas cell for a sprite index.
///
/// The index is unpacked with a row stride of `width_in_tiles - 1`; each
/// step in either axis advances one tile plus one gutter.
#[must_use]
pub fn source_rect(sprite_index: u32, atlas: &AtlasMeta) -> Rect {
    let cell = unpack(PackedIndex(u64::from(sprite_index)), atlas.sprite_stride());
    let step = atlas.tile_size.saturating_add(atlas.gutter);
    Rect::square(
        to_pixels(cell.x, step),
        to_pixels(cell.y, step),
        atlas.tile_size,
    )
}

/// Screen rectangle for a grid cell.
#[must_use]
pub fn dest_rect(coord: TileCoord, tile_size: u32) -> Rect {
    Rect::square(
        to_pixels(coord.x, tile_size),
        to_pixels(coord.y, tile_size),
        tile_size,
    )
}

/// Cached draw list for one grid.
#[derive(Debug, Default, Clone)]
pub struct RenderCache {
    operations: Vec<RenderOperation>,
    builds: u64,
}

impl RenderCache {
    /// Creates an empty cache that has never been built.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds from scratch and lowers the grid's dirty flag.
    ///
    /// Afterwards the cache holds exactly one operation per populated cell.
    /// Returns the number of operations.
    pub fn rebuild(&mut self, grid: &mut SparseTileGrid, atlas: &AtlasMeta) -> usize {
        self.operations.clear();
        self.operations.reserve(grid.len());

        for (coord, tile) in grid.iter() {
            self.operations.push(RenderOperation {
                source: source_rect(tile.sprite_index, atlas),
                dest: dest_rect(coord, atlas.tile_size),
                flip: tile.flip,
                angle: tile.angle,
            });
        }

        grid.clear_dirty();
        self.builds += 1;

        tracing::debug!(
            operations = self.operations.len(),
            builds = self.builds,
            "render cache rebuilt"
        );
        self.operations.len()
    }

    /// Rebuilds only if the grid is dirty. Returns true if it did.
    pub fn refresh(&mut self, grid: &mut SparseTileGrid, atlas: &AtlasMeta) -> bool {
        if !grid.is_dirty() {
            return false;
        }
        self.rebuild(grid, atlas);
        true
    }

    /// Operations in draw order.
    #[inline]
    #[must_use]
    pub fn operations(&self) -> &[RenderOperation] {
        &self.operations
    }

    /// Number of cached operations.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns true if there is nothing to draw.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Completed rebuilds.
    #[inline]
    #[must_use]
    pub const fn builds(&self) -> u64 {
        self.builds
    }

    /// Releases the cached storage.
    pub fn release(&mut self) {
        self.operations = Vec::new();
    }
}
