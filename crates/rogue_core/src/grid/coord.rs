//! Coordinate codec.

use crate::error::{GridError, GridResult};

/// Default grid width in tiles.
pub const MAX_WIDTH: u32 = 256;

/// Default grid height in tiles.
pub const MAX_HEIGHT: u32 = 256;

/// A tile coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl TileCoord {
    /// Creates a new coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl From<(u32, u32)> for TileCoord {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x, y)
    }
}

/// A coordinate packed into a single integer with a fixed row stride.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackedIndex(pub u64);

impl PackedIndex {
    /// Returns the raw index value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Packs `(x, y)` using `stride` as the row width.
///
/// Pure and allocation-free. Callers keep `x < stride`; larger `x` values
/// alias into following rows.
#[inline]
#[must_use]
pub const fn pack(coord: TileCoord, stride: u32) -> PackedIndex {
    PackedIndex(coord.x as u64 + stride as u64 * coord.y as u64)
}

/// Unpacks an index produced by [`pack`] with the same `stride`.
///
/// `stride` must be non-zero.
#[inline]
#[must_use]
pub const fn unpack(index: PackedIndex, stride: u32) -> TileCoord {
    let stride = stride as u64;
    TileCoord {
        x: (index.0 % stride) as u32,
        y: (index.0 / stride) as u32,
    }
}

/// Fixed dimensions of a grid.
///
/// Both sides are non-zero; [`GridDims::new`] is the only way to build one.
///
/// ```compile_fail
/// use rogue_core::GridDims;
///
/// let dims = GridDims { width: 0, height: 4 };
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridDims {
    /// Width in tiles (also the packed-index row stride).
    width: u32,
    /// Height in tiles.
    height: u32,
}

impl GridDims {
    /// The default 256x256 world.
    pub const DEFAULT: Self = Self {
        width: MAX_WIDTH,
        height: MAX_HEIGHT,
    };

    /// Creates grid dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDims`] if either side is zero.
    pub const fn new(width: u32, height: u32) -> GridResult<Self> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDims { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width in tiles.
    #[inline]
    #[must_use]
    pub const fn width(self) -> u32 {
        self.width
    }

    /// Height in tiles.
    #[inline]
    #[must_use]
    pub const fn height(self) -> u32 {
        self.height
    }

    /// Total number of cells in the domain.
    #[inline]
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns true if the coordinate lies inside the domain.
    #[inline]
    #[must_use]
    pub const fn contains(self, coord: TileCoord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Packs a coordinate with this grid's stride.
    #[inline]
    #[must_use]
    pub const fn index(self, coord: TileCoord) -> PackedIndex {
        pack(coord, self.width)
    }

    /// Unpacks an index with this grid's stride.
    #[inline]
    #[must_use]
    pub const fn coord(self, index: PackedIndex) -> TileCoord {
        unpack(index, self.width)
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self::DEFAULT
    }
}
