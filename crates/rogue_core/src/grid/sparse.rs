//! Sparse grid storage with dirty tracking.

use std::collections::HashMap;

use crate::error::{GridError, GridResult};
use super::{GridDims, PackedIndex, Tile, TileCoord};

/// Mapping from packed coordinate to tile.
///
/// A coordinate with no entry is empty and never rendered. The grid carries a
/// single dirty flag: every mutation raises it, and only a completed render
/// cache rebuild lowers it again (see [`SparseTileGrid::clear_dirty`]).
///
/// # Performance
///
/// `get`, `set` and `remove` are average O(1). Call [`SparseTileGrid::reserve`]
/// before bulk population to avoid rehashing in the middle of a burst.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseTileGrid {
    /// Fixed for the grid's lifetime.
    dims: GridDims,
    /// Populated cells.
    tiles: HashMap<PackedIndex, Tile>,
    /// Raised on mutation, lowered after a cache rebuild.
    dirty: bool,
}

impl SparseTileGrid {
    /// Creates an empty grid.
    ///
    /// A fresh grid starts dirty: no cache has been built for it yet.
    #[must_use]
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            tiles: HashMap::new(),
            dirty: true,
        }
    }

    /// Returns the grid's dimensions.
    #[inline]
    #[must_use]
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// Returns true if the coordinate lies inside the grid's domain.
    #[inline]
    #[must_use]
    pub const fn contains(&self, coord: TileCoord) -> bool {
        self.dims.contains(coord)
    }

    /// Packs a coordinate with this grid's stride.
    #[inline]
    #[must_use]
    pub const fn index_of(&self, coord: TileCoord) -> PackedIndex {
        self.dims.index(coord)
    }

    /// Unpacks an index with this grid's stride.
    #[inline]
    #[must_use]
    pub const fn coord_of(&self, index: PackedIndex) -> TileCoord {
        self.dims.coord(index)
    }

    /// Inserts or overwrites a tile, returning the previous one.
    ///
    /// The coordinate is not checked against the domain: out-of-domain
    /// coordinates are a caller error and alias into another packed index.
    /// Use [`SparseTileGrid::try_set`] when the input is untrusted.
    pub fn set(&mut self, coord: TileCoord, tile: Tile) -> Option<Tile> {
        self.dirty = true;
        self.tiles.insert(self.dims.index(coord), tile)
    }

    /// Bounds-checked [`SparseTileGrid::set`].
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] and leaves the grid untouched if
    /// the coordinate lies outside the domain.
    pub fn try_set(&mut self, coord: TileCoord, tile: Tile) -> GridResult<Option<Tile>> {
        if !self.dims.contains(coord) {
            return Err(GridError::OutOfBounds {
                coord,
                dims: self.dims,
            });
        }
        Ok(self.set(coord, tile))
    }

    /// Gets the tile at a coordinate, if one was set.
    #[inline]
    #[must_use]
    pub fn get(&self, coord: TileCoord) -> Option<Tile> {
        self.tiles.get(&self.dims.index(coord)).copied()
    }

    /// Removes the tile at a coordinate.
    ///
    /// Marks the grid dirty only if something was actually removed.
    pub fn remove(&mut self, coord: TileCoord) -> Option<Tile> {
        let removed = self.tiles.remove(&self.dims.index(coord));
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// Removes every tile, keeping the allocation.
    pub fn clear(&mut self) {
        if !self.tiles.is_empty() {
            self.tiles.clear();
            self.dirty = true;
        }
    }

    /// Iterates populated cells as `(coord, tile)` pairs.
    ///
    /// Order is unspecified and may change after any insertion. Calling
    /// `iter` again restarts the sequence.
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, Tile)> + '_ {
        let dims = self.dims;
        self.tiles
            .iter()
            .map(move |(index, tile)| (dims.coord(*index), *tile))
    }

    /// Iterates populated cells by raw packed index.
    pub fn iter_packed(&self) -> impl Iterator<Item = (PackedIndex, &Tile)> + '_ {
        self.tiles.iter().map(|(index, tile)| (*index, tile))
    }

    /// Pre-sizes storage for at least `additional` more tiles.
    ///
    /// Bulk population (dungeon generation) reserves for the whole domain
    /// even though final occupancy is usually far smaller.
    pub fn reserve(&mut self, additional: usize) {
        self.tiles.reserve(additional);
    }

    /// Number of tiles the grid can hold without reallocating.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tiles.capacity()
    }

    /// Number of populated cells.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns true if no cell is populated.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Returns true if the grid changed since the last cache rebuild.
    #[inline]
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Lowers the dirty flag.
    ///
    /// Only the render cache calls this, immediately after a complete
    /// rebuild from this grid.
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

impl Default for SparseTileGrid {
    fn default() -> Self {
        Self::new(GridDims::DEFAULT)
    }
}
