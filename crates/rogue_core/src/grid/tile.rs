//! Tile value type.

/// Mirror applied when a tile is drawn.
///
/// Closed set of four states, carried as plain data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Flip {
    /// Drawn as-is.
    #[default]
    None,
    /// Mirrored left-to-right.
    Horizontal,
    /// Mirrored top-to-bottom.
    Vertical,
    /// Mirrored on both axes.
    Both,
}

impl Flip {
    /// Builds a flip from per-axis flags.
    #[inline]
    #[must_use]
    pub const fn from_axes(horizontal: bool, vertical: bool) -> Self {
        match (horizontal, vertical) {
            (false, false) => Self::None,
            (true, false) => Self::Horizontal,
            (false, true) => Self::Vertical,
            (true, true) => Self::Both,
        }
    }

    /// Returns true if mirrored left-to-right.
    #[inline]
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal | Self::Both)
    }

    /// Returns true if mirrored top-to-bottom.
    #[inline]
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical | Self::Both)
    }
}

/// A single tile in the world.
///
/// Value type: a tile has no identity beyond the grid key it is stored under.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tile {
    /// Atlas cell to draw.
    pub sprite_index: u32,
    /// Mirror state.
    pub flip: Flip,
    /// Rotation in degrees about the destination centre.
    pub angle: f64,
}

impl Tile {
    /// Creates an unrotated, unflipped tile.
    #[inline]
    #[must_use]
    pub const fn new(sprite_index: u32) -> Self {
        Self {
            sprite_index,
            flip: Flip::None,
            angle: 0.0,
        }
    }

    /// Sets the flip state.
    #[inline]
    #[must_use]
    pub const fn with_flip(mut self, flip: Flip) -> Self {
        self.flip = flip;
        self
    }

    /// Sets the rotation in degrees.
    #[inline]
    #[must_use]
    pub const fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }
}
