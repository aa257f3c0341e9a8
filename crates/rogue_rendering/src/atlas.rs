//! # Texture Atlas
//!
//! An atlas is one image cut into square cells separated by a gutter:
//!
//! ```text
//!  tile  gutter tile  gutter tile
//! ├────┤├─┤├────┤├─┤├────┤
//! ┌────┐   ┌────┐   ┌────┐
//! │ 0  │   │ 1  │   │ 2  │ ...
//! └────┘   └────┘   └────┘
//! ```
//!
//! Image decoding belongs to the backend. This module only knows the layout
//! and hands out an opaque [`TextureHandle`] per loaded atlas.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AtlasError, AtlasResult};

/// Opaque backend texture identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Layout of an atlas image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasMeta {
    /// Side of one cell in pixels.
    pub tile_size: u32,
    /// Pixels between adjacent cells.
    pub gutter: u32,
    /// Cells per atlas row as declared by the descriptor.
    pub width_in_tiles: u32,
}

impl AtlasMeta {
    /// Creates validated atlas metadata.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::Invalid`] if `tile_size` is zero or the atlas is
    /// narrower than two cells. Sprite lookup walks rows of
    /// `width_in_tiles - 1` cells, so a one-cell-wide atlas has no usable row.
    pub fn new(tile_size: u32, gutter: u32, width_in_tiles: u32) -> AtlasResult<Self> {
        if tile_size == 0 {
            return Err(AtlasError::Invalid {
                reason: "tile_size must be non-zero",
            });
        }
        if width_in_tiles < 2 {
            return Err(AtlasError::Invalid {
                reason: "width_in_tiles must be at least 2",
            });
        }
        Ok(Self {
            tile_size,
            gutter,
            width_in_tiles,
        })
    }

    /// Row stride used to unpack sprite indices.
    #[inline]
    #[must_use]
    pub const fn sprite_stride(&self) -> u32 {
        self.width_in_tiles - 1
    }
}

/// A loaded atlas: layout plus the backend texture it lives in.
///
/// Owned by the world; the render cache only borrows [`Atlas::meta`].
#[derive(Debug, PartialEq, Eq)]
pub struct Atlas {
    /// Cell layout.
    pub meta: AtlasMeta,
    /// Backend texture.
    pub texture: TextureHandle,
}

/// Loads and releases atlases.
pub trait AtlasProvider {
    /// Loads the atlas described at `path`.
    ///
    /// # Errors
    ///
    /// Any failure is fatal to engine startup.
    fn load(&mut self, path: &Path) -> AtlasResult<Atlas>;

    /// Returns the atlas's texture to the backend.
    ///
    /// Takes the atlas by value so a handle cannot be released twice.
    fn release(&mut self, atlas: Atlas);
}

/// On-disk atlas descriptor.
///
/// ```toml
/// image = "tiles.png"
/// tile_size = 16
/// gutter = 1
/// width_in_tiles = 49
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AtlasDescriptor {
    /// Image file, relative to the descriptor.
    pub image: PathBuf,
    /// Side of one cell in pixels.
    pub tile_size: u32,
    /// Pixels between cells.
    #[serde(default)]
    pub gutter: u32,
    /// Cells per row.
    pub width_in_tiles: u32,
}

impl AtlasDescriptor {
    /// Validated layout.
    ///
    /// # Errors
    ///
    /// See [`AtlasMeta::new`].
    pub fn meta(&self) -> AtlasResult<AtlasMeta> {
        AtlasMeta::new(self.tile_size, self.gutter, self.width_in_tiles)
    }
}

/// Atlas provider reading TOML descriptors.
///
/// Each successful load hands out a fresh [`TextureHandle`] and remembers the
/// resolved image path, which is what a real backend would upload.
#[derive(Debug, Default)]
pub struct TomlAtlasProvider {
    next_handle: u64,
    live: HashMap<TextureHandle, PathBuf>,
    released: u64,
}

impl TomlAtlasProvider {
    /// Creates a provider with no live atlases.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a descriptor already in memory.
    ///
    /// `origin` is used for error messages and to resolve the image path.
    ///
    /// # Errors
    ///
    /// [`AtlasError::Parse`] for malformed TOML, [`AtlasError::Invalid`] for
    /// an unusable layout.
    pub fn load_str(&mut self, text: &str, origin: &Path) -> AtlasResult<Atlas> {
        let descriptor: AtlasDescriptor =
            toml::from_str(text).map_err(|source| AtlasError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;
        let meta = descriptor.meta()?;

        let image = origin
            .parent()
            .map_or_else(|| descriptor.image.clone(), |dir| dir.join(&descriptor.image));

        let texture = TextureHandle(self.next_handle);
        self.next_handle += 1;
        self.live.insert(texture, image);

        tracing::info!(
            texture = texture.0,
            tile_size = meta.tile_size,
            gutter = meta.gutter,
            width_in_tiles = meta.width_in_tiles,
            "atlas loaded"
        );

        Ok(Atlas { meta, texture })
    }

    /// Image backing a live texture.
    #[must_use]
    pub fn image_path(&self, texture: TextureHandle) -> Option<&Path> {
        self.live.get(&texture).map(PathBuf::as_path)
    }

    /// Atlases loaded and not yet released.
    #[inline]
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Atlases released so far.
    #[inline]
    #[must_use]
    pub const fn released_count(&self) -> u64 {
        self.released
    }
}

impl AtlasProvider for TomlAtlasProvider {
    fn load(&mut self, path: &Path) -> AtlasResult<Atlas> {
        let text = std::fs::read_to_string(path).map_err(|source| AtlasError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_str(&text, path)
    }

    fn release(&mut self, atlas: Atlas) {
        if self.live.remove(&atlas.texture).is_some() {
            self.released += 1;
            tracing::debug!(texture = atlas.texture.0, "atlas released");
        } else {
            tracing::warn!(texture = atlas.texture.0, "release of unknown atlas");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTOR: &str = r#"
        image = "tiles.png"
        tile_size = 16
        gutter = 1
        width_in_tiles = 49
    "#;

    #[test]
    fn test_meta_validation() {
        assert!(AtlasMeta::new(16, 1, 2).is_ok());
        assert!(matches!(AtlasMeta::new(0, 1, 8), Err(AtlasError::Invalid { .. })));
        assert!(matches!(AtlasMeta::new(16, 1, 1), Err(AtlasError::Invalid { .. })));
        assert!(matches!(AtlasMeta::new(16, 1, 0), Err(AtlasError::Invalid { .. })));
    }

    #[test]
    fn test_sprite_stride_is_one_less_than_width() {
        assert_eq!(AtlasMeta::new(16, 1, 49).unwrap().sprite_stride(), 48);
    }

    #[test]
    fn test_load_str_resolves_image_next_to_descriptor() {
        let mut provider = TomlAtlasProvider::new();
        let atlas = provider
            .load_str(DESCRIPTOR, Path::new("assets/atlas.toml"))
            .unwrap();

        assert_eq!(atlas.meta, AtlasMeta::new(16, 1, 49).unwrap());
        assert_eq!(
            provider.image_path(atlas.texture),
            Some(Path::new("assets/tiles.png"))
        );
        assert_eq!(provider.live_count(), 1);
    }

    #[test]
    fn test_handles_are_unique() {
        let mut provider = TomlAtlasProvider::new();
        let a = provider.load_str(DESCRIPTOR, Path::new("a.toml")).unwrap();
        let b = provider.load_str(DESCRIPTOR, Path::new("b.toml")).unwrap();
        assert_ne!(a.texture, b.texture);
    }

    #[test]
    fn test_gutter_defaults_to_zero() {
        let mut provider = TomlAtlasProvider::new();
        let atlas = provider
            .load_str("image = \"x.png\"\ntile_size = 8\nwidth_in_tiles = 4", Path::new("x.toml"))
            .unwrap();
        assert_eq!(atlas.meta.gutter, 0);
    }

    #[test]
    fn test_parse_and_layout_errors() {
        let mut provider = TomlAtlasProvider::new();
        let parse = provider.load_str("tile_size = \"big\"", Path::new("bad.toml"));
        assert!(matches!(parse, Err(AtlasError::Parse { .. })));

        let narrow = provider.load_str(
            "image = \"x.png\"\ntile_size = 8\nwidth_in_tiles = 1",
            Path::new("narrow.toml"),
        );
        assert!(matches!(narrow, Err(AtlasError::Invalid { .. })));
        assert_eq!(provider.live_count(), 0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let mut provider = TomlAtlasProvider::new();
        let result = provider.load(Path::new("/definitely/not/here/atlas.toml"));
        assert!(matches!(result, Err(AtlasError::Io { .. })));
    }

    #[test]
    fn test_release_once() {
        let mut provider = TomlAtlasProvider::new();
        let atlas = provider.load_str(DESCRIPTOR, Path::new("a.toml")).unwrap();
        provider.release(atlas);
        assert_eq!(provider.live_count(), 0);
        assert_eq!(provider.released_count(), 1);
    }
}
