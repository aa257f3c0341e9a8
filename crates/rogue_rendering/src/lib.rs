//! # ROGUE Rendering
//!
//! Turns a [`SparseTileGrid`](rogue_core::SparseTileGrid) into an ordered
//! list of draw operations and hands them to a backend.
//!
//! ## Pipeline
//!
//! ```text
//! ┌────────────────┐ dirty? ┌─────────────┐  ops  ┌──────────────┐
//! │ SparseTileGrid │ ─────> │ RenderCache │ ────> │   Renderer   │
//! └────────────────┘        └─────────────┘       └──────────────┘
//!                                  ^              clear / draw /
//!                        AtlasMeta (borrowed)     present
//! ```
//!
//! The cache is rebuilt only when the grid reports itself dirty. Drawing is
//! best effort: a failed call is logged and the rest of the frame still runs.
//!
//! ## Example
//!
//! ```rust
//! use rogue_core::{GridDims, SparseTileGrid, Tile, TileCoord};
//! use rogue_rendering::{AtlasMeta, RenderCache};
//!
//! let mut grid = SparseTileGrid::new(GridDims::DEFAULT);
//! grid.set(TileCoord::new(1, 2), Tile::new(3));
//!
//! let atlas = AtlasMeta::new(16, 1, 8).unwrap();
//! let mut cache = RenderCache::new();
//! assert!(cache.refresh(&mut grid, &atlas));
//! assert_eq!(cache.len(), 1);
//! assert!(!grid.is_dirty());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod atlas;
pub mod backend;
pub mod cache;
pub mod error;
pub mod geometry;

pub use atlas::{Atlas, AtlasDescriptor, AtlasMeta, AtlasProvider, TextureHandle, TomlAtlasProvider};
pub use backend::{draw_cache, DrawStats, HeadlessRenderer, Renderer, SpriteInstance};
pub use cache::{dest_rect, source_rect, RenderCache, RenderOperation};
pub use error::{AtlasError, AtlasResult, RenderError, RenderResult};
pub use geometry::{Rect, Rgba};
