//! # World
//!
//! Owns everything one playthrough needs, acquired in this order and
//! released in the reverse:
//!
//! ```text
//! acquire:  atlas ──> grid (generated) ──> render cache
//! release:  render cache ──> grid ──> atlas (via the provider)
//! ```
//!
//! The world keeps the provider that loaded its atlas. Release runs once,
//! from [`World::teardown`] or, failing that, when the world is dropped.

use std::fmt;

use rogue_core::SparseTileGrid;
use rogue_procedural::{DungeonGenerator, GenerationStats};
use rogue_rendering::{draw_cache, Atlas, AtlasProvider, DrawStats, RenderCache, Renderer};

use crate::config::EngineConfig;
use crate::context::EngineContext;
use crate::error::{ConfigError, EngineResult};

/// Camera position in pixels.
///
/// Reserved: stored on the world but not yet applied when drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraOffset {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

/// Grid, render cache and atlas of one world instance.
pub struct World {
    grid: SparseTileGrid,
    cache: RenderCache,
    /// `None` once released.
    atlas: Option<Atlas>,
    atlases: Box<dyn AtlasProvider>,
    camera: CameraOffset,
    generation: GenerationStats,
}

impl World {
    /// Loads the atlas and generates the dungeon.
    ///
    /// Everything that can be rejected is checked before the atlas is
    /// loaded, so a failure never leaves a texture behind.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`](crate::EngineError) if the world settings are
    /// invalid or the atlas cannot be loaded.
    pub fn new(
        context: &EngineContext,
        config: &EngineConfig,
        mut atlases: Box<dyn AtlasProvider>,
    ) -> EngineResult<Self> {
        let dims = config.world.dims()?;
        let generator =
            DungeonGenerator::new(config.dungeon, context.seed()).map_err(ConfigError::from)?;

        let atlas = atlases.load(&config.atlas)?;

        let mut grid = SparseTileGrid::new(dims);
        let generation = generator.generate(&mut grid);

        tracing::info!(
            width = dims.width(),
            height = dims.height(),
            tiles = grid.len(),
            rooms = generation.rooms,
            "world generated"
        );

        Ok(Self {
            grid,
            cache: RenderCache::new(),
            atlas: Some(atlas),
            atlases,
            camera: CameraOffset::default(),
            generation,
        })
    }

    /// The tile grid.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &SparseTileGrid {
        &self.grid
    }

    /// Mutable tile grid.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut SparseTileGrid {
        &mut self.grid
    }

    /// The render cache as of the last rebuild.
    #[inline]
    #[must_use]
    pub const fn cache(&self) -> &RenderCache {
        &self.cache
    }

    /// The atlas, until the world is torn down.
    #[inline]
    #[must_use]
    pub const fn atlas(&self) -> Option<&Atlas> {
        self.atlas.as_ref()
    }

    /// Counters from dungeon generation.
    #[inline]
    #[must_use]
    pub const fn generation_stats(&self) -> GenerationStats {
        self.generation
    }

    /// Current camera offset.
    #[inline]
    #[must_use]
    pub const fn camera_offset(&self) -> CameraOffset {
        self.camera
    }

    /// Moves the camera.
    pub fn set_camera_offset(&mut self, camera: CameraOffset) {
        self.camera = camera;
    }

    /// Rebuilds the render cache if the grid changed. Returns true if it did.
    pub fn refresh_cache(&mut self) -> bool {
        match &self.atlas {
            Some(atlas) => self.cache.refresh(&mut self.grid, &atlas.meta),
            None => false,
        }
    }

    /// Draws the cache in order.
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) -> DrawStats {
        match &self.atlas {
            Some(atlas) => draw_cache(renderer, atlas.texture, &self.cache),
            None => DrawStats::default(),
        }
    }

    /// Releases cache, grid and atlas, in that order.
    pub fn teardown(mut self) {
        self.release();
        tracing::debug!("world torn down");
    }

    /// No-op once the atlas has been returned.
    fn release(&mut self) {
        let Some(atlas) = self.atlas.take() else {
            return;
        };
        self.cache.release();
        self.grid = SparseTileGrid::new(self.grid.dims());
        self.atlases.release(atlas);
    }
}

impl Drop for World {
    fn drop(&mut self) {
        if let Some(atlas) = &self.atlas {
            tracing::warn!(
                texture = atlas.texture.0,
                "world dropped without teardown, releasing atlas"
            );
        }
        self.release();
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("grid", &self.grid)
            .field("cache", &self.cache)
            .field("atlas", &self.atlas)
            .field("camera", &self.camera)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
