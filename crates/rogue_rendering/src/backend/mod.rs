//! # Backend Seam
//!
//! The graphics backend is reached only through [`Renderer`]. One frame is:
//!
//! ```text
//! clear(color) ─> draw(op) × N ─> present()
//! ```
//!
//! Every call may fail on its own. [`draw_cache`] keeps going after a failed
//! draw so a single bad sprite never blanks the frame.

mod headless;

pub use headless::{HeadlessRenderer, SpriteInstance};

use rogue_core::Flip;

use crate::atlas::TextureHandle;
use crate::cache::RenderCache;
use crate::error::RenderResult;
use crate::geometry::{Rect, Rgba};

/// Draw/present primitives of a graphics backend.
pub trait Renderer {
    /// Sets the integer pixel scale applied to every draw.
    ///
    /// # Errors
    ///
    /// Backends that cannot scale report it here; the engine logs and goes on.
    fn set_scale(&mut self, scale: u32) -> RenderResult<()> {
        let _ = scale;
        Ok(())
    }

    /// Fills the target with `color`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`](crate::RenderError) if the backend rejects the call.
    fn clear(&mut self, color: Rgba) -> RenderResult<()>;

    /// Copies `source` from `texture` to `dest`, mirrored by `flip` and
    /// rotated `angle` degrees clockwise about the centre of `dest`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`](crate::RenderError) if the backend rejects the call.
    fn draw(
        &mut self,
        texture: TextureHandle,
        source: Rect,
        dest: Rect,
        flip: Flip,
        angle: f64,
    ) -> RenderResult<()>;

    /// Shows the finished frame.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`](crate::RenderError) if the backend rejects the call.
    fn present(&mut self) -> RenderResult<()>;
}

/// Outcome of drawing one cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Draw calls issued.
    pub attempted: u32,
    /// Draw calls the backend rejected.
    pub failed: u32,
}

impl DrawStats {
    /// Draw calls that succeeded.
    #[inline]
    #[must_use]
    pub const fn succeeded(&self) -> u32 {
        self.attempted - self.failed
    }
}

/// Issues one draw per cached operation, in order.
///
/// Failures are logged at `warn` and counted; the remaining operations are
/// still drawn.
pub fn draw_cache<R: Renderer + ?Sized>(
    renderer: &mut R,
    texture: TextureHandle,
    cache: &RenderCache,
) -> DrawStats {
    let mut stats = DrawStats::default();
    for op in cache.operations() {
        stats.attempted += 1;
        if let Err(err) = renderer.draw(texture, op.source, op.dest, op.flip, op.angle) {
            stats.failed += 1;
            tracing::warn!(error = %err, dest_x = op.dest.x, dest_y = op.dest.y, "draw failed");
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::AtlasMeta;
    use crate::error::RenderError;
    use rogue_core::{GridDims, SparseTileGrid, Tile, TileCoord};

    /// Rejects every other draw.
    struct FlakyRenderer {
        calls: u32,
    }

    impl Renderer for FlakyRenderer {
        fn clear(&mut self, _color: Rgba) -> RenderResult<()> {
            Ok(())
        }

        fn draw(&mut self, _: TextureHandle, _: Rect, _: Rect, _: Flip, _: f64) -> RenderResult<()> {
            self.calls += 1;
            if self.calls % 2 == 0 {
                Err(RenderError::Backend("lost texture".into()))
            } else {
                Ok(())
            }
        }

        fn present(&mut self) -> RenderResult<()> {
            Ok(())
        }
    }

    fn cache_with(cells: u32) -> RenderCache {
        let mut grid = SparseTileGrid::new(GridDims::DEFAULT);
        for x in 0..cells {
            grid.set(TileCoord::new(x, 0), Tile::new(x));
        }
        let mut cache = RenderCache::new();
        cache.rebuild(&mut grid, &AtlasMeta::new(8, 0, 4).unwrap());
        cache
    }

    #[test]
    fn test_failed_draws_do_not_stop_the_frame() {
        let cache = cache_with(10);
        let mut renderer = FlakyRenderer { calls: 0 };
        let stats = draw_cache(&mut renderer, TextureHandle(0), &cache);

        assert_eq!(renderer.calls, 10);
        assert_eq!(stats.attempted, 10);
        assert_eq!(stats.failed, 5);
        assert_eq!(stats.succeeded(), 5);
    }

    #[test]
    fn test_default_set_scale_is_accepted() {
        let mut renderer = FlakyRenderer { calls: 0 };
        assert!(renderer.set_scale(3).is_ok());
    }

    #[test]
    fn test_empty_cache_draws_nothing() {
        let mut renderer = FlakyRenderer { calls: 0 };
        let stats = draw_cache(&mut renderer, TextureHandle(0), &RenderCache::new());
        assert_eq!(stats, DrawStats::default());
    }
}
