//! Headless backend that records frames into an instance buffer.

use bytemuck::{Pod, Zeroable};
use rogue_core::Flip;

use crate::atlas::TextureHandle;
use crate::error::{RenderError, RenderResult};
use crate::geometry::{Rect, Rgba};

use super::Renderer;

/// One recorded draw, laid out for a GPU instance buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Atlas cell: x, y, w, h in texels.
    pub source: [f32; 4],
    /// Screen quad: x, y, w, h in pixels, already scaled.
    pub dest: [f32; 4],
    /// Rotation in degrees, then the pivot (quad centre).
    pub angle_pivot: [f32; 3],
    /// Bit 0: horizontal mirror. Bit 1: vertical mirror.
    pub flip_bits: u32,
}

impl SpriteInstance {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Flip state packed into `flip_bits`.
    #[must_use]
    pub const fn flip(&self) -> Flip {
        Flip::from_axes(self.flip_bits & 1 != 0, self.flip_bits & 2 != 0)
    }
}

const fn flip_bits(flip: Flip) -> u32 {
    (flip.is_horizontal() as u32) | ((flip.is_vertical() as u32) << 1)
}

/// Renderer without a window.
///
/// Each frame's draws are packed into [`SpriteInstance`]s; the buffer of the
/// last presented frame stays readable until the next `clear`.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    scale: u32,
    clear_color: Rgba,
    pending: Vec<SpriteInstance>,
    presented: Vec<SpriteInstance>,
    frames: u64,
    clears: u64,
    draws: u64,
}

impl HeadlessRenderer {
    /// Creates a renderer at scale 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scale: 1,
            ..Self::default()
        }
    }

    /// Instances of the last presented frame.
    #[must_use]
    pub fn instances(&self) -> &[SpriteInstance] {
        &self.presented
    }

    /// Last presented frame as raw bytes, ready for upload.
    #[must_use]
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.presented)
    }

    /// Frames presented.
    #[inline]
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Clears issued.
    #[inline]
    #[must_use]
    pub const fn clears(&self) -> u64 {
        self.clears
    }

    /// Draws accepted over the renderer's lifetime.
    #[inline]
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    /// Current pixel scale.
    #[inline]
    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    /// Colour of the last clear.
    #[inline]
    #[must_use]
    pub const fn clear_color(&self) -> Rgba {
        self.clear_color
    }
}

impl Renderer for HeadlessRenderer {
    fn set_scale(&mut self, scale: u32) -> RenderResult<()> {
        if scale == 0 {
            return Err(RenderError::Backend("render scale must be non-zero".into()));
        }
        self.scale = scale;
        Ok(())
    }

    fn clear(&mut self, color: Rgba) -> RenderResult<()> {
        self.clear_color = color;
        self.pending.clear();
        self.clears += 1;
        Ok(())
    }

    fn draw(
        &mut self,
        _texture: TextureHandle,
        source: Rect,
        dest: Rect,
        flip: Flip,
        angle: f64,
    ) -> RenderResult<()> {
        let scale = self.scale as f32;
        let (cx, cy) = dest.center();
        self.pending.push(SpriteInstance {
            source: [source.x as f32, source.y as f32, source.w as f32, source.h as f32],
            dest: [
                dest.x as f32 * scale,
                dest.y as f32 * scale,
                dest.w as f32 * scale,
                dest.h as f32 * scale,
            ],
            angle_pivot: [angle as f32, cx * scale, cy * scale],
            flip_bits: flip_bits(flip),
        });
        self.draws += 1;
        Ok(())
    }

    fn present(&mut self) -> RenderResult<()> {
        std::mem::swap(&mut self.pending, &mut self.presented);
        self.pending.clear();
        self.frames += 1;
        Ok(())
    }
}
