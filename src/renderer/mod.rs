//! Rendering abstraction layer.
//!
//! *The rest of the engine never touches a pixel buffer directly.*
//! It hands the camera, the map and the visible billboards to a type that
//! implements [`Renderer`] and receives the finished frame in a closure.
//!
//! * The only back-end today is the CPU raycaster in [`software`].
//! * Frame-buffer orientation: every buffer row is one screen *column*
//!   (see [`software::FrameBuffer`]); presenting rotates it.

use crate::world::{Billboard, Camera, TileMap};

/// Pixel format of the software frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

/// Pack 8-bit channels.
#[inline(always)]
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Alpha channel of a packed pixel.
#[inline(always)]
pub const fn alpha(px: Rgba) -> u8 {
    (px >> 24) as u8
}

/// Scale R/G/B by `factor` (0..=1); alpha is kept.
#[inline(always)]
pub fn shade(px: Rgba, factor: f32) -> Rgba {
    if factor >= 1.0 {
        return px;
    }
    let ch = |shift: u32| (((px >> shift) & 0xFF) as f32 * factor) as u32;
    (px & 0xFF00_0000) | ch(16) << 16 | ch(8) << 8 | ch(0)
}

/// Construction-time tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    pub ceiling_color: Rgba,
    pub floor_color: Rgba,
    /// Distance (map units) where fog starts darkening walls.
    pub fog_start: f32,
    /// Distance where walls are fully dark.
    pub fog_distance: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            ceiling_color: rgba(0x38, 0x38, 0x38, 0xFF),
            floor_color: rgba(0x70, 0x70, 0x70, 0xFF),
            fog_start: 1.0,
            fog_distance: 15.0,
        }
    }
}

impl RenderConfig {
    /// Linear fog: 1.0 up to `fog_start`, 0.0 from `fog_distance` on.
    #[inline]
    pub fn fog_factor(&self, dist: f32) -> f32 {
        if dist <= self.fog_start {
            return 1.0;
        }
        if dist >= self.fog_distance {
            return 0.0;
        }
        let t = (dist - self.fog_start) / (self.fog_distance - self.fog_start);
        1.0 - t.clamp(0.0, 1.0)
    }
}

/// A renderer that owns an internal buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// Render one complete frame into the internal buffer.
    fn draw_frame<M: TileMap>(&mut self, camera: &Camera, map: &M, billboards: &[Billboard]);

    /// **Loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], width, height)` is run exactly once per call.
    /// * Buffer rows are screen columns; see [`software::FrameBuffer`].
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

pub mod software;
