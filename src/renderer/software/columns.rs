//! Column texturer: ceiling, fogged wall strip, floor.
//!
//! Texel positions along the column are 16.16 fixed point, so the run-fill
//! and the unrolled sampler walk exactly the same sequence a naive
//! per-pixel sampler would.

use glam::Vec2;

use crate::{
    renderer::{RenderConfig, Rgba, shade, software::raycast::Side},
    world::Texture,
};

const FRAC_BITS: u32 = 16;

/// Below this texel step (texels per pixel) several pixels share a texel and
/// runs are filled at once.
pub const RUN_FILL_STEP: f32 = 0.5;

/// Closest distance used for projection, keeps the line height finite.
const MIN_DIST: f32 = 1e-4;

/// Fractional position of the hit along the face, `0 ≤ u < 1`.
#[inline]
pub fn wall_u(pos: Vec2, ray: Vec2, side: Side, dist: f32) -> f32 {
    let wall = match side {
        Side::X => pos.y + dist * ray.y,
        Side::Y => pos.x + dist * ray.x,
    };
    wall - wall.floor()
}

/// Texel column for face coordinate `u`, mirrored so textures read the same
/// from both sides of a tile.
#[inline]
pub fn texel_column(u: f32, ray: Vec2, side: Side, tex_w: usize) -> usize {
    let tx = ((u * tex_w as f32) as usize).min(tex_w - 1);
    let flip = match side {
        Side::X => ray.x > 0.0,
        Side::Y => ray.y < 0.0,
    };
    if flip { tex_w - tx - 1 } else { tx }
}

/// What to paint in one column.
#[derive(Clone, Copy, Debug)]
pub struct Slice {
    pub tex_u: usize,
    pub dist: f32,
}

/// Screen extent and texel walk of a wall strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strip {
    /// First painted pixel.
    pub start: usize,
    /// One past the last painted pixel.
    pub end: usize,
    /// Texel position at `start` (16.16).
    pub tex_pos: i64,
    /// Texel advance per pixel (16.16).
    pub step: i64,
}

impl Strip {
    /// Strip of a face `dist` away on a column of `len` pixels, where a face
    /// at distance 1 spans `frame_size` pixels.
    pub fn new(len: usize, frame_size: f32, dist: f32, tex_h: usize) -> Self {
        let line_h = ((frame_size / dist.max(MIN_DIST)) as i64).max(1);
        let top = (len / 2) as i64 - line_h / 2;
        let start = top.clamp(0, len as i64);
        let end = (top + line_h).clamp(start, len as i64);
        let step = ((tex_h as i64) << FRAC_BITS) / line_h;
        Self {
            start: start as usize,
            end: end as usize,
            tex_pos: (start - top) * step,
            step,
        }
    }

    #[inline]
    pub fn run_fill(&self) -> bool {
        self.step < (RUN_FILL_STEP * (1 << FRAC_BITS) as f32) as i64
    }
}

/// Paint ceiling above the strip, the strip itself, and floor below.
pub fn paint_column(
    column: &mut [Rgba],
    cfg: &RenderConfig,
    tex: &Texture,
    slice: Slice,
    frame_size: f32,
) {
    let strip = Strip::new(column.len(), frame_size, slice.dist, tex.h);
    column[..strip.start].fill(cfg.ceiling_color);
    sample_strip(column, tex, slice.tex_u, strip, cfg.fog_factor(slice.dist));
    column[strip.end..].fill(cfg.floor_color);
}

/// Paint only the wall strip, leaving the rest of the column alone.
pub fn paint_strip(
    column: &mut [Rgba],
    cfg: &RenderConfig,
    tex: &Texture,
    slice: Slice,
    frame_size: f32,
) {
    let strip = Strip::new(column.len(), frame_size, slice.dist, tex.h);
    sample_strip(column, tex, slice.tex_u, strip, cfg.fog_factor(slice.dist));
}

#[inline]
fn sample_strip(column: &mut [Rgba], tex: &Texture, u: usize, strip: Strip, fog: f32) {
    if strip.run_fill() {
        fill_runs(column, tex, u, strip, fog);
    } else {
        fill_unrolled(column, tex, u, strip, fog);
    }
}

/// Close walls: one texel covers several pixels, so fetch and shade it once
/// and fill the whole run.
fn fill_runs(column: &mut [Rgba], tex: &Texture, u: usize, strip: Strip, fog: f32) {
    let mask = (tex.h - 1) as i64;
    let step = strip.step;
    let mut pos = strip.tex_pos;
    let mut i = strip.start;
    while i < strip.end {
        let t = pos >> FRAC_BITS;
        let colour = shade(tex.texel(u, (t & mask) as usize), fog);
        let left = strip.end - i;
        let run = if step == 0 {
            left
        } else {
            let next = (t + 1) << FRAC_BITS;
            (((next - pos + step - 1) / step) as usize).min(left)
        };
        column[i..i + run].fill(colour);
        pos += step * run as i64;
        i += run;
    }
}

/// Far walls: four pixels per iteration.
fn fill_unrolled(column: &mut [Rgba], tex: &Texture, u: usize, strip: Strip, fog: f32) {
    let mask = (tex.h - 1) as i64;
    let step = strip.step;
    let texel = |p: i64| shade(tex.texel(u, ((p >> FRAC_BITS) & mask) as usize), fog);

    let mut pos = strip.tex_pos;
    let mut quads = column[strip.start..strip.end].chunks_exact_mut(4);
    for q in &mut quads {
        q[0] = texel(pos);
        q[1] = texel(pos + step);
        q[2] = texel(pos + 2 * step);
        q[3] = texel(pos + 3 * step);
        pos += 4 * step;
    }
    for px in quads.into_remainder() {
        *px = texel(pos);
        pos += step;
    }
}
