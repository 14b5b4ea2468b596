use crate::{
    renderer::{
        Rgba, alpha,
        software::{
            Software,
            frame::{DepthBuffer, FrameBuffer},
        },
    },
    world::{Anchor, Billboard, Camera, SourceRect, SpriteId, Texture},
};

/// Screen placement of one billboard for the current frame.
///
/// Column extent is `col0 .. col0 + cols`, extent along the column is
/// `along0 .. along0 + len`; both in (fractional) pixels, unclipped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteProjection {
    pub sprite: SpriteId,
    pub source: SourceRect,
    /// Camera-space depth.
    pub depth: f32,
    pub col0: f32,
    pub cols: f32,
    pub along0: f32,
    pub len: f32,
}

/// Project `bb` for a frame of `columns` columns of `column_len` pixels.
///
/// `None` when the billboard is behind the camera or entirely off-screen.
pub fn project(
    camera: &Camera,
    bb: &Billboard,
    columns: usize,
    column_len: usize,
) -> Option<SpriteProjection> {
    let t = camera.to_cam(bb.pos);
    if t.y <= 0.0 {
        return None;
    }
    let n = columns as f32;
    let centre = n * 0.5 * (1.0 + t.x / t.y);
    let base = n / t.y;
    let cols = base * bb.scale.x;
    let len = base * bb.scale.y;
    if cols <= 0.0 || len <= 0.0 {
        return None;
    }

    // horizon matches the wall strips
    let horizon = (column_len / 2) as f32;
    let along0 = match bb.anchor {
        Anchor::Bottom => horizon + base * 0.5 - len,
        Anchor::Top => horizon - base * 0.5,
        Anchor::Center => horizon - len * 0.5,
    };
    let col0 = centre - cols * 0.5;

    if col0 + cols <= 0.0 || col0 >= n || along0 + len <= 0.0 || along0 >= column_len as f32 {
        return None;
    }

    Some(SpriteProjection {
        sprite: bb.sprite,
        source: bb.source,
        depth: t.y,
        col0,
        cols,
        along0,
        len,
    })
}

/// Texel index for pixel `p` inside a span starting at `start` of `extent`
/// pixels mapped onto `size` texels. Samples at the pixel centre.
#[inline(always)]
fn texel_index(p: usize, start: f32, extent: f32, size: u32) -> Option<u32> {
    let f = (p as f32 + 0.5 - start) / extent * size as f32;
    (f >= 0.0 && f < size as f32).then(|| f as u32)
}

/// Alpha-cutout one projected billboard against the wall depths.
pub fn composite(
    frame: &mut FrameBuffer,
    depth: &DepthBuffer,
    p: &SpriteProjection,
    tex: &Texture,
) {
    let Some(src) = p.source.clipped_to(tex) else {
        return;
    };
    let columns = frame.height();
    let len = frame.width();

    let c0 = p.col0.floor().max(0.0) as usize;
    let c1 = ((p.col0 + p.cols).ceil() as usize).min(columns);
    let a0 = p.along0.floor().max(0.0) as usize;
    let a1 = ((p.along0 + p.len).ceil() as usize).min(len);

    for c in c0..c1 {
        if p.depth >= depth.get(c) {
            continue;
        }
        let Some(u) = texel_index(c, p.col0, p.cols, src.w) else {
            continue;
        };
        let u = (src.x + u) as usize;
        let column: &mut [Rgba] = frame.column_mut(c);
        for i in a0..a1 {
            let Some(v) = texel_index(i, p.along0, p.len, src.h) else {
                continue;
            };
            let px = tex.texel(u, (src.y + v) as usize);
            if alpha(px) != 0 {
                column[i] = px;
            }
        }
    }
}

impl Software {
    /// Billboard pass: project, sort far-to-near, composite.
    pub(super) fn draw_sprites(&mut self, camera: &Camera, billboards: &[Billboard]) {
        let columns = self.frame.height();
        let column_len = self.frame.width();

        self.projections.clear();
        self.projections.extend(
            billboards
                .iter()
                .filter_map(|bb| project(camera, bb, columns, column_len)),
        );

        // far-to-near painter’s algorithm so we overdraw correctly
        self.projections
            .sort_by(|a, b| b.depth.total_cmp(&a.depth));

        for p in &self.projections {
            if let Some(tex) = self.sprite_cache.get(p.sprite) {
                composite(&mut self.frame, &self.depth, p, tex);
            }
        }
    }
}
