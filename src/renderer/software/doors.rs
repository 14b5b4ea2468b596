//! Door pass: draw the slice of a partly open door over the farther wall.

use glam::Vec2;

use crate::{
    renderer::{
        RenderConfig, Rgba,
        software::{
            columns::{self, Slice},
            raycast::{Side, WallHit},
        },
    },
    world::{Door, Texture, TileMap},
};

/// Face coordinate of a door, shifted by how far it has slid open.
/// `None` where the opening shows what lies behind.
#[inline]
pub fn door_u(door: &Door, pos: Vec2, ray: Vec2, side: Side, dist: f32) -> Option<f32> {
    let mut u = columns::wall_u(pos, ray, side, dist);
    let slides = match side {
        Side::X => door.is_vertical,
        Side::Y => !door.is_vertical,
    };
    if slides {
        u -= door.open_amount;
    }
    (0.0..1.0).contains(&u).then_some(u)
}

/// Paint the door recorded in `hit`, if any is in front of the wall.
///
/// Returns the depth the column ends up with.
pub fn composite_door<M: TileMap>(
    column: &mut [Rgba],
    map: &M,
    pos: Vec2,
    hit: &WallHit,
    tex: &Texture,
    cfg: &RenderConfig,
    frame_size: f32,
) -> f32 {
    let Some(dh) = hit.door else {
        return hit.dist;
    };
    let Some(door) = map.door_at(dh.col, dh.row) else {
        return hit.dist;
    };
    if !door.is_blocking() || dh.dist >= hit.dist {
        return hit.dist;
    }
    let Some(u) = door_u(door, pos, hit.ray, dh.side, dh.dist) else {
        return hit.dist;
    };

    let slice = Slice {
        tex_u: columns::texel_column(u, hit.ray, dh.side, tex.w),
        dist: dh.dist,
    };
    columns::paint_strip(column, cfg, tex, slice, frame_size);
    dh.dist
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn offset_only_along_the_slide_axis() {
        let pos = vec2(1.5, 1.3);
        let ray = vec2(1.0, 0.0);
        let mut door = Door::new(true);
        door.open_amount = 0.2;

        // vertical door seen across x: slides
        let u = door_u(&door, pos, ray, Side::X, 1.0).unwrap();
        assert!((u - 0.1).abs() < 1e-5);

        // past the edge: the gap
        door.open_amount = 0.5;
        assert_eq!(door_u(&door, pos, ray, Side::X, 1.0), None);

        // the same door seen across y keeps its full face
        let u = door_u(&door, vec2(1.3, 1.5), vec2(0.0, 1.0), Side::Y, 1.0).unwrap();
        assert!((u - 0.3).abs() < 1e-5);
    }

    #[test]
    fn horizontal_door_slides_when_seen_across_y() {
        let mut door = Door::new(false);
        door.open_amount = 0.75;
        let u = door_u(&door, vec2(2.9, 1.5), vec2(0.0, 1.0), Side::Y, 1.0);
        assert!((u.unwrap() - 0.15).abs() < 1e-5);
        assert_eq!(door_u(&door, vec2(2.5, 1.5), vec2(0.0, 1.0), Side::Y, 1.0), None);
    }
}
