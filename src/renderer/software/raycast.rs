//! Per-column DDA through the tile grid.
//!
//! Walls stop the ray. Door tiles never do: the first one crossed is
//! remembered so the door pass can draw it over whatever lies behind.

use glam::Vec2;

use crate::world::{Camera, DOOR_TEXTURE, TextureId, Tile, TileMap};

/// Stand-in for `|1/0|` when a ray component is exactly zero.
pub const NO_DELTA: f32 = 1e30;

/// Grid axis crossed by the last DDA step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Stepped in x: the face lies along y.
    X,
    /// Stepped in y: the face lies along x.
    Y,
}

/// First door tile crossed on the way to the wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorHit {
    pub col: i32,
    pub row: i32,
    pub side: Side,
    pub dist: f32,
}

/// Result of casting one column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallHit {
    pub col: i32,
    pub row: i32,
    pub tile: Tile,
    pub side: Side,
    /// Perpendicular (not euclidean) distance.
    pub dist: f32,
    pub ray: Vec2,
    pub door: Option<DoorHit>,
}

impl WallHit {
    /// Wall texture for the hit tile.
    #[inline]
    pub fn texture(&self) -> TextureId {
        match self.tile {
            Tile::Wall(id) => id,
            _ => DOOR_TEXTURE,
        }
    }
}

/// Camera-plane coordinate of column `c` out of `columns`, sampled at the
/// pixel centre: `-1` at the left edge, `+1` at the right.
#[inline(always)]
pub fn camera_x(c: usize, columns: usize) -> f32 {
    2.0 * (c as f32 + 0.5) / columns as f32 - 1.0
}

/// Step a single ray until it enters an opaque tile.
///
/// The map must be enclosed; coordinates outside the grid read as solid
/// through [`TileMap::tile_at`].
pub fn cast_ray<M: TileMap>(map: &M, pos: Vec2, ray: Vec2) -> WallHit {
    let mut col = pos.x.floor() as i32;
    let mut row = pos.y.floor() as i32;

    let delta_x = if ray.x == 0.0 { NO_DELTA } else { (1.0 / ray.x).abs() };
    let delta_y = if ray.y == 0.0 { NO_DELTA } else { (1.0 / ray.y).abs() };

    let (step_x, mut side_x) = if ray.x < 0.0 {
        (-1, (pos.x - col as f32) * delta_x)
    } else {
        (1, (col as f32 + 1.0 - pos.x) * delta_x)
    };
    let (step_y, mut side_y) = if ray.y < 0.0 {
        (-1, (pos.y - row as f32) * delta_y)
    } else {
        (1, (row as f32 + 1.0 - pos.y) * delta_y)
    };

    let mut door = None;
    loop {
        let side = if side_x < side_y {
            side_x += delta_x;
            col += step_x;
            Side::X
        } else {
            side_y += delta_y;
            row += step_y;
            Side::Y
        };
        let dist = match side {
            Side::X => side_x - delta_x,
            Side::Y => side_y - delta_y,
        };

        match map.tile_at(col, row) {
            Tile::Door => {
                if door.is_none() {
                    door = Some(DoorHit {
                        col,
                        row,
                        side,
                        dist,
                    });
                }
            }
            tile @ Tile::Wall(_) => {
                return WallHit {
                    col,
                    row,
                    tile,
                    side,
                    dist,
                    ray,
                    door,
                };
            }
            Tile::Floor | Tile::StartingPosition => {}
        }
    }
}

/// Cast the ray for screen column `c` of `columns`.
#[inline]
pub fn cast_column<M: TileMap>(map: &M, camera: &Camera, c: usize, columns: usize) -> WallHit {
    cast_ray(map, camera.pos, camera.ray_dir(camera_x(c, columns)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Map;
    use glam::vec2;

    fn room() -> Map {
        Map::parse(
            "\
##########
#........#
#........#
#........#
#........#
#........#
#........#
#........#
#........#
##########",
        )
        .unwrap()
    }

    #[test]
    fn axis_aligned_distances_are_analytic() {
        let map = room();
        let pos = vec2(5.0, 5.0);
        // faces at x=9, x=1, y=9, y=1
        let cases = [
            (vec2(1.0, 0.0), 4.0, Side::X, (9, 5)),
            (vec2(-1.0, 0.0), 4.0, Side::X, (0, 5)),
            (vec2(0.0, 1.0), 4.0, Side::Y, (5, 9)),
            (vec2(0.0, -1.0), 4.0, Side::Y, (5, 0)),
        ];
        for (ray, want, side, tile) in cases {
            let hit = cast_ray(&map, pos, ray);
            assert!((hit.dist - want).abs() < 1e-5, "{ray:?}: {}", hit.dist);
            assert_eq!(hit.side, side);
            assert_eq!((hit.col, hit.row), tile);
            assert_eq!(hit.tile, Tile::Wall(1));
            assert!(hit.door.is_none());
        }
    }

    #[test]
    fn perpendicular_distance_has_no_fisheye() {
        let map = room();
        let cam = Camera::new(vec2(5.0, 5.0), vec2(1.0, 0.0), vec2(0.0, 0.45));
        for c in 0..16 {
            let hit = cast_column(&map, &cam, c, 16);
            assert!((hit.dist - 4.0).abs() < 1e-4, "column {c}: {}", hit.dist);
        }
    }

    #[test]
    fn camera_x_is_symmetric() {
        assert!((camera_x(0, 200) + camera_x(199, 200)).abs() < 1e-6);
        assert!(camera_x(0, 200) < -0.99);
    }

    #[test]
    fn doors_are_recorded_but_seen_through() {
        let map = Map::parse(
            "\
#######
#..|.|#
#######",
        )
        .unwrap();
        let hit = cast_ray(&map, vec2(1.5, 1.5), vec2(1.0, 0.0));
        assert_eq!((hit.col, hit.row), (6, 1));
        assert!((hit.dist - 4.5).abs() < 1e-5);

        // only the nearest of the two doors is kept
        let door = hit.door.unwrap();
        assert_eq!((door.col, door.row), (3, 1));
        assert_eq!(door.side, Side::X);
        assert!((door.dist - 1.5).abs() < 1e-5);
    }

    #[test]
    fn zero_component_uses_sentinel() {
        let map = room();
        let hit = cast_ray(&map, vec2(2.5, 3.25), vec2(0.0, -2.0));
        assert_eq!(hit.side, Side::Y);
        assert!((hit.dist - 1.125).abs() < 1e-5);
    }
}
