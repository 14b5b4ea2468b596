//! Player movement on the tile grid.
//!
//! The player is the camera: there is no separate body entity. Collision is
//! a square of half-width [`PLAYER_RADIUS`] tested per axis, so a blocked
//! move slides along the wall instead of stopping dead.

use std::ops::RangeInclusive;

use glam::{Vec2, vec2};

use super::InputCmd;
use crate::{
    renderer::software::cast_ray,
    world::{Camera, Map},
};

pub const MOVE_SPEED: f32 = 3.0; // tiles / second
pub const RUN_FACTOR: f32 = 1.5;
pub const TURN_RATE: f32 = std::f32::consts::PI; // rad / second (180°/s)
pub const PLAYER_RADIUS: f32 = 0.2;
/// How far in front of the eye "use" reaches.
pub const USE_RANGE: f32 = 1.5;

/// Apply one tic of `cmd` to the camera.
pub fn player_input(camera: &mut Camera, map: &Map, cmd: InputCmd, dt: f32) {
    /* 1. turn (positive = right) */
    if cmd.turn != 0.0 {
        camera.turn(cmd.turn * TURN_RATE * dt);
    }

    /* 2. wish-move, normalised so diagonals are not faster */
    if cmd.forward != 0.0 || cmd.strafe != 0.0 {
        let speed = if cmd.run {
            MOVE_SPEED * RUN_FACTOR
        } else {
            MOVE_SPEED
        };
        let fwd = camera.dir.normalize_or_zero();
        let right = camera.plane.normalize_or_zero();
        let wish = (fwd * cmd.forward + right * cmd.strafe).normalize_or_zero();
        camera.pos = try_move(map, camera.pos, wish * speed * dt);
    }
}

/// Move `pos` by `delta`, dropping whichever axis would end up in a wall.
pub fn try_move(map: &Map, pos: Vec2, delta: Vec2) -> Vec2 {
    let mut out = pos;
    if fits(map, vec2(pos.x + delta.x, pos.y)) {
        out.x += delta.x;
    }
    if fits(map, vec2(out.x, pos.y + delta.y)) {
        out.y += delta.y;
    }
    out
}

/// Cells covered by a body centred on `p`, as column and row ranges.
fn footprint(p: Vec2) -> (RangeInclusive<i32>, RangeInclusive<i32>) {
    let lo = (p - PLAYER_RADIUS).floor();
    let hi = (p + PLAYER_RADIUS).floor();
    (lo.x as i32..=hi.x as i32, lo.y as i32..=hi.y as i32)
}

/// Does a body centred on `p` overlap only passable cells?
pub fn fits(map: &Map, p: Vec2) -> bool {
    let (cols, rows) = footprint(p);
    rows.into_iter()
        .all(|row| cols.clone().all(|col| map.is_passable(col, row)))
}

/// Does a body centred on `p` overlap `cell`?
pub fn touches(p: Vec2, cell: (i32, i32)) -> bool {
    let (cols, rows) = footprint(p);
    cols.contains(&cell.0) && rows.contains(&cell.1)
}

/// The door straight ahead within [`USE_RANGE`], if any.
pub fn use_target(camera: &Camera, map: &Map) -> Option<(i32, i32)> {
    let dir = camera.dir.normalize_or_zero();
    if dir == Vec2::ZERO {
        return None;
    }
    let hit = cast_ray(map, camera.pos, dir);
    hit.door
        .filter(|d| d.dist <= USE_RANGE)
        .map(|d| (d.col, d.row))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRIDOR: &str = "\
#######
#.....#
#..|..#
#.....#
#######";

    fn cam(x: f32, y: f32, yaw: f32) -> Camera {
        Camera::from_yaw(vec2(x, y), yaw, 90_f32.to_radians())
    }

    #[test]
    fn walks_forward() {
        let map = Map::parse(CORRIDOR).unwrap();
        let mut c = cam(1.5, 1.5, 0.0);
        let cmd = InputCmd {
            forward: 1.0,
            ..Default::default()
        };
        player_input(&mut c, &map, cmd, 0.1);
        assert!((c.pos.x - (1.5 + MOVE_SPEED * 0.1)).abs() < 1e-5);
        assert_eq!(c.pos.y, 1.5);
    }

    #[test]
    fn wall_stops_one_axis_only() {
        let map = Map::parse(CORRIDOR).unwrap();
        // hugging the north wall, pushing north-east
        let p = try_move(&map, vec2(2.5, 1.25), vec2(0.3, -0.3));
        assert!((p.x - 2.8).abs() < 1e-5);
        assert_eq!(p.y, 1.25);
    }

    #[test]
    fn closed_door_blocks_open_door_does_not() {
        let mut map = Map::parse(CORRIDOR).unwrap();
        let start = vec2(2.5, 2.5);
        let p = try_move(&map, start, vec2(0.4, 0.0));
        assert_eq!(p, start);

        map.door_at_mut(3, 2).unwrap().open_amount = 1.0;
        let p = try_move(&map, start, vec2(0.4, 0.0));
        assert!((p.x - 2.9).abs() < 1e-5);
    }

    #[test]
    fn body_touches_neighbouring_cells() {
        assert!(touches(vec2(2.9, 2.5), (3, 2)));
        assert!(touches(vec2(2.9, 2.5), (2, 2)));
        assert!(!touches(vec2(2.5, 2.5), (3, 2)));
    }

    #[test]
    fn turning_keeps_the_plane_perpendicular() {
        let map = Map::parse(CORRIDOR).unwrap();
        let mut c = cam(2.5, 2.5, 0.0);
        let cmd = InputCmd {
            turn: 1.0,
            ..Default::default()
        };
        player_input(&mut c, &map, cmd, 0.5);
        assert!((c.dir - vec2(0.0, 1.0)).length() < 1e-5);
        assert!(c.dir.dot(c.plane).abs() < 1e-5);
        assert_eq!(c.pos, vec2(2.5, 2.5));
    }

    #[test]
    fn use_finds_the_door_ahead() {
        let map = Map::parse(CORRIDOR).unwrap();
        assert_eq!(use_target(&cam(2.5, 2.5, 0.0), &map), Some((3, 2)));
        // facing away
        assert_eq!(
            use_target(&cam(2.5, 2.5, std::f32::consts::PI), &map),
            None
        );
        // too far
        let map = Map::parse("########\n#......#\n#.....|#\n########").unwrap();
        assert_eq!(use_target(&cam(1.5, 2.5, 0.0), &map), None);
    }
}
