//! Door lifecycle: closed → opening → open (wait) → closing → closed.
//!
//! The renderer reads `Door::open_amount`; this system is the only writer.

use std::collections::HashMap;

use log::debug;

use crate::world::{Map, TileMap};

/// Fraction of a tile per second.
pub const DOOR_SPEED: f32 = 1.0;
/// Seconds a door stays fully open before closing by itself.
pub const DOOR_WAIT: f32 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DoorMotion {
    Opening,
    Open { wait: f32 },
    Closing,
}

/// Doors currently moving or waiting, keyed by tile.
#[derive(Default, Debug)]
pub struct DoorSystem {
    active: HashMap<(i32, i32), DoorMotion>,
}

impl DoorSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn motion(&self, tile: (i32, i32)) -> Option<DoorMotion> {
        self.active.get(&tile).copied()
    }

    /// "Use" the door at `tile`: open it, or close it if it is open.
    pub fn activate(&mut self, map: &Map, tile: (i32, i32)) {
        let Some(door) = map.door_at(tile.0, tile.1) else {
            return;
        };
        let next = match self.active.get(&tile) {
            Some(DoorMotion::Opening) => return,
            Some(DoorMotion::Closing) => DoorMotion::Opening,
            Some(DoorMotion::Open { .. }) => DoorMotion::Closing,
            None if door.is_blocking() => DoorMotion::Opening,
            None => DoorMotion::Closing,
        };
        debug!("door {tile:?} -> {next:?}");
        self.active.insert(tile, next);
    }

    /// Advance every active door by `dt` seconds. A door never closes onto a
    /// tile for which `occupied` holds.
    pub fn update(&mut self, map: &mut Map, dt: f32, occupied: impl Fn((i32, i32)) -> bool) {
        self.active.retain(|&tile, motion| {
            let Some(door) = map.door_at_mut(tile.0, tile.1) else {
                return false;
            };
            match motion {
                DoorMotion::Opening => {
                    door.open_amount = (door.open_amount + DOOR_SPEED * dt).min(1.0);
                    if door.open_amount >= 1.0 {
                        *motion = DoorMotion::Open { wait: DOOR_WAIT };
                    }
                    true
                }
                DoorMotion::Open { wait } => {
                    *wait -= dt;
                    if *wait <= 0.0 && !occupied(tile) {
                        *motion = DoorMotion::Closing;
                    }
                    true
                }
                DoorMotion::Closing => {
                    if occupied(tile) {
                        *motion = DoorMotion::Opening;
                        return true;
                    }
                    door.open_amount = (door.open_amount - DOOR_SPEED * dt).max(0.0);
                    door.open_amount > 0.0
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nowhere(_: (i32, i32)) -> bool {
        false
    }

    fn on_door(tile: (i32, i32)) -> bool {
        tile == (2, 1)
    }

    fn map() -> Map {
        Map::parse("#####\n#.|.#\n#####").unwrap()
    }

    #[test]
    fn full_cycle() {
        let mut map = map();
        let mut doors = DoorSystem::new();
        doors.activate(&map, (2, 1));

        for _ in 0..10 {
            doors.update(&mut map, 0.05, nowhere);
        }
        assert!((map.door_at(2, 1).unwrap().open_amount - 0.5).abs() < 1e-4);

        for _ in 0..11 {
            doors.update(&mut map, 0.05, nowhere);
        }
        assert_eq!(map.door_at(2, 1).unwrap().open_amount, 1.0);
        assert!(matches!(doors.motion((2, 1)), Some(DoorMotion::Open { .. })));

        doors.update(&mut map, DOOR_WAIT, nowhere);
        assert_eq!(doors.motion((2, 1)), Some(DoorMotion::Closing));

        doors.update(&mut map, 2.0, nowhere);
        assert_eq!(map.door_at(2, 1).unwrap().open_amount, 0.0);
        assert_eq!(doors.motion((2, 1)), None);
    }

    #[test]
    fn does_not_close_on_the_player() {
        let mut map = map();
        let mut doors = DoorSystem::new();
        doors.activate(&map, (2, 1));
        doors.update(&mut map, 1.0, nowhere);
        doors.update(&mut map, DOOR_WAIT + 1.0, on_door);
        assert!(matches!(doors.motion((2, 1)), Some(DoorMotion::Open { .. })));

        // closing reverses when someone steps in
        doors.update(&mut map, 0.1, nowhere);
        doors.update(&mut map, 0.1, nowhere);
        assert_eq!(doors.motion((2, 1)), Some(DoorMotion::Closing));
        doors.update(&mut map, 0.1, on_door);
        assert_eq!(doors.motion((2, 1)), Some(DoorMotion::Opening));
    }

    #[test]
    fn using_an_open_door_closes_it() {
        let mut map = map();
        let mut doors = DoorSystem::new();
        doors.activate(&map, (2, 1));
        doors.update(&mut map, 1.0, nowhere);
        doors.activate(&map, (2, 1));
        assert_eq!(doors.motion((2, 1)), Some(DoorMotion::Closing));
        // and again reopens it
        doors.activate(&map, (2, 1));
        assert_eq!(doors.motion((2, 1)), Some(DoorMotion::Opening));

        // not a door: ignored
        doors.activate(&map, (1, 1));
        assert_eq!(doors.motion((1, 1)), None);
    }
}
