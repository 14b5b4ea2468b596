use super::{DoorSystem, InputCmd, Sprite, movement, systems};
use crate::world::{Billboard, Camera, Map};
use glam::Vec2;
use hecs::World;
use std::time::{Duration, Instant};

pub const SIM_FPS: u32 = 35;
pub const DT: f32 = 1.0 / SIM_FPS as f32;
const TIC: Duration = Duration::from_micros(1_000_000 / SIM_FPS as u64);

/// Owns the ECS world and the door state, and drives every game-logic
/// system at a fixed rate.
pub struct TicRunner {
    world: World,
    doors: DoorSystem,
    last: Instant,
    tics: u64,
    /// A "use" press waiting for the next tic.
    pending_use: bool,
}

impl Default for TicRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TicRunner {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            doors: DoorSystem::new(),
            last: Instant::now(),
            tics: 0,
            pending_use: false,
        }
    }

    #[inline]
    pub fn world(&self) -> &hecs::World {
        &self.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut hecs::World {
        &mut self.world
    }

    #[inline]
    pub fn doors(&self) -> &DoorSystem {
        &self.doors
    }

    /// Tics run since creation.
    #[inline]
    pub fn tics(&self) -> u64 {
        self.tics
    }

    #[inline]
    pub fn spawn_billboard(&mut self, pos: Vec2, sprite: Sprite) -> hecs::Entity {
        systems::spawn_billboard(&mut self.world, pos, sprite)
    }

    #[inline]
    pub fn spawn_animated(
        &mut self,
        pos: Vec2,
        sprite: Sprite,
        anim: super::Animation,
    ) -> hecs::Entity {
        systems::spawn_animated(&mut self.world, pos, sprite, anim)
    }

    /// Current drawables, written into `out`.
    #[inline]
    pub fn billboards(&self, out: &mut Vec<Billboard>) {
        systems::collect_billboards(&self.world, out);
    }

    /// Queue a "use" for the next tic.
    #[inline]
    pub fn press_use(&mut self) {
        self.pending_use = true;
    }

    /// Advance enough tics to synchronise simulation with real time.
    /// Returns the number of tics run. A "use" in `cmd` acts on exactly one
    /// tic, carried over to a later call when none are due yet.
    pub fn pump(&mut self, map: &mut Map, camera: &mut Camera, cmd: InputCmd) -> u32 {
        self.pending_use |= cmd.use_act;
        let mut ran = 0;
        while self.last.elapsed() >= TIC {
            self.tick(map, camera, cmd);
            self.last += TIC;
            ran += 1;
        }
        ran
    }

    /* ---------------------------------------------------------------- */
    /* one fixed-rate game tic                                           */
    /* ---------------------------------------------------------------- */
    /// Run one tic. `cmd.use_act` is ignored here; "use" comes from
    /// [`press_use`](Self::press_use) or [`pump`](Self::pump).
    pub fn tick(&mut self, map: &mut Map, camera: &mut Camera, cmd: InputCmd) {
        movement::player_input(camera, map, cmd, DT);

        if std::mem::take(&mut self.pending_use) {
            if let Some(tile) = movement::use_target(camera, map) {
                self.doors.activate(map, tile);
            }
        }

        let body = camera.pos;
        self.doors
            .update(map, DT, |tile| movement::touches(body, tile));
        systems::animation(&mut self.world);
        self.tics += 1;
    }
}
