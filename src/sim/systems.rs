use glam::Vec2;
use hecs::{Entity, World};

use super::{Animation, Position, Sprite};
use crate::world::Billboard;

/* ── Spawning ─────────────────────────────────────────────────────── */

/// Static decoration at `pos`.
pub fn spawn_billboard(world: &mut World, pos: Vec2, sprite: Sprite) -> Entity {
    world.spawn((Position(pos), sprite))
}

/// Decoration whose sheet rectangle cycles through `anim.frames`.
pub fn spawn_animated(world: &mut World, pos: Vec2, mut sprite: Sprite, anim: Animation) -> Entity {
    if let Some(&first) = anim.frames.first() {
        sprite.source = first;
    }
    world.spawn((Position(pos), sprite, anim))
}

/* ── Animation system ─────────────────────────────────────────────── */

/// One tic: advance every animation and copy the current frame into its
/// sprite.
pub fn animation(world: &mut World) {
    for (_, (anim, sprite)) in world.query_mut::<(&mut Animation, &mut Sprite)>() {
        if anim.frames.is_empty() {
            continue;
        }
        anim.tics += 1;
        if anim.tics >= anim.tics_per_frame {
            anim.tics = 0;
            anim.current = (anim.current + 1) % anim.frames.len();
        }
        sprite.source = anim.frames[anim.current];
    }
}

/* ── Render hand-off ──────────────────────────────────────────────── */

/// Snapshot of every drawable entity for the renderer.
pub fn collect_billboards(world: &World, out: &mut Vec<Billboard>) {
    out.clear();
    out.extend(
        world
            .query::<(&Position, &Sprite)>()
            .iter()
            .map(|(_, (pos, sprite))| sprite.billboard(pos.0)),
    );
}
