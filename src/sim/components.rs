use glam::Vec2;

use crate::world::{Anchor, Billboard, SourceRect, SpriteId};

/// World-space position in map units.
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec2);

/// How an entity is drawn.
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub id: SpriteId,
    pub source: SourceRect,
    pub scale: Vec2,
    pub anchor: Anchor,
}

impl Sprite {
    pub fn billboard(&self, pos: Vec2) -> Billboard {
        Billboard {
            pos,
            sprite: self.id,
            source: self.source,
            scale: self.scale,
            anchor: self.anchor,
        }
    }
}

/// Cycles `Sprite::source` through `frames`.
#[derive(Debug, Clone)]
pub struct Animation {
    pub frames: Vec<SourceRect>,
    pub tics_per_frame: u32,
    pub tics: u32,
    pub current: usize,
}

impl Animation {
    pub fn new(frames: Vec<SourceRect>, tics_per_frame: u32) -> Self {
        Self {
            frames,
            tics_per_frame: tics_per_frame.max(1),
            tics: 0,
            current: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InputCmd {
    pub forward: f32, // –1 … +1
    pub strafe: f32,  // –1 … +1  (left / right)
    pub turn: f32,    // –1 … +1  (left / right)
    pub run: bool,    // Shift
    pub use_act: bool, // Space, edge-triggered
}
