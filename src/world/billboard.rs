//! Billboard descriptors and the sources that decode their pixels.
//!
//! A [`Billboard`] only *names* its texture through a [`SpriteId`]; the
//! renderer asks a [`SpriteSource`] for the pixels the first time an id is
//! drawn and keeps the result for the rest of its life.

use std::{collections::HashMap, path::PathBuf};

use glam::Vec2;

use crate::world::texture::{Texture, TextureError};

/// Stable handle for a sprite sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(pub u32);

/// Where the sprite sits relative to the horizon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Anchor {
    /// Stands on the floor.
    #[default]
    Bottom,
    /// Hangs from the ceiling.
    Top,
    /// Centred on the horizon.
    Center,
}

/// Texel rectangle inside a sprite sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl SourceRect {
    /// Whatever the sheet holds; clipped to the texture when drawn.
    pub const WHOLE: Self = Self::new(0, 0, u32::MAX, u32::MAX);

    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Whole-texture rectangle.
    pub fn full(tex: &Texture) -> Self {
        Self::new(0, 0, tex.w as u32, tex.h as u32)
    }

    /// Clip the rectangle to the texture; `None` when nothing is left.
    pub fn clipped_to(self, tex: &Texture) -> Option<Self> {
        let x0 = (self.x as usize).min(tex.w);
        let y0 = (self.y as usize).min(tex.h);
        let x1 = (self.x as usize + self.w as usize).min(tex.w);
        let y1 = (self.y as usize + self.h as usize).min(tex.h);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self::new(
            x0 as u32,
            y0 as u32,
            (x1 - x0) as u32,
            (y1 - y0) as u32,
        ))
    }
}

/// One world-space sprite, as handed to the renderer every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Billboard {
    pub pos: Vec2,
    pub sprite: SpriteId,
    pub source: SourceRect,
    /// (across columns, along the column)
    pub scale: Vec2,
    pub anchor: Anchor,
}

impl Billboard {
    pub fn new(pos: Vec2, sprite: SpriteId, source: SourceRect) -> Self {
        Self {
            pos,
            sprite,
            source,
            scale: Vec2::ONE,
            anchor: Anchor::Bottom,
        }
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }
}

/// Decodes sprite sheets on demand.
pub trait SpriteSource {
    fn decode(&self, id: SpriteId) -> Result<Texture, TextureError>;
}

/// Sprite sheets that are already in memory (procedural art, tests).
#[derive(Default)]
pub struct MemorySprites {
    sheets: HashMap<SpriteId, Texture>,
}

impl MemorySprites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: SpriteId, tex: Texture) {
        self.sheets.insert(id, tex);
    }
}

impl SpriteSource for MemorySprites {
    fn decode(&self, id: SpriteId) -> Result<Texture, TextureError> {
        self.sheets
            .get(&id)
            .cloned()
            .ok_or(TextureError::UnknownSprite(id.0))
    }
}

/// PNG files in a directory; `SpriteId(n)` is the n-th entry of `files`.
pub struct PngSprites {
    files: Vec<PathBuf>,
}

impl PngSprites {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self { files }
    }

    /// Id a billboard should use for `file_stem`, if present.
    pub fn id_of(&self, file_stem: &str) -> Option<SpriteId> {
        self.files
            .iter()
            .position(|p| p.file_stem().and_then(|s| s.to_str()) == Some(file_stem))
            .map(|i| SpriteId(i as u32))
    }
}

impl SpriteSource for PngSprites {
    fn decode(&self, id: SpriteId) -> Result<Texture, TextureError> {
        let path = self
            .files
            .get(id.0 as usize)
            .ok_or(TextureError::UnknownSprite(id.0))?;
        Texture::load_png(path)
    }
}
