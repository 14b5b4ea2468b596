use std::collections::{HashMap, hash_map::Entry};

use log::{debug, warn};

use crate::world::{SpriteId, SpriteSource, Texture};

/// Decoded sprite sheets, filled on first use and kept until released.
///
/// A sheet that fails to decode is remembered as a miss so the failure is
/// reported once, not every frame.
pub struct SpriteCache {
    source: Box<dyn SpriteSource>,
    sheets: HashMap<SpriteId, Option<Texture>>,
}

impl SpriteCache {
    pub fn new(source: Box<dyn SpriteSource>) -> Self {
        Self {
            source,
            sheets: HashMap::new(),
        }
    }

    /// Pixels for `id`, decoding them on the first request.
    pub fn get(&mut self, id: SpriteId) -> Option<&Texture> {
        match self.sheets.entry(id) {
            Entry::Occupied(o) => o.into_mut().as_ref(),
            Entry::Vacant(v) => {
                let decoded = match self.source.decode(id) {
                    Ok(tex) => {
                        debug!("sprite {} cached: `{}` {}x{}", id.0, tex.name, tex.w, tex.h);
                        Some(tex)
                    }
                    Err(e) => {
                        warn!("sprite {} unavailable: {e}", id.0);
                        None
                    }
                };
                v.insert(decoded).as_ref()
            }
        }
    }

    /// Number of ids looked up so far (hits and misses).
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Drop every decoded sheet; later requests decode again.
    pub fn release(&mut self) {
        if !self.sheets.is_empty() {
            debug!("releasing {} sprite sheets", self.sheets.len());
        }
        self.sheets.clear();
    }
}

impl Drop for SpriteCache {
    fn drop(&mut self) {
        self.release();
    }
}
