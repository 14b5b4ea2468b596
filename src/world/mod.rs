mod billboard;
mod camera;
mod map;
mod texture;

pub use billboard::{
    Anchor, Billboard, MemorySprites, PngSprites, SourceRect, SpriteId, SpriteSource,
};

pub use camera::Camera;

pub use map::{Door, Map, MapError, OUTSIDE, Tile, TileMap};

pub use texture::{DOOR_TEXTURE, Texture, TextureBank, TextureError, TextureId};
