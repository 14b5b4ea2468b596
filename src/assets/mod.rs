pub mod loader;
pub mod procedural;

pub use loader::{
    LoadError, load_map, load_things, load_wall_textures, png_files, sprite_sheets,
};
