//! Tile-map software raycaster: DDA walls, sliding doors, billboards.
//!
//! * [`world`]    – map, camera, textures, billboard descriptors.
//! * [`renderer`] – the CPU frame renderer.
//! * [`sim`]      – demo game state (doors, movement, billboard entities).
//! * [`assets`]   – file loading and built-in art.
//! * [`scene`]    – command-line scene setup shared by the binaries.

pub mod assets;
pub mod logging;
pub mod renderer;
pub mod scene;
pub mod sim;
pub mod world;
