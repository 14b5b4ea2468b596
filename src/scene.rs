//! Command-line scene description shared by the binaries: which map, which
//! art, how big a frame and what fog.

use std::path::PathBuf;

use clap::Args;
use log::info;

use crate::{
    assets::{self, LoadError, procedural},
    renderer::{RenderConfig, software::Software},
    sim::{Sprite, TicRunner},
    world::{Camera, Map, SpriteSource},
};

#[derive(Args, Debug, Clone)]
pub struct SceneArgs {
    /// Text map; the built-in demo map when omitted.
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Directory of wall PNGs (first file is the door).
    #[arg(long)]
    pub textures: Option<PathBuf>,

    /// Directory of sprite sheet PNGs.
    #[arg(long)]
    pub sprites: Option<PathBuf>,

    /// Thing list placing sprites from `--sprites`.
    #[arg(long, requires = "sprites")]
    pub things: Option<PathBuf>,

    /// Display width in pixels.
    #[arg(long, default_value_t = 960)]
    pub width: usize,

    /// Display height in pixels.
    #[arg(long, default_value_t = 600)]
    pub height: usize,

    /// Horizontal field of view in degrees.
    #[arg(long, default_value_t = 66.0)]
    pub fov: f32,

    /// Initial heading in degrees (0 = +X).
    #[arg(long, default_value_t = 0.0)]
    pub yaw: f32,

    #[arg(long, default_value_t = RenderConfig::default().fog_start)]
    pub fog_start: f32,

    #[arg(long, default_value_t = RenderConfig::default().fog_distance)]
    pub fog_distance: f32,

    /// Log filter, e.g. "debug" or "raycast_rs=trace".
    #[arg(long)]
    pub log: Option<String>,
}

impl SceneArgs {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            fog_start: self.fog_start,
            fog_distance: self.fog_distance,
            ..RenderConfig::default()
        }
    }
}

/// Everything a frame is drawn from, except the renderer itself.
pub struct Scene {
    pub map: Map,
    pub camera: Camera,
    pub sim: TicRunner,
}

impl Scene {
    /// Load the map and art named by `args` and build a renderer sized for
    /// its display.
    pub fn load(args: &SceneArgs) -> Result<(Scene, Software), LoadError> {
        let map = match &args.map {
            Some(path) => assets::load_map(path)?,
            None => {
                let map = Map::parse(procedural::DEMO_MAP)?;
                map.validate_border()?;
                map
            }
        };

        let walls = match &args.textures {
            Some(dir) => assets::load_wall_textures(dir)?,
            None => procedural::wall_bank().map_err(|source| LoadError::Texture {
                path: "<built-in>".into(),
                source,
            })?,
        };

        let mut sim = TicRunner::new();
        let sprites: Box<dyn SpriteSource> = match &args.sprites {
            Some(dir) => {
                let sheets = assets::sprite_sheets(dir)?;
                if let Some(path) = &args.things {
                    for bb in assets::load_things(path, &sheets)? {
                        sim.spawn_billboard(
                            bb.pos,
                            Sprite {
                                id: bb.sprite,
                                source: bb.source,
                                scale: bb.scale,
                                anchor: bb.anchor,
                            },
                        );
                    }
                }
                Box::new(sheets)
            }
            None => {
                procedural::spawn_demo_things(&mut sim);
                Box::new(procedural::demo_sprites())
            }
        };

        let start = map.start_position()?;
        let camera = Camera::from_yaw(start, args.yaw.to_radians(), args.fov.to_radians());
        info!(
            "scene ready: {}x{} map, start {start}, fov {:.0}°, {} things",
            map.width(),
            map.height(),
            camera.fov().to_degrees(),
            sim.world().len()
        );

        // columns run down the screen: one column per display pixel across
        let renderer = Software::new(
            args.height,
            args.width,
            walls,
            sprites,
            args.render_config(),
        );
        Ok((Scene { map, camera, sim }, renderer))
    }
}
