//! Render one frame without a window and save it as a PNG.
//!
//! ```bash
//! cargo run --bin snapshot -- --out frame.png --yaw 30
//! ```

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Parser;
use log::info;

use raycast_rs::{
    logging::{LoggingConfig, init_logging},
    scene::{Scene, SceneArgs},
    sim::InputCmd,
};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    scene: SceneArgs,

    /// Where to write the PNG.
    #[arg(long, default_value = "snapshot.png")]
    out: PathBuf,

    /// Simulation tics to run before rendering.
    #[arg(long, default_value_t = 0)]
    tics: u32,

    /// Press "use" on the first tic (opens a door in front of the start).
    #[arg(long)]
    open: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig {
        env_filter: cli.scene.log.clone(),
    });

    let (mut scene, mut renderer) = Scene::load(&cli.scene).context("loading scene")?;

    if cli.open {
        scene.sim.press_use();
    }
    for _ in 0..cli.tics {
        scene
            .sim
            .tick(&mut scene.map, &mut scene.camera, InputCmd::default());
    }

    let mut billboards = Vec::new();
    scene.sim.billboards(&mut billboards);
    let frame = renderer.render(&scene.camera, &scene.map, &billboards);

    let (w, h) = frame.display_size();
    let img = image::RgbaImage::from_raw(w as u32, h as u32, frame.to_rgba8())
        .ok_or_else(|| anyhow!("frame buffer does not match {w}x{h}"))?;
    img.save(&cli.out)
        .with_context(|| format!("writing {}", cli.out.display()))?;

    info!(
        "{}x{} frame after {} tics written to {}",
        w,
        h,
        cli.tics,
        cli.out.display()
    );
    Ok(())
}
