use anyhow::Context;
use clap::Parser;
use log::info;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::time::{Duration, Instant};

use raycast_rs::{
    logging::{LoggingConfig, init_logging},
    renderer::{Renderer, software::transpose},
    scene::{Scene, SceneArgs},
    sim::InputCmd,
};

/// Walk a tile map: arrows/WASD move, Alt+arrows strafe, Shift runs,
/// Space opens doors.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    scene: SceneArgs,
}

fn read_input(win: &Window) -> InputCmd {
    let mut cmd = InputCmd::default();

    /* movement --------------------------------------------------------- */
    if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
        cmd.forward += 1.0;
    }
    if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
        cmd.forward -= 1.0;
    }

    let alt = win.is_key_down(Key::LeftAlt) || win.is_key_down(Key::RightAlt);
    if alt {
        /* Alt + ←/→  = strafe */
        if win.is_key_down(Key::Left) {
            cmd.strafe -= 1.0;
        }
        if win.is_key_down(Key::Right) {
            cmd.strafe += 1.0;
        }
    } else {
        /* plain ←/→   = turn   */
        if win.is_key_down(Key::Left) {
            cmd.turn -= 1.0;
        }
        if win.is_key_down(Key::Right) {
            cmd.turn += 1.0;
        }
    }

    /* WASD strafing mirrors arrow-key strafing */
    if win.is_key_down(Key::A) {
        cmd.strafe -= 1.0;
    }
    if win.is_key_down(Key::D) {
        cmd.strafe += 1.0;
    }

    /* modifiers & actions --------------------------------------------- */
    cmd.run = win.is_key_down(Key::LeftShift) || win.is_key_down(Key::RightShift);
    cmd.use_act = win.is_key_pressed(Key::Space, KeyRepeat::No); // edge-trigger
    cmd
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig {
        env_filter: cli.scene.log.clone(),
    });

    let (w, h) = (cli.scene.width, cli.scene.height);
    let (mut scene, mut renderer) = Scene::load(&cli.scene).context("loading scene")?;

    let mut win = Window::new("Raycaster", w, h, WindowOptions::default())?;
    win.set_target_fps(60);

    let mut screen = vec![0u32; w * h];
    let mut billboards = Vec::new();

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated render time
    let mut acc_frames = 0usize; // frames in the current window
    let mut last_print = Instant::now(); // when we printed last

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let cmd = read_input(&win);
        scene.sim.pump(&mut scene.map, &mut scene.camera, cmd);
        scene.sim.billboards(&mut billboards);

        let t0 = Instant::now(); // ┌─ frame timer start
        renderer.draw_frame(&scene.camera, &scene.map, &billboards);
        renderer.end_frame(|px, column_len, columns| {
            transpose(px, column_len, columns, &mut screen)
        });
        acc_time += t0.elapsed();
        acc_frames += 1;

        win.update_with_buffer(&screen, w, h)?;

        // ─────────── report every ~3 s ────────────────────────────────
        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            let fps = 1000.0 / avg_ms;
            info!(
                "avg render: {avg_ms:.2} ms  ({fps:.1} FPS), {} sprite sheets cached",
                renderer.cached_sprites()
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }

    renderer.release_textures();
    Ok(())
}
