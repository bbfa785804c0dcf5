//! Space Miner headless demo
//!
//! Plays a scripted session through the same input path a windowed host
//! would use (toolbar clicks and screen-space pointer through the camera),
//! then reports the scoreboard.
//!
//! Example:
//!   RUST_LOG=info cargo run -- --seed 7 --seconds 120 --dump state.json

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;

use space_miner::consts::{MAX_SUBSTEPS, SIM_DT};
use space_miner::renderer::{Vertex, build_frame};
use space_miner::sim::{GameState, StationKind, TickInput, tick};
use space_miner::{Camera, Toolbar, Tuning};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a scripted Space Miner session", long_about = None)]
struct Args {
    /// JSON tuning/level file (defaults are used for missing keys)
    #[arg(long)]
    tuning: Option<PathBuf>,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Simulated seconds to run after the build script
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,
    /// Host frame time; the sim substeps at a fixed 60 Hz underneath
    #[arg(long, default_value_t = 1.0 / 30.0)]
    frame_dt: f32,
    /// Write the final game state as JSON
    #[arg(long)]
    dump: Option<PathBuf>,
}

const SCREEN: Vec2 = Vec2::new(1280.0, 720.0);

/// Host-side frame driver: fixed-step accumulator plus one-shot inputs
struct Session {
    state: GameState,
    camera: Camera,
    toolbar: Toolbar,
    input: TickInput,
    accumulator: f32,
}

impl Session {
    fn new(state: GameState) -> Self {
        let level = Vec2::new(state.tuning.level.width, state.tuning.level.height);
        Self {
            camera: Camera::new(SCREEN, level),
            toolbar: Toolbar::new(SCREEN.y),
            input: TickInput::default(),
            accumulator: 0.0,
            state,
        }
    }

    /// Pointer moved to a screen position
    fn pointer(&mut self, screen: Vec2) {
        self.toolbar.update(Some(screen));
        self.input.cursor = Some(self.camera.screen_to_world(screen));
    }

    /// Left click at a screen position: toolbar first, otherwise place
    fn click(&mut self, screen: Vec2, shift: bool) {
        self.pointer(screen);
        if let Some(kind) = self.toolbar.select(screen) {
            self.input.build = Some(kind);
        } else {
            self.input.confirm = true;
            self.input.place_multiple = shift;
        }
    }

    /// Click on a world position as seen through the camera
    fn click_world(&mut self, world: Vec2) {
        let screen = self.camera.world_to_screen(world);
        self.click(screen, false);
    }

    fn click_button(&mut self, kind: StationKind) {
        let Some(center) = self
            .toolbar
            .buttons
            .iter()
            .find(|b| b.action == kind)
            .map(|b| b.bounds.center)
        else {
            log::warn!("No toolbar button for {}", kind.as_str());
            return;
        };
        self.click(center, false);
    }

    /// Run simulation ticks for one host frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.confirm = false;
            self.input.place_multiple = false;
            self.input.build = None;
            self.input.cancel = false;

            for event in &self.state.events {
                log::debug!("{event:?}");
            }
        }
    }

    fn run_for(&mut self, seconds: f32, frame_dt: f32) {
        let frames = (seconds / frame_dt).ceil() as u32;
        for _ in 0..frames {
            self.update(frame_dt);
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if !(args.frame_dt > 0.0) {
        anyhow::bail!("--frame-dt must be positive, got {}", args.frame_dt);
    }

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path).with_context(|| format!("load tuning {path:?}"))?,
        None => Tuning::default(),
    };
    log::info!("Space Miner (native) starting with seed {}", args.seed);

    let mut session = Session::new(GameState::with_tuning(args.seed, tuning));
    let frame_dt = args.frame_dt;

    // The level hands out a miner: drop it next to the big asteroid
    session.click_world(Vec2::new(1510.0, 1600.0));
    session.run_for(0.5, frame_dt);

    // Extra panel and a second miner reaching the north-east field
    session.click_button(StationKind::SolarPanel);
    session.run_for(0.1, frame_dt);
    session.click_world(Vec2::new(1560.0, 1450.0));
    session.run_for(0.1, frame_dt);
    session.click_button(StationKind::Miner);
    session.run_for(0.1, frame_dt);
    session.click_world(Vec2::new(1650.0, 1480.0));
    session.run_for(0.1, frame_dt);

    // Zoom out a little and idle
    session.camera.zoom_by_scroll(1200.0);
    session.pointer(SCREEN / 2.0);
    session.run_for(args.seconds, frame_dt);

    let state = &session.state;
    let powered = state.stations.iter().filter(|e| e.is_powered()).count();
    log::info!(
        "{:.1}s simulated in {} ticks: {}/{} minerals mined, {} stations ({} powered)",
        state.time_secs,
        state.time_ticks,
        state.minerals_mined,
        state.minerals_total,
        state.stations.len(),
        powered
    );

    let vertices = build_frame(state);
    let bytes: &[u8] = bytemuck::cast_slice(&vertices);
    log::info!(
        "Final frame: {} vertices ({} bytes, stride {})",
        vertices.len(),
        bytes.len(),
        Vertex::desc().array_stride
    );

    if let Some(path) = &args.dump {
        let json = serde_json::to_string_pretty(state).context("serialize game state")?;
        fs::write(path, json).with_context(|| format!("write {path:?}"))?;
        log::info!("Wrote state to {}", path.display());
    }

    println!(
        "mined {}/{} minerals in {:.0}s",
        state.minerals_mined, state.minerals_total, state.time_secs
    );
    Ok(())
}
