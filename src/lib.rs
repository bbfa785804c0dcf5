//! Space Miner - place stations near asteroid fields and mine them dry
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bounds, proximity links, mining, placement)
//! - `renderer`: Draw-list generation for a host GPU pipeline
//! - `camera`: Zoom/pan viewport transform
//! - `ui`: Build toolbar hit-testing
//! - `tuning`: Data-driven game balance and level layout

pub mod camera;
pub mod error;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use camera::Camera;
pub use error::{SimError, SimResult};
pub use tuning::{Tuning, TuningError};
pub use ui::Toolbar;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Level dimensions (world units)
    pub const LEVEL_WIDTH: f32 = 3200.0;
    pub const LEVEL_HEIGHT: f32 = 3200.0;

    /// Miner defaults
    pub const MINER_RADIUS: f32 = 16.0;
    pub const MINER_CONNECTION_DISTANCE: f32 = 100.0;

    /// Solar panel defaults (square footprint)
    pub const SOLAR_PANEL_SIZE: f32 = 64.0;
    pub const SOLAR_CONNECTION_DISTANCE: f32 = 200.0;

    /// Asteroid defaults
    pub const ASTEROID_RADIUS: f32 = 64.0;
    /// Sprite sheet has 8x8 frames
    pub const ASTEROID_ANIMATION_FRAMES: u8 = 64;
    pub const ASTEROID_FRAME_SECS: f32 = 0.5;

    /// Seconds a powered miner charges between extractions
    pub const MINING_COOLDOWN_SECS: f32 = 3.0;
    /// Minerals removed from the target per extraction
    pub const MINE_AMOUNT: u32 = 3;

    /// Camera zoom limits
    pub const MIN_ZOOM: f32 = 0.1;
    pub const MAX_ZOOM: f32 = 5.0;
    pub const DEFAULT_ZOOM: f32 = 1.5;
    /// Scroll wheel units per unit of zoom
    pub const SCROLL_ZOOM_DIVISOR: f32 = 2400.0;
}
