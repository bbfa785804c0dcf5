//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod bounds;
pub mod mining;
pub mod proximity;
pub mod state;
pub mod tick;

pub use bounds::{BoundingCircle, BoundingRect, Bounds, ShapeKind};
pub use mining::update_mining;
pub use proximity::update_proximity;
pub use state::{
    Asteroid, Entity, EntityId, EntityKind, GameEvent, GameState, MiningPhase, MiningTimer,
    RngState, Station, StationKind,
};
pub use tick::{TickInput, tick};
