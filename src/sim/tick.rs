//! Per-frame simulation tick
//!
//! Core game loop that advances the scene from an explicit input snapshot.

use glam::Vec2;

use super::mining::update_mining;
use super::proximity::update_proximity;
use super::state::{GameEvent, GameState, StationKind};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in world coordinates
    pub cursor: Option<Vec2>,
    /// Confirm placement (click/tap)
    pub confirm: bool,
    /// Keep placing the same kind after a confirm (shift held)
    pub place_multiple: bool,
    /// Start placing a new station (build button selected)
    pub build: Option<StationKind>,
    /// Drop the station currently following the cursor
    pub cancel: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();
    state.time_ticks += 1;
    state.time_secs += f64::from(dt);

    if input.cancel {
        if let Some(pending) = state.unplaced.take() {
            log::debug!("Cancelled placement of {} #{}", pending.kind.name(), pending.id);
        }
    }

    if let Some(kind) = input.build {
        let at = input.cursor.unwrap_or(Vec2::ZERO);
        state.begin_placement(kind, at);
    }

    // Unplaced station follows the cursor
    if let (Some(pending), Some(cursor)) = (state.unplaced.as_mut(), input.cursor) {
        pending.set_center(cursor);
    }

    let frame_secs = state.tuning.asteroid_frame_secs;
    for asteroid in state.asteroids.iter_mut().filter_map(|e| e.as_asteroid_mut()) {
        asteroid.animate(dt, frame_secs);
    }

    update_proximity(state);

    if input.confirm {
        try_place(state, input.place_multiple);
    }

    update_mining(state, dt);

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Commit the unplaced station if its spot is valid. Otherwise a no-op.
fn try_place(state: &mut GameState, place_multiple: bool) {
    let Some(pending) = state.unplaced.as_ref() else {
        return;
    };
    let Some(kind) = pending.station_kind() else {
        return;
    };
    if !pending.can_place {
        log::debug!("{} blocked at {:?}", kind.as_str(), pending.center());
        state.events.push(GameEvent::PlacementBlocked { kind });
        return;
    }

    let Some(mut placed) = state.unplaced.take() else {
        return;
    };
    let at = placed.center();
    placed.placed = true;
    log::info!("Placed {} #{} at ({:.0}, {:.0})", kind.as_str(), placed.id, at.x, at.y);
    state.events.push(GameEvent::Placed { id: placed.id, kind });
    state.stations.push(placed);

    if place_multiple {
        state.begin_placement(kind, at);
    }
}
