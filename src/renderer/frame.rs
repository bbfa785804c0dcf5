//! Per-frame draw list
//!
//! Back to front: asteroids, link lines, placed stations, then the station
//! following the cursor.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::bounds::Bounds;
use crate::sim::state::{Entity, EntityId, GameState};

const CIRCLE_SEGMENTS: u32 = 32;
const LINK_THICKNESS: f32 = 2.0;
/// Gap between a powered station's outline and its indicator ring
const POWERED_RING_GAP: f32 = 3.0;
const POWERED_RING_WIDTH: f32 = 2.0;

/// Tessellate the whole scene into a world-space triangle list
pub fn build_frame(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    for entity in &state.asteroids {
        if let Some(asteroid) = entity.as_asteroid() {
            let color = colors::lerp(
                colors::ASTEROID_EMPTY,
                colors::ASTEROID_FULL,
                asteroid.remaining_fraction(),
            );
            vertices.extend(body(entity.bounds(), color));
        }
    }

    let stations = || state.stations.iter().chain(state.unplaced.as_ref());
    for entity in stations() {
        // Undirected links: draw each pair once, from the lower id
        for &other in entity.nearby_stations.iter().filter(|&&other| other > entity.id) {
            if let Some(to) = center_of(state, other) {
                vertices.extend(shapes::line(entity.center(), to, LINK_THICKNESS, colors::POWER_LINK));
            }
        }
        for &rock in &entity.nearby_asteroids {
            if let Some(to) = center_of(state, rock) {
                vertices.extend(shapes::line(entity.center(), to, LINK_THICKNESS, colors::MINING_LINK));
            }
        }
    }

    for entity in stations() {
        vertices.extend(body(entity.bounds(), station_color(entity)));
        if entity.is_powered() {
            let outer = outer_radius(entity.bounds()) + POWERED_RING_GAP;
            vertices.extend(shapes::ring(
                entity.center(),
                outer,
                outer + POWERED_RING_WIDTH,
                colors::POWERED_RING,
                CIRCLE_SEGMENTS,
            ));
        }
    }

    vertices
}

/// Tint by placement state: placed, valid spot, blocked
pub fn station_color(entity: &Entity) -> [f32; 4] {
    if entity.placed {
        colors::PLACED
    } else if entity.can_place {
        colors::CAN_PLACE
    } else {
        colors::BLOCKED
    }
}

fn body(bounds: &Bounds, color: [f32; 4]) -> Vec<Vertex> {
    match bounds {
        Bounds::Circle(c) => shapes::circle(c.center, c.radius, color, CIRCLE_SEGMENTS),
        Bounds::Rectangle(r) => shapes::rect(r, color),
    }
}

fn outer_radius(bounds: &Bounds) -> f32 {
    match bounds {
        Bounds::Circle(c) => c.radius,
        Bounds::Rectangle(r) => r.size().max_element() / 2.0,
    }
}

fn center_of(state: &GameState, id: EntityId) -> Option<Vec2> {
    state.entity(id).map(Entity::center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::proximity::update_proximity;
    use crate::sim::state::StationKind;
    use crate::tuning::Tuning;

    fn count_color(vertices: &[Vertex], color: [f32; 4]) -> usize {
        vertices.iter().filter(|v| v.color == color).count()
    }

    #[test]
    fn test_empty_scene() {
        let state = GameState::empty(1, Tuning::default());
        assert!(build_frame(&state).is_empty());
    }

    #[test]
    fn test_links_drawn_once() {
        let mut state = GameState::empty(1, Tuning::default());
        state.spawn_asteroid(Vec2::new(0.0, 0.0), 100);
        state.spawn_station(StationKind::Miner, Vec2::new(90.0, 0.0));
        state.spawn_station(StationKind::SolarPanel, Vec2::new(90.0, 150.0));
        update_proximity(&mut state);

        let vertices = build_frame(&state);
        // One power link and one mining link, six vertices each
        assert_eq!(count_color(&vertices, colors::POWER_LINK), 6);
        assert_eq!(count_color(&vertices, colors::MINING_LINK), 6);
    }

    #[test]
    fn test_unplaced_tint() {
        let mut state = GameState::empty(1, Tuning::default());
        state.spawn_station(StationKind::SolarPanel, Vec2::new(0.0, 0.0));
        state.begin_placement(StationKind::SolarPanel, Vec2::new(500.0, 0.0));
        update_proximity(&mut state);
        let pending = state.unplaced.as_ref().unwrap();
        assert_eq!(station_color(pending), colors::CAN_PLACE);
        assert_eq!(count_color(&build_frame(&state), colors::CAN_PLACE), 6);

        state.unplaced.as_mut().unwrap().set_center(Vec2::new(10.0, 0.0));
        update_proximity(&mut state);
        assert_eq!(station_color(state.unplaced.as_ref().unwrap()), colors::BLOCKED);
        assert_eq!(count_color(&build_frame(&state), colors::BLOCKED), 6);
    }

    #[test]
    fn test_depleted_asteroid_is_gray() {
        let mut state = GameState::empty(1, Tuning::default());
        let rock = state.spawn_asteroid(Vec2::ZERO, 3);
        assert_eq!(
            count_color(&build_frame(&state), colors::ASTEROID_FULL),
            CIRCLE_SEGMENTS as usize * 3
        );
        state.mine_asteroid(rock, 3).unwrap();
        assert_eq!(
            count_color(&build_frame(&state), colors::ASTEROID_EMPTY),
            CIRCLE_SEGMENTS as usize * 3
        );
    }
}
