//! Proximity graph: placement validity, power links and mining links
//!
//! Rebuilt from scratch every tick by linear scan. Entity counts stay in the
//! dozens, so the O(N×M) pass is cheaper than maintaining a spatial index.
//!
//! Link rule (stations and miner→asteroid alike): link when the center
//! distance is below the threshold, unlink when above, keep the previous
//! state when exactly on it. There is no hysteresis band.

use std::collections::VecDeque;

use glam::Vec2;

use super::state::{Entity, EntityId, GameState};

/// Snapshot of one station for the pairwise pass
struct Node {
    id: EntityId,
    center: Vec2,
    reach: f32,
    transmits: bool,
    generator: bool,
    placed: bool,
    miner: bool,
}

impl Node {
    /// Non-station entities get a node that never links
    fn of(entity: &Entity) -> Self {
        let station = entity.as_station();
        Self {
            id: entity.id,
            center: entity.center(),
            reach: station.map_or(0.0, |s| s.max_connection_distance),
            transmits: station.is_some_and(|s| s.kind.can_transmit_power()),
            generator: station.is_some_and(|s| s.kind.is_generator()),
            placed: entity.placed,
            miner: station.is_some_and(|s| s.is_miner()),
        }
    }
}

/// Decide a link from the distance, falling back to the old state on the threshold
#[inline]
fn link_state(distance: f32, threshold: f32, was_linked: bool) -> bool {
    if distance < threshold {
        true
    } else if distance > threshold {
        false
    } else {
        was_linked
    }
}

/// Recompute placement validity, all links and the powered flags.
///
/// Idempotent: running it twice without moving anything changes nothing.
pub fn update_proximity(state: &mut GameState) {
    update_can_place(state);

    // Placed stations first, then the unplaced one (if it is a station)
    let stations: Vec<&Entity> = state.stations.iter().chain(state.unplaced.as_ref()).collect();
    let nodes: Vec<Node> = stations.iter().map(|e| Node::of(e)).collect();
    let previous: Vec<&[EntityId]> = stations.iter().map(|e| e.nearby_stations.as_slice()).collect();

    let mut station_links: Vec<Vec<EntityId>> = vec![Vec::new(); nodes.len()];
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let (a, b) = (&nodes[i], &nodes[j]);
            if !(a.transmits || b.transmits) {
                continue;
            }
            let threshold = a.reach.max(b.reach);
            let distance = a.center.distance(b.center);
            let was_linked = previous[i].contains(&b.id);
            if link_state(distance, threshold, was_linked) {
                station_links[i].push(b.id);
                station_links[j].push(a.id);
            }
        }
    }

    // Miner -> asteroid links use the miner's own reach only
    let mut asteroid_links: Vec<Vec<EntityId>> = vec![Vec::new(); nodes.len()];
    let mut asteroid_back_links: Vec<Vec<EntityId>> = vec![Vec::new(); state.asteroids.len()];
    for (i, node) in nodes.iter().enumerate().filter(|(_, n)| n.miner) {
        let previous_targets = &stations[i].nearby_asteroids;
        for (k, asteroid) in state.asteroids.iter().enumerate() {
            let distance = node.center.distance(asteroid.center());
            let was_linked = previous_targets.contains(&asteroid.id);
            if link_state(distance, node.reach, was_linked) {
                asteroid_links[i].push(asteroid.id);
                asteroid_back_links[k].push(node.id);
            }
        }
    }

    let powered = propagate_power(&nodes, &station_links);

    // Write back in the same order the snapshot was taken
    let entities = state.stations.iter_mut().chain(state.unplaced.as_mut());
    for (((entity, mut links), targets), powered) in entities
        .zip(station_links)
        .zip(asteroid_links)
        .zip(powered)
    {
        links.sort_unstable();
        entity.nearby_stations = links;
        entity.nearby_asteroids = targets;
        if let Some(station) = entity.as_station_mut() {
            station.powered = powered;
        }
    }
    for (asteroid, mut miners) in state.asteroids.iter_mut().zip(asteroid_back_links) {
        miners.sort_unstable();
        asteroid.nearby_stations = miners;
    }
}

/// Reset the unplaced entity's flag, then latch it false on the first overlap
/// with anything already placed.
fn update_can_place(state: &mut GameState) {
    let Some(pending) = state.unplaced.as_mut() else {
        return;
    };
    pending.can_place = true;
    for placed in state.stations.iter().chain(state.asteroids.iter()) {
        if pending.can_place && placed.intersects(pending) {
            pending.can_place = false;
        }
    }
}

/// Breadth-first from every placed generator across placed transmitting
/// stations. A station is powered if it is reached.
fn propagate_power(nodes: &[Node], links: &[Vec<EntityId>]) -> Vec<bool> {
    let mut powered = vec![false; nodes.len()];
    let mut queue = VecDeque::new();
    for (i, node) in nodes.iter().enumerate() {
        if node.placed && node.generator {
            powered[i] = true;
            queue.push_back(i);
        }
    }

    while let Some(i) = queue.pop_front() {
        if !nodes[i].transmits {
            continue;
        }
        for id in &links[i] {
            let Some(j) = nodes.iter().position(|n| n.id == *id) else {
                continue;
            };
            if nodes[j].placed && !powered[j] {
                powered[j] = true;
                queue.push_back(j);
            }
        }
    }
    powered
}
