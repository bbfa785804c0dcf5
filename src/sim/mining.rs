//! Miner extraction cycle
//!
//! `Idle` → `Charging` → `MineTick` → `Charging` ...
//!
//! A miner charges only while it is placed, powered and has at least one
//! asteroid in range. Losing either drops it to `Idle` and clears the
//! cooldown, so it charges a full period again once it is back in business.

use super::state::{GameEvent, GameState, MiningPhase};

/// Advance every placed miner by `dt` seconds and apply extractions.
///
/// Proximity must already be up to date for this tick.
pub fn update_mining(state: &mut GameState, dt: f32) {
    let period = state.tuning.mining_cooldown_secs;
    let amount = state.tuning.mine_amount;

    // Pick targets first, then mutate asteroids
    let mut extractions = Vec::new();
    for entity in state.stations.iter_mut().filter(|e| e.placed) {
        let miner_id = entity.id;
        let targets = entity.nearby_asteroids.clone();
        let Some(station) = entity.as_station_mut().filter(|s| s.is_miner()) else {
            continue;
        };
        let timer = &mut station.timer;

        if !station.powered || targets.is_empty() {
            timer.reset();
            continue;
        }

        timer.cooldown += dt;
        timer.phase = MiningPhase::Charging;
        // One extraction per elapsed period, each with its own target draw
        while timer.cooldown >= period {
            let target = targets[state.rng_state.next_index(targets.len())];
            timer.cooldown -= period;
            timer.phase = MiningPhase::MineTick;
            timer.last_target = Some(target);
            extractions.push((miner_id, target));
        }
    }

    for (miner, asteroid) in extractions {
        match state.mine_asteroid(asteroid, amount) {
            Ok(removed) => {
                log::debug!("Miner #{miner} took {removed} from asteroid #{asteroid}");
                state.events.push(GameEvent::Mined {
                    miner,
                    asteroid,
                    amount: removed,
                });
            }
            Err(e) => log::warn!("Miner #{miner} lost its target: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::proximity::update_proximity;
    use crate::sim::state::{EntityId, StationKind};
    use crate::tuning::Tuning;
    use glam::Vec2;

    /// Asteroid at (1600,1600) r64 with 800 minerals, a placed miner 50 units
    /// from its center and a solar panel powering the miner.
    fn powered_miner_scene() -> (GameState, EntityId, EntityId) {
        let mut state = GameState::empty(5, Tuning::default());
        let rock = state.spawn_asteroid_with_radius(Vec2::new(1600.0, 1600.0), 64.0, 800);
        let miner = state.spawn_station(StationKind::Miner, Vec2::new(1650.0, 1600.0));
        state.spawn_station(StationKind::SolarPanel, Vec2::new(1650.0, 1450.0));
        (state, rock, miner)
    }

    fn step(state: &mut GameState, dt: f32) {
        state.events.clear();
        update_proximity(state);
        update_mining(state, dt);
    }

    fn minerals(state: &GameState, id: EntityId) -> u32 {
        state.asteroid(id).unwrap().current_minerals()
    }

    fn phase(state: &GameState, id: EntityId) -> MiningPhase {
        state.entity(id).unwrap().as_station().unwrap().timer.phase
    }

    #[test]
    fn test_three_cycles_mine_nine() {
        let (mut state, rock, miner) = powered_miner_scene();
        for _ in 0..3 {
            step(&mut state, 3.0);
            assert_eq!(phase(&state, miner), MiningPhase::MineTick);
        }
        assert_eq!(minerals(&state, rock), 791);
        assert_eq!(state.minerals_mined, 9);
    }

    #[test]
    fn test_long_tick_mines_every_elapsed_period() {
        let (mut state, rock, miner) = powered_miner_scene();
        update_proximity(&mut state);
        update_mining(&mut state, 9.0);
        assert_eq!(minerals(&state, rock), 791);
        assert_eq!(state.events.len(), 3);

        for _ in 0..10 {
            update_mining(&mut state, 9.0);
        }
        assert_eq!(state.minerals_mined, 99);
        let timer = &state.entity(miner).unwrap().as_station().unwrap().timer;
        assert!(timer.cooldown < state.tuning.mining_cooldown_secs);
    }

    #[test]
    fn test_cooldown_accumulates_across_ticks() {
        let (mut state, rock, miner) = powered_miner_scene();
        for _ in 0..5 {
            step(&mut state, 0.5);
            assert_eq!(phase(&state, miner), MiningPhase::Charging);
        }
        assert_eq!(minerals(&state, rock), 800);
        step(&mut state, 0.5);
        assert_eq!(phase(&state, miner), MiningPhase::MineTick);
        assert_eq!(minerals(&state, rock), 797);
        assert_eq!(
            state.events,
            vec![GameEvent::Mined {
                miner,
                asteroid: rock,
                amount: 3
            }]
        );
        step(&mut state, 0.5);
        assert_eq!(phase(&state, miner), MiningPhase::Charging);
    }

    #[test]
    fn test_never_below_zero() {
        let (mut state, rock, _) = powered_miner_scene();
        for _ in 0..1000 {
            step(&mut state, 3.0);
        }
        assert_eq!(minerals(&state, rock), 0);
        assert_eq!(state.minerals_mined, 800);
    }

    #[test]
    fn test_no_asteroids_in_range_is_idle() {
        let mut state = GameState::empty(5, Tuning::default());
        let rock = state.spawn_asteroid(Vec2::new(0.0, 0.0), 800);
        let miner = state.spawn_station(StationKind::Miner, Vec2::new(1000.0, 0.0));
        state.spawn_station(StationKind::SolarPanel, Vec2::new(1100.0, 0.0));

        for _ in 0..10 {
            step(&mut state, 3.0);
            assert_eq!(phase(&state, miner), MiningPhase::Idle);
        }
        let timer = &state.entity(miner).unwrap().as_station().unwrap().timer;
        assert_eq!(timer.cooldown, 0.0);
        assert_eq!(minerals(&state, rock), 800);
        assert_eq!(state.minerals_mined, 0);
    }

    #[test]
    fn test_unpowered_miner_is_idle() {
        let mut state = GameState::empty(5, Tuning::default());
        let rock = state.spawn_asteroid(Vec2::new(0.0, 0.0), 800);
        let miner = state.spawn_station(StationKind::Miner, Vec2::new(90.0, 0.0));
        for _ in 0..5 {
            step(&mut state, 3.0);
        }
        assert_eq!(phase(&state, miner), MiningPhase::Idle);
        assert_eq!(minerals(&state, rock), 800);
    }

    #[test]
    fn test_losing_power_resets_cooldown() {
        let (mut state, rock, miner) = powered_miner_scene();
        step(&mut state, 2.0);
        assert_eq!(phase(&state, miner), MiningPhase::Charging);

        // Pull the panel out of range
        let panel_idx = state
            .stations
            .iter()
            .position(|e| e.station_kind() == Some(StationKind::SolarPanel))
            .unwrap();
        state.stations[panel_idx].set_center(Vec2::new(0.0, 0.0));
        step(&mut state, 2.0);
        assert_eq!(phase(&state, miner), MiningPhase::Idle);

        // Back in range: needs a full period again
        state.stations[panel_idx].set_center(Vec2::new(1650.0, 1450.0));
        step(&mut state, 2.0);
        assert_eq!(phase(&state, miner), MiningPhase::Charging);
        assert_eq!(minerals(&state, rock), 800);
        step(&mut state, 1.0);
        assert_eq!(minerals(&state, rock), 797);
    }

    #[test]
    fn test_unplaced_miner_does_not_mine() {
        let mut state = GameState::empty(5, Tuning::default());
        let rock = state.spawn_asteroid(Vec2::new(0.0, 0.0), 800);
        state.spawn_station(StationKind::SolarPanel, Vec2::new(200.0, 0.0));
        state.begin_placement(StationKind::Miner, Vec2::new(90.0, 0.0));
        for _ in 0..5 {
            step(&mut state, 3.0);
        }
        assert_eq!(minerals(&state, rock), 800);
    }

    #[test]
    fn test_targets_spread_across_asteroids() {
        let mut state = GameState::empty(11, Tuning::default());
        let left = state.spawn_asteroid_with_radius(Vec2::new(-60.0, 0.0), 10.0, 10_000);
        let right = state.spawn_asteroid_with_radius(Vec2::new(60.0, 0.0), 10.0, 10_000);
        state.spawn_station(StationKind::Miner, Vec2::new(0.0, 0.0));
        state.spawn_station(StationKind::SolarPanel, Vec2::new(0.0, 150.0));

        for _ in 0..200 {
            step(&mut state, 3.0);
        }
        let taken_left = 10_000 - minerals(&state, left);
        let taken_right = 10_000 - minerals(&state, right);
        assert_eq!(taken_left + taken_right, 600);
        assert!(taken_left > 0 && taken_right > 0);
    }
}
