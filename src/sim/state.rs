//! Game state and core simulation types
//!
//! All state that must be kept for snapshots/determinism lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bounds::{Bounds, ShapeKind};
use crate::consts::*;
use crate::error::{SimError, SimResult};
use crate::tuning::Tuning;

/// Stable entity handle. Links between entities store ids, never references.
pub type EntityId = u32;

/// Buildable station types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationKind {
    /// Extracts minerals from asteroids in range; needs power
    Miner,
    /// Generates power and relays it to linked stations
    SolarPanel,
}

impl StationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StationKind::Miner => "Miner",
            StationKind::SolarPanel => "Solar Power Plant",
        }
    }

    /// Shape this station's bounds must have
    pub fn shape_kind(&self) -> ShapeKind {
        match self {
            StationKind::Miner => ShapeKind::Circle,
            StationKind::SolarPanel => ShapeKind::Rectangle,
        }
    }

    /// Whether this station relays power to its links
    pub fn can_transmit_power(&self) -> bool {
        matches!(self, StationKind::SolarPanel)
    }

    /// Whether this station is a power source on its own
    pub fn is_generator(&self) -> bool {
        matches!(self, StationKind::SolarPanel)
    }
}

/// Miner extraction cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MiningPhase {
    /// Unpowered, or no asteroid in range
    #[default]
    Idle,
    /// Powered with a target in range, cooldown counting up
    Charging,
    /// Cooldown elapsed this tick and an asteroid was mined
    MineTick,
}

/// Per-miner cooldown state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MiningTimer {
    pub phase: MiningPhase,
    /// Seconds charged toward the next extraction
    pub cooldown: f32,
    /// Asteroid hit by the most recent extraction
    #[serde(default)]
    pub last_target: Option<EntityId>,
}

impl MiningTimer {
    /// Drop back to idle; the next cycle starts from zero
    pub fn reset(&mut self) {
        self.phase = MiningPhase::Idle;
        self.cooldown = 0.0;
    }
}

/// A player-built station
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub kind: StationKind,
    /// Connected to a generator through the power graph
    pub powered: bool,
    /// Link radius for power links (and asteroid links for miners)
    pub max_connection_distance: f32,
    /// Only advanced for miners
    #[serde(default)]
    pub timer: MiningTimer,
}

impl Station {
    pub fn new(kind: StationKind, max_connection_distance: f32) -> Self {
        Self {
            kind,
            powered: false,
            max_connection_distance,
            timer: MiningTimer::default(),
        }
    }

    pub fn is_miner(&self) -> bool {
        self.kind == StationKind::Miner
    }
}

/// A mineable asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "AsteroidRecord")]
pub struct Asteroid {
    pub max_minerals: u32,
    /// Always within `0..=max_minerals`
    current_minerals: u32,
    /// Sprite animation (not gameplay-affecting)
    pub animation_frame: u8,
    pub animation_timer: f32,
}

/// Wire form of [`Asteroid`]; loading clamps the mineral count
#[derive(Deserialize)]
struct AsteroidRecord {
    max_minerals: u32,
    current_minerals: u32,
    #[serde(default)]
    animation_frame: u8,
    #[serde(default)]
    animation_timer: f32,
}

impl From<AsteroidRecord> for Asteroid {
    fn from(record: AsteroidRecord) -> Self {
        Self {
            max_minerals: record.max_minerals,
            current_minerals: record.current_minerals.min(record.max_minerals),
            animation_frame: record.animation_frame % ASTEROID_ANIMATION_FRAMES,
            animation_timer: record.animation_timer,
        }
    }
}

impl Asteroid {
    pub fn new(max_minerals: u32) -> Self {
        Self {
            max_minerals,
            current_minerals: max_minerals,
            animation_frame: 0,
            animation_timer: 0.0,
        }
    }

    pub fn current_minerals(&self) -> u32 {
        self.current_minerals
    }

    /// Fraction of minerals remaining (1.0 = untouched)
    pub fn remaining_fraction(&self) -> f32 {
        if self.max_minerals == 0 {
            0.0
        } else {
            self.current_minerals as f32 / self.max_minerals as f32
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.current_minerals == 0
    }

    /// Remove up to `amount` minerals; returns what was actually removed
    pub fn mine(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current_minerals);
        self.current_minerals -= removed;
        removed
    }

    /// Advance the sprite animation by `dt` seconds
    pub fn animate(&mut self, dt: f32, frame_secs: f32) {
        self.animation_timer += dt;
        while self.animation_timer > frame_secs {
            self.animation_frame = (self.animation_frame + 1) % ASTEROID_ANIMATION_FRAMES;
            self.animation_timer -= frame_secs;
        }
    }
}

/// What an entity is
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntityKind {
    Asteroid(Asteroid),
    Station(Station),
}

impl EntityKind {
    /// Shape the bounds of this kind of entity must have
    pub fn required_shape(&self) -> ShapeKind {
        match self {
            EntityKind::Asteroid(_) => ShapeKind::Circle,
            EntityKind::Station(s) => s.kind.shape_kind(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Asteroid(_) => "Asteroid",
            EntityKind::Station(s) => s.kind.as_str(),
        }
    }
}

/// A placeable entity: a station or an asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Shape kind is fixed by `kind`; only the center moves
    bounds: Bounds,
    /// Committed to the scene (asteroids are always placed)
    pub placed: bool,
    /// Valid placement spot this tick
    pub can_place: bool,
    pub kind: EntityKind,
    /// Linked stations, sorted by id; rebuilt every tick
    #[serde(default)]
    pub nearby_stations: Vec<EntityId>,
    /// Asteroids in mining range (miners only), sorted by id; rebuilt every tick
    #[serde(default)]
    pub nearby_asteroids: Vec<EntityId>,
}

impl Entity {
    /// Build an entity, rejecting bounds of the wrong shape for its kind
    pub fn new(id: EntityId, kind: EntityKind, bounds: Bounds, placed: bool) -> SimResult<Self> {
        check_shape(&kind, &bounds)?;
        Ok(Self {
            id,
            bounds,
            placed,
            can_place: true,
            kind,
            nearby_stations: Vec::new(),
            nearby_asteroids: Vec::new(),
        })
    }

    /// A placed asteroid with a full mineral load
    pub fn asteroid(id: EntityId, center: Vec2, radius: f32, max_minerals: u32) -> Self {
        Self {
            id,
            bounds: Bounds::circle(center, radius),
            placed: true,
            can_place: true,
            kind: EntityKind::Asteroid(Asteroid::new(max_minerals)),
            nearby_stations: Vec::new(),
            nearby_asteroids: Vec::new(),
        }
    }

    /// A station with the footprint and link radius from `tuning`
    pub fn station(id: EntityId, kind: StationKind, center: Vec2, placed: bool, tuning: &Tuning) -> Self {
        let (bounds, distance) = match kind {
            StationKind::Miner => (
                Bounds::circle(center, tuning.miner_radius),
                tuning.miner_connection_distance,
            ),
            StationKind::SolarPanel => (
                Bounds::square(center, tuning.solar_panel_size),
                tuning.solar_connection_distance,
            ),
        };
        Self {
            id,
            bounds,
            placed,
            can_place: true,
            kind: EntityKind::Station(Station::new(kind, distance)),
            nearby_stations: Vec::new(),
            nearby_asteroids: Vec::new(),
        }
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Replace the bounds; the new shape must match the entity kind
    pub fn set_bounds(&mut self, bounds: Bounds) -> SimResult<()> {
        check_shape(&self.kind, &bounds)?;
        self.bounds = bounds;
        Ok(())
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.bounds.set_center(center);
    }

    pub fn intersects(&self, other: &Entity) -> bool {
        self.bounds.intersects(&other.bounds)
    }

    pub fn as_station(&self) -> Option<&Station> {
        match &self.kind {
            EntityKind::Station(s) => Some(s),
            EntityKind::Asteroid(_) => None,
        }
    }

    pub fn as_station_mut(&mut self) -> Option<&mut Station> {
        match &mut self.kind {
            EntityKind::Station(s) => Some(s),
            EntityKind::Asteroid(_) => None,
        }
    }

    pub fn as_asteroid(&self) -> Option<&Asteroid> {
        match &self.kind {
            EntityKind::Asteroid(a) => Some(a),
            EntityKind::Station(_) => None,
        }
    }

    pub fn as_asteroid_mut(&mut self) -> Option<&mut Asteroid> {
        match &mut self.kind {
            EntityKind::Asteroid(a) => Some(a),
            EntityKind::Station(_) => None,
        }
    }

    pub fn station_kind(&self) -> Option<StationKind> {
        self.as_station().map(|s| s.kind)
    }

    pub fn is_miner(&self) -> bool {
        self.as_station().is_some_and(Station::is_miner)
    }

    pub fn is_powered(&self) -> bool {
        self.as_station().is_some_and(|s| s.powered)
    }
}

fn check_shape(kind: &EntityKind, bounds: &Bounds) -> SimResult<()> {
    let expected = kind.required_shape();
    if bounds.kind() != expected {
        return Err(SimError::ShapeMismatch {
            entity: kind.name(),
            expected,
            got: bounds.kind(),
        });
    }
    Ok(())
}

/// Things that happened during a tick, for audio/HUD hooks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A station was committed to the scene
    Placed { id: EntityId, kind: StationKind },
    /// Confirm pressed while the unplaced station overlapped something
    PlacementBlocked { kind: StationKind },
    /// A miner extracted minerals
    Mined {
        miner: EntityId,
        asteroid: EntityId,
        amount: u32,
    },
}

/// RNG state wrapper for serialization
///
/// Every draw reseeds from `(seed, stream)` and bumps `stream`, so a
/// deserialized state continues the same sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ self.stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn next_index(&mut self, len: usize) -> usize {
        let mut rng = self.to_rng();
        self.stream += 1;
        rng.random_range(0..len)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state
    pub rng_state: RngState,
    /// Balance values and level layout this run was built from
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Elapsed simulated seconds
    pub time_secs: f64,
    /// Asteroids (sorted by id for determinism)
    pub asteroids: Vec<Entity>,
    /// Placed stations (sorted by id for determinism)
    pub stations: Vec<Entity>,
    /// Station following the cursor, if a build is in progress
    pub unplaced: Option<Entity>,
    /// Minerals present when the level was built
    pub minerals_total: u64,
    /// Minerals extracted so far
    pub minerals_mined: u64,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: EntityId,
}

impl GameState {
    /// Create a new game with the default level
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game and spawn the level described by `tuning`
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self::empty(seed, tuning);
        state.spawn_level();
        state
    }

    /// A state with no entities (for building scenes by hand)
    pub fn empty(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng_state: RngState::new(seed),
            tuning,
            time_ticks: 0,
            time_secs: 0.0,
            asteroids: Vec::new(),
            stations: Vec::new(),
            unplaced: None,
            minerals_total: 0,
            minerals_mined: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    fn spawn_level(&mut self) {
        let level = self.tuning.level.clone();
        for spawn in &level.asteroids {
            self.spawn_asteroid(spawn.pos, spawn.minerals);
        }
        for spawn in &level.stations {
            self.spawn_station(spawn.kind, spawn.pos);
        }
        if let Some(kind) = level.start_building {
            self.begin_placement(kind, Vec2::ZERO);
        }
        log::info!(
            "Level ready: {} asteroids, {} stations, {} minerals",
            self.asteroids.len(),
            self.stations.len(),
            self.minerals_total
        );
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an asteroid using the tuned radius
    pub fn spawn_asteroid(&mut self, center: Vec2, max_minerals: u32) -> EntityId {
        let radius = self.tuning.asteroid_radius;
        self.spawn_asteroid_with_radius(center, radius, max_minerals)
    }

    pub fn spawn_asteroid_with_radius(&mut self, center: Vec2, radius: f32, max_minerals: u32) -> EntityId {
        let id = self.next_entity_id();
        self.asteroids.push(Entity::asteroid(id, center, radius, max_minerals));
        self.minerals_total += u64::from(max_minerals);
        id
    }

    /// Add an already-placed station (level setup, tests)
    pub fn spawn_station(&mut self, kind: StationKind, center: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.stations
            .push(Entity::station(id, kind, center, true, &self.tuning));
        id
    }

    /// Start placing a new station at `center`, replacing any pending one
    pub fn begin_placement(&mut self, kind: StationKind, center: Vec2) -> EntityId {
        let id = self.next_entity_id();
        if let Some(old) = self.unplaced.take() {
            log::debug!("Discarding unplaced {} #{}", old.kind.name(), old.id);
        }
        self.unplaced = Some(Entity::station(id, kind, center, false, &self.tuning));
        id
    }

    /// Look up any entity (asteroid, placed station or the unplaced one)
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        find(&self.asteroids, id)
            .or_else(|| find(&self.stations, id))
            .or_else(|| self.unplaced.as_ref().filter(|e| e.id == id))
    }

    pub fn asteroid(&self, id: EntityId) -> Option<&Asteroid> {
        find(&self.asteroids, id).and_then(Entity::as_asteroid)
    }

    /// Remove up to `amount` minerals from asteroid `id`
    pub fn mine_asteroid(&mut self, id: EntityId, amount: u32) -> SimResult<u32> {
        let asteroid = self
            .asteroids
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .and_then(|i| self.asteroids[i].as_asteroid_mut())
            .ok_or(SimError::EntityNotFound(id))?;
        let removed = asteroid.mine(amount);
        self.minerals_mined += u64::from(removed);
        Ok(removed)
    }

    /// Minerals still in the field
    pub fn minerals_available(&self) -> u64 {
        self.minerals_total.saturating_sub(self.minerals_mined)
    }

    /// Ensure entity lists are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.asteroids.sort_by_key(|e| e.id);
        self.stations.sort_by_key(|e| e.id);
    }
}

fn find(entities: &[Entity], id: EntityId) -> Option<&Entity> {
    entities
        .binary_search_by_key(&id, |e| e.id)
        .ok()
        .map(|i| &entities[i])
}
