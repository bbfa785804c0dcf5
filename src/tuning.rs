//! Data-driven game balance
//!
//! Every balance constant and the level layout live in one serde struct so a
//! JSON file can override any subset of them. Missing keys keep the compiled
//! defaults from [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::state::StationKind;

/// Tuning load/validation errors
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for '{field}': {value} (must be {rule})")]
    Invalid {
        field: &'static str,
        value: f32,
        rule: &'static str,
    },
}

/// An asteroid in the level layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidSpawn {
    pub pos: Vec2,
    pub minerals: u32,
}

/// A station already placed when the level starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSpawn {
    pub kind: StationKind,
    pub pos: Vec2,
}

/// Level layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLayout {
    pub width: f32,
    pub height: f32,
    pub asteroids: Vec<AsteroidSpawn>,
    pub stations: Vec<StationSpawn>,
    /// Station handed to the player at the start (follows the cursor)
    pub start_building: Option<StationKind>,
}

impl Default for LevelLayout {
    fn default() -> Self {
        let asteroid = |x: f32, y: f32, minerals: u32| AsteroidSpawn {
            pos: Vec2::new(x, y),
            minerals,
        };
        Self {
            width: LEVEL_WIDTH,
            height: LEVEL_HEIGHT,
            asteroids: vec![
                asteroid(1600.0, 1600.0, 800),
                asteroid(1500.0, 1100.0, 500),
                asteroid(1600.0, 1350.0, 400),
                asteroid(1700.0, 1675.0, 825),
                asteroid(1600.0, 1750.0, 1000),
                asteroid(1450.0, 1700.0, 750),
                asteroid(1450.0, 1800.0, 350),
                asteroid(1700.0, 1400.0, 900),
                asteroid(1850.0, 1350.0, 500),
                asteroid(1900.0, 1600.0, 400),
                asteroid(1200.0, 1600.0, 1000),
            ],
            stations: vec![StationSpawn {
                kind: StationKind::SolarPanel,
                pos: Vec2::new(1400.0, 1600.0),
            }],
            start_building: Some(StationKind::Miner),
        }
    }
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Seconds between extractions for a powered miner
    pub mining_cooldown_secs: f32,
    /// Minerals removed per extraction
    pub mine_amount: u32,
    pub miner_radius: f32,
    /// Miner reach for both power links and asteroid links
    pub miner_connection_distance: f32,
    /// Side length of the square solar panel footprint
    pub solar_panel_size: f32,
    pub solar_connection_distance: f32,
    pub asteroid_radius: f32,
    /// Seconds per asteroid sprite frame
    pub asteroid_frame_secs: f32,
    pub level: LevelLayout,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            mining_cooldown_secs: MINING_COOLDOWN_SECS,
            mine_amount: MINE_AMOUNT,
            miner_radius: MINER_RADIUS,
            miner_connection_distance: MINER_CONNECTION_DISTANCE,
            solar_panel_size: SOLAR_PANEL_SIZE,
            solar_connection_distance: SOLAR_CONNECTION_DISTANCE,
            asteroid_radius: ASTEROID_RADIUS,
            asteroid_frame_secs: ASTEROID_FRAME_SECS,
            level: LevelLayout::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json_pretty(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("mining_cooldown_secs", self.mining_cooldown_secs),
            ("miner_radius", self.miner_radius),
            ("miner_connection_distance", self.miner_connection_distance),
            ("solar_panel_size", self.solar_panel_size),
            ("solar_connection_distance", self.solar_connection_distance),
            ("asteroid_radius", self.asteroid_radius),
            ("asteroid_frame_secs", self.asteroid_frame_secs),
            ("level.width", self.level.width),
            ("level.height", self.level.height),
        ];
        for (field, value) in positive {
            // Also rejects NaN
            if !(value > 0.0 && value.is_finite()) {
                return Err(TuningError::Invalid {
                    field,
                    value,
                    rule: "a positive finite number",
                });
            }
        }
        if self.mine_amount == 0 {
            return Err(TuningError::Invalid {
                field: "mine_amount",
                value: 0.0,
                rule: "at least 1",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json_str(r#"{ "mine_amount": 5, "mining_cooldown_secs": 1.5 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.mine_amount, 5);
        assert_eq!(tuning.mining_cooldown_secs, 1.5);
        assert_eq!(tuning.miner_radius, MINER_RADIUS);
        assert_eq!(tuning.level.asteroids.len(), 11);
    }

    #[test]
    fn test_level_override() {
        let json = r#"{
            "level": {
                "asteroids": [ { "pos": [100.0, 200.0], "minerals": 42 } ],
                "stations": [],
                "start_building": null
            }
        }"#;
        let tuning = Tuning::from_json_str(json).expect("valid tuning");
        assert_eq!(
            tuning.level.asteroids,
            vec![AsteroidSpawn {
                pos: Vec2::new(100.0, 200.0),
                minerals: 42
            }]
        );
        assert!(tuning.level.stations.is_empty());
        assert_eq!(tuning.level.start_building, None);
        assert_eq!(tuning.level.width, LEVEL_WIDTH);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Tuning::from_json_str(r#"{ "miner_radius": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "miner_radius", .. }));

        let err = Tuning::from_json_str(r#"{ "mine_amount": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "mine_amount", .. }));
    }

    #[test]
    fn test_parse_error() {
        let err = Tuning::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_json_round_trip_of_defaults() {
        let json = Tuning::default().to_json_pretty().expect("serializes");
        assert_eq!(Tuning::from_json_str(&json).expect("parses"), Tuning::default());
    }

    #[test]
    fn test_missing_file() {
        let err = Tuning::load("/nonexistent/space-miner/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }
}
