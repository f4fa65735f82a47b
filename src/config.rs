//! Game configuration
//!
//! Every tunable number of a session lives here. Defaults come from
//! [`crate::consts`]; a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Half-open numeric range `[min, max)` used for randomized spawns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpanF32 {
    pub min: f32,
    pub max: f32,
}

impl SpanF32 {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// True when the range contains no values
    pub fn is_empty(&self) -> bool {
        !(self.min < self.max)
    }

    /// Whether `value` falls in `[min, max)`
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value < self.max
    }
}

impl From<(f32, f32)> for SpanF32 {
    fn from((min, max): (f32, f32)) -> Self {
        Self { min, max }
    }
}

/// Session tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Counters ===
    /// Lives granted by a reset
    pub starting_lives: u32,
    /// Ammo granted by a reset or reload
    pub ammo_capacity: u32,

    // === Spawning ===
    /// Seconds between spawn ticks
    pub spawn_period_secs: f32,
    /// Target lifetime range (seconds)
    pub target_lifetime_secs: SpanF32,
    /// Lateral (x) spawn offset range
    pub spawn_lateral: SpanF32,
    /// Vertical (y) spawn offset range
    pub spawn_vertical: SpanF32,
    /// Depth (z) of spawns when no hoop is placed
    pub spawn_depth: f32,

    // === Shooting ===
    /// Launch impulse magnitude
    pub launch_impulse: f32,
    /// Reload threshold on dot(camera forward, world down)
    pub realign_threshold: f32,
    /// Auto-fire period while the fire button is held
    pub fire_repeat_secs: f32,

    /// Fixed RNG seed for reproducible runs (random seed when absent)
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
            ammo_capacity: AMMO_CAPACITY,

            spawn_period_secs: SPAWN_PERIOD_SECS,
            target_lifetime_secs: TARGET_LIFETIME_SECS.into(),
            spawn_lateral: SPAWN_LATERAL.into(),
            spawn_vertical: SPAWN_VERTICAL.into(),
            spawn_depth: SPAWN_DEPTH,

            launch_impulse: LAUNCH_IMPULSE,
            realign_threshold: REALIGN_THRESHOLD,
            fire_repeat_secs: FIRE_REPEAT_SECS,

            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Default config with a fixed RNG seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng_seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::validated)
    }

    /// Load config from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Invalid config {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read config {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Replace degenerate values with their defaults
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if self.starting_lives == 0 {
            log::warn!("starting_lives must be positive, using {}", defaults.starting_lives);
            self.starting_lives = defaults.starting_lives;
        }
        if !(self.spawn_period_secs > 0.0) {
            self.spawn_period_secs = defaults.spawn_period_secs;
        }
        if !(self.fire_repeat_secs > 0.0) {
            self.fire_repeat_secs = defaults.fire_repeat_secs;
        }
        if self.target_lifetime_secs.is_empty() || self.target_lifetime_secs.min < 0.0 {
            self.target_lifetime_secs = defaults.target_lifetime_secs;
        }
        if self.spawn_lateral.is_empty() {
            self.spawn_lateral = defaults.spawn_lateral;
        }
        if self.spawn_vertical.is_empty() {
            self.spawn_vertical = defaults.spawn_vertical;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let config = GameConfig::default();
        assert_eq!(config.starting_lives, 3);
        assert_eq!(config.ammo_capacity, 30);
        assert_eq!(config.spawn_period_secs, 1.0);
        assert_eq!(config.target_lifetime_secs, SpanF32::new(0.0, 5.0));
        assert_eq!(config.launch_impulse, 100.0);
        assert_eq!(config.realign_threshold, -0.9);
        assert!(config.rng_seed.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "ammo_capacity": 12, "rng_seed": 7 }"#).unwrap();
        assert_eq!(config.ammo_capacity, 12);
        assert_eq!(config.rng_seed, Some(7));
        assert_eq!(config.starting_lives, 3);
        assert_eq!(config.spawn_period_secs, 1.0);
    }

    #[test]
    fn test_validated_repairs_degenerate_values() {
        let config = GameConfig::from_json(
            r#"{
                "starting_lives": 0,
                "spawn_period_secs": 0.0,
                "target_lifetime_secs": { "min": 4.0, "max": 1.0 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.starting_lives, 3);
        assert_eq!(config.spawn_period_secs, 1.0);
        assert_eq!(config.target_lifetime_secs, SpanF32::new(0.0, 5.0));
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(GameConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = GameConfig::load("/definitely/not/here/ar_hoops.json");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("ar_hoops_config_{}.json", std::process::id()));
        let config = GameConfig {
            fire_repeat_secs: 0.5,
            ..GameConfig::with_seed(42)
        };
        config.save(&path).unwrap();
        let loaded = GameConfig::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_span_contains() {
        let span = SpanF32::new(0.0, 5.0);
        assert!(span.contains(0.0));
        assert!(span.contains(4.999));
        assert!(!span.contains(5.0));
        assert!(SpanF32::new(1.0, 1.0).is_empty());
    }
}
