//! Session settings
//!
//! Loaded from a JSON file on native builds. Missing fields keep their
//! defaults; a missing or broken file falls back to defaults entirely.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{FRAME_MS, GAME_OVER_DELAY_MS, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::sim::{CarKind, GameState, SpriteSheet, Viewport};
use crate::tuning::Tuning;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub window_width: i32,
    pub window_height: i32,

    // === Session ===
    /// Car to drive; unknown names fall back to the default car
    #[serde(deserialize_with = "car_or_default")]
    pub car: CarKind,
    /// Fixed RNG seed; `None` lets the host pick one
    pub seed: Option<u64>,

    // === Host pacing ===
    /// Target frame time in milliseconds
    pub frame_ms: u64,
    /// End-screen hold in milliseconds
    pub game_over_delay_ms: u64,

    // === Balance and assets ===
    pub tuning: Tuning,
    pub sprites: SpriteSheet,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            car: CarKind::default(),
            seed: None,
            frame_ms: FRAME_MS,
            game_over_delay_ms: GAME_OVER_DELAY_MS,
            tuning: Tuning::default(),
            sprites: SpriteSheet::default(),
        }
    }
}

fn car_or_default<'de, D>(deserializer: D) -> Result<CarKind, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    Ok(CarKind::parse_or_default(&name))
}

impl Settings {
    /// Environment variable naming the config file
    pub const CONFIG_ENV: &'static str = "FUEL_RUSH_CONFIG";
    /// Config file looked up in the working directory
    pub const CONFIG_FILE: &'static str = "fuel_rush.json";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.window_width,
            height: self.window_height,
        }
    }

    /// Start a session with these settings
    pub fn new_game(&self, seed: u64) -> GameState {
        GameState::with_config(
            seed,
            self.car,
            self.viewport(),
            self.tuning.clone(),
            self.sprites.clone(),
        )
    }

    /// Config path from the environment, else the working-directory default
    pub fn config_path() -> PathBuf {
        std::env::var_os(Self::CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::CONFIG_FILE))
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Load settings from the configured path
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }
}
