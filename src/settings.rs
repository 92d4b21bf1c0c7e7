//! Simulation settings
//!
//! Every tunable physics/world value in one serde struct. Defaults come from
//! [`crate::consts`]; a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::world::Bounds;

/// Tunable physics and world configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gravitational constant
    pub gravity: f32,
    /// Fixed step length in seconds
    pub time_step: f32,

    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    /// Distance past the world edge before the agent counts as lost
    pub bounds_margin: f32,

    // === Slingshot ===
    pub max_pull_radius: f32,
    pub launch_multiplier: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: G,
            time_step: TIME_STEP,

            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            bounds_margin: BOUNDS_MARGIN,

            max_pull_radius: SLINGSHOT_MAX_RADIUS,
            launch_multiplier: SLINGSHOT_LAUNCH_MULTIPLIER,
        }
    }
}

impl Settings {
    /// Play-area bounds for the world
    pub fn bounds(&self) -> Bounds {
        Bounds {
            width: self.world_width,
            height: self.world_height,
            margin: self.bounds_margin,
        }
    }

    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
