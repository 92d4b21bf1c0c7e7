//! Level descriptions
//!
//! A level is a small JSON document:
//!
//! ```json
//! {
//!   "id": 2, "name": "Binary", "tutorial": false,
//!   "spawn": [200, 700], "goal": [1400, 150],
//!   "entities": [
//!     { "type": "sun", "pos": [700, 450], "pinned": false, "id": "a", "orbits": "b" },
//!     { "type": "sun", "pos": [900, 450], "pinned": false, "id": "b", "orbits": "a" }
//!   ]
//! }
//! ```
//!
//! Every field is optional. Loading inserts the goal, then the entities in
//! file order, then derives orbital velocities.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::consts::{SPAWN_X, SPAWN_Y};
use crate::math::vec2_from_pair;
use crate::sim::body::{Body, BodyKind};
use crate::sim::world::World;

/// Level files are numbered `level_01.json`, `level_02.json`, ...
pub fn level_file_name(level: u32) -> String {
    format!("level_{:02}.json", level)
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid level JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

fn default_pinned() -> bool {
    true
}

/// First two numbers of a JSON array; extra elements are ignored
fn point_from_value(value: &Value) -> Option<[f32; 2]> {
    match value.as_array()?.as_slice() {
        [x, y, ..] => Some([x.as_f64()? as f32, y.as_f64()? as f32]),
        _ => None,
    }
}

fn lenient_point<'de, D>(deserializer: D) -> Result<Option<[f32; 2]>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let point = point_from_value(&value);
    if point.is_none() && !value.is_null() {
        log::warn!("Ignoring malformed point {}", value);
    }
    Ok(point)
}

fn lenient_pos<'de, D>(deserializer: D) -> Result<[f32; 2], D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_point(deserializer)?.unwrap_or_default())
}

fn lenient_spawn<'de, D>(deserializer: D) -> Result<[f32; 2], D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_point(deserializer)?.unwrap_or_else(default_spawn))
}

/// One body as written in a level file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySpec {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_pos")]
    pub pos: [f32; 2],
    #[serde(default = "default_pinned")]
    pub pinned: bool,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub orbits: String,
}

impl EntitySpec {
    /// Build the body; `None` for missing or unsupported types
    ///
    /// Agents and goals are placed by the game, not by entity lists.
    pub fn to_body(&self) -> Option<Body> {
        let kind = BodyKind::from_str(&self.kind)?;
        if matches!(kind, BodyKind::Agent | BodyKind::Goal) {
            return None;
        }
        let id = (!self.id.is_empty()).then(|| self.id.clone());
        Some(Body::new(kind, vec2_from_pair(self.pos), self.pinned, id).with_orbit(self.orbits.clone()))
    }
}

/// Level metadata plus its body list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelData {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tutorial: bool,
    #[serde(default = "default_spawn", deserialize_with = "lenient_spawn")]
    pub spawn: [f32; 2],
    #[serde(default, deserialize_with = "lenient_point")]
    pub goal: Option<[f32; 2]>,
    #[serde(default)]
    pub entities: Vec<EntitySpec>,
}

fn default_spawn() -> [f32; 2] {
    [SPAWN_X, SPAWN_Y]
}

impl LevelData {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn spawn(&self) -> Vec2 {
        vec2_from_pair(self.spawn)
    }

    /// Populate `world` (callers clear it first) and initialize orbits
    pub fn populate(&self, world: &mut World) {
        if let Some(goal) = self.goal {
            world.add_entity(Body::goal(vec2_from_pair(goal)));
        }

        for spec in &self.entities {
            match spec.to_body() {
                Some(body) => {
                    world.add_entity(body);
                }
                None => log::warn!("Skipping entity with unsupported type {:?}", spec.kind),
            }
        }

        let report = world.initialize_orbits();
        log::debug!(
            "Level {} populated: {} bodies, {} orbits resolved, {} skipped",
            self.id,
            world.len(),
            report.resolved,
            report.skipped
        );
    }
}

/// Parse a level and populate `world` with it
pub fn load_level_str(json: &str, world: &mut World) -> Result<LevelData, LevelError> {
    let level = LevelData::from_json(json)?;
    level.populate(world);
    log::info!("Loaded level: {}", level.name);
    Ok(level)
}

/// Read a level file and populate `world` with it
pub fn load_level_file(path: impl AsRef<Path>, world: &mut World) -> Result<LevelData, LevelError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_level_str(&json, world)
}

/// Minimal playable level used when a level file can't be loaded
pub fn load_fallback_level(world: &mut World, level: u32) -> LevelData {
    let data = LevelData {
        id: level,
        name: "Fallback".to_string(),
        tutorial: false,
        spawn: default_spawn(),
        goal: Some([1400.0, 150.0]),
        entities: vec![EntitySpec {
            kind: "planet".to_string(),
            pos: [800.0, 450.0],
            pinned: true,
            id: String::new(),
            orbits: String::new(),
        }],
    };
    data.populate(world);
    data
}
