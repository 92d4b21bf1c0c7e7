//! Slingshot - 2D gravity slingshot simulation
//!
//! Core modules:
//! - `math`: Vector helpers on top of `glam::Vec2`
//! - `sim`: Deterministic simulation (bodies, world, game flow, slingshot)
//! - `level`: JSON level descriptions and loader
//! - `records`: Best-attempt records per level
//! - `settings`: Tunable physics/world configuration

pub mod level;
pub mod math;
pub mod records;
pub mod settings;
pub mod sim;

pub use level::{LevelData, LevelError};
pub use records::LevelRecords;
pub use settings::Settings;

/// Simulation configuration constants
pub mod consts {
    /// Gravitational constant (tuned for gameplay feel, not realism)
    pub const G: f32 = 80_000.0;

    /// Fixed simulation timestep (60 Hz)
    pub const TIME_STEP: f32 = 1.0 / 60.0;

    /// Virtual world dimensions used by the physics
    pub const WORLD_WIDTH: f32 = 1600.0;
    pub const WORLD_HEIGHT: f32 = 900.0;
    /// Agent is lost once it leaves the world by more than this
    pub const BOUNDS_MARGIN: f32 = 500.0;

    /// Agent trail length (positions)
    pub const MAX_TRAIL_POINTS: usize = 100;

    /// Below this magnitude a vector normalizes to zero
    pub const NORMALIZE_EPSILON: f32 = 1e-8;
    /// Below this separation no orbit is derived
    pub const ORBIT_EPSILON: f32 = 1e-6;

    /// Per-kind body defaults
    pub const AGENT_MASS: f32 = 2.0;
    pub const AGENT_RADIUS: f32 = 18.0;
    pub const GOAL_RADIUS: f32 = 65.0;
    pub const PLANET_MASS: f32 = 250.0;
    pub const PLANET_RADIUS: f32 = 60.0;
    pub const SUN_MASS: f32 = 500.0;
    pub const SUN_RADIUS: f32 = 80.0;
    pub const SINGULARITY_MASS: f32 = 2000.0;
    pub const SINGULARITY_RADIUS: f32 = 80.0;
    pub const ASTEROID_MASS: f32 = 20.0;
    pub const ASTEROID_RADIUS: f32 = 25.0;

    /// Slingshot defaults
    pub const SPAWN_X: f32 = 200.0;
    pub const SPAWN_Y: f32 = 700.0;
    pub const SLINGSHOT_MAX_RADIUS: f32 = 100.0;
    pub const SLINGSHOT_LAUNCH_MULTIPLIER: f32 = 8.0;
    /// How close a press must land to the anchor to grab it
    pub const SLINGSHOT_GRAB_RADIUS: f32 = 50.0;
    /// Launches slower than this are ignored
    pub const MIN_LAUNCH_SPEED: f32 = 10.0;
}
