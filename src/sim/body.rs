//! Body model
//!
//! One data type for every simulated object. Kinds differ only in their
//! default mass/radius and in two capability predicates, so they are a
//! closed tag rather than separate types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::math::Vec2Ext;

/// What a body is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    /// The launched projectile
    Agent,
    /// Target zone; never moves, never pulls
    Goal,
    Planet,
    Sun,
    /// Black hole
    Singularity,
    Asteroid,
}

impl BodyKind {
    /// Default `(mass, radius)` for this kind
    pub fn defaults(&self) -> (f32, f32) {
        match self {
            BodyKind::Agent => (AGENT_MASS, AGENT_RADIUS),
            BodyKind::Goal => (0.0, GOAL_RADIUS),
            BodyKind::Planet => (PLANET_MASS, PLANET_RADIUS),
            BodyKind::Sun => (SUN_MASS, SUN_RADIUS),
            BodyKind::Singularity => (SINGULARITY_MASS, SINGULARITY_RADIUS),
            BodyKind::Asteroid => (ASTEROID_MASS, ASTEROID_RADIUS),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyKind::Agent => "agent",
            BodyKind::Goal => "goal",
            BodyKind::Planet => "planet",
            BodyKind::Sun => "sun",
            BodyKind::Singularity => "singularity",
            BodyKind::Asteroid => "asteroid",
        }
    }

    /// Parse a level-file type name (exact, lowercase)
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "agent" => Some(BodyKind::Agent),
            "goal" => Some(BodyKind::Goal),
            "planet" => Some(BodyKind::Planet),
            "sun" => Some(BodyKind::Sun),
            "singularity" => Some(BodyKind::Singularity),
            "asteroid" => Some(BodyKind::Asteroid),
            _ => None,
        }
    }

    /// Kinds that pull on other bodies (given mass > 0)
    pub fn is_gravity_source(&self) -> bool {
        !matches!(self, BodyKind::Agent | BodyKind::Goal)
    }
}

/// A simulated body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub kind: BodyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub mass: f32,
    pub radius: f32,
    /// Pinned bodies are never moved by integration
    pub pinned: bool,
    /// Optional identity used by orbit references
    #[serde(default)]
    pub id: Option<String>,
    /// Identity of the body this one orbits
    #[serde(default)]
    pub orbits: Option<String>,
    /// Recent positions, oldest first (agent only)
    #[serde(skip)]
    pub trail: Vec<Vec2>,
}

impl Body {
    /// Create a body with the defaults for its kind
    pub fn new(kind: BodyKind, pos: Vec2, pinned: bool, id: Option<String>) -> Self {
        let (mass, radius) = kind.defaults();
        Self {
            kind,
            pos,
            vel: Vec2::ZERO,
            mass,
            radius,
            pinned,
            id: id.filter(|s| !s.is_empty()),
            orbits: None,
            trail: Vec::new(),
        }
    }

    /// The launched projectile; always free to move
    pub fn agent(pos: Vec2) -> Self {
        let mut body = Self::new(BodyKind::Agent, pos, false, None);
        body.trail.reserve(MAX_TRAIL_POINTS + 1);
        body
    }

    /// The goal zone; always pinned
    pub fn goal(pos: Vec2) -> Self {
        Self::new(BodyKind::Goal, pos, true, None)
    }

    /// Set the orbit reference (empty strings mean "none")
    pub fn with_orbit(mut self, orbits: impl Into<String>) -> Self {
        let orbits = orbits.into();
        self.orbits = if orbits.is_empty() { None } else { Some(orbits) };
        self
    }

    /// Override mass (negative values clamp to zero)
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass.max(0.0);
        self
    }

    /// Override radius (negative values clamp to zero)
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius.max(0.0);
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn exerts_gravity(&self) -> bool {
        self.kind.is_gravity_source() && self.mass > 0.0
    }

    pub fn is_affected_by_gravity(&self) -> bool {
        self.is_movable()
    }

    /// Integration may move this body; goals stay put whatever their pin state
    pub fn is_movable(&self) -> bool {
        !self.pinned && self.kind != BodyKind::Goal
    }

    /// Circles overlap (strict: touching is not a collision)
    pub fn collides_with(&self, other: &Body) -> bool {
        self.pos.distance_to(other.pos) < self.radius + other.radius
    }

    /// Point lies strictly inside this body's radius
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance_to(point) < self.radius
    }

    /// Does this body carry the given identity
    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    /// Per-step hook, run after the body has moved
    pub fn on_step(&mut self) {
        if self.kind == BodyKind::Agent {
            self.record_trail();
        }
    }

    /// Record current position to the trail, dropping the oldest past the cap
    pub fn record_trail(&mut self) {
        self.trail.push(self.pos);
        if self.trail.len() > MAX_TRAIL_POINTS {
            self.trail.remove(0);
        }
    }

    /// Clear trail (on respawn)
    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }
}
