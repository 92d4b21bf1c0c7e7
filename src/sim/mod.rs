//! Deterministic simulation module
//!
//! All physics and gameplay logic lives here. This module must be pure and
//! deterministic:
//! - Fixed timestep only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod body;
pub mod game;
pub mod slingshot;
pub mod world;

pub use body::{Body, BodyKind};
pub use game::{Game, GameEvent, GamePhase, LoseReason, TickInput, tick};
pub use slingshot::Slingshot;
pub use world::{BodyId, Bounds, OrbitReport, Outcome, World, orbital_speed, pairwise_force};
