//! Game flow
//!
//! Phase machine around the physics world: show rules, aim, fly, then win or
//! lose and retry. [`tick`] is the only driver; it returns the events that
//! happened during the frame instead of invoking callbacks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::slingshot::Slingshot;
use super::world::{Outcome, World};
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Showing rules before play
    Rules,
    /// Player can drag the slingshot
    Aiming,
    /// Agent in flight, physics running
    Launched,
    /// Reached the goal
    Won,
    /// Hit a gravity well or left the world
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoseReason {
    HitGravityWell,
    OutOfBounds,
}

/// Something the host should react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged(GamePhase),
    Launched { velocity: Vec2 },
    Won { level: u32, attempts: u32 },
    Lost(LoseReason),
}

/// Pointer input for a single tick, already mapped to world coordinates
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer pressed at this position
    pub press: Option<Vec2>,
    /// Pointer moved to this position
    pub drag: Option<Vec2>,
    /// Pointer released
    pub release: bool,
}

/// Per-level game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub phase: GamePhase,
    pub level: u32,
    pub attempts: u32,
    pub lose_reason: Option<LoseReason>,
    /// Where the agent spawns and the slingshot is anchored
    pub spawn: Vec2,
    pub slingshot: Slingshot,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl Game {
    pub fn new(settings: &Settings) -> Self {
        let spawn = Vec2::new(SPAWN_X, SPAWN_Y);
        let mut slingshot = Slingshot::new(spawn);
        slingshot.max_radius = settings.max_pull_radius;
        slingshot.launch_multiplier = settings.launch_multiplier;
        Self {
            phase: GamePhase::Rules,
            level: 1,
            attempts: 0,
            lose_reason: None,
            spawn,
            slingshot,
        }
    }

    /// Reset for a freshly loaded level
    pub fn start_level(&mut self, level: u32, spawn: Vec2) {
        self.level = level;
        self.attempts = 0;
        self.lose_reason = None;
        self.spawn = spawn;
        self.slingshot.set_anchor(spawn);
        self.phase = GamePhase::Rules;
    }

    fn set_phase(&mut self, phase: GamePhase, events: &mut Vec<GameEvent>) {
        self.phase = phase;
        events.push(GameEvent::PhaseChanged(phase));
    }

    /// Spawn the agent at the spawn point and send it flying
    fn launch(&mut self, world: &mut World, velocity: Vec2, events: &mut Vec<GameEvent>) {
        world.remove_agent();
        world.add_entity(Body::agent(self.spawn).with_velocity(velocity));
        self.attempts += 1;
        log::debug!("Launch #{} with velocity {:?}", self.attempts, velocity);
        self.set_phase(GamePhase::Launched, events);
        events.push(GameEvent::Launched { velocity });
    }

    /// Drop the agent and go back to aiming
    fn reset_for_retry(&mut self, world: &mut World, events: &mut Vec<GameEvent>) {
        world.remove_agent();
        self.lose_reason = None;
        self.slingshot.set_anchor(self.spawn);
        self.set_phase(GamePhase::Aiming, events);
    }

    fn win(&mut self, events: &mut Vec<GameEvent>) {
        log::info!("Level {} cleared in {} attempt(s)", self.level, self.attempts);
        self.set_phase(GamePhase::Won, events);
        events.push(GameEvent::Won {
            level: self.level,
            attempts: self.attempts,
        });
    }

    fn lose(&mut self, reason: LoseReason, events: &mut Vec<GameEvent>) {
        log::info!("Level {} attempt {} lost: {:?}", self.level, self.attempts, reason);
        self.lose_reason = Some(reason);
        self.set_phase(GamePhase::Lost, events);
        events.push(GameEvent::Lost(reason));
    }

    fn handle_input(&mut self, world: &mut World, input: &TickInput, events: &mut Vec<GameEvent>) {
        if let Some(pos) = input.press {
            match self.phase {
                GamePhase::Rules => self.set_phase(GamePhase::Aiming, events),
                GamePhase::Aiming => {
                    if self.slingshot.can_grab(pos) {
                        self.slingshot.start_drag(pos);
                    }
                }
                GamePhase::Won | GamePhase::Lost => self.reset_for_retry(world, events),
                GamePhase::Launched => {}
            }
        }

        if let Some(pos) = input.drag {
            if self.phase == GamePhase::Aiming {
                self.slingshot.update_drag(pos);
            }
        }

        if input.release && self.phase == GamePhase::Aiming {
            let velocity = self.slingshot.end_drag();
            self.slingshot.cancel_drag();
            if let Some(velocity) = velocity.filter(|v| v.length() > MIN_LAUNCH_SPEED) {
                self.launch(world, velocity, events);
            }
        }
    }
}

/// Advance the game by one fixed timestep
pub fn tick(game: &mut Game, world: &mut World, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    game.handle_input(world, input, &mut events);

    match game.phase {
        GamePhase::Launched => {
            world.update(dt);
            match world.outcome() {
                Some(Outcome::ReachedGoal) => game.win(&mut events),
                Some(Outcome::HitGravityWell) => game.lose(LoseReason::HitGravityWell, &mut events),
                Some(Outcome::OutOfBounds) => game.lose(LoseReason::OutOfBounds, &mut events),
                None => {}
            }
        }
        // Orbiting bodies keep moving while the player lines up a shot
        GamePhase::Aiming => world.update(dt),
        GamePhase::Rules | GamePhase::Won | GamePhase::Lost => {}
    }

    events
}
