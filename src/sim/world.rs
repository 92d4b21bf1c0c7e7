//! Physics world
//!
//! Owns every body, derives orbital velocities once per level, advances the
//! simulation one fixed step at a time and answers the per-step outcome
//! queries (goal reached, hazard hit, out of bounds).
//!
//! Bodies live in a generational arena so the agent/goal handles can never
//! dangle: a handle to a removed body simply resolves to `None`. Insertion
//! order is kept separately and defines iteration order everywhere.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};

use super::body::{Body, BodyKind};
use crate::consts::*;
use crate::math::Vec2Ext;
use crate::settings::Settings;

new_key_type! {
    /// Stable handle to a body owned by a [`World`]
    pub struct BodyId;
}

/// Rectangular play area; the agent is lost once it leaves it by more than `margin`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            margin: BOUNDS_MARGIN,
        }
    }
}

impl Bounds {
    /// Point lies inside the play area grown by `margin` (edges inclusive)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= -self.margin
            && p.x <= self.width + self.margin
            && p.y >= -self.margin
            && p.y <= self.height + self.margin
    }
}

/// Result of a step, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    ReachedGoal,
    HitGravityWell,
    OutOfBounds,
}

/// Summary of an orbit initialization pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrbitReport {
    /// Bodies that received an orbital velocity
    pub resolved: usize,
    /// Bodies whose orbit could not be derived
    pub skipped: usize,
}

/// Circular orbit speed around a mass at `distance`
#[inline]
pub fn orbital_speed(g: f32, center_mass: f32, distance: f32) -> f32 {
    (g * center_mass / distance).sqrt()
}

/// Gravitational force `source` exerts on `target`
///
/// Zero unless `source` exerts gravity. The squared distance is clamped from
/// below to the squared sum of the radii so the force stays finite as the
/// bodies approach contact.
pub fn pairwise_force(g: f32, source: &Body, target: &Body) -> Vec2 {
    if !source.exerts_gravity() {
        return Vec2::ZERO;
    }

    let direction = source.pos - target.pos;
    let min_dist = source.radius + target.radius;
    let dist_sq = direction.length_squared().max(min_dist * min_dist);
    if dist_sq <= 0.0 {
        return Vec2::ZERO;
    }

    let magnitude = g * source.mass * target.mass / dist_sq;
    direction.normalized() * magnitude
}

/// The simulation world
#[derive(Debug, Clone)]
pub struct World {
    bodies: SlotMap<BodyId, Body>,
    /// Handles in insertion order
    order: Vec<BodyId>,
    agent: Option<BodyId>,
    goal: Option<BodyId>,
    gravity: f32,
    bounds: Bounds,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Empty world with the built-in constants
    pub fn new() -> Self {
        Self {
            bodies: SlotMap::with_key(),
            order: Vec::new(),
            agent: None,
            goal: None,
            gravity: G,
            bounds: Bounds::default(),
        }
    }

    /// Empty world using tunable settings
    pub fn from_settings(settings: &Settings) -> Self {
        let mut world = Self::new();
        world.gravity = settings.gravity;
        world.bounds = settings.bounds();
        world
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Insert a body, returning its handle
    ///
    /// The most recently added agent/goal becomes *the* agent/goal.
    pub fn add_entity(&mut self, body: Body) -> BodyId {
        let kind = body.kind;
        let id = self.bodies.insert(body);
        self.order.push(id);
        match kind {
            BodyKind::Agent => self.agent = Some(id),
            BodyKind::Goal => self.goal = Some(id),
            _ => {}
        }
        id
    }

    /// Remove every body and both handles
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.order.clear();
        self.agent = None;
        self.goal = None;
    }

    /// Remove one body, clearing any handle that pointed at it
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let body = self.bodies.remove(id)?;
        self.order.retain(|&other| other != id);
        if self.agent == Some(id) {
            self.agent = None;
        }
        if self.goal == Some(id) {
            self.goal = None;
        }
        Some(body)
    }

    /// Remove the current agent (retry/respawn)
    pub fn remove_agent(&mut self) -> Option<Body> {
        let id = self.agent?;
        self.remove(id)
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id)
    }

    /// Handle of the first body (in insertion order) with this identity
    pub fn find_id(&self, ident: &str) -> Option<BodyId> {
        self.order
            .iter()
            .copied()
            .find(|&id| self.bodies.get(id).is_some_and(|b| b.has_id(ident)))
    }

    /// First body (in insertion order) with this identity
    pub fn entity_by_id(&self, ident: &str) -> Option<&Body> {
        self.find_id(ident).and_then(|id| self.bodies.get(id))
    }

    pub fn agent_id(&self) -> Option<BodyId> {
        self.agent
    }

    pub fn goal_id(&self) -> Option<BodyId> {
        self.goal
    }

    pub fn agent(&self) -> Option<&Body> {
        self.agent.and_then(|id| self.bodies.get(id))
    }

    pub fn agent_mut(&mut self) -> Option<&mut Body> {
        self.agent.and_then(|id| self.bodies.get_mut(id))
    }

    pub fn goal(&self) -> Option<&Body> {
        self.goal.and_then(|id| self.bodies.get(id))
    }

    /// Bodies in insertion order
    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.order.iter().filter_map(|&id| self.bodies.get(id))
    }

    /// Handles and bodies in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.bodies.get(id).map(|b| (id, b)))
    }

    /// Give every free body that references another an orbital velocity
    ///
    /// Run once after a level's bodies are all inserted. Problems are logged
    /// and the body is left with its current velocity.
    pub fn initialize_orbits(&mut self) -> OrbitReport {
        let mut report = OrbitReport::default();

        for idx in 0..self.order.len() {
            let id = self.order[idx];
            let Some(body) = self.bodies.get(id) else {
                continue;
            };
            if !body.is_movable() {
                continue;
            }
            let Some(orbits) = body.orbits.clone() else {
                continue;
            };

            let Some(center_id) = self.find_id(&orbits) else {
                log::warn!("Orbit target not found: {}", orbits);
                report.skipped += 1;
                continue;
            };
            let Some(center) = self.bodies.get(center_id) else {
                continue;
            };

            let to_body = body.pos - center.pos;
            let distance = to_body.length();
            if distance < ORBIT_EPSILON {
                log::warn!(
                    "Bodies too close for orbit calculation: {:?} around {}",
                    body.id,
                    orbits
                );
                report.skipped += 1;
                continue;
            }

            let mutual = center.orbits.is_some() && center.orbits == body.id;
            let tangent = to_body.perpendicular().normalized();
            let speed = orbital_speed(self.gravity, center.mass, distance);
            let center_speed = orbital_speed(self.gravity, body.mass, distance);

            if let Some(body) = self.bodies.get_mut(id) {
                body.vel = tangent * speed;
            }
            if mutual {
                // Each side's speed comes from the other's mass
                if let Some(center) = self.bodies.get_mut(center_id).filter(|c| c.is_movable()) {
                    center.vel = -tangent * center_speed;
                }
            }

            log::debug!(
                "Orbit {:?} -> {} (distance {:.1}, speed {:.1}, mutual {})",
                self.bodies.get(id).and_then(|b| b.id.as_deref()),
                orbits,
                distance,
                speed,
                mutual
            );
            report.resolved += 1;
        }

        report
    }

    /// Total gravitational force on `target` from every other source
    pub fn gravity_force(&self, target: BodyId) -> Vec2 {
        let Some(body) = self.bodies.get(target) else {
            return Vec2::ZERO;
        };

        self.iter()
            .filter(|&(id, _)| id != target)
            .map(|(_, source)| pairwise_force(self.gravity, source, body))
            .fold(Vec2::ZERO, |acc, f| acc + f)
    }

    /// Advance one fixed step
    ///
    /// Velocities are updated for every body before any position moves, so
    /// the forces of a step never depend on iteration order.
    pub fn update(&mut self, dt: f32) {
        for idx in 0..self.order.len() {
            let id = self.order[idx];
            let affected = self
                .bodies
                .get(id)
                .is_some_and(|b| b.is_affected_by_gravity() && b.mass > 0.0);
            if !affected {
                continue;
            }

            let force = self.gravity_force(id);
            if let Some(body) = self.bodies.get_mut(id) {
                let acceleration = force / body.mass;
                body.vel += acceleration * dt;
            }
        }

        for &id in &self.order {
            let Some(body) = self.bodies.get_mut(id) else {
                continue;
            };
            if !body.is_movable() {
                continue;
            }
            body.pos += body.vel * dt;
            body.on_step();
        }
    }

    /// Agent overlaps any body other than itself and the goal
    pub fn agent_hit_gravity_well(&self) -> bool {
        let Some(agent) = self.agent() else {
            return false;
        };

        self.iter()
            .filter(|&(id, _)| Some(id) != self.agent && Some(id) != self.goal)
            .any(|(_, body)| agent.collides_with(body))
    }

    /// Goal contains the agent's center
    pub fn agent_reached_goal(&self) -> bool {
        match (self.agent(), self.goal()) {
            (Some(agent), Some(goal)) => goal.contains(agent.pos),
            _ => false,
        }
    }

    /// Agent has left the play area by more than the margin
    pub fn agent_out_of_bounds(&self) -> bool {
        self.agent().is_some_and(|agent| !self.bounds.contains(agent.pos))
    }

    /// Combined outcome: goal beats hazard beats bounds
    pub fn outcome(&self) -> Option<Outcome> {
        if self.agent_reached_goal() {
            Some(Outcome::ReachedGoal)
        } else if self.agent_hit_gravity_well() {
            Some(Outcome::HitGravityWell)
        } else if self.agent_out_of_bounds() {
            Some(Outcome::OutOfBounds)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn planet(x: f32, y: f32, pinned: bool, id: &str) -> Body {
        Body::new(BodyKind::Planet, Vec2::new(x, y), pinned, Some(id.to_string()))
    }

    fn sun_at(x: f32, y: f32) -> Body {
        Body::new(BodyKind::Sun, Vec2::new(x, y), true, None)
    }

    #[test]
    fn test_add_tracks_latest_agent_and_goal() {
        let mut world = World::new();
        let g1 = world.add_entity(Body::goal(Vec2::new(10.0, 10.0)));
        let a1 = world.add_entity(Body::agent(Vec2::ZERO));
        assert_eq!(world.goal_id(), Some(g1));
        assert_eq!(world.agent_id(), Some(a1));

        let g2 = world.add_entity(Body::goal(Vec2::new(20.0, 20.0)));
        let a2 = world.add_entity(Body::agent(Vec2::ONE));
        assert_eq!(world.goal_id(), Some(g2));
        assert_eq!(world.agent_id(), Some(a2));
        assert_eq!(world.len(), 4);
    }

    #[test]
    fn test_bodies_in_insertion_order() {
        let mut world = World::new();
        world.add_entity(planet(1.0, 0.0, true, "a"));
        world.add_entity(planet(2.0, 0.0, true, "b"));
        world.add_entity(planet(3.0, 0.0, true, "c"));
        world.remove(world.find_id("b").unwrap());
        world.add_entity(planet(4.0, 0.0, true, "d"));

        let ids: Vec<_> = world.bodies().map(|b| b.id.clone().unwrap()).collect();
        assert_eq!(ids, ["a", "c", "d"]);
    }

    #[test]
    fn test_entity_by_id() {
        let mut world = World::new();
        world.add_entity(planet(1.0, 0.0, true, "p1"));
        assert_eq!(world.entity_by_id("p1").unwrap().pos, Vec2::new(1.0, 0.0));
        assert!(world.entity_by_id("missing").is_none());
    }

    #[test]
    fn test_remove_agent_clears_handle_and_queries() {
        let mut world = World::new();
        world.add_entity(Body::goal(Vec2::ZERO));
        world.add_entity(sun_at(50.0, 0.0));
        world.add_entity(Body::agent(Vec2::new(-5000.0, 0.0)));
        assert!(world.agent_out_of_bounds());

        let removed = world.remove_agent().unwrap();
        assert_eq!(removed.kind, BodyKind::Agent);
        assert!(world.agent().is_none());
        assert_eq!(world.len(), 2);

        assert!(!world.agent_hit_gravity_well());
        assert!(!world.agent_reached_goal());
        assert!(!world.agent_out_of_bounds());
        assert_eq!(world.outcome(), None);
        // Removing again is a no-op
        assert!(world.remove_agent().is_none());
    }

    #[test]
    fn test_stale_handle_resolves_to_none() {
        let mut world = World::new();
        let a = world.add_entity(Body::agent(Vec2::ZERO));
        world.remove_agent();
        let b = world.add_entity(Body::agent(Vec2::ZERO));
        assert_ne!(a, b);
        assert!(world.get(a).is_none());
        assert!(world.get(b).is_some());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut world = World::new();
        world.add_entity(Body::goal(Vec2::ZERO));
        world.add_entity(Body::agent(Vec2::ZERO));
        world.add_entity(planet(100.0, 0.0, true, "p"));
        world.clear();
        assert!(world.is_empty());
        assert!(world.agent().is_none());
        assert!(world.goal().is_none());
        assert_eq!(world.bodies().count(), 0);

        // Clearing an empty world is fine
        world.clear();
        assert!(world.is_empty());
    }

    #[test]
    fn test_non_sources_exert_no_force() {
        let target = planet(0.0, 0.0, false, "t");
        for source in [Body::agent(Vec2::new(100.0, 0.0)), Body::goal(Vec2::new(100.0, 0.0))] {
            assert_eq!(pairwise_force(G, &source, &target), Vec2::ZERO);
        }
    }

    #[test]
    fn test_force_direction_and_magnitude() {
        let source = sun_at(300.0, 0.0);
        let target = Body::agent(Vec2::ZERO);
        let f = pairwise_force(G, &source, &target);
        let expected = G * SUN_MASS * AGENT_MASS / (300.0 * 300.0);
        assert!((f.length() - expected).abs() / expected < 1e-5);
        assert!(f.x > 0.0 && f.y == 0.0, "points from target to source");
    }

    #[test]
    fn test_force_clamped_at_contact() {
        let target = Body::agent(Vec2::ZERO);
        let contact = SUN_RADIUS + AGENT_RADIUS;
        let at_contact = pairwise_force(G, &sun_at(contact, 0.0), &target).length();
        let inside = pairwise_force(G, &sun_at(contact * 0.25, 0.0), &target).length();
        let touching = pairwise_force(G, &sun_at(0.001, 0.0), &target).length();
        assert!(at_contact.is_finite());
        assert!((inside - at_contact).abs() < 1e-3);
        assert!((touching - at_contact).abs() < 1e-3);
        // Coincident centers: no direction, no force
        assert_eq!(pairwise_force(G, &sun_at(0.0, 0.0), &target), Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_force_decreases_with_distance(d1 in 100.0f32..5000.0, delta in 1.0f32..5000.0) {
            let target = Body::agent(Vec2::ZERO);
            let near = pairwise_force(G, &sun_at(d1, 0.0), &target).length();
            let far = pairwise_force(G, &sun_at(d1 + delta, 0.0), &target).length();
            prop_assert!(far < near);
        }

        #[test]
        fn prop_force_bounded_inside_contact(d in 0.01f32..98.0) {
            let target = Body::agent(Vec2::ZERO);
            let limit = G * SUN_MASS * AGENT_MASS / (98.0 * 98.0);
            let f = pairwise_force(G, &sun_at(d, 0.0), &target).length();
            prop_assert!(f.is_finite());
            prop_assert!(f <= limit * 1.0001);
        }
    }

    #[test]
    fn test_gravity_force_excludes_self() {
        let mut world = World::new();
        let lone = world.add_entity(planet(0.0, 0.0, false, "lone"));
        assert_eq!(world.gravity_force(lone), Vec2::ZERO);
    }

    #[test]
    fn test_pinned_bodies_never_move() {
        let mut world = World::new();
        let sun = world.add_entity(sun_at(800.0, 450.0));
        let planet_id = world.add_entity(planet(700.0, 450.0, true, "p"));
        world.get_mut(sun).unwrap().vel = Vec2::new(100.0, 100.0);
        for _ in 0..60 {
            world.update(TIME_STEP);
        }
        assert_eq!(world.get(sun).unwrap().pos, Vec2::new(800.0, 450.0));
        assert_eq!(world.get(planet_id).unwrap().pos, Vec2::new(700.0, 450.0));
    }

    #[test]
    fn test_goal_never_moves() {
        let mut world = World::new();
        world.add_entity(sun_at(800.0, 450.0));
        let mut goal = Body::goal(Vec2::new(600.0, 450.0));
        goal.pinned = false;
        let goal_id = world.add_entity(goal);
        world.update(TIME_STEP);
        let goal = world.get(goal_id).unwrap();
        assert_eq!(goal.vel, Vec2::ZERO);
        assert_eq!(goal.pos, Vec2::new(600.0, 450.0));
    }

    #[test]
    fn test_unpinned_goal_with_orbit_stays_put() {
        let mut world = World::new();
        world.add_entity(Body::new(BodyKind::Sun, Vec2::new(800.0, 450.0), true, Some("sun".into())));
        let mut goal = Body::goal(Vec2::new(1100.0, 450.0)).with_orbit("sun");
        goal.pinned = false;
        let goal_id = world.add_entity(goal);

        let report = world.initialize_orbits();
        assert_eq!(report, OrbitReport::default());
        world.update(TIME_STEP);

        let goal = world.get(goal_id).unwrap();
        assert_eq!(goal.vel, Vec2::ZERO);
        assert_eq!(goal.pos, Vec2::new(1100.0, 450.0));
    }

    #[test]
    fn test_goal_never_moves_even_with_velocity() {
        let mut world = World::new();
        let mut goal = Body::goal(Vec2::new(300.0, 300.0)).with_velocity(Vec2::new(50.0, 0.0));
        goal.pinned = false;
        let goal_id = world.add_entity(goal);
        world.update(TIME_STEP);
        assert_eq!(world.get(goal_id).unwrap().pos, Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_mutual_orbit_with_goal_center_leaves_goal_still() {
        let mut world = World::new();
        let mut goal = Body::goal(Vec2::new(800.0, 450.0)).with_orbit("p");
        goal.id = Some("g".into());
        let goal_id = world.add_entity(goal);
        let p = world.add_entity(planet(1100.0, 450.0, false, "p").with_orbit("g"));

        world.initialize_orbits();
        assert_eq!(world.get(goal_id).unwrap().vel, Vec2::ZERO);
        // Goal has no mass, so the planet gets no orbital speed around it
        assert_eq!(world.get(p).unwrap().vel.length(), 0.0);
    }

    #[test]
    fn test_update_semi_implicit_euler() {
        let mut world = World::new();
        world.add_entity(sun_at(300.0, 0.0));
        let agent = world.add_entity(Body::agent(Vec2::ZERO));
        world.update(TIME_STEP);

        let accel = G * SUN_MASS / (300.0 * 300.0);
        let expected_vel = accel * TIME_STEP;
        let body = world.get(agent).unwrap();
        assert!((body.vel.x - expected_vel).abs() < 1e-4);
        // Position uses the new velocity
        assert!((body.pos.x - expected_vel * TIME_STEP).abs() < 1e-5);
        assert_eq!(body.trail.len(), 1);
    }

    #[test]
    fn test_force_pass_is_order_independent() {
        // Two free planets pull on each other symmetrically
        let mut world = World::new();
        let a = world.add_entity(planet(0.0, 0.0, false, "a"));
        let b = world.add_entity(planet(400.0, 0.0, false, "b"));
        world.update(TIME_STEP);
        let va = world.get(a).unwrap().vel;
        let vb = world.get(b).unwrap().vel;
        assert!((va + vb).length() < 1e-5);
        assert!(va.x > 0.0);
    }

    #[test]
    fn test_orbit_missing_target_skipped() {
        let mut world = World::new();
        let p = world.add_entity(planet(100.0, 0.0, false, "p").with_orbit("nobody"));
        let report = world.initialize_orbits();
        assert_eq!(report, OrbitReport { resolved: 0, skipped: 1 });
        assert_eq!(world.get(p).unwrap().vel, Vec2::ZERO);
    }

    #[test]
    fn test_orbit_degenerate_distance_skipped() {
        let mut world = World::new();
        world.add_entity(Body::new(BodyKind::Sun, Vec2::new(5.0, 5.0), true, Some("sun".into())));
        let p = world.add_entity(planet(5.0, 5.0, false, "p").with_orbit("sun"));
        let report = world.initialize_orbits();
        assert_eq!(report.skipped, 1);
        assert_eq!(world.get(p).unwrap().vel, Vec2::ZERO);
    }

    #[test]
    fn test_orbit_pinned_body_ignored() {
        let mut world = World::new();
        world.add_entity(Body::new(BodyKind::Sun, Vec2::ZERO, true, Some("sun".into())));
        let p = world.add_entity(planet(100.0, 0.0, true, "p").with_orbit("sun"));
        assert_eq!(world.initialize_orbits(), OrbitReport::default());
        assert_eq!(world.get(p).unwrap().vel, Vec2::ZERO);
    }

    #[test]
    fn test_orbit_circular_velocity() {
        let mut world = World::new();
        world.add_entity(Body::new(BodyKind::Sun, Vec2::new(800.0, 450.0), true, Some("sun".into())));
        let p = world.add_entity(planet(1100.0, 450.0, false, "p").with_orbit("sun"));
        let report = world.initialize_orbits();
        assert_eq!(report.resolved, 1);

        let vel = world.get(p).unwrap().vel;
        let expected = orbital_speed(G, SUN_MASS, 300.0);
        // perpendicular of (300, 0) is (0, 300): counter-clockwise tangent
        assert!(vel.x.abs() < 1e-4);
        assert!((vel.y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_mutual_orbit_opposite_velocities() {
        let mut world = World::new();
        let a = world.add_entity(planet(400.0, 450.0, false, "a").with_orbit("b"));
        let b = world.add_entity(
            Body::new(BodyKind::Sun, Vec2::new(800.0, 450.0), false, Some("b".into())).with_orbit("a"),
        );
        world.initialize_orbits();

        let va = world.get(a).unwrap().vel;
        let vb = world.get(b).unwrap().vel;
        // Both bodies get visited and each visit sets the pair together
        let speed_b = orbital_speed(G, PLANET_MASS, 400.0);
        let speed_a = orbital_speed(G, SUN_MASS, 400.0);
        assert!((vb.length() - speed_b).abs() < 1e-3);
        assert!((va.length() - speed_a).abs() < 1e-3);
        // Exactly opposite directions
        assert!((va.normalized() + vb.normalized()).length() < 1e-5);
        // Both tangential to the separation
        let sep = world.get(b).unwrap().pos - world.get(a).unwrap().pos;
        assert!(va.dot(sep).abs() < 1e-2);
        assert!(vb.dot(sep).abs() < 1e-2);
    }

    #[test]
    fn test_circular_orbit_stays_bounded() {
        let mut world = World::new();
        let sun = world.add_entity(Body::new(
            BodyKind::Sun,
            Vec2::new(800.0, 450.0),
            true,
            Some("sun".into()),
        ));
        let p = world.add_entity(planet(1100.0, 450.0, false, "p").with_orbit("sun"));
        world.initialize_orbits();

        let speed = world.get(p).unwrap().vel.length();
        let period = std::f32::consts::TAU * 300.0 / speed;
        let steps = (period / TIME_STEP).ceil() as usize;

        let center = world.get(sun).unwrap().pos;
        for _ in 0..steps {
            world.update(TIME_STEP);
            let r = world.get(p).unwrap().pos.distance_to(center);
            assert!((r - 300.0).abs() < 300.0 * 0.05, "radius drifted to {}", r);
        }
    }

    #[test]
    fn test_reached_goal_strict_boundary() {
        let mut world = World::new();
        world.add_entity(Body::goal(Vec2::new(1000.0, 300.0)));
        let agent = world.add_entity(Body::agent(Vec2::new(1000.0 + GOAL_RADIUS, 300.0)));
        assert!(!world.agent_reached_goal(), "on the edge is not inside");

        world.get_mut(agent).unwrap().pos.x = 1000.0 + GOAL_RADIUS - 0.5;
        assert!(world.agent_reached_goal());

        world.get_mut(agent).unwrap().pos.x = 1000.0 + GOAL_RADIUS + 10.0;
        assert!(!world.agent_reached_goal());
    }

    #[test]
    fn test_reached_goal_needs_both() {
        let mut world = World::new();
        world.add_entity(Body::agent(Vec2::ZERO));
        assert!(!world.agent_reached_goal());

        let mut world = World::new();
        world.add_entity(Body::goal(Vec2::ZERO));
        assert!(!world.agent_reached_goal());
    }

    #[test]
    fn test_out_of_bounds_each_side() {
        let m = BOUNDS_MARGIN;
        let cases = [
            (Vec2::new(-m, 450.0), Vec2::new(-m - 1.0, 450.0)),
            (Vec2::new(WORLD_WIDTH + m, 450.0), Vec2::new(WORLD_WIDTH + m + 1.0, 450.0)),
            (Vec2::new(800.0, -m), Vec2::new(800.0, -m - 1.0)),
            (Vec2::new(800.0, WORLD_HEIGHT + m), Vec2::new(800.0, WORLD_HEIGHT + m + 1.0)),
        ];
        for (edge, beyond) in cases {
            let mut world = World::new();
            let agent = world.add_entity(Body::agent(edge));
            assert!(!world.agent_out_of_bounds(), "{:?} should be in bounds", edge);
            world.get_mut(agent).unwrap().pos = beyond;
            assert!(world.agent_out_of_bounds(), "{:?} should be out", beyond);
        }
    }

    #[test]
    fn test_hazard_ignores_goal() {
        let mut world = World::new();
        world.add_entity(Body::goal(Vec2::ZERO));
        world.add_entity(Body::agent(Vec2::new(10.0, 0.0)));
        assert!(!world.agent_hit_gravity_well());
        assert_eq!(world.outcome(), Some(Outcome::ReachedGoal));
    }

    #[test]
    fn test_outcome_goal_beats_hazard() {
        let mut world = World::new();
        world.add_entity(Body::goal(Vec2::new(500.0, 500.0)));
        world.add_entity(Body::new(BodyKind::Asteroid, Vec2::new(540.0, 500.0), true, None));
        world.add_entity(Body::agent(Vec2::new(520.0, 500.0)));
        assert!(world.agent_reached_goal());
        assert!(world.agent_hit_gravity_well());
        assert_eq!(world.outcome(), Some(Outcome::ReachedGoal));
    }

    #[test]
    fn test_sun_scenario_hazard_matches_distance() {
        // Launched straight up past a sun: never touches it, eventually leaves
        let mut world = World::new();
        let sun = world.add_entity(sun_at(800.0, 450.0));
        let agent = world.add_entity(Body::agent(Vec2::new(200.0, 700.0)).with_velocity(Vec2::new(0.0, -300.0)));
        let contact = AGENT_RADIUS + SUN_RADIUS;

        let mut left = false;
        for _ in 0..2000 {
            world.update(TIME_STEP);
            let d = world.get(agent).unwrap().pos.distance_to(world.get(sun).unwrap().pos);
            assert_eq!(world.agent_hit_gravity_well(), d < contact);
            if world.agent_out_of_bounds() {
                left = true;
                break;
            }
        }
        assert!(left);
    }

    #[test]
    fn test_sun_scenario_aimed_at_sun_hits() {
        let mut world = World::new();
        let sun = world.add_entity(sun_at(800.0, 450.0));
        let agent = world.add_entity(Body::agent(Vec2::new(200.0, 700.0)).with_velocity(Vec2::new(300.0, -125.0)));
        let contact = AGENT_RADIUS + SUN_RADIUS;

        let mut hit = false;
        for _ in 0..600 {
            world.update(TIME_STEP);
            let d = world.get(agent).unwrap().pos.distance_to(world.get(sun).unwrap().pos);
            assert_eq!(world.agent_hit_gravity_well(), d < contact);
            if world.agent_hit_gravity_well() {
                hit = true;
                break;
            }
        }
        assert!(hit);
        assert_eq!(world.outcome(), Some(Outcome::HitGravityWell));
    }

    #[test]
    fn test_custom_settings() {
        let settings = Settings {
            gravity: 1.0,
            world_width: 100.0,
            world_height: 100.0,
            bounds_margin: 0.0,
            ..Settings::default()
        };
        let mut world = World::from_settings(&settings);
        assert_eq!(world.gravity(), 1.0);
        world.add_entity(Body::agent(Vec2::new(101.0, 50.0)));
        assert!(world.agent_out_of_bounds());
    }
}
