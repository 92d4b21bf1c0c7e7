//! Drag-to-aim slingshot
//!
//! Pulling back from the anchor aims the launch in the opposite direction.
//! The pull is clamped to `max_radius`, and launch speed scales with it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::math::Vec2Ext;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slingshot {
    pub anchor: Vec2,
    pub max_radius: f32,
    pub launch_multiplier: f32,
    drag_pos: Vec2,
    dragging: bool,
}

impl Default for Slingshot {
    fn default() -> Self {
        Self::new(Vec2::new(SPAWN_X, SPAWN_Y))
    }
}

impl Slingshot {
    pub fn new(anchor: Vec2) -> Self {
        Self {
            anchor,
            max_radius: SLINGSHOT_MAX_RADIUS,
            launch_multiplier: SLINGSHOT_LAUNCH_MULTIPLIER,
            drag_pos: anchor,
            dragging: false,
        }
    }

    /// Move the anchor (new level / retry); drops any drag in progress
    pub fn set_anchor(&mut self, anchor: Vec2) {
        self.anchor = anchor;
        self.cancel_drag();
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn drag_position(&self) -> Vec2 {
        self.drag_pos
    }

    /// Is `point` close enough to the anchor to grab it
    pub fn can_grab(&self, point: Vec2) -> bool {
        point.distance_to(self.anchor) < SLINGSHOT_GRAB_RADIUS
    }

    pub fn start_drag(&mut self, pos: Vec2) {
        self.dragging = true;
        self.drag_pos = pos;
    }

    /// Follow the pointer, clamped to `max_radius` from the anchor
    pub fn update_drag(&mut self, pos: Vec2) {
        if !self.dragging {
            return;
        }

        let diff = pos - self.anchor;
        self.drag_pos = if diff.length() > self.max_radius {
            self.anchor + diff.normalized() * self.max_radius
        } else {
            pos
        };
    }

    /// Release; returns the launch velocity unless the pull was negligible
    pub fn end_drag(&mut self) -> Option<Vec2> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;

        let velocity = self.launch_velocity();
        if velocity.length() > 1.0 {
            Some(velocity)
        } else {
            None
        }
    }

    pub fn cancel_drag(&mut self) {
        self.dragging = false;
        self.drag_pos = self.anchor;
    }

    /// Launch goes opposite the pull
    pub fn launch_velocity(&self) -> Vec2 {
        (self.anchor - self.drag_pos) * self.launch_multiplier
    }

    /// Pull strength in [0, 1]
    pub fn power(&self) -> f32 {
        ((self.drag_pos - self.anchor).length() / self.max_radius).min(1.0)
    }
}
