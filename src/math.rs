//! 2D vector helpers
//!
//! Arithmetic, dot product and magnitude come straight from `glam::Vec2`.
//! This module adds the handful of operations the simulation needs with
//! fixed semantics: normalization that never divides by a tiny magnitude,
//! a counter-clockwise perpendicular, rotation by an angle and distances.

use glam::Vec2;

use crate::consts::NORMALIZE_EPSILON;

/// Simulation-flavored operations on `Vec2`
pub trait Vec2Ext {
    /// Unit vector, or zero if the magnitude is below `NORMALIZE_EPSILON`
    fn normalized(self) -> Vec2;
    /// Rotated 90 degrees counter-clockwise: `(-y, x)`
    fn perpendicular(self) -> Vec2;
    /// Rotated by `angle` radians (counter-clockwise)
    fn rotated(self, angle: f32) -> Vec2;
    fn distance_to(self, other: Vec2) -> f32;
    fn distance_squared_to(self, other: Vec2) -> f32;
}

impl Vec2Ext for Vec2 {
    #[inline]
    fn normalized(self) -> Vec2 {
        let mag = self.length();
        if mag < NORMALIZE_EPSILON {
            return Vec2::ZERO;
        }
        self / mag
    }

    #[inline]
    fn perpendicular(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    #[inline]
    fn rotated(self, angle: f32) -> Vec2 {
        let (s, c) = angle.sin_cos();
        Vec2::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }

    #[inline]
    fn distance_to(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    #[inline]
    fn distance_squared_to(self, other: Vec2) -> f32 {
        (self - other).length_squared()
    }
}

/// Linear interpolation from `a` (t = 0) to `b` (t = 1); `t` is not clamped
#[inline]
pub fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Build a vector from a `[x, y]` pair (level files store points this way)
#[inline]
pub fn vec2_from_pair(pair: [f32; 2]) -> Vec2 {
    Vec2::new(pair[0], pair[1])
}
