//! Weapon arc targeting
//!
//! A weapon covers the cone `current_angle ± half_arc_width` out to `range`.
//! Angles are degrees, turn rates degrees per second.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::NEVER_AIMED;
use crate::geom::intersect::{line_circle_collides, segment_point_distance};
use crate::geom::shapes::{EntityHandle, LineSegment};
use crate::math::vector::{clamp_angle, get_angle, get_distance, get_point, get_shortest_rotation};

/// Host snapshot of a weapon mount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub location: Vec2,
    /// Current aim, degrees in [0, 360)
    pub current_angle: f32,
    /// Half the firing arc, degrees
    pub half_arc_width: f32,
    pub range: f32,
    /// Degrees per second
    pub turn_rate: f32,
}

impl Weapon {
    /// Normalizes the angle and clamps negative widths, ranges and turn rates to 0
    pub fn new(
        location: Vec2,
        current_angle: f32,
        half_arc_width: f32,
        range: f32,
        turn_rate: f32,
    ) -> Self {
        Self {
            location,
            current_angle: clamp_angle(current_angle),
            half_arc_width: half_arc_width.clamp(0.0, 180.0),
            range: range.max(0.0),
            turn_rate: turn_rate.max(0.0),
        }
    }

    /// Facing from the weapon toward `point`
    #[inline]
    pub fn bearing_to(&self, point: Vec2) -> f32 {
        get_angle(self.location, point)
    }

    /// Degrees the bearing to `point` lies outside the arc (0 when inside)
    pub fn distance_from_arc(&self, point: Vec2) -> f32 {
        let off_center = get_shortest_rotation(self.current_angle, self.bearing_to(point)).abs();
        (off_center - self.half_arc_width).max(0.0)
    }

    /// Whether any part of the entity's collision disk is inside the arc and in range
    ///
    /// Accepts if the entity's center bears inside the arc or the centerline
    /// crosses its disk; otherwise checks whether either arc edge passes
    /// within its collision radius.
    pub fn is_within_arc(&self, entity: &EntityHandle) -> bool {
        let radius = entity.collision_radius;
        if get_distance(self.location, entity.location) - radius > self.range {
            return false;
        }

        if self.distance_from_arc(entity.location) == 0.0 {
            return true;
        }

        let ray = |angle: f32| {
            LineSegment::new(self.location, get_point(self.location, self.range, angle))
        };
        if line_circle_collides(&ray(self.current_angle), entity.location, radius) {
            return true;
        }

        [
            self.current_angle - self.half_arc_width,
            self.current_angle + self.half_arc_width,
        ]
        .into_iter()
        .any(|edge| segment_point_distance(&ray(edge), entity.location) <= radius)
    }

    /// Seconds to rotate onto `point`
    ///
    /// A weapon that cannot turn returns 0 if the point is already inside its
    /// arc and [`NEVER_AIMED`] otherwise.
    pub fn time_to_aim(&self, point: Vec2) -> f32 {
        if !(self.turn_rate > 0.0) {
            return if self.distance_from_arc(point) == 0.0 {
                0.0
            } else {
                NEVER_AIMED
            };
        }
        get_shortest_rotation(self.current_angle, self.bearing_to(point)).abs() / self.turn_rate
    }

    /// Turn toward `point` by at most `turn_rate * dt`, the short way round
    pub fn aim_towards_point(&mut self, point: Vec2, dt: f32) {
        if !(dt > 0.0) {
            return;
        }
        let delta = get_shortest_rotation(self.current_angle, self.bearing_to(point));
        let max_delta = (self.turn_rate * dt).max(0.0);
        self.current_angle = clamp_angle(self.current_angle + delta.clamp(-max_delta, max_delta));
    }

    /// Lead point for a projectile fired at `target` (see [`best_intercept_point`])
    pub fn intercept_point(&self, projectile_speed: f32, target: &EntityHandle) -> Option<Vec2> {
        best_intercept_point(self.location, projectile_speed, target.location, target.velocity)
    }
}

/// Where a projectile at `projectile_speed` meets a target moving at constant velocity
///
/// Solves `|r + v·t| = s·t` for the earliest `t > 0`. Returns `None` when the
/// projectile can never catch the target.
pub fn best_intercept_point(
    shooter: Vec2,
    projectile_speed: f32,
    target_location: Vec2,
    target_velocity: Vec2,
) -> Option<Vec2> {
    let r = target_location - shooter;
    let c = r.length_squared();
    if c == 0.0 {
        return Some(target_location);
    }

    let a = target_velocity.length_squared() - projectile_speed * projectile_speed;
    let b = 2.0 * r.dot(target_velocity);

    let t = if a.abs() < 1e-6 {
        // Equal speeds: the quadratic degenerates to b·t + c = 0
        if b == 0.0 {
            return None;
        }
        -c / b
    } else {
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let t1 = (-b - root) / (2.0 * a);
        let t2 = (-b + root) / (2.0 * a);
        match (t1 > 0.0, t2 > 0.0) {
            (true, true) => t1.min(t2),
            (true, false) => t1,
            (false, true) => t2,
            (false, false) => return None,
        }
    };

    (t > 0.0 && t.is_finite()).then(|| target_location + target_velocity * t)
}
