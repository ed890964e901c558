//! Facing/angle conversions and vector helpers
//!
//! Angles are degrees. Facings are normalized to [0, 360).
//! Zero-length vectors never divide by zero; each helper documents its default.

use glam::Vec2;

use super::trig;

/// Normalize an angle to [0, 360)
///
/// Non-finite input returns 0.
#[inline]
pub fn clamp_angle(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let mut angle = degrees % 360.0;
    if angle < 0.0 {
        angle += 360.0;
    }
    // -1e-8 + 360 rounds to 360
    if angle >= 360.0 { 0.0 } else { angle }
}

/// Signed rotation from `current` to `target`, in (-180, 180]
pub fn get_shortest_rotation(current: f32, target: f32) -> f32 {
    let mut delta = clamp_angle(target) - clamp_angle(current);
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta <= -180.0 {
        delta += 360.0;
    }
    delta
}

#[inline]
pub fn is_zero_vector(v: Vec2) -> bool {
    v.x == 0.0 && v.y == 0.0
}

/// Facing of a vector in degrees (fast atan2). A zero vector faces 0.
pub fn get_facing(v: Vec2) -> f32 {
    if is_zero_vector(v) {
        return 0.0;
    }
    clamp_angle(trig::atan2(v.y, v.x).to_degrees())
}

/// Like [`get_facing`] but with the exact standard-library atan2
pub fn get_angle_strict(v: Vec2) -> f32 {
    if is_zero_vector(v) {
        return 0.0;
    }
    clamp_angle(v.y.atan2(v.x).to_degrees())
}

/// Facing from `from` toward `to`
#[inline]
pub fn get_angle(from: Vec2, to: Vec2) -> f32 {
    get_facing(to - from)
}

/// Unit vector from `src` toward `dst`, or zero if they coincide
pub fn get_directional_vector(src: Vec2, dst: Vec2) -> Vec2 {
    let diff = dst - src;
    if is_zero_vector(diff) {
        return Vec2::ZERO;
    }
    diff.normalize_or_zero()
}

/// Rotate `v` counter-clockwise by `degrees`
pub fn rotate(v: Vec2, degrees: f32) -> Vec2 {
    if degrees == 0.0 {
        return v;
    }
    let (s, c) = trig::sin_cos(degrees.to_radians());
    Vec2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

/// Rotate `v` around `pivot` by `degrees`
#[inline]
pub fn rotate_around_pivot(v: Vec2, pivot: Vec2, degrees: f32) -> Vec2 {
    rotate(v - pivot, degrees) + pivot
}

/// 2D cross product (z of the 3D cross product)
#[inline]
pub fn cross_product(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Rescale `v` to `length`. A zero vector is returned unchanged.
pub fn set_length(v: Vec2, length: f32) -> Vec2 {
    if is_zero_vector(v) {
        return v;
    }
    v.normalize_or_zero() * length
}

/// Shrink `v` to at most `max_length`. A zero vector is returned unchanged.
pub fn clamp_length(v: Vec2, max_length: f32) -> Vec2 {
    if is_zero_vector(v) || v.length_squared() <= max_length * max_length {
        return v;
    }
    set_length(v, max_length)
}

#[inline]
pub fn get_distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

#[inline]
pub fn get_distance_squared(a: Vec2, b: Vec2) -> f32 {
    (b - a).length_squared()
}

/// Point on the circle around `center` at `degrees`
pub fn get_point(center: Vec2, radius: f32, degrees: f32) -> Vec2 {
    let (s, c) = trig::sin_cos(degrees.to_radians());
    center + Vec2::new(c * radius, s * radius)
}

/// `count` evenly spaced points on a circle, starting at `offset` degrees
pub fn get_points_along_circumference(
    center: Vec2,
    radius: f32,
    count: usize,
    offset: f32,
) -> Vec<Vec2> {
    if count == 0 {
        return Vec::new();
    }
    let step = 360.0 / count as f32;
    (0..count)
        .map(|i| get_point(center, radius, offset + step * i as f32))
        .collect()
}

#[inline]
pub fn is_point_within_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    get_distance_squared(point, center) <= radius * radius
}

/// Approximate equality, scaled to the larger magnitude (never tighter than 1.0)
#[inline]
pub fn equiv(a: f32, b: f32) -> bool {
    (a - b).abs() <= f32::EPSILON * 4.0 * a.abs().max(b.abs()).max(1.0)
}
