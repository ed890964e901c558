//! Intersection primitives
//!
//! Line/line, line/circle, point-in-polygon and closest-point queries. These
//! run per projectile per frame, so they allocate nothing except
//! [`nearest_boundary_point`], which positions the entity's bounds.

use glam::Vec2;

use super::shapes::{Circle, EntityHandle, LineSegment, WorldShape};
use crate::math::vector::{cross_product, get_point};

/// Crossing point of segments `a1→a2` and `b1→b2`
///
/// Parallel segments (zero determinant) never intersect, including
/// collinear overlapping ones. Crossings of the infinite lines outside
/// either segment are rejected.
pub fn line_line_intersection(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<Vec2> {
    let da = a2 - a1;
    let db = b2 - b1;
    let denom = cross_product(da, db);
    if denom == 0.0 {
        return None;
    }

    let offset = a1 - b1;
    let r = cross_product(db, offset) / denom;
    let s = cross_product(da, offset) / denom;
    if !(0.0..=1.0).contains(&r) || !(0.0..=1.0).contains(&s) {
        return None;
    }

    Some(a1 + da * r)
}

/// [`line_line_intersection`] for two segments
#[inline]
pub fn segment_intersection(a: &LineSegment, b: &LineSegment) -> Option<Vec2> {
    line_line_intersection(a.start, a.end, b.start, b.end)
}

/// Point on `seg` closest to `point`
///
/// A zero-length segment returns its start.
pub fn closest_point_on_segment(seg: &LineSegment, point: Vec2) -> Vec2 {
    let line_vec = seg.direction();
    let line_len_sq = line_vec.length_squared();
    if line_len_sq == 0.0 {
        return seg.start;
    }

    let t = ((point - seg.start).dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    seg.start + line_vec * t
}

/// Distance from `point` to the nearest point of `seg`
#[inline]
pub fn segment_point_distance(seg: &LineSegment, point: Vec2) -> f32 {
    (point - closest_point_on_segment(seg, point)).length()
}

/// Whether `seg` passes within `radius` of `center`
#[inline]
pub fn line_circle_collides(seg: &LineSegment, center: Vec2, radius: f32) -> bool {
    segment_point_distance(seg, center) <= radius
}

/// First point along `seg` that lies on or inside the circle
///
/// Returns the segment start if it is already inside.
pub fn line_circle_entry_point(seg: &LineSegment, center: Vec2, radius: f32) -> Option<Vec2> {
    let d = seg.direction();
    let f = seg.start - center;

    let c = f.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(seg.start);
    }

    let a = d.length_squared();
    if a == 0.0 {
        return None;
    }
    let b = 2.0 * f.dot(d);
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    (0.0..=1.0).contains(&t).then(|| seg.start + d * t)
}

/// Whether two circles touch or overlap
#[inline]
pub fn circles_overlap(a: &Circle, b: &Circle) -> bool {
    let reach = a.radius + b.radius;
    (a.center - b.center).length_squared() <= reach * reach
}

/// Even-odd (crossing number) test against an implicitly closed polygon
///
/// Points within ~1e-4 of an edge may land on either side depending on
/// rounding. Fewer than 3 vertices contain nothing.
pub fn point_in_polygon(point: Vec2, vertices: &[Vec2]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];
        if (vi.y > point.y) != (vj.y > point.y) {
            let x_cross = (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Point on the entity's boundary nearest `target`
///
/// For a circle, a target at the exact center resolves to the boundary point
/// along the entity's facing.
pub fn nearest_boundary_point(entity: &EntityHandle, target: Vec2) -> Vec2 {
    match entity.world_shape() {
        WorldShape::Circle(circle) => {
            let offset = target - circle.center;
            if offset == Vec2::ZERO {
                get_point(circle.center, circle.radius, entity.facing)
            } else {
                circle.center + offset.normalize_or_zero() * circle.radius
            }
        }
        WorldShape::Polygon(segments) => segments
            .iter()
            .map(|seg| closest_point_on_segment(seg, target))
            .min_by(|a, b| {
                a.distance_squared(target)
                    .partial_cmp(&b.distance_squared(target))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(entity.location),
        WorldShape::Point(location) => location,
    }
}
