//! Collision queries against entity shapes
//!
//! Composes the intersection primitives with an entity's resolved shape:
//! the collision circle when it has no exact bounds, the positioned polygon
//! when it does, or a bare point when its bounds are degenerate.

use glam::Vec2;

use super::intersect::{
    line_circle_collides, line_line_intersection, nearest_boundary_point, point_in_polygon,
    segment_point_distance,
};
use super::shapes::{EntityHandle, LineSegment, WorldShape};
use crate::consts::EDGE_TOLERANCE;

/// Where a line hits `target`, if it does
///
/// - Circle: the circle's center when the line passes within its radius.
/// - Polygon: of every boundary segment the line crosses, the crossing
///   *farthest* from `line_start`. On equal distance the later segment wins.
/// - Degenerate bounds: the entity location when the line passes through it.
pub fn get_collision_point(
    line_start: Vec2,
    line_end: Vec2,
    target: &EntityHandle,
) -> Option<Vec2> {
    let line = LineSegment::new(line_start, line_end);
    match target.world_shape() {
        WorldShape::Circle(circle) => {
            line_circle_collides(&line, circle.center, circle.radius).then_some(circle.center)
        }
        WorldShape::Polygon(segments) => {
            let mut farthest: Option<(Vec2, f32)> = None;
            for seg in &segments {
                let Some(hit) = line_line_intersection(line_start, line_end, seg.start, seg.end)
                else {
                    continue;
                };
                let dist_sq = hit.distance_squared(line_start);
                if farthest.is_none_or(|(_, best)| dist_sq >= best) {
                    farthest = Some((hit, dist_sq));
                }
            }
            farthest.map(|(hit, _)| hit)
        }
        WorldShape::Point(location) => {
            (segment_point_distance(&line, location) <= EDGE_TOLERANCE).then_some(location)
        }
    }
}

/// Whether the line touches `target`, counting lines that start inside it
pub fn get_collides(line_start: Vec2, line_end: Vec2, target: &EntityHandle) -> bool {
    get_collision_point(line_start, line_end, target).is_some()
        || is_point_within_bounds(line_start, target)
}

/// Whether `point` lies inside the entity's shape
///
/// Exact bounds are positioned with the entity's current location and facing
/// before the even-odd test.
pub fn is_point_within_bounds(point: Vec2, entity: &EntityHandle) -> bool {
    match entity.world_shape() {
        WorldShape::Circle(circle) => circle.contains(point),
        shape @ WorldShape::Polygon(_) => point_in_polygon(point, &shape.vertices()),
        WorldShape::Point(location) => point.distance(location) <= EDGE_TOLERANCE,
    }
}

/// Whether `point` lies inside the entity's collision circle, ignoring bounds
#[inline]
pub fn is_point_within_collision_circle(point: Vec2, entity: &EntityHandle) -> bool {
    entity.collision_circle().contains(point)
}

/// Point on the entity's boundary nearest `point`
#[inline]
pub fn get_nearest_point_on_bounds(point: Vec2, entity: &EntityHandle) -> Vec2 {
    nearest_boundary_point(entity, point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::shapes::Bounds;

    fn box_bounds(half_w: f32, half_h: f32) -> Bounds {
        Bounds::from_vertices(&[
            Vec2::new(-half_w, -half_h),
            Vec2::new(half_w, -half_h),
            Vec2::new(half_w, half_h),
            Vec2::new(-half_w, half_h),
        ])
    }

    #[test]
    fn test_circle_target_returns_center() {
        let target = EntityHandle::new(Vec2::new(50.0, 0.0), 0.0, 10.0);
        let hit = get_collision_point(Vec2::ZERO, Vec2::new(100.0, 5.0), &target);
        assert_eq!(hit, Some(Vec2::new(50.0, 0.0)));

        let miss = get_collision_point(Vec2::ZERO, Vec2::new(100.0, 40.0), &target);
        assert_eq!(miss, None);
    }

    #[test]
    fn test_polygon_target_returns_farthest_hit() {
        let bounds = box_bounds(10.0, 10.0);
        let target = EntityHandle::new(Vec2::new(50.0, 0.0), 0.0, 15.0).with_bounds(&bounds);

        // Enters at x=40, leaves at x=60
        let hit = get_collision_point(Vec2::ZERO, Vec2::new(100.0, 0.0), &target).unwrap();
        assert!((hit - Vec2::new(60.0, 0.0)).length() < 1e-4);

        // From the other side the far edge flips
        let hit = get_collision_point(Vec2::new(100.0, 0.0), Vec2::ZERO, &target).unwrap();
        assert!((hit - Vec2::new(40.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_polygon_target_single_crossing() {
        let bounds = box_bounds(10.0, 10.0);
        let target = EntityHandle::new(Vec2::new(50.0, 0.0), 0.0, 15.0).with_bounds(&bounds);

        // Ends inside the hull: only the near edge is crossed
        let hit = get_collision_point(Vec2::ZERO, Vec2::new(50.0, 0.0), &target).unwrap();
        assert!((hit - Vec2::new(40.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_polygon_miss_inside_collision_circle() {
        // A line grazing the collision circle but not the hull misses
        let bounds = box_bounds(5.0, 5.0);
        let target = EntityHandle::new(Vec2::new(50.0, 0.0), 0.0, 20.0).with_bounds(&bounds);
        let line_end = Vec2::new(100.0, 15.0);
        let line_start = Vec2::new(0.0, 15.0);
        assert_eq!(get_collision_point(line_start, line_end, &target), None);
        assert!(!get_collides(line_start, line_end, &target));
    }

    #[test]
    fn test_polygon_uses_facing() {
        // Long thin hull along local x; rotated 90° it lies along world y
        let bounds = box_bounds(20.0, 2.0);
        let target = EntityHandle::new(Vec2::ZERO, 90.0, 20.0).with_bounds(&bounds);

        assert!(is_point_within_bounds(Vec2::new(0.0, 15.0), &target));
        assert!(!is_point_within_bounds(Vec2::new(15.0, 0.0), &target));

        let hit = get_collision_point(Vec2::new(-50.0, 15.0), Vec2::new(50.0, 15.0), &target);
        assert!((hit.unwrap() - Vec2::new(2.0, 15.0)).length() < 1e-3);
    }

    #[test]
    fn test_degenerate_bounds_act_as_point() {
        let bounds = Bounds::from_vertices(&[Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0)]);
        let target = EntityHandle::new(Vec2::new(10.0, 10.0), 0.0, 30.0).with_bounds(&bounds);

        let hit = get_collision_point(Vec2::new(0.0, 0.0), Vec2::new(20.0, 20.0), &target);
        assert_eq!(hit, Some(Vec2::new(10.0, 10.0)));
        assert_eq!(
            get_collision_point(Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0), &target),
            None
        );
        assert!(is_point_within_bounds(Vec2::new(10.0, 10.0), &target));
        assert!(!is_point_within_bounds(Vec2::new(11.0, 10.0), &target));
    }

    #[test]
    fn test_point_within_circle_bounds() {
        let target = EntityHandle::new(Vec2::new(0.0, 0.0), 0.0, 10.0);
        assert!(is_point_within_bounds(Vec2::new(6.0, 8.0), &target));
        assert!(!is_point_within_bounds(Vec2::new(6.0, 8.1), &target));
    }

    #[test]
    fn test_collision_circle_ignores_bounds() {
        let bounds = box_bounds(2.0, 2.0);
        let target = EntityHandle::new(Vec2::ZERO, 0.0, 10.0).with_bounds(&bounds);
        assert!(is_point_within_collision_circle(Vec2::new(8.0, 0.0), &target));
        assert!(!is_point_within_bounds(Vec2::new(8.0, 0.0), &target));
    }

    #[test]
    fn test_get_collides_line_starting_inside() {
        let bounds = box_bounds(10.0, 10.0);
        let target = EntityHandle::new(Vec2::ZERO, 0.0, 15.0).with_bounds(&bounds);
        // Entirely inside: no edge crossing, but it still collides
        assert!(get_collides(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0), &target));
    }

    #[test]
    fn test_nearest_point_on_bounds() {
        let bounds = box_bounds(10.0, 10.0);
        let target = EntityHandle::new(Vec2::ZERO, 0.0, 15.0).with_bounds(&bounds);
        let p = get_nearest_point_on_bounds(Vec2::new(0.0, 30.0), &target);
        assert!((p - Vec2::new(0.0, 10.0)).length() < 1e-4);
    }
}
