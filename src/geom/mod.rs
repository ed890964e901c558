//! Collision geometry
//!
//! All queries are pure functions over host-supplied snapshots:
//! - No global state
//! - No allocation on the circle path
//! - Safe to call from any thread

pub mod collision;
pub mod intersect;
pub mod shapes;

pub use collision::{
    get_collides, get_collision_point, get_nearest_point_on_bounds, is_point_within_bounds,
    is_point_within_collision_circle,
};
pub use intersect::{
    circles_overlap, closest_point_on_segment, line_circle_collides, line_circle_entry_point,
    line_line_intersection, nearest_boundary_point, point_in_polygon, segment_intersection,
    segment_point_distance,
};
pub use shapes::{Bounds, Circle, EntityHandle, LineSegment, WorldShape};
