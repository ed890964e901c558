//! Scalar and vector math
//!
//! Leaf of the crate: everything else builds on these helpers.

pub mod random;
pub mod trig;
pub mod vector;

pub use random::{
    random_point_in_circle, random_point_in_cone, random_point_in_polygon,
    random_point_on_circumference,
};
pub use vector::{
    clamp_angle, clamp_length, cross_product, equiv, get_angle, get_angle_strict,
    get_directional_vector, get_distance, get_distance_squared, get_facing, get_point,
    get_points_along_circumference, get_shortest_rotation, is_point_within_circle,
    is_zero_vector, rotate, rotate_around_pivot, set_length,
};
