//! Geometry value types and entity snapshots
//!
//! Exact bounds are stored in the entity's local frame (facing 0, centered on
//! the entity) and positioned into world space per query from the entity's
//! current location and facing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::math::vector::rotate;

/// A line segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Vec2,
    pub end: Vec2,
}

impl LineSegment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Vector from start to end
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.direction().length()
    }

    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        (self.start + self.end) * 0.5
    }

    /// Rotate by `facing` degrees around the origin, then translate to `location`
    pub fn transformed(&self, location: Vec2, facing: f32) -> Self {
        Self {
            start: rotate(self.start, facing) + location,
            end: rotate(self.end, facing) + location,
        }
    }
}

/// A circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    /// Always >= 0
    pub radius: f32,
}

impl Circle {
    /// Negative radii are clamped to zero
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Inclusive containment (points on the edge are inside)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }
}

/// An entity's collision shape, in its local frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Bounds {
    /// Circle fallback, centered on the entity
    Circle { radius: f32 },
    /// Closed loop: `segments[i].end == segments[i + 1].start`, wrapping
    Polygon(Vec<LineSegment>),
}

impl Bounds {
    /// Build a closed polygon loop from ordered vertices
    pub fn from_vertices(vertices: &[Vec2]) -> Self {
        let n = vertices.len();
        let segments = if n < 2 {
            Vec::new()
        } else {
            (0..n)
                .map(|i| LineSegment::new(vertices[i], vertices[(i + 1) % n]))
                .collect()
        };
        Bounds::Polygon(segments)
    }

    /// A polygon with fewer than 3 segments cannot enclose anything
    pub fn is_degenerate(&self) -> bool {
        match self {
            Bounds::Circle { .. } => false,
            Bounds::Polygon(segments) => segments.len() < 3,
        }
    }

    /// Segments positioned in world space (empty for circle bounds)
    pub fn world_segments(&self, location: Vec2, facing: f32) -> Vec<LineSegment> {
        match self {
            Bounds::Circle { .. } => Vec::new(),
            Bounds::Polygon(segments) => segments
                .iter()
                .map(|s| s.transformed(location, facing))
                .collect(),
        }
    }
}

/// Host-supplied, read-only snapshot of an entity for one query
#[derive(Debug, Clone, Copy)]
pub struct EntityHandle<'a> {
    pub location: Vec2,
    pub velocity: Vec2,
    /// Degrees
    pub facing: f32,
    pub collision_radius: f32,
    /// Exact bounds, if the host has them for this entity
    pub bounds: Option<&'a Bounds>,
}

impl<'a> EntityHandle<'a> {
    pub fn new(location: Vec2, facing: f32, collision_radius: f32) -> Self {
        Self {
            location,
            velocity: Vec2::ZERO,
            facing,
            collision_radius,
            bounds: None,
        }
    }

    pub fn with_bounds(mut self, bounds: &'a Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// The collision circle, ignoring exact bounds
    #[inline]
    pub fn collision_circle(&self) -> Circle {
        Circle::new(self.location, self.collision_radius)
    }

    /// Resolve the entity's shape in world space
    ///
    /// No bounds falls back to the collision circle; a degenerate polygon
    /// collapses to a point at the entity's location.
    pub fn world_shape(&self) -> WorldShape {
        match self.bounds {
            None => WorldShape::Circle(self.collision_circle()),
            Some(Bounds::Circle { radius }) => {
                WorldShape::Circle(Circle::new(self.location, *radius))
            }
            Some(bounds) if bounds.is_degenerate() => WorldShape::Point(self.location),
            Some(bounds) => {
                WorldShape::Polygon(bounds.world_segments(self.location, self.facing))
            }
        }
    }
}

/// An entity shape resolved into world space
#[derive(Debug, Clone, PartialEq)]
pub enum WorldShape {
    Circle(Circle),
    /// At least 3 segments
    Polygon(Vec<LineSegment>),
    /// Degenerate bounds
    Point(Vec2),
}

impl WorldShape {
    /// Polygon vertices in loop order (segment starts); empty for other shapes
    pub fn vertices(&self) -> Vec<Vec2> {
        match self {
            WorldShape::Polygon(segments) => segments.iter().map(|s| s.start).collect(),
            _ => Vec::new(),
        }
    }
}
