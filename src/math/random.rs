//! Random point generators
//!
//! The caller owns the RNG (usually the session's seeded `Pcg32`), so results
//! are reproducible from a seed and tests never share hidden state.

use glam::Vec2;
use rand::Rng;

use super::vector::get_point;
use crate::geom::intersect::point_in_polygon;

/// Attempts before `random_point_in_polygon` gives up
pub const MAX_POLYGON_SAMPLES: u32 = 64;

/// Uniform in `[lo, hi)`; never panics on an empty range
#[inline]
fn lerp_random<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

/// Uniformly distributed point inside a circle
pub fn random_point_in_circle<R: Rng + ?Sized>(rng: &mut R, center: Vec2, radius: f32) -> Vec2 {
    // sqrt keeps the density uniform over area
    let r = radius * rng.random::<f32>().sqrt();
    get_point(center, r, lerp_random(rng, 0.0, 360.0))
}

/// Random point on a circle's edge
pub fn random_point_on_circumference<R: Rng + ?Sized>(
    rng: &mut R,
    center: Vec2,
    radius: f32,
) -> Vec2 {
    get_point(center, radius, lerp_random(rng, 0.0, 360.0))
}

/// Uniformly distributed point inside a cone (circle sector)
///
/// The sector runs counter-clockwise from `min_angle` to `max_angle`.
pub fn random_point_in_cone<R: Rng + ?Sized>(
    rng: &mut R,
    center: Vec2,
    radius: f32,
    min_angle: f32,
    max_angle: f32,
) -> Vec2 {
    let r = radius * rng.random::<f32>().sqrt();
    get_point(center, r, lerp_random(rng, min_angle, max_angle))
}

/// Point inside a polygon by rejection sampling its bounding box
///
/// Returns `None` for fewer than 3 vertices or when every sample misses
/// (very thin polygons).
pub fn random_point_in_polygon<R: Rng + ?Sized>(rng: &mut R, vertices: &[Vec2]) -> Option<Vec2> {
    if vertices.len() < 3 {
        return None;
    }
    let (min, max) = vertices
        .iter()
        .fold((vertices[0], vertices[0]), |(lo, hi), v| (lo.min(*v), hi.max(*v)));

    for _ in 0..MAX_POLYGON_SAMPLES {
        let candidate = Vec2::new(
            lerp_random(rng, min.x, max.x),
            lerp_random(rng, min.y, max.y),
        );
        if point_in_polygon(candidate, vertices) {
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vector::{get_angle, get_distance};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_point_in_circle_stays_inside() {
        let mut rng = Pcg32::seed_from_u64(7);
        let center = Vec2::new(100.0, -50.0);
        for _ in 0..500 {
            let p = random_point_in_circle(&mut rng, center, 25.0);
            assert!(get_distance(p, center) <= 25.0 + 1e-3);
        }
    }

    #[test]
    fn test_point_on_circumference() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..100 {
            let p = random_point_on_circumference(&mut rng, Vec2::ZERO, 40.0);
            assert!((p.length() - 40.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_point_in_cone() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let p = random_point_in_cone(&mut rng, Vec2::ZERO, 100.0, 10.0, 80.0);
            if p.length() > 1.0 {
                let angle = get_angle(Vec2::ZERO, p);
                assert!((9.5..=80.5).contains(&angle), "angle {angle}");
            }
        }
    }

    #[test]
    fn test_empty_cone_does_not_panic() {
        let mut rng = Pcg32::seed_from_u64(3);
        let p = random_point_in_cone(&mut rng, Vec2::ZERO, 10.0, 45.0, 45.0);
        assert!(p.length() <= 10.0 + 1e-3);
    }

    #[test]
    fn test_point_in_polygon_sampling() {
        let mut rng = Pcg32::seed_from_u64(5);
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        for _ in 0..50 {
            let p = random_point_in_polygon(&mut rng, &square).unwrap();
            assert!(p.x >= 0.0 && p.x <= 10.0 && p.y >= 0.0 && p.y <= 10.0);
        }
        assert!(random_point_in_polygon(&mut rng, &square[..2]).is_none());
    }

    #[test]
    fn test_same_seed_same_points() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(
                random_point_in_circle(&mut a, Vec2::ZERO, 10.0),
                random_point_in_circle(&mut b, Vec2::ZERO, 10.0)
            );
        }
    }
}
