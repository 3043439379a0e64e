//! Bounding sphere implementation.

use super::Vector3;
use serde::{Deserialize, Serialize};

/// A bounding sphere defined by center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sphere {
    /// Center of the sphere.
    pub center: Vector3,
    /// Radius of the sphere.
    pub radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    #[inline]
    pub const fn new(center: Vector3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Create a sphere that bounds an array of points.
    pub fn from_points(points: &[Vector3]) -> Self {
        if points.is_empty() {
            return Self::default();
        }

        // Bounding box center first, then max distance from it.
        let mut min = points[0];
        let mut max = points[0];
        for p in points.iter().skip(1) {
            min = min.min(p);
            max = max.max(p);
        }
        let center = (min + max) * 0.5;

        let mut max_dist_sq = 0.0_f32;
        for p in points {
            max_dist_sq = max_dist_sq.max(center.distance_to_squared(p));
        }

        Self {
            center,
            radius: max_dist_sq.sqrt(),
        }
    }

    /// Check if a point is inside the sphere.
    #[inline]
    pub fn contains_point(&self, point: &Vector3) -> bool {
        self.center.distance_to_squared(point) <= self.radius * self.radius
    }

    /// Return a copy expanded by `amount` in every direction.
    #[inline]
    pub fn expanded(&self, amount: f32) -> Self {
        Self {
            center: self.center,
            radius: self.radius + amount,
        }
    }

    /// Check if approximately equal.
    #[inline]
    pub fn approx_eq(&self, other: &Sphere, epsilon: f32) -> bool {
        self.center.approx_eq(&other.center, epsilon)
            && (self.radius - other.radius).abs() < epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point() {
        let s = Sphere::new(Vector3::ZERO, 1.0);
        assert!(s.contains_point(&Vector3::ZERO));
        assert!(s.contains_point(&Vector3::new(0.5, 0.5, 0.0)));
        assert!(!s.contains_point(&Vector3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_from_points() {
        let pts = [
            Vector3::new(-2.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ];
        let s = Sphere::from_points(&pts);
        assert!(s.center.approx_eq(&Vector3::new(0.0, 0.5, 0.0), 1e-6));
        for p in &pts {
            assert!(s.contains_point(p));
        }
    }

    #[test]
    fn test_expanded() {
        let s = Sphere::new(Vector3::ZERO, 10.0).expanded(15.0);
        assert!((s.radius - 25.0).abs() < 1e-6);
    }
}
