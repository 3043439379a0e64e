//! Ray implementation for raycasting.

use super::{Sphere, Vector3};
use serde::{Deserialize, Serialize};

/// A ray with an origin and direction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Vector3,
    /// Direction of the ray (should be normalized).
    pub direction: Vector3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub const fn new(origin: Vector3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// Get a point at distance t along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vector3 {
        self.origin + self.direction * t
    }

    /// Intersect with the world-space plane z = `plane_z`.
    /// Returns the intersection point, or None if the ray is parallel.
    pub fn intersect_z_plane(&self, plane_z: f32) -> Option<Vector3> {
        if self.direction.z.abs() < 1e-8 {
            return None;
        }
        let t = (plane_z - self.origin.z) / self.direction.z;
        if t >= 0.0 {
            Some(self.at(t))
        } else {
            None
        }
    }

    /// Intersect with a sphere.
    /// Returns the distance to the nearest intersection, or None.
    pub fn intersect_sphere(&self, sphere: &Sphere) -> Option<f32> {
        let oc = self.origin - sphere.center;
        let b = oc.dot(&self.direction);
        let c = oc.length_squared() - sphere.radius * sphere.radius;

        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_discriminant = discriminant.sqrt();
        let t1 = -b - sqrt_discriminant;
        let t2 = -b + sqrt_discriminant;

        if t1 >= 0.0 {
            Some(t1)
        } else if t2 >= 0.0 {
            Some(t2)
        } else {
            None
        }
    }

    /// Check if ray intersects a sphere.
    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        self.intersect_sphere(sphere).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at() {
        let ray = Ray::new(Vector3::ZERO, Vector3::UNIT_Z);
        let p = ray.at(5.0);
        assert!(p.approx_eq(&Vector3::new(0.0, 0.0, 5.0), 1e-6));
    }

    #[test]
    fn test_sphere_intersection() {
        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::UNIT_Z);
        let sphere = Sphere::new(Vector3::ZERO, 1.0);
        let t = ray.intersect_sphere(&sphere);
        assert!(t.is_some());
        assert!((t.unwrap() - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_sphere_from_inside() {
        // Origin inside the sphere still reports the forward hit.
        let ray = Ray::new(Vector3::ZERO, Vector3::UNIT_X);
        let sphere = Sphere::new(Vector3::ZERO, 2.0);
        let t = ray.intersect_sphere(&sphere).unwrap();
        assert!((t - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_z_plane() {
        let ray = Ray::new(Vector3::new(0.0, 0.0, 800.0), Vector3::new(0.0, 0.0, -1.0));
        let p = ray.intersect_z_plane(50.0).unwrap();
        assert!(p.approx_eq(&Vector3::new(0.0, 0.0, 50.0), 1e-4));
        // Parallel ray misses
        let side = Ray::new(Vector3::ZERO, Vector3::UNIT_X);
        assert!(side.intersect_z_plane(50.0).is_none());
    }
}
