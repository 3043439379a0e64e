//! Pointer picking against the frame's hover volumes.

use crate::math::{Ray, Sphere};

/// The hover volumes registered for one frame, each paired with the caller's
/// entity index. Rebuilt every frame since tokens move and scales ease.
#[derive(Debug, Default)]
pub struct HitSet {
    volumes: Vec<(Sphere, usize)>,
}

impl HitSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all registered volumes, keeping the allocation.
    pub fn clear(&mut self) {
        self.volumes.clear();
    }

    /// Register a volume for entity `index`.
    pub fn insert(&mut self, sphere: Sphere, index: usize) {
        self.volumes.push((sphere, index));
    }

    /// Register every volume from a prebuilt slice.
    pub fn extend_from(&mut self, volumes: &[(Sphere, usize)]) {
        self.volumes.extend_from_slice(volumes);
    }

    /// Number of registered volumes.
    #[inline]
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    /// Whether no volumes are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Cast `ray` against every volume and return the entity index of the
    /// closest hit, so an overlapping token behind another never steals
    /// the hover.
    pub fn pick(&self, ray: &Ray) -> Option<usize> {
        let mut best: Option<(f32, usize)> = None;
        for (sphere, index) in &self.volumes {
            if let Some(t) = ray.intersect_sphere(sphere) {
                if best.map_or(true, |(best_t, _)| t < best_t) {
                    best = Some((t, *index));
                }
            }
        }
        best.map(|(_, index)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector3;

    fn ray_down_z() -> Ray {
        Ray::new(Vector3::new(0.0, 0.0, 100.0), Vector3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_empty_set_never_hits() {
        let hits = HitSet::new();
        assert!(hits.pick(&ray_down_z()).is_none());
    }

    #[test]
    fn test_picks_nearest_of_overlapping_volumes() {
        let mut hits = HitSet::new();
        // Both spheres straddle the ray; the one at z = 50 is closer to the
        // origin at z = 100 than the one at z = 0.
        hits.insert(Sphere::new(Vector3::new(0.0, 0.0, 0.0), 10.0), 7);
        hits.insert(Sphere::new(Vector3::new(0.0, 0.0, 50.0), 10.0), 3);
        assert_eq!(hits.pick(&ray_down_z()), Some(3));
    }

    #[test]
    fn test_miss_returns_none() {
        let mut hits = HitSet::new();
        hits.insert(Sphere::new(Vector3::new(500.0, 0.0, 0.0), 10.0), 0);
        assert!(hits.pick(&ray_down_z()).is_none());
    }

    #[test]
    fn test_clear_keeps_nothing() {
        let mut hits = HitSet::new();
        hits.insert(Sphere::new(Vector3::ZERO, 10.0), 0);
        hits.clear();
        assert!(hits.is_empty());
        assert!(hits.pick(&ray_down_z()).is_none());
    }
}
