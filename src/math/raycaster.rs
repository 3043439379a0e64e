//! Pointer-to-world ray casting.

use super::{Matrix4, Ray, Vector3};

/// Utility for creating world-space rays from pointer coordinates.
pub struct Raycaster;

impl Raycaster {
    /// Create a ray from normalized device coordinates.
    ///
    /// `ndc_x`/`ndc_y` are in -1..1 (y up). `view_proj_inverse` is the
    /// inverse of (projection * view). The ray starts on the near plane
    /// and points through the far plane (WebGPU 0..1 clip depth).
    pub fn ray_from_ndc(ndc_x: f32, ndc_y: f32, view_proj_inverse: &Matrix4) -> Ray {
        let near_ndc = Vector3::new(ndc_x, ndc_y, 0.0);
        let far_ndc = Vector3::new(ndc_x, ndc_y, 1.0);

        let near_world = view_proj_inverse.transform_point(&near_ndc);
        let far_world = view_proj_inverse.transform_point(&far_ndc);

        let direction = (far_world - near_world).normalized();
        Ray::new(near_world, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::deg_to_rad;

    #[test]
    fn test_center_ray_points_forward() {
        // Camera at +Z looking down -Z: the center ray heads toward -Z.
        let view = Matrix4::look_at(&Vector3::new(0.0, 0.0, 800.0), &Vector3::ZERO, &Vector3::UP);
        let proj = Matrix4::perspective(deg_to_rad(65.0), 16.0 / 9.0, 0.1, 10000.0);
        let inv = proj.multiply(&view).inverse();

        let ray = Raycaster::ray_from_ndc(0.0, 0.0, &inv);
        assert!(ray.direction.approx_eq(&Vector3::new(0.0, 0.0, -1.0), 1e-4));
        assert!(ray.origin.x.abs() < 1e-2 && ray.origin.y.abs() < 1e-2);
    }
}
