//! Perspective camera.

use crate::math::{Matrix4, Ray, Raycaster, Vector2, Vector3};

/// A perspective projection camera.
///
/// Defaults match the site's hero scene: 65 degree fov, camera pulled back
/// to z = 800, far plane at 10000 so the distant star shell stays visible.
pub struct PerspectiveCamera {
    /// Field of view in degrees.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Camera position.
    pub position: Vector3,
    /// Camera target (look-at point).
    pub target: Vector3,
    /// Up vector.
    pub up: Vector3,
    view_matrix: Matrix4,
    projection_matrix: Matrix4,
    view_projection_matrix: Matrix4,
    view_projection_inverse: Matrix4,
    needs_update: bool,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        let mut camera = Self::new(65.0, 16.0 / 9.0, 0.1, 10000.0);
        camera.set_position(Vector3::new(0.0, 0.0, 800.0));
        camera
    }
}

impl PerspectiveCamera {
    /// Create a new perspective camera looking at the origin.
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            position: Vector3::new(0.0, 0.0, 5.0),
            target: Vector3::ZERO,
            up: Vector3::UP,
            view_matrix: Matrix4::IDENTITY,
            projection_matrix: Matrix4::IDENTITY,
            view_projection_matrix: Matrix4::IDENTITY,
            view_projection_inverse: Matrix4::IDENTITY,
            needs_update: true,
        };
        camera.update_matrices();
        camera
    }

    /// Set the camera position.
    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
        self.needs_update = true;
    }

    /// Look at a target from the current position.
    pub fn look_at(&mut self, target: Vector3) {
        self.target = target;
        self.needs_update = true;
    }

    /// Set the aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.needs_update = true;
    }

    /// Get the view matrix.
    pub fn view_matrix(&mut self) -> &Matrix4 {
        if self.needs_update {
            self.update_matrices();
        }
        &self.view_matrix
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&mut self) -> &Matrix4 {
        if self.needs_update {
            self.update_matrices();
        }
        &self.projection_matrix
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&mut self) -> &Matrix4 {
        if self.needs_update {
            self.update_matrices();
        }
        &self.view_projection_matrix
    }

    /// Get the inverse of the view-projection matrix.
    pub fn view_projection_inverse(&mut self) -> &Matrix4 {
        if self.needs_update {
            self.update_matrices();
        }
        &self.view_projection_inverse
    }

    /// Recompute all matrices.
    pub fn update_matrices(&mut self) {
        self.view_matrix = Matrix4::look_at(&self.position, &self.target, &self.up);
        self.projection_matrix =
            Matrix4::perspective(self.fov.to_radians(), self.aspect, self.near, self.far);
        self.view_projection_matrix = self.projection_matrix.multiply(&self.view_matrix);
        self.view_projection_inverse = self.view_projection_matrix.inverse();
        self.needs_update = false;
    }

    /// Get the forward direction.
    pub fn forward(&self) -> Vector3 {
        (self.target - self.position).normalized()
    }

    /// World-space right and up vectors, the billboard basis for sprites.
    pub fn billboard_basis(&self) -> (Vector3, Vector3) {
        let forward = self.forward();
        let right = forward.cross(&self.up).normalized();
        let up = right.cross(&forward);
        (right, up)
    }

    /// Cast a world-space ray through a pointer position in NDC.
    pub fn pick_ray(&mut self, ndc: Vector2) -> Ray {
        let inverse = *self.view_projection_inverse();
        Raycaster::ray_from_ndc(ndc.x, ndc.y, &inverse)
    }

    /// Project a pointer position onto the world plane z = `plane_z`.
    ///
    /// Returns None when the pointer ray runs parallel to the plane, which
    /// can only happen for degenerate camera setups.
    pub fn unproject_to_z_plane(&mut self, ndc: Vector2, plane_z: f32) -> Option<Vector3> {
        self.pick_ray(ndc).intersect_z_plane(plane_z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_looks_down_negative_z() {
        let camera = PerspectiveCamera::default();
        assert!(camera.forward().approx_eq(&Vector3::new(0.0, 0.0, -1.0), 1e-6));
        let (right, up) = camera.billboard_basis();
        assert!(right.approx_eq(&Vector3::UNIT_X, 1e-6));
        assert!(up.approx_eq(&Vector3::UNIT_Y, 1e-6));
    }

    #[test]
    fn test_center_unproject_hits_plane_center() {
        let mut camera = PerspectiveCamera::default();
        let hit = camera
            .unproject_to_z_plane(Vector2::ZERO, 50.0)
            .unwrap();
        assert!(hit.approx_eq(&Vector3::new(0.0, 0.0, 50.0), 1e-2));
    }

    #[test]
    fn test_offscreen_pointer_still_unprojects() {
        // The parked pointer sits far outside the viewport; the projection
        // must still land on the plane rather than panic.
        let mut camera = PerspectiveCamera::default();
        let hit = camera.unproject_to_z_plane(Vector2::new(-1000.0, -1000.0), 50.0);
        assert!(hit.is_some());
    }
}
