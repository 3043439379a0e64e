//! 4x4 Matrix implementation.

use super::Vector3;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A 4x4 column-major matrix (WebGPU convention).
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Matrix4 {
    /// Matrix columns.
    pub cols: [[f32; 4]; 4],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Create an identity matrix.
    #[inline]
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Create a translation matrix.
    pub fn translation(v: Vector3) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = [v.x, v.y, v.z, 1.0];
        m
    }

    /// Create a rotation matrix around the Z axis.
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Self::IDENTITY;
        m.cols[0] = [c, s, 0.0, 0.0];
        m.cols[1] = [-s, c, 0.0, 0.0];
        m
    }

    /// Create a uniform scaling matrix.
    pub fn scaling(s: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[0][0] = s;
        m.cols[1][1] = s;
        m.cols[2][2] = s;
        m
    }

    /// Multiply: `self * other`.
    pub fn multiply(&self, other: &Matrix4) -> Matrix4 {
        let a = &self.cols;
        let b = &other.cols;
        let mut out = [[0.0_f32; 4]; 4];
        for (c, out_col) in out.iter_mut().enumerate() {
            for (r, out_val) in out_col.iter_mut().enumerate() {
                *out_val = a[0][r] * b[c][0]
                    + a[1][r] * b[c][1]
                    + a[2][r] * b[c][2]
                    + a[3][r] * b[c][3];
            }
        }
        Matrix4 { cols: out }
    }

    /// Transform a point (w = 1, with perspective divide).
    pub fn transform_point(&self, p: &Vector3) -> Vector3 {
        let m = &self.cols;
        let x = m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0];
        let y = m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1];
        let z = m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2];
        let w = m[0][3] * p.x + m[1][3] * p.y + m[2][3] * p.z + m[3][3];
        if w.abs() > 1e-8 && (w - 1.0).abs() > 1e-8 {
            Vector3::new(x / w, y / w, z / w)
        } else {
            Vector3::new(x, y, z)
        }
    }

    /// Transform a direction (w = 0, no translation).
    pub fn transform_direction(&self, d: &Vector3) -> Vector3 {
        let m = &self.cols;
        Vector3::new(
            m[0][0] * d.x + m[1][0] * d.y + m[2][0] * d.z,
            m[0][1] * d.x + m[1][1] * d.y + m[2][1] * d.z,
            m[0][2] * d.x + m[1][2] * d.y + m[2][2] * d.z,
        )
    }

    /// Right-handed look-at view matrix.
    pub fn look_at(eye: &Vector3, target: &Vector3, up: &Vector3) -> Matrix4 {
        let f = (*target - *eye).normalized();
        let s = f.cross(up).normalized();
        let u = s.cross(&f);

        Matrix4 {
            cols: [
                [s.x, u.x, -f.x, 0.0],
                [s.y, u.y, -f.y, 0.0],
                [s.z, u.z, -f.z, 0.0],
                [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
            ],
        }
    }

    /// Right-handed perspective projection with 0..1 depth (WebGPU clip space).
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Matrix4 {
        let f = 1.0 / (fov_y * 0.5).tan();
        let range = 1.0 / (near - far);

        Matrix4 {
            cols: [
                [f / aspect, 0.0, 0.0, 0.0],
                [0.0, f, 0.0, 0.0],
                [0.0, 0.0, far * range, -1.0],
                [0.0, 0.0, near * far * range, 0.0],
            ],
        }
    }

    /// General matrix inverse via cofactor expansion.
    /// Returns the identity for singular matrices.
    pub fn inverse(&self) -> Matrix4 {
        // Flatten column-major: m[c*4+r]
        let m: [f32; 16] = bytemuck::cast(self.cols);
        let mut inv = [0.0_f32; 16];

        inv[0] = m[5] * m[10] * m[15] - m[5] * m[11] * m[14] - m[9] * m[6] * m[15]
            + m[9] * m[7] * m[14] + m[13] * m[6] * m[11] - m[13] * m[7] * m[10];
        inv[4] = -m[4] * m[10] * m[15] + m[4] * m[11] * m[14] + m[8] * m[6] * m[15]
            - m[8] * m[7] * m[14] - m[12] * m[6] * m[11] + m[12] * m[7] * m[10];
        inv[8] = m[4] * m[9] * m[15] - m[4] * m[11] * m[13] - m[8] * m[5] * m[15]
            + m[8] * m[7] * m[13] + m[12] * m[5] * m[11] - m[12] * m[7] * m[9];
        inv[12] = -m[4] * m[9] * m[14] + m[4] * m[10] * m[13] + m[8] * m[5] * m[14]
            - m[8] * m[6] * m[13] - m[12] * m[5] * m[10] + m[12] * m[6] * m[9];
        inv[1] = -m[1] * m[10] * m[15] + m[1] * m[11] * m[14] + m[9] * m[2] * m[15]
            - m[9] * m[3] * m[14] - m[13] * m[2] * m[11] + m[13] * m[3] * m[10];
        inv[5] = m[0] * m[10] * m[15] - m[0] * m[11] * m[14] - m[8] * m[2] * m[15]
            + m[8] * m[3] * m[14] + m[12] * m[2] * m[11] - m[12] * m[3] * m[10];
        inv[9] = -m[0] * m[9] * m[15] + m[0] * m[11] * m[13] + m[8] * m[1] * m[15]
            - m[8] * m[3] * m[13] - m[12] * m[1] * m[11] + m[12] * m[3] * m[9];
        inv[13] = m[0] * m[9] * m[14] - m[0] * m[10] * m[13] - m[8] * m[1] * m[14]
            + m[8] * m[2] * m[13] + m[12] * m[1] * m[10] - m[12] * m[2] * m[9];
        inv[2] = m[1] * m[6] * m[15] - m[1] * m[7] * m[14] - m[5] * m[2] * m[15]
            + m[5] * m[3] * m[14] + m[13] * m[2] * m[7] - m[13] * m[3] * m[6];
        inv[6] = -m[0] * m[6] * m[15] + m[0] * m[7] * m[14] + m[4] * m[2] * m[15]
            - m[4] * m[3] * m[14] - m[12] * m[2] * m[7] + m[12] * m[3] * m[6];
        inv[10] = m[0] * m[5] * m[15] - m[0] * m[7] * m[13] - m[4] * m[1] * m[15]
            + m[4] * m[3] * m[13] + m[12] * m[1] * m[7] - m[12] * m[3] * m[5];
        inv[14] = -m[0] * m[5] * m[14] + m[0] * m[6] * m[13] + m[4] * m[1] * m[14]
            - m[4] * m[2] * m[13] - m[12] * m[1] * m[6] + m[12] * m[2] * m[5];
        inv[3] = -m[1] * m[6] * m[11] + m[1] * m[7] * m[10] + m[5] * m[2] * m[11]
            - m[5] * m[3] * m[10] - m[9] * m[2] * m[7] + m[9] * m[3] * m[6];
        inv[7] = m[0] * m[6] * m[11] - m[0] * m[7] * m[10] - m[4] * m[2] * m[11]
            + m[4] * m[3] * m[10] + m[8] * m[2] * m[7] - m[8] * m[3] * m[6];
        inv[11] = -m[0] * m[5] * m[11] + m[0] * m[7] * m[9] + m[4] * m[1] * m[11]
            - m[4] * m[3] * m[9] - m[8] * m[1] * m[7] + m[8] * m[3] * m[5];
        inv[15] = m[0] * m[5] * m[10] - m[0] * m[6] * m[9] - m[4] * m[1] * m[10]
            + m[4] * m[2] * m[9] + m[8] * m[1] * m[6] - m[8] * m[2] * m[5];

        let det = m[0] * inv[0] + m[1] * inv[4] + m[2] * inv[8] + m[3] * inv[12];
        if det.abs() < 1e-12 {
            return Matrix4::IDENTITY;
        }

        let inv_det = 1.0 / det;
        for v in inv.iter_mut() {
            *v *= inv_det;
        }

        Matrix4 { cols: bytemuck::cast(inv) }
    }

    /// As nested arrays, for uploading to the GPU.
    #[inline]
    pub fn to_array(&self) -> [[f32; 4]; 4] {
        self.cols
    }

    /// Check if approximately equal.
    pub fn approx_eq(&self, other: &Matrix4, epsilon: f32) -> bool {
        self.cols
            .iter()
            .flatten()
            .zip(other.cols.iter().flatten())
            .all(|(a, b)| (a - b).abs() < epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform() {
        let p = Vector3::new(1.0, 2.0, 3.0);
        assert!(Matrix4::IDENTITY.transform_point(&p).approx_eq(&p, 1e-6));
    }

    #[test]
    fn test_translation() {
        let m = Matrix4::translation(Vector3::new(1.0, 2.0, 3.0));
        let p = m.transform_point(&Vector3::ZERO);
        assert!(p.approx_eq(&Vector3::new(1.0, 2.0, 3.0), 1e-6));
        // Directions ignore translation
        let d = m.transform_direction(&Vector3::UNIT_X);
        assert!(d.approx_eq(&Vector3::UNIT_X, 1e-6));
    }

    #[test]
    fn test_rotation_z() {
        let m = Matrix4::rotation_z(std::f32::consts::FRAC_PI_2);
        let p = m.transform_point(&Vector3::UNIT_X);
        assert!(p.approx_eq(&Vector3::UNIT_Y, 1e-6));
    }

    #[test]
    fn test_inverse_roundtrip() {
        let m = Matrix4::translation(Vector3::new(4.0, -2.0, 9.0))
            .multiply(&Matrix4::rotation_z(0.7))
            .multiply(&Matrix4::scaling(2.5));
        let id = m.multiply(&m.inverse());
        assert!(id.approx_eq(&Matrix4::IDENTITY, 1e-4));
    }

    #[test]
    fn test_look_at_view() {
        // Camera at +Z looking at origin: origin maps in front of the camera (-Z view space).
        let view = Matrix4::look_at(&Vector3::new(0.0, 0.0, 10.0), &Vector3::ZERO, &Vector3::UP);
        let p = view.transform_point(&Vector3::ZERO);
        assert!(p.approx_eq(&Vector3::new(0.0, 0.0, -10.0), 1e-5));
    }
}
