//! 3D Vector implementation.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 3D vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Vector3 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

impl Vector3 {
    /// Zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
    /// Vector with all components one.
    pub const ONE: Self = Self { x: 1.0, y: 1.0, z: 1.0 };
    /// Up direction (+Y).
    pub const UP: Self = Self { x: 0.0, y: 1.0, z: 0.0 };
    /// Unit X axis.
    pub const UNIT_X: Self = Self { x: 1.0, y: 0.0, z: 0.0 };
    /// Unit Y axis.
    pub const UNIT_Y: Self = Self { x: 0.0, y: 1.0, z: 0.0 };
    /// Unit Z axis.
    pub const UNIT_Z: Self = Self { x: 0.0, y: 0.0, z: 1.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a vector with all components set to the same value.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, other: &Vector3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    #[inline]
    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Squared length.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Length of the vector.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Return a normalized copy. Zero vectors stay zero.
    pub fn normalized(&self) -> Vector3 {
        let len = self.length();
        if len > 0.0 {
            *self * (1.0 / len)
        } else {
            Vector3::ZERO
        }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance_to(&self, other: &Vector3) -> f32 {
        (*self - *other).length()
    }

    /// Squared distance to another point.
    #[inline]
    pub fn distance_to_squared(&self, other: &Vector3) -> f32 {
        (*self - *other).length_squared()
    }

    /// Linear interpolation toward another vector.
    #[inline]
    pub fn lerp(&self, other: &Vector3, t: f32) -> Vector3 {
        *self + (*other - *self) * t
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(&self, other: &Vector3) -> Vector3 {
        Vector3::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(&self, other: &Vector3) -> Vector3 {
        Vector3::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// As a flat array, for uploading to the GPU.
    #[inline]
    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Check if approximately equal.
    #[inline]
    pub fn approx_eq(&self, other: &Vector3, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }
}

impl Add for Vector3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vector3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vector3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl MulAssign<f32> for Vector3 {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl Neg for Vector3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_product() {
        let x = Vector3::UNIT_X;
        let y = Vector3::UNIT_Y;
        assert!(x.cross(&y).approx_eq(&Vector3::UNIT_Z, 1e-6));
    }

    #[test]
    fn test_normalized() {
        let v = Vector3::new(3.0, 0.0, 4.0);
        let n = v.normalized();
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!(Vector3::ZERO.normalized().approx_eq(&Vector3::ZERO, 1e-6));
    }

    #[test]
    fn test_distance() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 6.0, 3.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_lerp() {
        let a = Vector3::ZERO;
        let b = Vector3::new(10.0, -10.0, 2.0);
        assert!(a.lerp(&b, 0.5).approx_eq(&Vector3::new(5.0, -5.0, 1.0), 1e-6));
    }
}
