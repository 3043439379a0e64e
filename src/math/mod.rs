//! # Math Module
//!
//! The 3D math the scenes need: vectors, a 4x4 matrix, ray/sphere picking
//! primitives, colors, and the exponential-smoothing helpers every hover
//! animation in the crate is built on.

mod vector2;
mod vector3;
mod matrix4;
mod color;
mod ray;
mod sphere;
mod raycaster;
mod easing;

pub use vector2::Vector2;
pub use vector3::Vector3;
pub use matrix4::Matrix4;
pub use color::Color;
pub use ray::Ray;
pub use sphere::Sphere;
pub use raycaster::Raycaster;
pub use easing::{ease_toward, has_converged};

/// Common math constants and utilities.
pub mod consts {
    /// Pi constant.
    pub const PI: f32 = std::f32::consts::PI;
    /// Two times Pi.
    pub const TWO_PI: f32 = PI * 2.0;
    /// Degrees to radians conversion factor.
    pub const DEG2RAD: f32 = PI / 180.0;
    /// Small epsilon for floating point comparisons.
    pub const EPSILON: f32 = 1e-6;
}

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * consts::DEG2RAD
}

/// Linear interpolation between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
