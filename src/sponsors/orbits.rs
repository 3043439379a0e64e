//! Elliptical orbit definitions and the ellipse parametrization.

use crate::math::{deg_to_rad, Vector3};
use serde::Deserialize;

/// One orbit: an ellipse tilted around its local X axis and translated to
/// a center offset. Immutable after creation; tokens share orbits by index.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Orbit {
    /// Center offset in world units.
    pub center: Vector3,
    /// Semi-major axis (local X).
    pub major: f32,
    /// Semi-minor axis (local Y).
    pub minor: f32,
    /// Tilt in degrees, rotating the Y/Z pair.
    pub tilt_deg: f32,
}

impl Orbit {
    /// Sample the ring as a closed polyline at lift 0, for drawing.
    pub fn ring_points(&self, segments: u32) -> Vec<Vector3> {
        (0..=segments)
            .map(|i| {
                let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
                orbit_position(self, angle, 0.0)
            })
            .collect()
    }
}

/// Position on an orbit at `angle_rad`, lifted `lift` units along the
/// orbit's local Z before the tilt is applied.
pub fn orbit_position(orbit: &Orbit, angle_rad: f32, lift: f32) -> Vector3 {
    let local_x = orbit.major * angle_rad.cos();
    let local_y = orbit.minor * angle_rad.sin();
    let local_z = lift;

    let tilt = deg_to_rad(orbit.tilt_deg);
    let (sin_t, cos_t) = tilt.sin_cos();
    let rotated_y = local_y * cos_t - local_z * sin_t;
    let rotated_z = local_y * sin_t + local_z * cos_t;

    Vector3::new(
        local_x + orbit.center.x,
        rotated_y + orbit.center.y,
        rotated_z + orbit.center.z,
    )
}

/// The fixed set of orbits the sponsor tokens ride.
#[derive(Debug, Clone, Deserialize)]
pub struct OrbitCatalog {
    orbits: Vec<Orbit>,
}

impl Default for OrbitCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl OrbitCatalog {
    /// The three standard rings: a tight inner orbit and two wider, flatter
    /// ones, each with a slight opposing tilt.
    pub fn standard() -> Self {
        Self {
            orbits: vec![
                Orbit {
                    center: Vector3::new(0.0, 0.0, 0.0),
                    major: 420.0,
                    minor: 180.0,
                    tilt_deg: -12.0,
                },
                Orbit {
                    center: Vector3::new(0.0, -40.0, 0.0),
                    major: 640.0,
                    minor: 260.0,
                    tilt_deg: 8.0,
                },
                Orbit {
                    center: Vector3::new(0.0, -80.0, 0.0),
                    major: 860.0,
                    minor: 340.0,
                    tilt_deg: -5.0,
                },
            ],
        }
    }

    /// Fetch an orbit by index. Out-of-range indices fall back to the first
    /// orbit (or a flat unit ring if the catalog is empty) rather than
    /// panicking.
    pub fn get(&self, index: usize) -> &Orbit {
        const FALLBACK: Orbit = Orbit {
            center: Vector3::ZERO,
            major: 1.0,
            minor: 1.0,
            tilt_deg: 0.0,
        };
        self.orbits
            .get(index)
            .or_else(|| self.orbits.first())
            .unwrap_or(&FALLBACK)
    }

    /// All orbits, for ring drawing.
    #[inline]
    pub fn orbits(&self) -> &[Orbit] {
        &self.orbits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_zero_round_trip() {
        // The contract case: angle 0 on (major 100, minor 50, no tilt,
        // origin center) sits at (100, 0, lift).
        let orbit = Orbit {
            center: Vector3::ZERO,
            major: 100.0,
            minor: 50.0,
            tilt_deg: 0.0,
        };
        let p = orbit_position(&orbit, 0.0, 10.0);
        assert!(p.approx_eq(&Vector3::new(100.0, 0.0, 10.0), 1e-5));
    }

    #[test]
    fn test_tilt_rotates_y_into_z() {
        let orbit = Orbit {
            center: Vector3::ZERO,
            major: 100.0,
            minor: 50.0,
            tilt_deg: 90.0,
        };
        // Quarter turn: local point (0, 50, 0); a 90 degree tilt sends the
        // whole minor axis into Z.
        let p = orbit_position(&orbit, std::f32::consts::FRAC_PI_2, 0.0);
        assert!(p.approx_eq(&Vector3::new(0.0, 0.0, 50.0), 1e-4));
    }

    #[test]
    fn test_center_translates() {
        let orbit = Orbit {
            center: Vector3::new(10.0, 20.0, 30.0),
            major: 100.0,
            minor: 50.0,
            tilt_deg: 0.0,
        };
        let p = orbit_position(&orbit, 0.0, 0.0);
        assert!(p.approx_eq(&Vector3::new(110.0, 20.0, 30.0), 1e-4));
    }

    #[test]
    fn test_catalog_fallback_index() {
        let catalog = OrbitCatalog::standard();
        assert_eq!(catalog.orbits().len(), 3);
        let first = catalog.get(0);
        let fallback = catalog.get(99);
        assert_eq!(first.major, fallback.major);
        assert_eq!(first.tilt_deg, fallback.tilt_deg);
    }

    #[test]
    fn test_ring_points_close_the_loop() {
        let orbit = OrbitCatalog::standard().orbits()[1];
        let ring = orbit.ring_points(64);
        assert_eq!(ring.len(), 65);
        assert!(ring[0].approx_eq(&ring[64], 1e-3));
    }
}
