//! The constellation shape catalog.
//!
//! Skeletons are polylines in shape-local units; the manager scales them
//! and plants them at their fixed world positions flanking the hero text.

use crate::math::Vector3;

/// One catalog entry: a named skeleton and its world anchor.
#[derive(Debug, Clone, Copy)]
pub struct Shape {
    /// Shape name, also its hover identity.
    pub name: &'static str,
    /// World position of the shape origin.
    pub position: Vector3,
    /// Skeleton polyline in local units.
    pub points: &'static [[f32; 3]],
}

impl Shape {
    /// Skeleton points as vectors.
    pub fn local_points(&self) -> Vec<Vector3> {
        self.points
            .iter()
            .map(|p| Vector3::new(p[0], p[1], p[2]))
            .collect()
    }
}

/// The nine shapes, left column then right column.
pub const CATALOG: [Shape; 9] = [
    Shape {
        name: "mirror",
        position: Vector3::new(-800.0, 300.0, -500.0),
        points: &[
            [0.0, 40.0, 0.0],
            [20.0, 20.0, 0.0],
            [0.0, 0.0, 0.0],
            [-20.0, 20.0, 0.0],
            [0.0, 40.0, 0.0],
            [0.0, 0.0, 0.0],
            [0.0, -40.0, 0.0],
        ],
    },
    Shape {
        name: "trident",
        position: Vector3::new(-1100.0, -100.0, -500.0),
        points: &[
            [0.0, -40.0, 0.0],
            [0.0, 40.0, 0.0],
            [-20.0, 20.0, 0.0],
            [-20.0, 0.0, 0.0],
            [0.0, -10.0, 0.0],
            [20.0, 0.0, 0.0],
            [20.0, 20.0, 0.0],
        ],
    },
    Shape {
        name: "lotus",
        position: Vector3::new(-800.0, -500.0, -500.0),
        points: &[
            [0.0, -20.0, 0.0],
            [-15.0, 0.0, 0.0],
            [0.0, 20.0, 0.0],
            [15.0, 0.0, 0.0],
            [0.0, -20.0, 0.0],
            [-15.0, 0.0, 0.0],
            [-30.0, 10.0, 0.0],
            [-10.0, -20.0, 0.0],
            [15.0, 0.0, 0.0],
            [30.0, 10.0, 0.0],
            [10.0, -20.0, 0.0],
        ],
    },
    Shape {
        name: "feather",
        position: Vector3::new(-1100.0, -700.0, -500.0),
        points: &[
            [0.0, -40.0, 0.0],
            [0.0, 40.0, 0.0],
            [0.0, 30.0, 0.0],
            [10.0, 35.0, 0.0],
            [0.0, 20.0, 0.0],
            [15.0, 25.0, 0.0],
            [0.0, 10.0, 0.0],
            [12.0, 12.0, 0.0],
            [0.0, 0.0, 0.0],
            [10.0, 0.0, 0.0],
        ],
    },
    Shape {
        name: "sword",
        position: Vector3::new(800.0, 300.0, -500.0),
        points: &[
            [0.0, -40.0, 0.0],
            [0.0, 50.0, 0.0],
            [-15.0, -10.0, 0.0],
            [15.0, -10.0, 0.0],
        ],
    },
    Shape {
        name: "moon",
        position: Vector3::new(1100.0, -100.0, -500.0),
        points: &[
            [0.0, 40.0, 0.0],
            [10.0, 20.0, 0.0],
            [10.0, -20.0, 0.0],
            [0.0, -40.0, 0.0],
            [-15.0, -30.0, 0.0],
            [-25.0, 0.0, 0.0],
            [-15.0, 30.0, 0.0],
            [0.0, 40.0, 0.0],
        ],
    },
    Shape {
        name: "teardrop",
        position: Vector3::new(800.0, -500.0, -500.0),
        points: &[
            [0.0, 40.0, 0.0],
            [15.0, -10.0, 0.0],
            [0.0, -30.0, 0.0],
            [-15.0, -10.0, 0.0],
            [0.0, 40.0, 0.0],
        ],
    },
    Shape {
        name: "eye",
        position: Vector3::new(1100.0, -800.0, -500.0),
        points: &[
            [-40.0, 0.0, 0.0],
            [0.0, 20.0, 0.0],
            [40.0, 0.0, 0.0],
            [0.0, -20.0, 0.0],
            [-40.0, 0.0, 0.0],
            [0.0, 5.0, 0.0],
            [5.0, 0.0, 0.0],
            [0.0, -5.0, 0.0],
            [-5.0, 0.0, 0.0],
            [0.0, 5.0, 0.0],
        ],
    },
    Shape {
        name: "dove",
        position: Vector3::new(900.0, 150.0, -500.0),
        points: &[
            [0.0, 0.0, 0.0],
            [-20.0, 10.0, 0.0],
            [-30.0, 30.0, 0.0],
            [-10.0, 20.0, 0.0],
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
            [20.0, -10.0, 0.0],
            [10.0, 10.0, 0.0],
            [0.0, 0.0, 0.0],
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shapes_are_drawable() {
        assert_eq!(CATALOG.len(), 9);
        for shape in &CATALOG {
            assert!(shape.points.len() >= 2, "{} too short", shape.name);
        }
    }

    #[test]
    fn test_names_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
