//! # Constellation Module
//!
//! The nine hoverable constellation shapes on the home page: a fixed
//! catalog of skeleton polylines, a pure hover-fade state machine, and the
//! GPU layer that pushes the animated opacities into line and point
//! uniforms.

mod catalog;
mod manager;

pub use catalog::{Shape, CATALOG};
pub use manager::{ConstellationConfig, ConstellationSet, Constellations};
