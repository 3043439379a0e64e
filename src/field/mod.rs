//! # Field Module
//!
//! The static decorative layers every page shares: the background star
//! field and the nebula puff cloud. Both are generated once from a seeded
//! RNG and only move through the shared galaxy-group rotation.

mod nebula;
mod stars;

pub use nebula::{Nebula, NebulaConfig};
pub use stars::{StarField, StarFieldConfig};
