//! # Scene Module
//!
//! The orchestrator: owns the camera, the shared galaxy backdrop, the
//! per-page layers, and the per-frame update/render loop.

mod picking;
#[allow(clippy::module_inception)]
mod scene;

pub use picking::HitSet;
pub use scene::Scene;

use crate::constellation::ConstellationConfig;
use crate::field::{NebulaConfig, StarFieldConfig};
use crate::math::Vector2;
use crate::sponsors::{
    CentralLogoConfig, HeadingConfig, OrbitCatalog, SponsorConfig, SponsorEntry,
};
use crate::stardust::StardustConfig;
use serde::Deserialize;

/// Which page layer the scene carries on top of the shared galaxy backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneMode {
    /// Home page: constellations and the stardust pointer trail.
    Home,
    /// Sponsors page: orbit rings, sponsor tokens, heading and logo.
    Sponsors,
    /// Backdrop only. Also the fallback for unrecognized mode strings.
    Ambient,
}

impl SceneMode {
    /// Parse a mode string from the embedding page. Unknown values fall
    /// back to the plain backdrop rather than failing.
    pub fn parse(value: &str) -> Self {
        match value {
            "home" => SceneMode::Home,
            "sponsors" => SceneMode::Sponsors,
            _ => SceneMode::Ambient,
        }
    }
}

/// The pointer in normalized device coordinates.
///
/// Starts parked far outside the viewport so nothing registers as hovered
/// before the first real mouse move.
#[derive(Debug, Clone, Copy)]
pub struct PointerState {
    /// Pointer position in NDC.
    pub ndc: Vector2,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            ndc: Vector2::new(-1000.0, -1000.0),
        }
    }
}

/// Every tunable in one place. Deserializes from the embedding page's
/// config JSON; every field falls back to the shipped defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Shared galaxy backdrop.
    pub galaxy: GalaxyConfig,
    /// Background star shell.
    pub stars: StarFieldConfig,
    /// Nebula puff cloud.
    pub nebula: NebulaConfig,
    /// Home page constellations.
    pub constellations: ConstellationConfig,
    /// Home page stardust trail.
    pub stardust: StardustConfig,
    /// Sponsor token behavior.
    pub sponsors: SponsorConfig,
    /// Sponsor page heading banner.
    pub heading: HeadingConfig,
    /// Central fest logo.
    pub logo: CentralLogoConfig,
    /// Orbit geometry.
    pub orbits: OrbitCatalog,
    /// Sponsor roster. Empty means the built-in roster.
    pub roster: Vec<SponsorEntry>,
}

/// Galaxy group placement and spin.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct GalaxyConfig {
    /// Rotation advance per frame, in radians.
    pub spin: f32,
    /// Depth offset pushing the whole backdrop behind the page content.
    pub depth: f32,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            spin: 0.0008,
            depth: -400.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_falls_back_to_ambient() {
        assert_eq!(SceneMode::parse("home"), SceneMode::Home);
        assert_eq!(SceneMode::parse("sponsors"), SceneMode::Sponsors);
        assert_eq!(SceneMode::parse("about"), SceneMode::Ambient);
        assert_eq!(SceneMode::parse(""), SceneMode::Ambient);
    }

    #[test]
    fn test_pointer_starts_parked_offscreen() {
        let pointer = PointerState::default();
        assert_eq!(pointer.ndc.x, -1000.0);
        assert_eq!(pointer.ndc.y, -1000.0);
    }

    #[test]
    fn test_config_deserializes_with_overrides() {
        let config: SceneConfig =
            serde_json::from_str(r#"{"stars": {"count": 100}, "galaxy": {"spin": 0.002}}"#)
                .unwrap();
        assert_eq!(config.stars.count, 100);
        assert_eq!(config.stars.spread, 4500.0);
        assert!((config.galaxy.spin - 0.002).abs() < 1e-9);
        assert_eq!(config.nebula.puff_count, 250);
    }
}
