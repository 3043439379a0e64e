//! The nebula puff cloud.

use crate::core::Context;
use crate::math::{Color, Matrix4};
use crate::render::{BlendMode, PointBatch, PointInstance, SceneBinding};
use crate::texture::{Bitmap, Texture2D};
use rand::Rng;
use serde::Deserialize;

/// Nebula parameters. Puffs scatter over a flattened annulus around the
/// galaxy center, tinted by cycling through the palette.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NebulaConfig {
    /// Number of puff sprites.
    pub puff_count: u32,
    /// Inner radius of the annulus.
    pub min_radius: f32,
    /// Outer radius of the annulus.
    pub max_radius: f32,
    /// Vertical squash applied to the annulus.
    pub flatten: f32,
    /// Depth jitter, puffs land within +-depth/2.
    pub depth: f32,
    /// Smallest puff size in world units.
    pub min_scale: f32,
    /// Largest puff size in world units.
    pub max_scale: f32,
    /// Opacity range lower bound.
    pub min_opacity: f32,
    /// Opacity range upper bound.
    pub max_opacity: f32,
    /// Tint palette, cycled per puff.
    pub palette: Vec<Color>,
}

impl Default for NebulaConfig {
    fn default() -> Self {
        Self {
            puff_count: 250,
            min_radius: 200.0,
            max_radius: 1000.0,
            flatten: 0.6,
            depth: 500.0,
            min_scale: 400.0,
            max_scale: 1000.0,
            min_opacity: 0.1,
            max_opacity: 0.3,
            palette: vec![
                Color::from_hex(0x5C00E6),
                Color::from_hex(0x0346FE),
                Color::from_hex(0xFFC005),
                Color::from_hex(0x34005A),
                Color::from_hex(0x00494D),
                Color::from_hex(0x002651),
                Color::from_hex(0x002B1E),
            ],
        }
    }
}

/// Scatter puff instances over the configured annulus.
pub fn scatter<R: Rng>(config: &NebulaConfig, rng: &mut R) -> Vec<PointInstance> {
    (0..config.puff_count)
        .map(|i| {
            let angle = rng.gen::<f32>() * std::f32::consts::TAU;
            let radius =
                config.min_radius + rng.gen::<f32>() * (config.max_radius - config.min_radius);
            let color = config.palette[i as usize % config.palette.len()];
            PointInstance {
                position: [
                    angle.cos() * radius,
                    angle.sin() * radius * config.flatten,
                    (rng.gen::<f32>() - 0.5) * config.depth,
                ],
                size: config.min_scale + rng.gen::<f32>() * (config.max_scale - config.min_scale),
                color: color.to_array(),
                opacity: config.min_opacity
                    + rng.gen::<f32>() * (config.max_opacity - config.min_opacity),
            }
        })
        .collect()
}

/// The GPU nebula: one additive point batch with the soft puff sprite.
pub struct Nebula {
    batch: PointBatch,
}

impl Nebula {
    /// Build the nebula.
    pub fn build<R: Rng>(
        ctx: &Context,
        scene: &SceneBinding,
        config: &NebulaConfig,
        rng: &mut R,
    ) -> Self {
        let texture = Texture2D::from_bitmap(
            &ctx.device,
            &ctx.queue,
            &Bitmap::puff(128),
            Some("Nebula Puff Texture"),
        );
        let mut batch = PointBatch::new(
            ctx,
            scene,
            &texture,
            config.puff_count,
            BlendMode::Additive,
            "Nebula Pipeline",
        );
        batch.write_instances(ctx, &scatter(config, rng));
        Self { batch }
    }

    /// Update the shared galaxy-group transform.
    pub fn set_model(&mut self, ctx: &Context, model: &Matrix4) {
        self.batch.set_model(ctx, model);
    }

    /// Record the draw.
    pub fn draw<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>, scene: &'a SceneBinding) {
        self.batch.draw(rpass, scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_scatter_respects_ranges() {
        let config = NebulaConfig::default();
        let mut rng = SmallRng::seed_from_u64(11);
        let puffs = scatter(&config, &mut rng);
        assert_eq!(puffs.len(), config.puff_count as usize);
        for puff in &puffs {
            let [x, y, z] = puff.position;
            // Undo the vertical squash before checking the annulus radius.
            let r = (x * x + (y / config.flatten) * (y / config.flatten)).sqrt();
            assert!(r >= config.min_radius - 1e-3 && r <= config.max_radius + 1e-3);
            assert!(z.abs() <= config.depth * 0.5);
            assert!(puff.size >= config.min_scale && puff.size <= config.max_scale);
            assert!(puff.opacity >= config.min_opacity && puff.opacity <= config.max_opacity);
        }
    }

    #[test]
    fn test_palette_cycles() {
        let config = NebulaConfig::default();
        let mut rng = SmallRng::seed_from_u64(1);
        let puffs = scatter(&config, &mut rng);
        let n = config.palette.len();
        assert_eq!(puffs[0].color, config.palette[0].to_array());
        assert_eq!(puffs[n].color, config.palette[0].to_array());
        assert_eq!(puffs[1].color, config.palette[1].to_array());
    }
}
