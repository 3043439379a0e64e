//! The background star field.

use crate::core::Context;
use crate::math::Matrix4;
use crate::render::{BlendMode, PointBatch, PointInstance, SceneBinding};
use crate::texture::{Bitmap, Texture2D};
use rand::Rng;
use serde::Deserialize;

/// Star field parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StarFieldConfig {
    /// Number of stars.
    pub count: u32,
    /// Edge length of the cube the stars scatter through.
    pub spread: f32,
    /// Star sprite size in world units.
    pub size: f32,
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            count: 8000,
            spread: 4500.0,
            size: 5.0,
        }
    }
}

/// Scatter star instances uniformly through the configured cube.
pub fn scatter<R: Rng>(config: &StarFieldConfig, rng: &mut R) -> Vec<PointInstance> {
    (0..config.count)
        .map(|_| PointInstance {
            position: [
                (rng.gen::<f32>() - 0.5) * config.spread,
                (rng.gen::<f32>() - 0.5) * config.spread,
                (rng.gen::<f32>() - 0.5) * config.spread,
            ],
            size: config.size,
            color: [1.0, 1.0, 1.0],
            opacity: 1.0,
        })
        .collect()
}

/// The GPU star field: one additive point batch with a soft glow sprite.
pub struct StarField {
    batch: PointBatch,
}

impl StarField {
    /// Build the star field.
    pub fn build<R: Rng>(
        ctx: &Context,
        scene: &SceneBinding,
        config: &StarFieldConfig,
        rng: &mut R,
    ) -> Self {
        let texture = Texture2D::from_bitmap(
            &ctx.device,
            &ctx.queue,
            &Bitmap::glow(32),
            Some("Star Texture"),
        );
        let mut batch = PointBatch::new(
            ctx,
            scene,
            &texture,
            config.count,
            BlendMode::Additive,
            "Star Field Pipeline",
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
    fn test_scatter_stays_in_bounds() {
        let config = StarFieldConfig::default();
        let mut rng = SmallRng::seed_from_u64(7);
        let stars = scatter(&config, &mut rng);
        assert_eq!(stars.len(), config.count as usize);
        let half = config.spread * 0.5;
        for star in &stars {
            for c in star.position {
                assert!(c.abs() <= half);
            }
            assert_eq!(star.size, config.size);
        }
    }

    #[test]
    fn test_scatter_is_seed_deterministic() {
        let config = StarFieldConfig { count: 16, ..Default::default() };
        let a = scatter(&config, &mut SmallRng::seed_from_u64(3));
        let b = scatter(&config, &mut SmallRng::seed_from_u64(3));
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.position, y.position);
        }
    }
}
