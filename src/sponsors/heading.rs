//! The floating heading banner above the sponsor orbits.

use crate::core::Context;
use crate::math::{Color, Vector3};
use crate::render::{BlendMode, SceneBinding, SpriteBatch, SpriteInstance};
use crate::texture::{Bitmap, Texture2D};
use serde::Deserialize;

/// Heading banner tuning.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct HeadingConfig {
    /// Rest height of the banner.
    pub y_position: f32,
    /// Banner width in world units; height follows the image aspect.
    pub size: f32,
    /// Phase advance per frame for the float oscillation.
    pub float_speed: f32,
    /// Peak vertical float offset.
    pub float_range: f32,
    /// Warm glow opacity behind the banner.
    pub glow_opacity: f32,
    /// Glow size as a multiple of the banner size.
    pub glow_factor: f32,
    /// Subtext vertical offset from the banner center (negative is below).
    pub subtext_offset: f32,
    /// Subtext width in world units; height follows the image aspect.
    pub subtext_width: f32,
    /// Subtext opacity.
    pub subtext_opacity: f32,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            y_position: 380.0,
            size: 500.0,
            float_speed: 0.002,
            float_range: 10.0,
            glow_opacity: 0.6,
            glow_factor: 2.5,
            subtext_offset: -60.0,
            subtext_width: 800.0,
            subtext_opacity: 0.9,
        }
    }
}

/// The pure float oscillation: a phase accumulator sampled through a sine.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingMotion {
    time: f32,
}

impl HeadingMotion {
    /// Advance one frame.
    pub fn update(&mut self, config: &HeadingConfig) {
        self.time += config.float_speed;
    }

    /// Current vertical offset from the rest height.
    pub fn float_y(&self, config: &HeadingConfig) -> f32 {
        self.time.sin() * config.float_range
    }

    /// Current height of the banner center.
    pub fn banner_y(&self, config: &HeadingConfig) -> f32 {
        config.y_position + self.float_y(config)
    }

    /// Current height of the subtext center. The subtext floats with the
    /// banner, a fixed distance beneath it.
    pub fn subtext_y(&self, config: &HeadingConfig) -> f32 {
        self.banner_y(config) + config.subtext_offset
    }

    /// Accumulated phase.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }
}

/// GPU side: the banner plane, its subtitle plane beneath, and a warm
/// additive glow behind both.
pub struct Heading {
    motion: HeadingMotion,
    aspect: f32,
    subtext_aspect: f32,
    main: SpriteBatch,
    subtext: SpriteBatch,
    glow: SpriteBatch,
}

impl Heading {
    /// Build the banner with the placeholder image.
    pub fn build(ctx: &Context, scene: &SceneBinding, _config: &HeadingConfig) -> Self {
        let placeholder = Texture2D::white(&ctx.device, &ctx.queue);
        let glow_texture = Texture2D::from_bitmap(
            &ctx.device,
            &ctx.queue,
            &Bitmap::glow(128),
            Some("Heading Glow Texture"),
        );
        Self {
            motion: HeadingMotion::default(),
            aspect: 1.0,
            subtext_aspect: 1.0,
            main: SpriteBatch::new(ctx, scene, &placeholder, 1, BlendMode::Alpha, "Heading Pipeline"),
            subtext: SpriteBatch::new(
                ctx,
                scene,
                &placeholder,
                1,
                BlendMode::Alpha,
                "Heading Subtext Pipeline",
            ),
            glow: SpriteBatch::new(
                ctx,
                scene,
                &glow_texture,
                1,
                BlendMode::Additive,
                "Heading Glow Pipeline",
            ),
        }
    }

    /// Apply the banner image once its bytes arrive; the plane height is
    /// re-derived from the image aspect. A failed decode keeps the
    /// placeholder and logs a warning.
    pub fn set_image(&mut self, ctx: &Context, bytes: &[u8]) {
        match Texture2D::from_bytes(&ctx.device, &ctx.queue, bytes, Some("Heading Image")) {
            Ok(texture) => {
                let aspect = texture.width() as f32 / texture.height() as f32;
                if aspect.is_finite() && aspect > 0.0 {
                    self.aspect = aspect;
                }
                self.main.set_texture(ctx, &texture);
            }
            Err(err) => {
                log::warn!("heading image decode failed, keeping placeholder: {err}");
            }
        }
    }

    /// Apply the subtitle image, same two-phase flow as the banner.
    pub fn set_subtext_image(&mut self, ctx: &Context, bytes: &[u8]) {
        match Texture2D::from_bytes(&ctx.device, &ctx.queue, bytes, Some("Heading Subtext Image")) {
            Ok(texture) => {
                let aspect = texture.width() as f32 / texture.height() as f32;
                if aspect.is_finite() && aspect > 0.0 {
                    self.subtext_aspect = aspect;
                }
                self.subtext.set_texture(ctx, &texture);
            }
            Err(err) => {
                log::warn!("heading subtext decode failed, keeping placeholder: {err}");
            }
        }
    }

    /// Advance the float and upload the sprite instances.
    pub fn update(&mut self, ctx: &Context, config: &HeadingConfig) {
        self.motion.update(config);
        let y = self.motion.banner_y(config);
        let size = [config.size, config.size / self.aspect];
        let glow_tint = Color::from_hex(0xffaa00);

        self.glow.write_instances(
            ctx,
            &[SpriteInstance {
                position: [0.0, y, -5.0],
                size: [size[0] * config.glow_factor, size[1] * config.glow_factor],
                color: glow_tint.to_array(),
                opacity: config.glow_opacity,
            }],
        );
        self.main.write_instances(
            ctx,
            &[SpriteInstance {
                position: [0.0, y, 0.0],
                size,
                color: [1.0, 1.0, 1.0],
                opacity: 1.0,
            }],
        );
        self.subtext.write_instances(
            ctx,
            &[SpriteInstance {
                position: [0.0, self.motion.subtext_y(config), 0.0],
                size: [config.subtext_width, config.subtext_width / self.subtext_aspect],
                color: [1.0, 1.0, 1.0],
                opacity: config.subtext_opacity,
            }],
        );
    }

    /// Current world position of the banner center.
    pub fn position(&self, config: &HeadingConfig) -> Vector3 {
        Vector3::new(0.0, self.motion.banner_y(config), 0.0)
    }

    /// Record the draws, glow beneath the banner and subtext.
    pub fn draw<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>, scene: &'a SceneBinding) {
        self.glow.draw(rpass, scene);
        self.main.draw(rpass, scene);
        self.subtext.draw(rpass, scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_oscillates_within_range() {
        let config = HeadingConfig::default();
        let mut motion = HeadingMotion::default();
        assert_eq!(motion.float_y(&config), 0.0);
        for _ in 0..10_000 {
            motion.update(&config);
            assert!(motion.float_y(&config).abs() <= config.float_range + 1e-4);
        }
        // Ten thousand frames cover several full periods.
        assert!(motion.time() > std::f32::consts::TAU);
    }

    #[test]
    fn test_float_phase_is_per_frame_not_per_second() {
        let config = HeadingConfig::default();
        let mut motion = HeadingMotion::default();
        for _ in 0..100 {
            motion.update(&config);
        }
        assert!((motion.time() - 0.2).abs() < 1e-5);
        assert!((motion.float_y(&config) - 0.2_f32.sin() * 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_subtext_floats_with_banner() {
        let config = HeadingConfig::default();
        let mut motion = HeadingMotion::default();
        assert_eq!(motion.subtext_y(&config), config.y_position - 60.0);
        let mut banner_moved = false;
        for _ in 0..2_000 {
            motion.update(&config);
            let banner = motion.banner_y(&config);
            let subtext = motion.subtext_y(&config);
            // The pair moves as one: the gap never drifts.
            assert!((subtext - banner - config.subtext_offset).abs() < 1e-4);
            if (banner - config.y_position).abs() > 1.0 {
                banner_moved = true;
            }
        }
        assert!(banner_moved);
    }
}
