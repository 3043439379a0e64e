//! The central fest logo at the heart of the sponsor orbits.

use crate::core::Context;
use crate::math::{ease_toward, Sphere, Vector3};
use crate::render::{BlendMode, SceneBinding, SpriteBatch, SpriteInstance};
use crate::texture::{Bitmap, Texture2D};
use serde::Deserialize;

/// Central logo tuning.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct CentralLogoConfig {
    /// Logo plane height in world units.
    pub size: f32,
    /// Scale target while hovered.
    pub hover_scale: f32,
    /// Smoothing rate for the hover scale.
    pub hover_rate: f32,
    /// Glow halo opacity.
    pub glow_opacity: f32,
    /// Glow halo size as a multiple of the plane size.
    pub glow_factor: f32,
}

impl Default for CentralLogoConfig {
    fn default() -> Self {
        Self {
            size: 180.0,
            hover_scale: 1.2,
            hover_rate: 0.35,
            glow_opacity: 0.35,
            glow_factor: 2.0,
        }
    }
}

/// The fest logo: a single billboard at the origin that swells while
/// hovered, with a soft glow behind it.
pub struct CentralLogo {
    scale: f32,
    aspect: f32,
    main: SpriteBatch,
    glow: SpriteBatch,
}

impl CentralLogo {
    /// Build the logo with the placeholder image.
    pub fn build(ctx: &Context, scene: &SceneBinding, _config: &CentralLogoConfig) -> Self {
        let placeholder = Texture2D::white(&ctx.device, &ctx.queue);
        let glow_texture = Texture2D::from_bitmap(
            &ctx.device,
            &ctx.queue,
            &Bitmap::glow(64),
            Some("Central Logo Glow Texture"),
        );
        Self {
            scale: 1.0,
            aspect: 1.0,
            main: SpriteBatch::new(ctx, scene, &placeholder, 1, BlendMode::Alpha, "Central Logo Pipeline"),
            glow: SpriteBatch::new(
                ctx,
                scene,
                &glow_texture,
                1,
                BlendMode::Additive,
                "Central Logo Glow Pipeline",
            ),
        }
    }

    /// Apply the logo image once its bytes arrive. A failed decode keeps
    /// the placeholder and logs a warning.
    pub fn set_image(&mut self, ctx: &Context, bytes: &[u8]) {
        match Texture2D::from_bytes(&ctx.device, &ctx.queue, bytes, Some("Central Logo Image")) {
            Ok(texture) => {
                let aspect = texture.width() as f32 / texture.height() as f32;
                if aspect.is_finite() && aspect > 0.0 {
                    self.aspect = aspect;
                }
                self.main.set_texture(ctx, &texture);
            }
            Err(err) => {
                log::warn!("central logo decode failed, keeping placeholder: {err}");
            }
        }
    }

    /// Ease the hover scale one frame and upload both sprite instances.
    pub fn update(&mut self, ctx: &Context, hovered: bool, config: &CentralLogoConfig) {
        let target = if hovered { config.hover_scale } else { 1.0 };
        self.scale = ease_toward(self.scale, target, config.hover_rate);

        let size = [
            config.size * self.aspect * self.scale,
            config.size * self.scale,
        ];
        self.glow.write_instances(
            ctx,
            &[SpriteInstance {
                position: [0.0, 0.0, -2.0],
                size: [config.size * config.glow_factor * self.scale; 2],
                color: [1.0, 1.0, 1.0],
                opacity: config.glow_opacity,
            }],
        );
        self.main.write_instances(
            ctx,
            &[SpriteInstance {
                position: [0.0, 0.0, 0.0],
                size,
                color: [1.0, 1.0, 1.0],
                opacity: 1.0,
            }],
        );
    }

    /// Current hover scale.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// The logo's hit volume, centered at the origin. Excludes the glow.
    pub fn hit_sphere(&self, config: &CentralLogoConfig) -> Sphere {
        Sphere::new(
            Vector3::ZERO,
            config.size * 0.5 * self.aspect.max(1.0) * self.scale,
        )
    }

    /// Record the draws, glow beneath the logo.
    pub fn draw<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>, scene: &'a SceneBinding) {
        self.glow.draw(rpass, scene);
        self.main.draw(rpass, scene);
    }
}
