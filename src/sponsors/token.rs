//! Sponsor tokens: orbiting billboards with a hover cross-fade.

use super::orbits::{orbit_position, Orbit};
use crate::core::Context;
use crate::math::{ease_toward, Sphere, Vector3};
use crate::render::{BlendMode, SceneBinding, SpriteBatch, SpriteInstance};
use crate::texture::{Bitmap, Texture2D};
use serde::Deserialize;

/// Sponsor token tuning.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SponsorConfig {
    /// Angle advance per frame, in radians. Orbiting never pauses.
    pub orbit_speed: f32,
    /// Smoothing rate for the hover blend and scale.
    pub hover_rate: f32,
    /// Scale target while hovered.
    pub hover_scale: f32,
    /// Scale target at rest.
    pub default_scale: f32,
    /// Glow halo opacity.
    pub glow_opacity: f32,
    /// Opacity of the idle (white) layer when fully un-hovered.
    pub base_opacity: f32,
    /// Logo plane height in world units.
    pub size: f32,
    /// Lift along the orbit's local Z, keeps tokens off the ring line.
    pub lift: f32,
    /// Glow halo size as a multiple of the plane size.
    pub glow_factor: f32,
}

impl Default for SponsorConfig {
    fn default() -> Self {
        Self {
            orbit_speed: 0.0010,
            hover_rate: 0.35,
            hover_scale: 1.4,
            default_scale: 1.0,
            glow_opacity: 0.4,
            base_opacity: 0.7,
            size: 40.0,
            lift: 10.0,
            glow_factor: 2.5,
        }
    }
}

/// One roster entry.
#[derive(Debug, Clone, Deserialize)]
pub struct SponsorEntry {
    /// Display name, also the hover identity.
    pub name: String,
    /// Which orbit the token rides.
    pub orbit_index: usize,
    /// Starting angle in degrees.
    pub angle_deg: f32,
}

impl SponsorEntry {
    /// Create an entry.
    pub fn new(name: &str, orbit_index: usize, angle_deg: f32) -> Self {
        Self {
            name: name.to_string(),
            orbit_index,
            angle_deg,
        }
    }
}

/// The pure animation state of one token: its orbital angle plus the two
/// eased hover scalars.
#[derive(Debug, Clone, Copy)]
pub struct TokenMotion {
    angle: f32,
    blend: f32,
    scale: f32,
}

impl TokenMotion {
    /// Start at `angle_deg` on the orbit, fully idle.
    pub fn new(angle_deg: f32, config: &SponsorConfig) -> Self {
        Self {
            angle: angle_deg.to_radians(),
            blend: 0.0,
            scale: config.default_scale,
        }
    }

    /// Advance one frame: the angle always moves; blend and scale ease
    /// toward the hover targets.
    pub fn update(&mut self, hovered: bool, config: &SponsorConfig) {
        self.angle += config.orbit_speed;

        let blend_target = if hovered { 1.0 } else { 0.0 };
        self.blend = ease_toward(self.blend, blend_target, config.hover_rate);

        let scale_target = if hovered {
            config.hover_scale
        } else {
            config.default_scale
        };
        self.scale = ease_toward(self.scale, scale_target, config.hover_rate);
    }

    /// Current world position on `orbit`.
    pub fn position(&self, orbit: &Orbit, config: &SponsorConfig) -> Vector3 {
        orbit_position(orbit, self.angle, config.lift)
    }

    /// Current orbital angle in radians, strictly increasing.
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Hover blend, 0 = idle layer, 1 = color layer.
    #[inline]
    pub fn blend(&self) -> f32 {
        self.blend
    }

    /// Current uniform scale.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Opacity of the idle layer: fades out as the color layer fades in.
    #[inline]
    pub fn white_opacity(&self, config: &SponsorConfig) -> f32 {
        (1.0 - self.blend) * config.base_opacity
    }

    /// Opacity of the hovered (color) layer.
    #[inline]
    pub fn color_opacity(&self) -> f32 {
        self.blend
    }
}

/// GPU side of one token: the idle and color logo planes plus an additive
/// glow halo behind them. The halo never participates in hit testing.
pub struct SponsorToken {
    /// Display name.
    pub name: String,
    orbit: Orbit,
    motion: TokenMotion,
    aspect: f32,
    white: SpriteBatch,
    color: SpriteBatch,
    glow: SpriteBatch,
    position: Vector3,
}

impl SponsorToken {
    /// Build a token on `orbit`. Both logo layers start as the white
    /// placeholder until images arrive.
    pub fn build(
        ctx: &Context,
        scene: &SceneBinding,
        entry: &SponsorEntry,
        orbit: Orbit,
        config: &SponsorConfig,
    ) -> Self {
        let placeholder = Texture2D::white(&ctx.device, &ctx.queue);
        let glow_texture = Texture2D::from_bitmap(
            &ctx.device,
            &ctx.queue,
            &Bitmap::glow(64),
            Some("Sponsor Glow Texture"),
        );

        let motion = TokenMotion::new(entry.angle_deg, config);
        let position = motion.position(&orbit, config);

        Self {
            name: entry.name.clone(),
            orbit,
            motion,
            aspect: 1.0,
            white: SpriteBatch::new(ctx, scene, &placeholder, 1, BlendMode::Alpha, "Sponsor White Pipeline"),
            color: SpriteBatch::new(ctx, scene, &placeholder, 1, BlendMode::Alpha, "Sponsor Color Pipeline"),
            glow: SpriteBatch::new(ctx, scene, &glow_texture, 1, BlendMode::Additive, "Sponsor Glow Pipeline"),
            position,
        }
    }

    /// Apply the logo images once their bytes arrive. Each layer is
    /// independent: one failed decode leaves that layer on the placeholder
    /// without touching the other. The plane aspect comes from the first
    /// image that decodes.
    pub fn set_images(
        &mut self,
        ctx: &Context,
        white_bytes: Option<&[u8]>,
        color_bytes: Option<&[u8]>,
    ) {
        let apply = |batch: &mut SpriteBatch, bytes: Option<&[u8]>, label: &str| {
            let Some(bytes) = bytes else { return None };
            match Texture2D::from_bytes(&ctx.device, &ctx.queue, bytes, Some(label)) {
                Ok(texture) => {
                    let aspect = texture.width() as f32 / texture.height() as f32;
                    batch.set_texture(ctx, &texture);
                    Some(aspect)
                }
                Err(err) => {
                    log::warn!("sponsor logo decode failed, keeping placeholder: {err}");
                    None
                }
            }
        };

        let white_aspect = apply(&mut self.white, white_bytes, "Sponsor White Logo");
        let color_aspect = apply(&mut self.color, color_bytes, "Sponsor Color Logo");
        if let Some(aspect) = white_aspect.or(color_aspect) {
            if aspect.is_finite() && aspect > 0.0 {
                self.aspect = aspect;
            }
        }
    }

    /// Advance the motion one frame and upload the three sprite instances.
    pub fn update(&mut self, ctx: &Context, hovered: bool, config: &SponsorConfig) {
        self.motion.update(hovered, config);
        self.position = self.motion.position(&self.orbit, config);

        let scale = self.motion.scale();
        let size = [config.size * self.aspect * scale, config.size * scale];
        let pos = self.position;

        self.glow.write_instances(
            ctx,
            &[SpriteInstance {
                position: [pos.x, pos.y, pos.z - 2.0],
                size: [config.size * config.glow_factor * scale; 2],
                color: [1.0, 1.0, 1.0],
                opacity: config.glow_opacity,
            }],
        );
        self.white.write_instances(
            ctx,
            &[SpriteInstance {
                position: pos.to_array(),
                size,
                color: [1.0, 1.0, 1.0],
                opacity: self.motion.white_opacity(config),
            }],
        );
        self.color.write_instances(
            ctx,
            &[SpriteInstance {
                position: [pos.x, pos.y, pos.z + 0.2],
                size,
                color: [1.0, 1.0, 1.0],
                opacity: self.motion.color_opacity(),
            }],
        );
    }

    /// The token's current hit volume: a sphere around the logo plane.
    /// The glow halo is deliberately excluded.
    pub fn hit_sphere(&self, config: &SponsorConfig) -> Sphere {
        let half_extent = config.size * 0.5 * self.aspect.max(1.0) * self.motion.scale();
        Sphere::new(self.position, half_extent)
    }

    /// The pure motion state, mainly for tests.
    #[inline]
    pub fn motion(&self) -> &TokenMotion {
        &self.motion
    }

    /// Record the draws: glow beneath, then the cross-faded logo layers.
    pub fn draw<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>, scene: &'a SceneBinding) {
        self.glow.draw(rpass, scene);
        self.white.draw(rpass, scene);
        self.color.draw(rpass, scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::has_converged;

    #[test]
    fn test_initial_position_before_update() {
        let config = SponsorConfig::default();
        let orbit = Orbit {
            center: Vector3::ZERO,
            major: 100.0,
            minor: 50.0,
            tilt_deg: 0.0,
        };
        let motion = TokenMotion::new(0.0, &config);
        let p = motion.position(&orbit, &config);
        assert!(p.approx_eq(&Vector3::new(100.0, 0.0, config.lift), 1e-4));
    }

    #[test]
    fn test_angle_advances_regardless_of_hover() {
        let config = SponsorConfig::default();
        let mut motion = TokenMotion::new(30.0, &config);
        let mut last = motion.angle();
        for frame in 0..100 {
            motion.update(frame % 2 == 0, &config);
            assert!(motion.angle() > last);
            last = motion.angle();
        }
        let expected = 30.0_f32.to_radians() + 100.0 * config.orbit_speed;
        assert!((motion.angle() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_hover_blend_and_scale_converge() {
        let config = SponsorConfig::default();
        let mut motion = TokenMotion::new(0.0, &config);
        for _ in 0..40 {
            motion.update(true, &config);
        }
        assert!(has_converged(motion.blend(), 1.0, 1e-3));
        assert!(has_converged(motion.scale(), config.hover_scale, 1e-3));

        for _ in 0..40 {
            motion.update(false, &config);
        }
        assert!(has_converged(motion.blend(), 0.0, 1e-3));
        assert!(has_converged(motion.scale(), config.default_scale, 1e-3));
    }

    #[test]
    fn test_cross_fade_opacities() {
        let config = SponsorConfig::default();
        let mut motion = TokenMotion::new(0.0, &config);
        assert!((motion.white_opacity(&config) - 0.7).abs() < 1e-6);
        assert_eq!(motion.color_opacity(), 0.0);

        for _ in 0..60 {
            motion.update(true, &config);
        }
        assert!(motion.white_opacity(&config) < 0.01);
        assert!(motion.color_opacity() > 0.99);

        // The pair is a cross-fade: idle opacity is always proportional to
        // what the color layer still lacks.
        let expected = (1.0 - motion.color_opacity()) * config.base_opacity;
        assert!((motion.white_opacity(&config) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_blend_never_jumps() {
        let config = SponsorConfig::default();
        let mut motion = TokenMotion::new(0.0, &config);
        let mut last = 0.0_f32;
        for _ in 0..20 {
            motion.update(true, &config);
            let step = motion.blend() - last;
            // Each step covers at most hover_rate of the remaining gap.
            assert!(step <= config.hover_rate * (1.0 - last) + 1e-6);
            assert!(step >= 0.0);
            last = motion.blend();
        }
    }
}
