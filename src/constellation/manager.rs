//! Constellation hover state and its GPU layer.

use super::catalog::{Shape, CATALOG};
use crate::core::Context;
use crate::math::{ease_toward, Color, Matrix4, Sphere, Vector3};
use crate::render::{BlendMode, LineStrip, PointBatch, PointInstance, SceneBinding};
use crate::texture::{Bitmap, Texture2D};
use rand::Rng;
use serde::Deserialize;

/// Constellation tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConstellationConfig {
    /// Opacity of an idle shape.
    pub passive_opacity: f32,
    /// Opacity of the hovered shape.
    pub active_opacity: f32,
    /// Global size multiplier applied to the local skeletons.
    pub scale: f32,
    /// Smoothing rate while fading in (hovered).
    pub fade_in: f32,
    /// Smoothing rate while fading out.
    pub fade_out: f32,
    /// Extra hit radius in local units beyond the skeleton's bounding sphere.
    pub hit_margin: f32,
    /// Star point size in local units.
    pub star_size: f32,
    /// Random z tilt per shape, uniform in +-tilt_range radians.
    pub tilt_range: f32,
}

impl Default for ConstellationConfig {
    fn default() -> Self {
        Self {
            passive_opacity: 0.1,
            active_opacity: 1.0,
            scale: 4.5,
            fade_in: 0.1,
            fade_out: 0.09,
            hit_margin: 15.0,
            star_size: 15.0,
            tilt_range: 0.25,
        }
    }
}

/// Hover-fade state for the whole catalog. Pure CPU state: the GPU layer
/// reads the animated opacities after each update.
pub struct ConstellationSet {
    config: ConstellationConfig,
    opacities: Vec<f32>,
    // Collider -> shape index, one sphere per shape.
    hit_volumes: Vec<(Sphere, usize)>,
}

impl ConstellationSet {
    /// Build the state for every catalog shape.
    pub fn new(config: ConstellationConfig) -> Self {
        let opacities = vec![config.passive_opacity; CATALOG.len()];
        let hit_volumes = CATALOG
            .iter()
            .enumerate()
            .map(|(i, shape)| (hit_sphere(shape, &config), i))
            .collect();
        Self {
            config,
            opacities,
            hit_volumes,
        }
    }

    /// Number of shapes.
    #[inline]
    pub fn len(&self) -> usize {
        self.opacities.len()
    }

    /// Whether the set is empty (it never is for the standard catalog).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.opacities.is_empty()
    }

    /// Current opacity of shape `index`.
    #[inline]
    pub fn opacity(&self, index: usize) -> f32 {
        self.opacities[index]
    }

    /// The hit volumes, collider paired with its shape index.
    #[inline]
    pub fn hit_volumes(&self) -> &[(Sphere, usize)] {
        &self.hit_volumes
    }

    /// Advance every shape's fade one frame. `hovered` is the shape index
    /// the pointer ray currently hits, if any. Returns whether any shape is
    /// the hover target this frame.
    pub fn update(&mut self, hovered: Option<usize>) -> bool {
        let mut any_active = false;
        for (i, opacity) in self.opacities.iter_mut().enumerate() {
            let is_target = hovered == Some(i);
            let (target, rate) = if is_target {
                (self.config.active_opacity, self.config.fade_in)
            } else {
                (self.config.passive_opacity, self.config.fade_out)
            };
            *opacity = ease_toward(*opacity, target, rate);
            if is_target {
                any_active = true;
            }
        }
        any_active
    }

    /// Config access for the GPU layer.
    #[inline]
    pub fn config(&self) -> &ConstellationConfig {
        &self.config
    }
}

/// World-space hit sphere for a shape: centered on the shape's anchor,
/// radius from the local bounding sphere plus the hover margin, scaled.
fn hit_sphere(shape: &Shape, config: &ConstellationConfig) -> Sphere {
    let local = Sphere::from_points(&shape.local_points());
    Sphere::new(
        shape.position,
        (local.radius + config.hit_margin) * config.scale,
    )
}

/// GPU side: one line strip plus one point batch per shape, sharing the
/// shape's model matrix (anchor translation, random z tilt, global scale).
pub struct Constellations {
    strips: Vec<LineStrip>,
    stars: Vec<PointBatch>,
}

impl Constellations {
    /// Build the render objects for every catalog shape.
    pub fn build<R: Rng>(
        ctx: &Context,
        scene: &SceneBinding,
        config: &ConstellationConfig,
        rng: &mut R,
    ) -> Self {
        let star_texture = Texture2D::from_bitmap(
            &ctx.device,
            &ctx.queue,
            &Bitmap::radial_dot(32),
            Some("Constellation Star Texture"),
        );

        let mut strips = Vec::with_capacity(CATALOG.len());
        let mut stars = Vec::with_capacity(CATALOG.len());

        for shape in &CATALOG {
            let tilt = (rng.gen::<f32>() - 0.5) * 2.0 * config.tilt_range;
            let model = Matrix4::translation(shape.position)
                .multiply(&Matrix4::rotation_z(tilt))
                .multiply(&Matrix4::scaling(config.scale));

            let points = shape.local_points();

            let mut strip = LineStrip::new(
                ctx,
                scene,
                &points,
                Color::WHITE,
                config.passive_opacity,
                BlendMode::Additive,
                "Constellation Line Pipeline",
            );
            strip.set_model(ctx, &model);

            let instances: Vec<PointInstance> = points
                .iter()
                .map(|p| PointInstance {
                    position: p.to_array(),
                    // Instance sizes are world units; the model matrix only
                    // moves centers, so pre-scale here.
                    size: config.star_size * config.scale,
                    color: [1.0, 1.0, 1.0],
                    opacity: 1.0,
                })
                .collect();
            let mut batch = PointBatch::new(
                ctx,
                scene,
                &star_texture,
                points.len() as u32,
                BlendMode::Additive,
                "Constellation Star Pipeline",
            );
            batch.set_model(ctx, &model);
            batch.set_opacity(ctx, config.passive_opacity);
            batch.write_instances(ctx, &instances);

            strips.push(strip);
            stars.push(batch);
        }

        Self { strips, stars }
    }

    /// Push the animated opacities into the per-shape uniforms.
    pub fn apply_opacities(&mut self, ctx: &Context, set: &ConstellationSet) {
        for i in 0..self.strips.len() {
            let opacity = set.opacity(i);
            self.strips[i].set_opacity(ctx, opacity);
            self.stars[i].set_opacity(ctx, opacity);
        }
    }

    /// Record the draws, lines beneath their star points.
    pub fn draw<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>, scene: &'a SceneBinding) {
        for strip in &self.strips {
            strip.draw(rpass, scene);
        }
        for batch in &self.stars {
            batch.draw(rpass, scene);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::has_converged;

    #[test]
    fn test_starts_passive_with_one_volume_per_shape() {
        let set = ConstellationSet::new(ConstellationConfig::default());
        assert_eq!(set.len(), CATALOG.len());
        assert_eq!(set.hit_volumes().len(), CATALOG.len());
        for i in 0..set.len() {
            assert_eq!(set.opacity(i), 0.1);
        }
    }

    #[test]
    fn test_hover_scenario_converges_and_stays_bounded() {
        // Hover shape 0 for 50 frames, then release for 50 frames.
        let mut set = ConstellationSet::new(ConstellationConfig::default());
        for _ in 0..50 {
            assert!(set.update(Some(0)));
        }
        assert!(has_converged(set.opacity(0), 1.0, 0.02));
        // Every other shape never left passive.
        for i in 1..set.len() {
            assert!(has_converged(set.opacity(i), 0.1, 1e-6));
        }

        for _ in 0..50 {
            assert!(!set.update(None));
        }
        assert!(has_converged(set.opacity(0), 0.1, 0.02));
    }

    #[test]
    fn test_opacity_stays_within_band() {
        let mut set = ConstellationSet::new(ConstellationConfig::default());
        for frame in 0..200 {
            // Alternate hover target to stress the easing.
            let hovered = if frame % 3 == 0 { Some(frame % 9) } else { None };
            set.update(hovered);
            for i in 0..set.len() {
                let o = set.opacity(i);
                assert!((0.1..=1.0).contains(&o), "opacity {o} out of band");
            }
        }
    }

    #[test]
    fn test_fade_is_asymmetric() {
        // One hovered frame then one released frame: the climb per frame is
        // faster than the fall per frame at the same distance.
        let config = ConstellationConfig::default();
        let mut set = ConstellationSet::new(config);
        set.update(Some(0));
        let rise = set.opacity(0) - 0.1;
        // rise = (1.0 - 0.1) * fade_in
        assert!((rise - 0.9 * 0.1).abs() < 1e-6);

        let mut set = ConstellationSet::new(ConstellationConfig::default());
        for _ in 0..100 {
            set.update(Some(0));
        }
        let high = set.opacity(0);
        set.update(None);
        let fall = high - set.opacity(0);
        // fall = (high - 0.1) * fade_out with fade_out < fade_in
        assert!((fall - (high - 0.1) * 0.09).abs() < 1e-5);
    }

    #[test]
    fn test_hit_sphere_includes_margin_and_scale() {
        let set = ConstellationSet::new(ConstellationConfig::default());
        // Sword skeleton spans y -40..50, bounding radius 45 about (0, 5).
        let (sphere, index) = set.hit_volumes()[4];
        assert_eq!(CATALOG[index].name, "sword");
        assert!((sphere.radius - (45.0 + 15.0) * 4.5).abs() < 1e-3);
        assert!(sphere.center.approx_eq(&CATALOG[4].position, 1e-6));
    }
}
