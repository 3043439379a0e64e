//! The scene orchestrator.

use super::{HitSet, PointerState, SceneConfig, SceneMode};
use crate::camera::PerspectiveCamera;
use crate::constellation::{ConstellationSet, Constellations};
use crate::core::{Clock, Context, RenderConfig, Renderer};
use crate::field::{Nebula, StarField};
use crate::math::{Color, Matrix4, Vector3};
use crate::render::{BlendMode, LineStrip, SceneBinding, SceneUniform};
use crate::sponsors::{self, CentralLogo, Heading, SponsorToken};
use crate::stardust::Stardust;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Entity index of the central logo in the sponsor page's hit set; tokens
/// follow at index + 1.
const LOGO_ENTITY: usize = 0;

/// Opacity of the drawn orbit ring lines.
const RING_OPACITY: f32 = 0.15;

struct HomeLayer {
    set: ConstellationSet,
    shapes: Constellations,
    stardust: Stardust,
}

struct SponsorLayer {
    rings: Vec<LineStrip>,
    tokens: Vec<SponsorToken>,
    heading: Heading,
    logo: CentralLogo,
}

/// The whole animated scene: camera, the shared rotating galaxy backdrop,
/// and whichever page layer the mode selects.
///
/// `update` advances the simulation and uploads instance data; `render`
/// records and submits one translucent pass. Both are driven once per
/// animation frame by the embedding loop.
pub struct Scene {
    ctx: Context,
    renderer: Renderer,
    camera: PerspectiveCamera,
    clock: Clock,
    scene_binding: SceneBinding,
    rng: SmallRng,
    mode: SceneMode,
    config: SceneConfig,
    pointer: PointerState,
    hits: HitSet,
    galaxy_angle: f32,
    star_field: StarField,
    nebula: Nebula,
    home: Option<HomeLayer>,
    sponsors: Option<SponsorLayer>,
}

impl Scene {
    /// Build the scene for `mode`. `seed` fixes every random placement
    /// (star scatter, nebula puffs, constellation tilts).
    pub fn new(ctx: Context, mode: SceneMode, config: SceneConfig, seed: u64) -> Self {
        let renderer = Renderer::new(&RenderConfig::default());
        let scene_binding = SceneBinding::new(&ctx);
        let mut rng = SmallRng::seed_from_u64(seed);

        let mut camera = PerspectiveCamera::default();
        camera.set_aspect(ctx.aspect_ratio());

        let star_field = StarField::build(&ctx, &scene_binding, &config.stars, &mut rng);
        let nebula = Nebula::build(&ctx, &scene_binding, &config.nebula, &mut rng);

        let home = (mode == SceneMode::Home).then(|| HomeLayer {
            set: ConstellationSet::new(config.constellations.clone()),
            shapes: Constellations::build(&ctx, &scene_binding, &config.constellations, &mut rng),
            stardust: Stardust::build(&ctx, &scene_binding, config.stardust.clone()),
        });

        let sponsors = (mode == SceneMode::Sponsors).then(|| {
            let rings = config
                .orbits
                .orbits()
                .iter()
                .map(|orbit| {
                    LineStrip::new(
                        &ctx,
                        &scene_binding,
                        &orbit.ring_points(128),
                        Color::WHITE,
                        RING_OPACITY,
                        BlendMode::Additive,
                        "Orbit Ring Pipeline",
                    )
                })
                .collect();

            let roster = if config.roster.is_empty() {
                sponsors::roster()
            } else {
                config.roster.clone()
            };
            let tokens = roster
                .iter()
                .map(|entry| {
                    let orbit = *config.orbits.get(entry.orbit_index);
                    SponsorToken::build(&ctx, &scene_binding, entry, orbit, &config.sponsors)
                })
                .collect();

            SponsorLayer {
                rings,
                tokens,
                heading: Heading::build(&ctx, &scene_binding, &config.heading),
                logo: CentralLogo::build(&ctx, &scene_binding, &config.logo),
            }
        });

        Self {
            ctx,
            renderer,
            camera,
            clock: Clock::start_new(),
            scene_binding,
            rng,
            mode,
            config,
            pointer: PointerState::default(),
            hits: HitSet::new(),
            galaxy_angle: 0.0,
            star_field,
            nebula,
            home,
            sponsors,
        }
    }

    /// Which layer this scene carries.
    #[inline]
    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    /// The wgpu context.
    #[inline]
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Seconds since the previous tick, clamped so a backgrounded tab does
    /// not come back with a huge catch-up step.
    pub fn tick(&mut self) -> f32 {
        (self.clock.get_delta() as f32).min(0.1)
    }

    /// Record the pointer position in NDC.
    pub fn set_pointer(&mut self, ndc_x: f32, ndc_y: f32) {
        self.pointer.ndc.x = ndc_x;
        self.pointer.ndc.y = ndc_y;
    }

    /// Resize the surface and the camera.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
        self.camera.set_aspect(self.ctx.aspect_ratio());
    }

    /// Advance the simulation one frame and upload instance data.
    pub fn update(&mut self, dt: f32) {
        // The backdrop spins at a fixed per-frame rate around its own
        // center, pushed back behind the page content.
        self.galaxy_angle += self.config.galaxy.spin;
        let galaxy_model = Matrix4::translation(Vector3::new(0.0, 0.0, self.config.galaxy.depth))
            .multiply(&Matrix4::rotation_z(self.galaxy_angle));
        self.star_field.set_model(&self.ctx, &galaxy_model);
        self.nebula.set_model(&self.ctx, &galaxy_model);

        if let Some(layer) = &mut self.home {
            let ray = self.camera.pick_ray(self.pointer.ndc);
            self.hits.clear();
            self.hits.extend_from(layer.set.hit_volumes());
            let hovered = self.hits.pick(&ray);

            let emitting = layer.set.update(hovered);
            layer.shapes.apply_opacities(&self.ctx, &layer.set);

            // The trail spawns at the pointer's projection onto the
            // constellation plane; decay still runs when nothing is hovered.
            let emit_pos = self.camera.unproject_to_z_plane(self.pointer.ndc, 0.0);
            layer.stardust.update(
                &self.ctx,
                emit_pos.unwrap_or(Vector3::ZERO),
                emitting && emit_pos.is_some(),
                dt,
                &mut self.rng,
            );
        }

        if let Some(layer) = &mut self.sponsors {
            layer.heading.update(&self.ctx, &self.config.heading);

            // Volumes from the previous frame's positions; one frame of lag
            // is invisible at orbit speeds.
            let ray = self.camera.pick_ray(self.pointer.ndc);
            self.hits.clear();
            self.hits
                .insert(layer.logo.hit_sphere(&self.config.logo), LOGO_ENTITY);
            for (i, token) in layer.tokens.iter().enumerate() {
                self.hits
                    .insert(token.hit_sphere(&self.config.sponsors), i + 1);
            }
            let hovered = self.hits.pick(&ray);

            layer
                .logo
                .update(&self.ctx, hovered == Some(LOGO_ENTITY), &self.config.logo);
            for (i, token) in layer.tokens.iter_mut().enumerate() {
                token.update(&self.ctx, hovered == Some(i + 1), &self.config.sponsors);
            }
        }
    }

    /// Record and submit one frame: backdrop first, then the page layer,
    /// back to front.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let view_proj = self.camera.view_projection_matrix().to_array();
        let (right, up) = self.camera.billboard_basis();
        self.scene_binding.write(
            &self.ctx,
            &SceneUniform {
                view_proj,
                camera_right: [right.x, right.y, right.z, 0.0],
                camera_up: [up.x, up.y, up.z, 0.0],
            },
        );

        let mut frame = self.renderer.begin_frame(&self.ctx)?;
        let mut draw_calls = 0u32;
        {
            let mut rpass = self.renderer.begin_pass(&mut frame);

            self.nebula.draw(&mut rpass, &self.scene_binding);
            self.star_field.draw(&mut rpass, &self.scene_binding);
            draw_calls += 2;

            if let Some(layer) = &self.home {
                layer.shapes.draw(&mut rpass, &self.scene_binding);
                layer.stardust.draw(&mut rpass, &self.scene_binding);
                draw_calls += layer.set.len() as u32 * 2 + 1;
            }

            if let Some(layer) = &self.sponsors {
                for ring in &layer.rings {
                    ring.draw(&mut rpass, &self.scene_binding);
                }
                for token in &layer.tokens {
                    token.draw(&mut rpass, &self.scene_binding);
                }
                layer.logo.draw(&mut rpass, &self.scene_binding);
                layer.heading.draw(&mut rpass, &self.scene_binding);
                draw_calls += layer.rings.len() as u32 + layer.tokens.len() as u32 * 3 + 4;
            }
        }
        self.renderer.end_frame(&self.ctx, frame);
        self.renderer.info_mut().draw_calls = draw_calls;
        Ok(())
    }

    /// Number of sponsor tokens, zero outside sponsor mode.
    pub fn sponsor_count(&self) -> usize {
        self.sponsors.as_ref().map_or(0, |layer| layer.tokens.len())
    }

    /// Apply the heading banner image. Ignored outside sponsor mode.
    pub fn set_heading_image(&mut self, bytes: &[u8]) {
        if let Some(layer) = &mut self.sponsors {
            layer.heading.set_image(&self.ctx, bytes);
        }
    }

    /// Apply the heading subtitle image. Ignored outside sponsor mode.
    pub fn set_heading_subtext_image(&mut self, bytes: &[u8]) {
        if let Some(layer) = &mut self.sponsors {
            layer.heading.set_subtext_image(&self.ctx, bytes);
        }
    }

    /// Apply the central logo image. Ignored outside sponsor mode.
    pub fn set_logo_image(&mut self, bytes: &[u8]) {
        if let Some(layer) = &mut self.sponsors {
            layer.logo.set_image(&self.ctx, bytes);
        }
    }

    /// Apply a sponsor token's logo images by roster index. Ignored outside
    /// sponsor mode or for an out-of-range index.
    pub fn set_sponsor_images(
        &mut self,
        index: usize,
        white_bytes: Option<&[u8]>,
        color_bytes: Option<&[u8]>,
    ) {
        if let Some(layer) = &mut self.sponsors {
            if let Some(token) = layer.tokens.get_mut(index) {
                token.set_images(&self.ctx, white_bytes, color_bytes);
            }
        }
    }
}
