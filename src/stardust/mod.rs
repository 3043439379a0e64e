//! # Stardust Module
//!
//! The pointer-trail particle emitter on the home page. A fixed pool of
//! slots is recycled round-robin; while a constellation is hovered the
//! pool spawns a couple of particles per frame at the pointer's projected
//! world position, each drifting and fading out over its one-second life.

use crate::core::Context;
use crate::math::{Vector2, Vector3};
use crate::render::{BlendMode, PointBatch, PointInstance, SceneBinding};
use crate::texture::{Bitmap, Texture2D};
use rand::Rng;
use serde::Deserialize;

/// Stardust tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StardustConfig {
    /// Pool capacity, the hard cap on simultaneously active particles.
    pub capacity: usize,
    /// Particles spawned per emitting frame.
    pub spawn_per_frame: usize,
    /// Spawn jitter box edge length around the emit position.
    pub jitter: f32,
    /// Forward offset toward the camera at spawn.
    pub lift: f32,
    /// Drift speed range edge; velocities are uniform in +-drift/2 per axis.
    pub drift: f32,
    /// Life decay factor per second.
    pub decay: f32,
    /// Size at full life, shrinking linearly with life.
    pub size_factor: f32,
    /// Parking coordinate for dead particles, far off-screen.
    pub park: f32,
}

impl Default for StardustConfig {
    fn default() -> Self {
        Self {
            capacity: 150,
            spawn_per_frame: 2,
            jitter: 5.0,
            lift: 50.0,
            drift: 20.0,
            decay: 1.5,
            size_factor: 15.0,
            park: 9999.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Particle {
    position: Vector3,
    velocity: Vector2,
    life: f32,
    active: bool,
}

/// The pure particle pool. Every slot is pre-allocated; spawning past
/// capacity overwrites the oldest slot (accepted visual loss).
pub struct StardustPool {
    config: StardustConfig,
    particles: Vec<Particle>,
    instances: Vec<PointInstance>,
    spawn_cursor: usize,
}

impl StardustPool {
    /// Create the pool with every particle parked.
    pub fn new(config: StardustConfig) -> Self {
        let parked = PointInstance {
            position: [config.park, config.park, config.park],
            size: 0.0,
            color: [1.0, 1.0, 1.0],
            opacity: 0.0,
        };
        Self {
            particles: vec![Particle::default(); config.capacity],
            instances: vec![parked; config.capacity],
            spawn_cursor: 0,
            config,
        }
    }

    /// Advance the pool one frame.
    ///
    /// `emit_pos` is the pointer's projected world position; `should_emit`
    /// is true only while a constellation is hovered. Decay always runs,
    /// so the trail drains after the pointer leaves a shape.
    pub fn update<R: Rng>(
        &mut self,
        emit_pos: Vector3,
        should_emit: bool,
        dt: f32,
        rng: &mut R,
    ) {
        if should_emit {
            for _ in 0..self.config.spawn_per_frame {
                let slot = self.spawn_cursor;
                self.particles[slot] = Particle {
                    position: Vector3::new(
                        emit_pos.x + (rng.gen::<f32>() - 0.5) * self.config.jitter,
                        emit_pos.y + (rng.gen::<f32>() - 0.5) * self.config.jitter,
                        emit_pos.z + self.config.lift,
                    ),
                    velocity: Vector2::new(
                        (rng.gen::<f32>() - 0.5) * self.config.drift,
                        (rng.gen::<f32>() - 0.5) * self.config.drift,
                    ),
                    life: 1.0,
                    active: true,
                };
                self.spawn_cursor = (self.spawn_cursor + 1) % self.config.capacity;
            }
        }

        for (particle, instance) in self.particles.iter_mut().zip(&mut self.instances) {
            if !particle.active {
                continue;
            }

            particle.life -= dt * self.config.decay;

            if particle.life <= 0.0 {
                particle.active = false;
                instance.position = [self.config.park; 3];
                instance.size = 0.0;
                instance.opacity = 0.0;
            } else {
                particle.position.x += particle.velocity.x * dt;
                particle.position.y += particle.velocity.y * dt;
                instance.position = particle.position.to_array();
                instance.size = particle.life * self.config.size_factor;
                instance.opacity = particle.life;
            }
        }
    }

    /// Number of live particles.
    pub fn active_count(&self) -> usize {
        self.particles.iter().filter(|p| p.active).count()
    }

    /// The full instance buffer, parked slots included.
    #[inline]
    pub fn instances(&self) -> &[PointInstance] {
        &self.instances
    }

    /// Pool capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }
}

/// GPU side: one additive point batch with the sparkle sprite.
pub struct Stardust {
    pool: StardustPool,
    batch: PointBatch,
}

impl Stardust {
    /// Build the emitter.
    pub fn build(ctx: &Context, scene: &SceneBinding, config: StardustConfig) -> Self {
        let texture = Texture2D::from_bitmap(
            &ctx.device,
            &ctx.queue,
            &Bitmap::sparkle(32),
            Some("Stardust Texture"),
        );
        let batch = PointBatch::new(
            ctx,
            scene,
            &texture,
            config.capacity as u32,
            BlendMode::Additive,
            "Stardust Pipeline",
        );
        Self {
            pool: StardustPool::new(config),
            batch,
        }
    }

    /// Advance the pool and upload the instance buffer.
    pub fn update<R: Rng>(
        &mut self,
        ctx: &Context,
        emit_pos: Vector3,
        should_emit: bool,
        dt: f32,
        rng: &mut R,
    ) {
        self.pool.update(emit_pos, should_emit, dt, rng);
        self.batch.write_instances(ctx, self.pool.instances());
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

    const DT: f32 = 1.0 / 60.0;

    fn pool() -> (StardustPool, SmallRng) {
        (
            StardustPool::new(StardustConfig::default()),
            SmallRng::seed_from_u64(42),
        )
    }

    #[test]
    fn test_starts_empty_and_parked() {
        let (pool, _) = pool();
        assert_eq!(pool.active_count(), 0);
        for inst in pool.instances() {
            assert_eq!(inst.position, [9999.0; 3]);
            assert_eq!(inst.size, 0.0);
            assert_eq!(inst.opacity, 0.0);
        }
    }

    #[test]
    fn test_active_count_plateaus_at_capacity() {
        // Life is 1.0 and decays at 1.5/s, so a particle lives 40 frames at
        // 60 Hz. Emitting 2/frame forever can sustain at most 80 actives,
        // well under the default capacity; shrink the pool to force
        // saturation.
        let mut pool = StardustPool::new(StardustConfig {
            capacity: 20,
            ..Default::default()
        });
        let mut rng = SmallRng::seed_from_u64(42);
        let mut peak = 0;
        for _ in 0..300 {
            pool.update(Vector3::ZERO, true, DT, &mut rng);
            peak = peak.max(pool.active_count());
            assert!(pool.active_count() <= pool.capacity());
        }
        assert_eq!(peak, 20);
    }

    #[test]
    fn test_round_robin_overwrites_oldest() {
        let mut pool = StardustPool::new(StardustConfig {
            capacity: 4,
            spawn_per_frame: 4,
            ..Default::default()
        });
        let mut rng = SmallRng::seed_from_u64(1);
        pool.update(Vector3::ZERO, true, DT, &mut rng);
        let first_lives: Vec<f32> = pool.particles.iter().map(|p| p.life).collect();
        // Second burst wraps the cursor and refreshes every slot.
        pool.update(Vector3::new(100.0, 0.0, 0.0), true, DT, &mut rng);
        assert_eq!(pool.active_count(), 4);
        for (p, old) in pool.particles.iter().zip(first_lives) {
            assert!(p.life > old - 1.0);
            // Respawned at the new emit position, not the old one.
            assert!(p.position.x > 90.0);
        }
    }

    #[test]
    fn test_exact_death_boundary() {
        let mut pool = StardustPool::new(StardustConfig {
            capacity: 1,
            spawn_per_frame: 1,
            decay: 1.0,
            ..Default::default()
        });
        let mut rng = SmallRng::seed_from_u64(5);
        pool.update(Vector3::ZERO, true, 0.0, &mut rng);
        assert_eq!(pool.active_count(), 1);
        // One update with dt exactly equal to remaining life kills it:
        // life hits zero and zero is dead, not alive.
        pool.update(Vector3::ZERO, false, 1.0, &mut rng);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.instances()[0].size, 0.0);
        assert_eq!(pool.instances()[0].opacity, 0.0);
        assert_eq!(pool.instances()[0].position, [9999.0; 3]);
    }

    #[test]
    fn test_decay_runs_without_emission() {
        let (mut pool, mut rng) = pool();
        pool.update(Vector3::ZERO, true, DT, &mut rng);
        let before = pool.active_count();
        assert_eq!(before, 2);
        // Stop emitting; the trail drains on its own.
        for _ in 0..60 {
            pool.update(Vector3::ZERO, false, DT, &mut rng);
        }
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn test_size_and_opacity_track_life() {
        let (mut pool, mut rng) = pool();
        pool.update(Vector3::ZERO, true, DT, &mut rng);
        for (p, inst) in pool.particles.iter().zip(pool.instances()) {
            if p.active {
                assert!((inst.size - p.life * 15.0).abs() < 1e-5);
                assert!((inst.opacity - p.life).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_spawn_near_emit_position() {
        let (mut pool, mut rng) = pool();
        let emit = Vector3::new(10.0, -20.0, 0.0);
        pool.update(emit, true, DT, &mut rng);
        for p in pool.particles.iter().filter(|p| p.active) {
            assert!((p.position.x - emit.x).abs() <= 2.5 + 0.5);
            assert!((p.position.y - emit.y).abs() <= 2.5 + 0.5);
            // Lifted toward the camera.
            assert!((p.position.z - 50.0).abs() < 1.0);
        }
    }
}
