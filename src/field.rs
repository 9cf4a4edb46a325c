//! The particle collection and the surface state it moves in.
//!
//! [`FieldContext`] holds the surface size and pointer state. Each
//! [`ParticleField`] owns its own context, so several fields can coexist and
//! tests can drive one without a window.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::{ParticleConfig, PlexusConfig, PointerConfig};
use crate::particle::Particle;
use crate::surface::DrawSurface;

/// Surface dimensions and pointer state shared by every particle in a field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldContext {
    pub width: f32,
    pub height: f32,
    /// `None` while the pointer is outside the surface.
    pub pointer: Option<Vec2>,
    /// Distance within which the pointer pushes particles.
    pub pointer_radius: f32,
    radius_divisor: f32,
}

impl FieldContext {
    pub fn new(width: f32, height: f32, radius_divisor: f32) -> Self {
        Self {
            width,
            height,
            pointer: None,
            pointer_radius: pointer_radius(width, height, radius_divisor),
            radius_divisor,
        }
    }

    /// Adopt new surface dimensions and recompute the pointer radius.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.pointer_radius = pointer_radius(width, height, self.radius_divisor);
    }
}

fn pointer_radius(width: f32, height: f32, divisor: f32) -> f32 {
    (height / divisor) * (width / divisor)
}

/// Number of particles seeded for a surface: one per `density_divisor` px²,
/// never fewer than `min_count`.
pub fn particle_count(width: f32, height: f32, config: &ParticleConfig) -> usize {
    let by_density = (width * height / config.density_divisor).floor().max(0.0) as usize;
    by_density.max(config.min_count)
}

/// Owns and animates the particles.
pub struct ParticleField {
    particles: Vec<Particle>,
    ctx: FieldContext,
    particle_config: ParticleConfig,
    pointer_config: PointerConfig,
    rng: SmallRng,
}

impl ParticleField {
    /// Create a field for a `width` x `height` surface and seed it.
    pub fn new(width: f32, height: f32, config: &PlexusConfig) -> Self {
        let rng = match config.particles.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let mut field = Self {
            particles: Vec::new(),
            ctx: FieldContext::new(width, height, config.pointer.radius_divisor),
            particle_config: config.particles.clone(),
            pointer_config: config.pointer.clone(),
            rng,
        };
        field.initialize(width, height);
        field
    }

    /// Replace every particle with a fresh random batch sized for the surface.
    ///
    /// Nothing carries over from the previous batch.
    pub fn initialize(&mut self, width: f32, height: f32) {
        let count = particle_count(width, height, &self.particle_config);
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(self.spawn(width, height));
        }
        self.particles = particles;
        log::info!("Seeded {} particles for {}x{} surface", count, width, height);
    }

    fn spawn(&mut self, width: f32, height: f32) -> Particle {
        let cfg = &self.particle_config;
        let rng = &mut self.rng;

        let radius = if cfg.radius_max > cfg.radius_min {
            rng.gen_range(cfg.radius_min..cfg.radius_max)
        } else {
            cfg.radius_min
        };

        let inset = radius * cfg.spawn_inset;
        let position = Vec2::new(
            spawn_coord(rng, width, inset),
            spawn_coord(rng, height, inset),
        );

        let speed = cfg.drift_speed;
        let drift = if speed > 0.0 {
            Vec2::new(rng.gen_range(-speed..speed), rng.gen_range(-speed..speed))
        } else {
            Vec2::ZERO
        };

        Particle::new(position, drift, radius, cfg.fill_color())
    }

    /// Step every particle's physics by one frame.
    pub fn advance(&mut self) {
        for p in &mut self.particles {
            p.advance(&self.ctx, &self.pointer_config);
        }
    }

    /// Draw every particle at its current position.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        for p in &self.particles {
            p.draw(surface);
        }
    }

    /// Advance and draw in one pass, particle by particle.
    pub fn step<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        for p in &mut self.particles {
            p.advance(&self.ctx, &self.pointer_config);
            p.draw(surface);
        }
    }

    /// Update the pointer. `None` means the pointer left the surface.
    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.ctx.pointer = pointer;
    }

    /// Adopt a new surface size and re-seed from scratch.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.ctx.resize(width, height);
        self.initialize(width, height);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn context(&self) -> &FieldContext {
        &self.ctx
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Uniform in `[inset, extent - inset)`, or the midpoint when that range is
/// empty.
fn spawn_coord(rng: &mut SmallRng, extent: f32, inset: f32) -> f32 {
    let span = extent - 2.0 * inset;
    if span > 0.0 {
        rng.gen::<f32>() * span + inset
    } else {
        extent * 0.5
    }
}
