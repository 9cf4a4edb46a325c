//! A single plexus point and its per-frame physics.
//!
//! Velocity is split in two:
//! - `base_velocity` is the ambient drift. It never decays and flips sign when
//!   the particle hits a wall.
//! - `push_velocity` is the impulse from the pointer. It decays every frame by
//!   the friction factor and is never reflected.

use glam::Vec2;

use crate::config::PointerConfig;
use crate::field::FieldContext;
use crate::surface::{Color, DrawSurface};

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub base_velocity: Vec2,
    pub push_velocity: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Particle {
    pub fn new(position: Vec2, base_velocity: Vec2, radius: f32, color: Color) -> Self {
        Self {
            position,
            base_velocity,
            push_velocity: Vec2::ZERO,
            radius,
            color,
        }
    }

    /// Step the physics by one frame. Does not draw.
    ///
    /// Order: pointer repulsion, friction, integration, wall reflection, clamp.
    pub fn advance(&mut self, ctx: &FieldContext, pointer: &PointerConfig) {
        if let Some(at) = ctx.pointer {
            self.push_velocity +=
                push_impulse(self.position, at, ctx.pointer_radius, pointer.push_factor);
        }

        self.push_velocity *= pointer.friction;
        self.position += self.base_velocity + self.push_velocity;

        bounce_axis(
            &mut self.position.x,
            &mut self.base_velocity.x,
            self.radius,
            ctx.width,
        );
        bounce_axis(
            &mut self.position.y,
            &mut self.base_velocity.y,
            self.radius,
            ctx.height,
        );
    }

    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        surface.fill_circle(self.position, self.radius, self.color);
    }
}

/// Impulse the pointer at `pointer` applies to a particle at `position`.
///
/// Linear falloff: full `push_factor` on top of the pointer, zero at
/// `influence_radius` and beyond. The direction is the pointer→particle angle;
/// a particle exactly under the pointer has `atan2(0, 0) == 0` and is pushed
/// along +x.
pub fn push_impulse(position: Vec2, pointer: Vec2, influence_radius: f32, push_factor: f32) -> Vec2 {
    let offset = position - pointer;
    let distance = offset.length();
    if !(distance < influence_radius) {
        return Vec2::ZERO;
    }

    let force = (influence_radius - distance) / influence_radius;
    let angle = offset.y.atan2(offset.x);
    Vec2::new(angle.cos(), angle.sin()) * force * push_factor
}

/// Reflect drift off the walls of one axis, then pull the position back in.
fn bounce_axis(pos: &mut f32, drift: &mut f32, radius: f32, extent: f32) {
    if *pos + radius > extent || *pos - radius < 0.0 {
        *drift = -*drift;
    }

    // Not `f32::clamp`: on a surface narrower than the particle the bounds
    // cross, and the lower bound wins.
    if *pos > extent - radius {
        *pos = extent - radius;
    }
    if *pos < radius {
        *pos = radius;
    }
}
