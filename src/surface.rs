//! The drawing surface both renderers draw onto.
//!
//! Coordinates are surface pixels with the origin at the top-left corner and
//! y growing downward. Colors are straight (non-premultiplied) RGBA in
//! `0.0..=1.0`.
//!
//! Three implementations ship with the crate:
//! - [`Canvas`](crate::raster::Canvas) rasterizes on the CPU (snapshots).
//! - [`ShapeBatch`](crate::gpu::ShapeBatch) collects GPU instances.
//! - [`Recorder`] keeps the raw command list (tests, debugging).

use glam::Vec2;

/// Straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels.
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self::new(
            rgb[0] as f32 / 255.0,
            rgb[1] as f32 / 255.0,
            rgb[2] as f32 / 255.0,
            1.0,
        )
    }

    /// Same color with a different alpha, clamped to `[0, 1]`.
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Primitive operations consumed by the particle and connection renderers.
pub trait DrawSurface {
    /// Wipe the whole surface.
    fn clear(&mut self);

    /// Filled disc.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Straight line segment `width` pixels wide.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
}

/// A surface that only remembers what was drawn on it.
///
/// `clear` is recorded rather than applied, so a single frame's command list
/// starts with [`DrawCommand::Clear`].
#[derive(Debug, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl DrawSurface for Recorder {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha_clamps() {
        let c = Color::from_rgb8([0, 191, 255]);
        assert_eq!(c.with_alpha(-0.3).a, 0.0);
        assert_eq!(c.with_alpha(1.7).a, 1.0);
        assert_eq!(c.with_alpha(0.25).a, 0.25);
        assert_eq!(c.with_alpha(0.25).b, 1.0);
    }

    #[test]
    fn test_recorder_filters() {
        let mut rec = Recorder::new();
        rec.clear();
        rec.fill_circle(Vec2::ZERO, 2.0, Color::TRANSPARENT);
        rec.stroke_line(Vec2::ZERO, Vec2::ONE, 1.0, Color::TRANSPARENT);
        rec.fill_circle(Vec2::ONE, 1.0, Color::TRANSPARENT);

        assert_eq!(rec.commands.len(), 4);
        assert_eq!(rec.circles().count(), 2);
        assert_eq!(rec.lines().count(), 1);
        assert_eq!(rec.take()[0], DrawCommand::Clear);
        assert!(rec.commands.is_empty());
    }
}
