//! Proximity lines between particles.
//!
//! Every frame each unordered pair is tested on squared distance against a
//! threshold derived from the surface area. Pairs under the threshold get a
//! line whose opacity falls off with squared distance. The check is all-pairs,
//! O(n²); particle counts stay in the low hundreds for real screen sizes.

use glam::Vec2;

use crate::config::ConnectionConfig;
use crate::particle::Particle;
use crate::surface::{Color, DrawSurface};

/// A pair of particles close enough to be linked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance_sq: f32,
    pub opacity: f32,
}

/// Draws the links between nearby particles.
#[derive(Debug, Clone)]
pub struct ConnectionRenderer {
    config: ConnectionConfig,
    color: Color,
    threshold_sq: f32,
}

impl ConnectionRenderer {
    pub fn new(width: f32, height: f32, config: &ConnectionConfig) -> Self {
        Self {
            threshold_sq: connect_distance(width, height, config),
            color: Color::from_rgb8(config.color),
            config: config.clone(),
        }
    }

    /// Recompute the threshold for a new surface size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.threshold_sq = connect_distance(width, height, &self.config);
    }

    /// Current squared-distance threshold (exclusive).
    pub fn threshold_sq(&self) -> f32 {
        self.threshold_sq
    }

    /// Opacity for a pair at squared distance `distance_sq`, in `[0, 1]`.
    ///
    /// Scaled on squared distance, not distance. Far pairs under a large
    /// threshold come out fully transparent.
    pub fn opacity(&self, distance_sq: f32) -> f32 {
        (1.0 - distance_sq / self.config.opacity_scale).clamp(0.0, 1.0)
    }

    /// All pairs `a < b` under the threshold, in row-major order.
    pub fn links(&self, particles: &[Particle]) -> Vec<Link> {
        let mut links = Vec::new();
        for (a, pa) in particles.iter().enumerate() {
            for (offset, pb) in particles[a + 1..].iter().enumerate() {
                let distance_sq = pa.position.distance_squared(pb.position);
                if distance_sq < self.threshold_sq {
                    links.push(Link {
                        a,
                        b: a + 1 + offset,
                        distance_sq,
                        opacity: self.opacity(distance_sq),
                    });
                }
            }
        }
        links
    }

    /// Stroke every link. Particles are only read.
    pub fn render<S: DrawSurface + ?Sized>(&self, particles: &[Particle], surface: &mut S) {
        for (a, pa) in particles.iter().enumerate() {
            for pb in &particles[a + 1..] {
                let distance_sq = pa.position.distance_squared(pb.position);
                if distance_sq < self.threshold_sq {
                    self.stroke(surface, pa.position, pb.position, distance_sq);
                }
            }
        }
    }

    fn stroke<S: DrawSurface + ?Sized>(&self, surface: &mut S, from: Vec2, to: Vec2, distance_sq: f32) {
        let color = self.color.with_alpha(self.opacity(distance_sq));
        surface.stroke_line(from, to, self.config.line_width, color);
    }
}

/// Squared-distance threshold for a surface: `(w/d) * (h/d)`, floored at
/// `min_distance_sq`.
pub fn connect_distance(width: f32, height: f32, config: &ConnectionConfig) -> f32 {
    let by_area = (width / config.area_divisor) * (height / config.area_divisor);
    by_area.max(config.min_distance_sq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, Recorder};

    fn at(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 1.0, Color::TRANSPARENT)
    }

    #[test]
    fn test_threshold_floor() {
        let cfg = ConnectionConfig::default();
        assert_eq!(connect_distance(350.0, 140.0, &cfg), 10_000.0);
        assert_eq!(connect_distance(1400.0, 700.0, &cfg), 20_000.0);
    }

    #[test]
    fn test_boundary_is_exclusive() {
        // Floor threshold 10000: distance 100 is exactly on it.
        let renderer = ConnectionRenderer::new(100.0, 100.0, &ConnectionConfig::default());
        assert_eq!(renderer.threshold_sq(), 10_000.0);

        let on_edge = [at(0.0, 0.0), at(100.0, 0.0)];
        let mut rec = Recorder::new();
        renderer.render(&on_edge, &mut rec);
        assert_eq!(rec.lines().count(), 0);

        let inside = [at(0.0, 0.0), at(99.9, 0.0)];
        renderer.render(&inside, &mut rec);
        assert_eq!(rec.lines().count(), 1);
    }

    #[test]
    fn test_opacity_uses_squared_distance() {
        let renderer = ConnectionRenderer::new(100.0, 100.0, &ConnectionConfig::default());
        let links = renderer.links(&[at(0.0, 0.0), at(30.0, 40.0)]);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].distance_sq, 2500.0);
        // 1 - 2500 / 20000, not 1 - 50 / sqrt(20000)
        assert!((links[0].opacity - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_opacity_clamped_under_large_threshold() {
        let renderer = ConnectionRenderer::new(2800.0, 1400.0, &ConnectionConfig::default());
        assert_eq!(renderer.threshold_sq(), 80_000.0);
        assert_eq!(renderer.opacity(30_000.0), 0.0);
        assert_eq!(renderer.opacity(0.0), 1.0);

        let mut rec = Recorder::new();
        renderer.render(&[at(0.0, 0.0), at(200.0, 0.0)], &mut rec);
        let line = rec.lines().next().cloned();
        match line {
            Some(DrawCommand::Line { color, width, .. }) => {
                assert_eq!(color.a, 0.0);
                assert_eq!(width, 1.0);
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn test_far_pair_under_large_threshold_is_drawn_transparent() {
        let renderer = ConnectionRenderer::new(2800.0, 1400.0, &ConnectionConfig::default());
        let mut rec = Recorder::new();
        renderer.render(&[at(0.0, 0.0), at(250.0, 0.0)], &mut rec);

        let alphas: Vec<f32> = rec
            .lines()
            .filter_map(|c| match c {
                DrawCommand::Line { color, .. } => Some(color.a),
                _ => None,
            })
            .collect();
        assert_eq!(alphas, vec![0.0]);
    }

    #[test]
    fn test_pairs_are_unordered_and_skip_self() {
        let renderer = ConnectionRenderer::new(100.0, 100.0, &ConnectionConfig::default());
        let particles = [at(10.0, 10.0), at(20.0, 10.0), at(30.0, 10.0)];
        let links = renderer.links(&particles);
        let pairs: Vec<_> = links.iter().map(|l| (l.a, l.b)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);

        let mut rec = Recorder::new();
        renderer.render(&particles, &mut rec);
        assert_eq!(rec.lines().count(), links.len());
    }

    #[test]
    fn test_resize_updates_threshold() {
        let mut renderer = ConnectionRenderer::new(100.0, 100.0, &ConnectionConfig::default());
        renderer.resize(1400.0, 1400.0);
        assert_eq!(renderer.threshold_sq(), 40_000.0);
    }
}
