//! Per-frame driver tying the field, the connection lines and the resize
//! debouncer together.
//!
//! Frame order is fixed: apply a settled resize (if any), clear, advance and
//! draw every particle, then draw links. Links therefore always see fully
//! updated positions.

use std::time::{Duration, Instant};

use glam::Vec2;

use crate::config::PlexusConfig;
use crate::connections::ConnectionRenderer;
use crate::debounce::Debouncer;
use crate::field::ParticleField;
use crate::surface::DrawSurface;
use crate::time::FrameClock;

pub struct Scene {
    field: ParticleField,
    connections: ConnectionRenderer,
    resize: Debouncer<(f32, f32)>,
    clock: FrameClock,
}

impl Scene {
    pub fn new(width: f32, height: f32, config: &PlexusConfig, now: Instant) -> Self {
        Self {
            field: ParticleField::new(width, height, config),
            connections: ConnectionRenderer::new(width, height, &config.connections),
            resize: Debouncer::new(Duration::from_millis(config.window.resize_debounce_ms)),
            clock: FrameClock::new(now),
        }
    }

    /// Render one frame onto `surface`.
    pub fn animate<S: DrawSurface + ?Sized>(&mut self, surface: &mut S, now: Instant) {
        self.poll_resize(now);
        if self.clock.tick(now) {
            log::debug!(
                "frame {}: {:.1} fps, {} particles",
                self.clock.frame(),
                self.clock.fps(),
                self.field.len()
            );
        }

        surface.clear();
        self.field.step(surface);
        self.connections.render(self.field.particles(), surface);
    }

    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.field.set_pointer(pointer);
    }

    /// Note a resize. The field re-seeds once resizes stop arriving for the
    /// debounce window.
    ///
    /// A resize back to the current size drops any pending one instead, so
    /// the `Resized` a window reports on creation does not re-seed.
    pub fn request_resize(&mut self, now: Instant, width: f32, height: f32) {
        if (width, height) == self.size() {
            self.resize.cancel();
        } else {
            self.resize.signal(now, (width, height));
        }
    }

    /// Current surface size in logical pixels.
    pub fn size(&self) -> (f32, f32) {
        let ctx = self.field.context();
        (ctx.width, ctx.height)
    }

    /// Apply a settled resize. Returns `true` if the field was re-seeded.
    pub fn poll_resize(&mut self, now: Instant) -> bool {
        match self.resize.poll(now) {
            Some((width, height)) => {
                self.resize_now(width, height);
                true
            }
            None => false,
        }
    }

    /// Resize and re-seed immediately, bypassing the debouncer.
    pub fn resize_now(&mut self, width: f32, height: f32) {
        self.field.on_resize(width, height);
        self.connections.resize(width, height);
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn connections(&self) -> &ConnectionRenderer {
        &self.connections
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, Recorder};

    fn scene(now: Instant) -> Scene {
        let mut config = PlexusConfig::default();
        config.particles.seed = Some(17);
        Scene::new(800.0, 600.0, &config, now)
    }

    #[test]
    fn test_frame_order() {
        let now = Instant::now();
        let mut scene = scene(now);
        let mut rec = Recorder::new();
        scene.animate(&mut rec, now);

        assert_eq!(rec.commands[0], DrawCommand::Clear);
        let n = scene.field().len();
        assert!(rec.commands[1..=n]
            .iter()
            .all(|c| matches!(c, DrawCommand::Circle { .. })));
        assert!(rec.commands[n + 1..]
            .iter()
            .all(|c| matches!(c, DrawCommand::Line { .. })));
        assert_eq!(
            rec.lines().count(),
            scene.connections().links(scene.field().particles()).len()
        );
        assert_eq!(scene.clock().frame(), 1);
    }

    #[test]
    fn test_resize_burst_reseeds_once() {
        let start = Instant::now();
        let mut scene = scene(start);
        let mut rec = Recorder::new();

        for i in 0..10u64 {
            scene.request_resize(start + Duration::from_millis(5 * i), 1200.0, 900.0);
        }

        let mut reseeds = 0;
        for frame in 0..60u64 {
            if scene.poll_resize(start + Duration::from_millis(frame * 16)) {
                reseeds += 1;
            }
            scene.animate(&mut rec, start + Duration::from_millis(frame * 16));
        }
        assert_eq!(reseeds, 1);
        assert_eq!(scene.field().len(), 120);
        assert_eq!(scene.connections().threshold_sq(), (1200.0 / 7.0) * (900.0 / 7.0));
    }

    #[test]
    fn test_resize_to_current_size_does_not_reseed() {
        let start = Instant::now();
        let mut scene = scene(start);
        let before = scene.field().particles().to_vec();

        scene.request_resize(start, 800.0, 600.0);
        let mut rec = Recorder::new();
        for frame in 0..30u64 {
            assert!(!scene.poll_resize(start + Duration::from_millis(frame * 16)));
        }
        scene.animate(&mut rec, start + Duration::from_millis(500));

        let after = scene.field().particles();
        assert_eq!(after.len(), before.len());
        for (a, b) in before.iter().zip(after) {
            assert!(a.position.distance(b.position) < 10.0);
            assert_eq!(a.radius, b.radius);
        }
    }

    #[test]
    fn test_resize_back_to_current_size_cancels_pending() {
        let start = Instant::now();
        let mut scene = scene(start);
        scene.request_resize(start, 1000.0, 700.0);
        scene.request_resize(start + Duration::from_millis(100), 800.0, 600.0);

        assert!(!scene.poll_resize(start + Duration::from_secs(1)));
        assert_eq!(scene.size(), (800.0, 600.0));
        assert_eq!(scene.field().len(), 53);
    }

    #[test]
    fn test_animate_applies_pending_resize() {
        let start = Instant::now();
        let mut scene = scene(start);
        scene.request_resize(start, 300.0, 300.0);

        let mut rec = Recorder::new();
        scene.animate(&mut rec, start + Duration::from_millis(100));
        assert_eq!(scene.field().context().width, 800.0);

        scene.animate(&mut rec, start + Duration::from_millis(260));
        assert_eq!(scene.field().context().width, 300.0);
        assert_eq!(scene.field().len(), 40);
    }
}
