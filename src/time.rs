//! Frame timing.
//!
//! The animation advances one fixed step per frame regardless of wall time,
//! so nothing here feeds the physics.
//! [`FrameClock`] only tracks frame count, delta and a periodically refreshed
//! FPS figure for the window title and logs.
//!
//! ```ignore
//! let mut clock = FrameClock::new(Instant::now());
//!
//! // once per frame:
//! clock.tick(Instant::now());
//! println!("frame {} at {:.1} fps", clock.frame(), clock.fps());
//! ```

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    delta: Duration,
    frame_count: u64,
    /// Last computed frames per second.
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self {
            start: now,
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Record a frame at `now`.
    ///
    /// Returns `true` when the FPS figure was refreshed by this tick.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;

        let since = now.saturating_duration_since(self.fps_update_time);
        if since >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / since.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Time between creation and the latest tick.
    pub fn elapsed(&self) -> Duration {
        self.last_frame.saturating_duration_since(self.start)
    }
}
