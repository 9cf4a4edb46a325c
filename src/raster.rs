//! CPU rasterizer for headless frames.
//!
//! Antialiased discs and line segments composited source-over onto an RGBA8
//! image, which can then be written out as PNG. Slow compared to the GPU path
//! but needs no device, which makes it the renderer for snapshots and tests.

use std::path::Path;
use std::time::{Duration, Instant};

use glam::Vec2;
use image::{ImageFormat, Rgba, RgbaImage};

use crate::config::PlexusConfig;
use crate::error::SnapshotError;
use crate::scene::Scene;
use crate::surface::{Color, DrawSurface};

pub struct Canvas {
    image: RgbaImage,
    background: Color,
}

impl Canvas {
    /// A canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let mut canvas = Self {
            image: RgbaImage::new(width, height),
            background,
        };
        canvas.clear();
        canvas
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn save_png(&self, path: &Path) -> Result<(), SnapshotError> {
        if self.width() == 0 || self.height() == 0 {
            return Err(SnapshotError::EmptySurface {
                width: self.width(),
                height: self.height(),
            });
        }
        self.image.save_with_format(path, ImageFormat::Png)?;
        log::info!("Wrote {}x{} snapshot to {}", self.width(), self.height(), path.display());
        Ok(())
    }

    /// Visit every pixel whose center lies in the box `min..max`, clipped to
    /// the image.
    fn cover<F>(&mut self, min: Vec2, max: Vec2, color: Color, coverage: F)
    where
        F: Fn(Vec2) -> f32,
    {
        if color.a <= 0.0 {
            return;
        }
        let w = self.image.width() as i64;
        let h = self.image.height() as i64;
        let x0 = (min.x.floor() as i64).max(0);
        let y0 = (min.y.floor() as i64).max(0);
        let x1 = (max.x.ceil() as i64).min(w);
        let y1 = (max.y.ceil() as i64).min(h);

        for y in y0..y1 {
            for x in x0..x1 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let alpha = coverage(center).clamp(0.0, 1.0) * color.a;
                if alpha > 0.0 {
                    blend(self.image.get_pixel_mut(x as u32, y as u32), color, alpha);
                }
            }
        }
    }
}

/// Run `frames` frames of a fresh scene on a CPU canvas and return the last
/// one. Frames are spaced 16ms apart; `pointer`, if given, stays put for the
/// whole run.
pub fn render_snapshot(
    config: &PlexusConfig,
    width: u32,
    height: u32,
    frames: u32,
    pointer: Option<Vec2>,
) -> Canvas {
    let start = Instant::now();
    let mut scene = Scene::new(width as f32, height as f32, config, start);
    scene.set_pointer(pointer);

    let mut canvas = Canvas::new(width, height, config.window.background_color());
    for frame in 0..frames.max(1) {
        let now = start + Duration::from_millis(16 * u64::from(frame));
        scene.animate(&mut canvas, now);
    }
    canvas
}

/// Source-over with straight alpha.
fn blend(dst: &mut Rgba<u8>, src: Color, alpha: f32) {
    let [dr, dg, db, da] = dst.0.map(|c| c as f32 / 255.0);
    let out_a = alpha + da * (1.0 - alpha);
    if out_a <= 0.0 {
        return;
    }
    let mix = |s: f32, d: f32| (s * alpha + d * da * (1.0 - alpha)) / out_a;
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    dst.0 = [
        to_u8(mix(src.r, dr)),
        to_u8(mix(src.g, dg)),
        to_u8(mix(src.b, db)),
        to_u8(out_a),
    ];
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

impl DrawSurface for Canvas {
    fn clear(&mut self) {
        let [r, g, b, a] = self.background.to_array().map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        for px in self.image.pixels_mut() {
            *px = Rgba([r, g, b, a]);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let reach = Vec2::splat(radius + 1.0);
        self.cover(center - reach, center + reach, color, |p| {
            radius - p.distance(center) + 0.5
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let half = width * 0.5;
        let reach = Vec2::splat(half + 1.0);
        self.cover(from.min(to) - reach, from.max(to) + reach, color, |p| {
            half - segment_distance(p, from, to) + 0.5
        });
    }
}
