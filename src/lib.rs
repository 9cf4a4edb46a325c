//! # Plexus
//!
//! An animated "plexus" backdrop: small drifting particles that bounce off the
//! edges of the surface, get shoved away from the pointer, and are joined by
//! faint lines whenever two of them come close enough.
//!
//! ## Quick Start
//!
//! ```ignore
//! use plexus::prelude::*;
//!
//! fn main() -> Result<(), AppError> {
//!     plexus::window::run(PlexusConfig::default())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! A [`ParticleField`] owns every particle. The number of particles follows
//! the surface area (one per 9000 square pixels, never fewer than 40), and
//! the whole field is rebuilt whenever the surface is resized.
//!
//! Each [`Particle`] carries two velocities:
//! - a constant drift that flips sign when it hits a wall
//! - a push from the pointer that decays by friction every frame
//!
//! ### Connections
//!
//! A [`ConnectionRenderer`] draws a line between every pair of particles
//! closer than a size dependent threshold. Closer pairs get more opaque lines.
//!
//! ### Surfaces
//!
//! Drawing goes through the [`DrawSurface`] trait, so the same frame can be
//! produced on the GPU ([`gpu::ShapeBatch`]), on a CPU [`Canvas`] for PNG
//! snapshots, or into a [`Recorder`] in tests:
//!
//! ```ignore
//! let config = PlexusConfig::default();
//! let mut scene = Scene::new(800.0, 600.0, &config, Instant::now());
//! let mut canvas = Canvas::new(800, 600, config.window.background_color());
//! scene.set_pointer(Some(Vec2::new(400.0, 300.0)));
//! scene.animate(&mut canvas, Instant::now());
//! canvas.save_png(Path::new("frame.png"))?;
//! ```
//!
//! ## Timing
//!
//! Nothing here reads the clock on its own. Every time dependent piece
//! ([`Scene`], [`Debouncer`], [`Typewriter`], [`FrameClock`]) takes the
//! current `Instant` as an argument, which keeps frames reproducible.

pub mod config;
pub mod connections;
pub mod debounce;
pub mod error;
pub mod field;
pub mod gpu;
pub mod input;
pub mod particle;
pub mod raster;
pub mod scene;
pub mod surface;
pub mod time;
pub mod typewriter;
pub mod window;

pub use config::{
    ConnectionConfig, ParticleConfig, PlexusConfig, PointerConfig, TypingConfig, WindowConfig,
};
pub use connections::{connect_distance, ConnectionRenderer, Link};
pub use debounce::Debouncer;
pub use error::{AppError, ConfigError, GpuError, SnapshotError};
pub use field::{particle_count, FieldContext, ParticleField};
pub use glam::Vec2;
pub use particle::{push_impulse, Particle};
pub use raster::{render_snapshot, Canvas};
pub use scene::Scene;
pub use surface::{Color, DrawCommand, DrawSurface, Recorder};
pub use time::FrameClock;
pub use typewriter::{Phase, Typewriter};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use plexus::prelude::*;
/// ```
///
/// This imports:
/// - [`Scene`] - field plus connections, driven one frame at a time
/// - [`PlexusConfig`] - every tunable, loadable from TOML
/// - [`Canvas`] and [`DrawSurface`] - headless drawing
/// - [`Vec2`] - glam vector type
pub mod prelude {
    pub use crate::config::PlexusConfig;
    pub use crate::connections::ConnectionRenderer;
    pub use crate::error::{AppError, ConfigError, SnapshotError};
    pub use crate::field::ParticleField;
    pub use crate::particle::Particle;
    pub use crate::raster::{render_snapshot, Canvas};
    pub use crate::scene::Scene;
    pub use crate::surface::{Color, DrawSurface};
    pub use crate::typewriter::Typewriter;
    pub use crate::Vec2;
}
