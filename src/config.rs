//! Tunable parameters, loadable from TOML.
//!
//! Every field has a default matching the stock look of the effect, so an
//! empty file (or no file at all) gives the standard plexus background. Only
//! the keys you want to change need to appear:
//!
//! ```toml
//! [particles]
//! seed = 7
//!
//! [connections]
//! opacity_scale = 15000.0
//! ```
//!
//! The connection threshold (`area_divisor`, `min_distance_sq`) and the line
//! fade (`opacity_scale`) are separate knobs. Both operate on squared
//! distances.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::surface::Color;

/// Particle spawning and appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Surface area (px²) per particle.
    pub density_divisor: f32,
    /// Floor on the particle count for small surfaces.
    pub min_count: usize,
    /// Radius range, `[radius_min, radius_max)`.
    pub radius_min: f32,
    pub radius_max: f32,
    /// Base drift components are drawn from `[-drift_speed, drift_speed)`.
    pub drift_speed: f32,
    /// Spawn inset from each edge, as a multiple of the particle radius.
    pub spawn_inset: f32,
    pub color: [u8; 3],
    pub alpha: f32,
    /// Fixed RNG seed. Unset means a fresh seed per run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            density_divisor: 9000.0,
            min_count: 40,
            radius_min: 1.0,
            radius_max: 3.0,
            drift_speed: 0.2,
            spawn_inset: 2.0,
            color: [0, 191, 255],
            alpha: 0.5,
            seed: None,
        }
    }
}

impl ParticleConfig {
    pub fn fill_color(&self) -> Color {
        Color::from_rgb8(self.color).with_alpha(self.alpha)
    }
}

/// Pointer repulsion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Impulse added at full force (pointer exactly on the particle).
    pub push_factor: f32,
    /// Per-frame multiplier on push velocity.
    pub friction: f32,
    /// Influence radius is `(height / radius_divisor) * (width / radius_divisor)`.
    pub radius_divisor: f32,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            push_factor: 3.0,
            friction: 0.94,
            radius_divisor: 100.0,
        }
    }
}

/// Proximity lines between particles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Threshold is `(width / area_divisor) * (height / area_divisor)`.
    pub area_divisor: f32,
    /// Floor on the squared-distance threshold.
    pub min_distance_sq: f32,
    /// Opacity is `1 - distance_sq / opacity_scale`.
    pub opacity_scale: f32,
    pub line_width: f32,
    pub color: [u8; 3],
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            area_divisor: 7.0,
            min_distance_sq: 10_000.0,
            opacity_scale: 20_000.0,
            line_width: 1.0,
            color: [0, 191, 255],
        }
    }
}

/// Native window frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background: [u8; 3],
    /// Quiet period before a resize re-seeds the field.
    pub resize_debounce_ms: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Plexus".to_string(),
            width: 1280,
            height: 720,
            background: [10, 10, 20],
            resize_debounce_ms: 250,
        }
    }
}

impl WindowConfig {
    pub fn background_color(&self) -> Color {
        Color::from_rgb8(self.background)
    }
}

/// Typing effect shown in the window title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub enabled: bool,
    pub phrases: Vec<String>,
    pub type_ms: u64,
    pub delete_ms: u64,
    /// Pause on a fully typed phrase before deleting it.
    pub hold_ms: u64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            phrases: vec![
                "Full Stack Developer".to_string(),
                "MERN-STACK Enthusiast".to_string(),
                "Building Scalable Digital Solutions".to_string(),
            ],
            type_ms: 150,
            delete_ms: 50,
            hold_ms: 2000,
        }
    }
}

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlexusConfig {
    pub particles: ParticleConfig,
    pub pointer: PointerConfig,
    pub connections: ConnectionConfig,
    pub window: WindowConfig,
    pub typing: TypingConfig,
}

impl PlexusConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PlexusConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values that would make the simulation meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.particles;
        positive("particles.density_divisor", p.density_divisor)?;
        positive("particles.radius_min", p.radius_min)?;
        if !(p.radius_max > p.radius_min) {
            return Err(ConfigError::invalid(
                "particles.radius_max",
                format!("must exceed radius_min ({})", p.radius_min),
            ));
        }
        non_negative("particles.drift_speed", p.drift_speed)?;
        non_negative("particles.spawn_inset", p.spawn_inset)?;
        unit_interval("particles.alpha", p.alpha)?;

        let ptr = &self.pointer;
        non_negative("pointer.push_factor", ptr.push_factor)?;
        unit_interval("pointer.friction", ptr.friction)?;
        positive("pointer.radius_divisor", ptr.radius_divisor)?;

        let c = &self.connections;
        positive("connections.area_divisor", c.area_divisor)?;
        non_negative("connections.min_distance_sq", c.min_distance_sq)?;
        positive("connections.opacity_scale", c.opacity_scale)?;
        positive("connections.line_width", c.line_width)?;

        let w = &self.window;
        if w.width == 0 || w.height == 0 {
            return Err(ConfigError::invalid(
                "window.size",
                format!("must be non-zero, got {}x{}", w.width, w.height),
            ));
        }

        let t = &self.typing;
        if t.type_ms == 0 {
            return Err(ConfigError::invalid("typing.type_ms", "must be positive"));
        }
        if t.delete_ms == 0 {
            return Err(ConfigError::invalid("typing.delete_ms", "must be positive"));
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be >= 0, got {value}")))
    }
}

fn unit_interval(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be in [0, 1], got {value}")))
    }
}
