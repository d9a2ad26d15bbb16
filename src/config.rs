//! Demo settings.
//!
//! Use method chaining to adjust the defaults, then hand the settings to
//! [`crate::run`]:
//!
//! ```ignore
//! let settings = Settings::default()
//!     .with_particle_count(2_000)
//!     .with_max_speed(45.0);
//! ember::run(settings)?;
//! ```

use std::path::PathBuf;

use glam::Vec2;

use crate::error::ConfigError;

/// Default window size in logical pixels.
pub const WINDOW_WIDTH: u32 = 640;
pub const WINDOW_HEIGHT: u32 = 480;

/// Window and simulation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
    /// Number of particle slots.
    pub particle_count: usize,
    /// Base lifetime of a spawned particle in milliseconds.
    pub base_life: i32,
    /// Random extra lifetime added on spawn, `0..=life_jitter` ms.
    pub life_jitter: i32,
    /// Sprite edge length in pixels while a particle is not fading out.
    pub base_size: f32,
    /// Maximum launch speed in pixels per second.
    pub max_speed: f32,
    /// Vertical acceleration in pixels/s per ms.
    pub gravity: f32,
    /// Emission point in window pixels.
    pub origin: Vec2,
    /// Nominal emission rate, particles per second.
    pub emission_rate: f32,
    /// Where particles wait before their first spawn.
    pub initial_position: Vec2,
    /// Background RGBA, 0-255.
    pub clear_color: [u8; 4],
    /// Additive sprite drawn for each particle.
    pub particle_texture: PathBuf,
    /// Alpha-blended glow drawn behind each particle.
    pub glow_texture: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "ember".to_string(),
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            particle_count: 1000,
            base_life: 1000,
            life_jitter: 500,
            base_size: 16.0,
            max_speed: 30.0,
            gravity: -0.1,
            origin: Vec2::new(
                (WINDOW_WIDTH / 2) as f32 - 8.0,
                (WINDOW_HEIGHT / 2) as f32 - 8.0 + 64.0,
            ),
            emission_rate: 1000.0,
            initial_position: Vec2::new(-16.0, -16.0),
            clear_color: [0xFF, 0xFF, 0xFF, 0x00],
            particle_texture: PathBuf::from("assets/particle.png"),
            glow_texture: PathBuf::from("assets/back.png"),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size. The emission origin is not moved.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_base_life(mut self, ms: i32) -> Self {
        self.base_life = ms;
        self
    }

    pub fn with_life_jitter(mut self, ms: i32) -> Self {
        self.life_jitter = ms;
        self
    }

    pub fn with_base_size(mut self, size: f32) -> Self {
        self.base_size = size;
        self
    }

    pub fn with_max_speed(mut self, speed: f32) -> Self {
        self.max_speed = speed;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_emission_rate(mut self, rate: f32) -> Self {
        self.emission_rate = rate;
        self
    }

    pub fn with_initial_position(mut self, position: Vec2) -> Self {
        self.initial_position = position;
        self
    }

    pub fn with_clear_color(mut self, rgba: [u8; 4]) -> Self {
        self.clear_color = rgba;
        self
    }

    pub fn with_textures(mut self, particle: impl Into<PathBuf>, glow: impl Into<PathBuf>) -> Self {
        self.particle_texture = particle.into();
        self.glow_texture = glow.into();
        self
    }

    /// Check the values the simulation divides by or samples from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::EmptyWindow {
                width: self.window_width,
                height: self.window_height,
            });
        }
        if self.base_life <= 0 {
            return Err(ConfigError::NonPositiveBaseLife(self.base_life));
        }
        if self.life_jitter < 0 {
            return Err(ConfigError::NegativeJitter(self.life_jitter));
        }
        if self.base_life.checked_add(self.life_jitter).is_none() {
            return Err(ConfigError::LifeOverflow {
                base_life: self.base_life,
                life_jitter: self.life_jitter,
            });
        }
        if !self.max_speed.is_finite() || self.max_speed < 0.0 {
            return Err(ConfigError::InvalidMaxSpeed(self.max_speed));
        }
        if !self.base_size.is_finite() || self.base_size < 0.0 {
            return Err(ConfigError::InvalidBaseSize(self.base_size));
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFinite("gravity"));
        }
        if !self.origin.is_finite() {
            return Err(ConfigError::NonFinite("origin"));
        }
        if !self.initial_position.is_finite() {
            return Err(ConfigError::NonFinite("initial position"));
        }
        Ok(())
    }
}
