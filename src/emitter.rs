//! Particle emitter.
//!
//! The emitter recycles dead slots in the particle pool. A slot is dead once
//! its remaining life reaches zero; the emitter gives it a fresh lifetime,
//! moves it to the emission point and launches it in a random direction.
//!
//! # Emission
//!
//! | Property | Value |
//! |----------|-------|
//! | Position | `origin` |
//! | Direction | uniform angle in `[0, 2π)` |
//! | Speed | uniform in `[0, max_speed]` |
//! | Lifetime | `base_life + uniform_int[0, life_jitter]` ms |
//!
//! Because the speed is drawn uniformly rather than the velocity vector,
//! particles concentrate near the origin and thin out toward the rim of
//! the emission circle.
//!
//! # Example
//!
//! ```ignore
//! let emitter = Emitter::from_settings(&settings);
//! let respawned = emitter.emit(particle, dt, &mut rng);
//! ```

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::config::Settings;
use crate::particle::Particle;

/// Omnidirectional point emitter.
#[derive(Clone, Debug, PartialEq)]
pub struct Emitter {
    /// Spawn position.
    pub origin: Vec2,
    /// Nominal emission rate (particles per second).
    ///
    /// Respawning currently happens whenever a slot dies, so this does not
    /// gate emission yet.
    pub rate: f32,
    /// Minimum lifetime of a respawned particle in milliseconds.
    pub base_life: i32,
    /// Upper bound of the random lifetime added on respawn.
    pub life_jitter: i32,
    /// Maximum launch speed in pixels per second.
    pub max_speed: f32,
}

impl Emitter {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            origin: settings.origin,
            rate: settings.emission_rate,
            base_life: settings.base_life,
            life_jitter: settings.life_jitter,
            max_speed: settings.max_speed,
        }
    }

    /// Respawn `particle` if it is dead, otherwise pass it through.
    ///
    /// `dt` is accepted for rate-based emission and is not used by the
    /// respawn decision.
    pub fn emit<R: Rng>(&self, particle: Particle, _dt: u32, rng: &mut R) -> Particle {
        if !particle.is_dead() {
            return particle;
        }

        let life = self.base_life.saturating_add(rng.gen_range(0..=self.life_jitter.max(0)));
        let theta = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(0.0..=self.max_speed);

        Particle {
            position: self.origin,
            velocity: Vec2::from_angle(theta) * speed,
            life,
        }
    }
}
