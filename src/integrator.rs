//! Ballistic integration step.
//!
//! Velocities are in pixels per second while the timestep and the
//! acceleration are expressed in milliseconds, matching the frame clock.

use crate::particle::Particle;

/// Constant-acceleration integrator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Integrator {
    /// Vertical acceleration in units per ms² (negative pulls toward the top of the window).
    pub gravity: f32,
}

impl Integrator {
    pub fn new(gravity: f32) -> Self {
        Self { gravity }
    }

    /// Advance `particle` by `dt` milliseconds.
    ///
    /// Velocity is updated first and the new velocity is used for the
    /// position update (semi-implicit Euler).
    pub fn step(&self, mut particle: Particle, dt: u32) -> Particle {
        let dt_ms = dt as f32;

        particle.velocity.y += self.gravity * dt_ms;
        particle.position += particle.velocity * dt_ms / 1000.0;
        particle.life = particle.life.saturating_sub(i32::try_from(dt).unwrap_or(i32::MAX));

        particle
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new(-0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-4, "{} != {}", a, b);
    }

    #[test]
    fn test_huge_dt_kills_particle() {
        let integrator = Integrator::new(0.0);
        let p = Particle::new(Vec2::ZERO, Vec2::ZERO, 1000);

        assert!(integrator.step(p, 3_000_000_000).is_dead());
        assert!(integrator.step(p, u32::MAX).is_dead());

        let dying = Particle::new(Vec2::ZERO, Vec2::ZERO, -5);
        assert_eq!(integrator.step(dying, u32::MAX).life, i32::MIN);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let integrator = Integrator::default();
        let p = Particle::new(Vec2::new(3.0, 4.0), Vec2::new(-7.5, 12.0), 640);
        assert_eq!(integrator.step(p, 0), p);
    }

    #[test]
    fn test_zero_dt_idempotent() {
        let integrator = Integrator::default();
        let p = Particle::new(Vec2::new(1.0, -2.0), Vec2::new(5.0, 5.0), 10);
        let once = integrator.step(p, 0);
        let twice = integrator.step(integrator.step(p, 0), 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_one_second_from_rest() {
        let integrator = Integrator::new(-0.1);
        let p = Particle::new(Vec2::ZERO, Vec2::ZERO, 5000);
        let next = integrator.step(p, 1000);

        assert_close(next.velocity.y, -100.0);
        assert_close(next.velocity.x, 0.0);
        assert_close(next.position.y, -100.0);
        assert_eq!(next.life, 4000);
    }

    #[test]
    fn test_half_second_step() {
        let integrator = Integrator::new(-0.1);
        let p = Particle::new(Vec2::ZERO, Vec2::ZERO, 1000);
        let next = integrator.step(p, 500);

        assert_eq!(next.life, 500);
        assert_close(next.velocity.y, -50.0);
        assert_close(next.position.y, -25.0);
        assert_close(next.position.x, 0.0);
    }

    #[test]
    fn test_horizontal_velocity_in_pixels_per_second() {
        let integrator = Integrator::new(0.0);
        let p = Particle::new(Vec2::new(10.0, 0.0), Vec2::new(30.0, 0.0), 100);
        let next = integrator.step(p, 250);

        assert_close(next.position.x, 17.5);
        assert_eq!(next.velocity, Vec2::new(30.0, 0.0));
    }

    #[test]
    fn test_life_goes_negative() {
        let integrator = Integrator::default();
        let p = Particle::new(Vec2::ZERO, Vec2::ZERO, 10);
        assert_eq!(integrator.step(p, 16).life, -6);
    }
}
