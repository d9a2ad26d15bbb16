//! Particle records and the fixed-capacity pool that recycles them.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Settings;

/// A single particle.
///
/// `life` is the time in milliseconds until the particle dies. It goes
/// negative for at most one frame before the emitter picks the slot up again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position in window pixels (y grows downward).
    pub position: Vec2,
    /// Velocity in pixels per second.
    pub velocity: Vec2,
    /// Remaining lifetime in milliseconds.
    pub life: i32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, life: i32) -> Self {
        Self {
            position,
            velocity,
            life,
        }
    }

    /// Whether the emitter should recycle this slot.
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.life <= 0
    }
}

/// Fixed-size pool of particles plus the random source used to respawn them.
///
/// Slots are never added or removed; dead particles are respawned in place.
#[derive(Debug)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleSystem {
    /// Create the pool, seeding the generator from OS entropy.
    pub fn new(settings: &Settings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Create the pool with a fixed seed. Used for reproducible runs.
    pub fn with_seed(settings: &Settings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: &Settings, mut rng: StdRng) -> Self {
        // Random initial lifetimes spread the first wave of respawns out.
        let max_life = settings.base_life.saturating_add(settings.life_jitter.max(0)).max(0);
        let particles = (0..settings.particle_count)
            .map(|_| {
                Particle::new(
                    settings.initial_position,
                    Vec2::ZERO,
                    rng.gen_range(0..=max_life),
                )
            })
            .collect();

        Self { particles, rng }
    }

    /// Wrap an explicit set of particles.
    pub fn from_particles(particles: Vec<Particle>, seed: u64) -> Self {
        Self {
            particles,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Split borrow of the slots and the generator for the update pass.
    pub(crate) fn parts_mut(&mut self) -> (&mut [Particle], &mut StdRng) {
        (&mut self.particles, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_has_configured_capacity() {
        let settings = Settings::default().with_particle_count(37);
        let system = ParticleSystem::with_seed(&settings, 1);
        assert_eq!(system.len(), 37);
        assert!(!system.is_empty());
    }

    #[test]
    fn test_particles_mut_edits_in_place() {
        let settings = Settings::default().with_particle_count(4);
        let mut system = ParticleSystem::with_seed(&settings, 2);
        for p in system.particles_mut() {
            p.velocity = Vec2::new(1.0, 2.0);
        }
        assert!(system.particles().iter().all(|p| p.velocity == Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn test_initial_particles_parked_at_rest() {
        let settings = Settings::default().with_initial_position(Vec2::new(-16.0, -16.0));
        let system = ParticleSystem::with_seed(&settings, 7);

        for p in system.particles() {
            assert_eq!(p.position, Vec2::new(-16.0, -16.0));
            assert_eq!(p.velocity, Vec2::ZERO);
        }
    }

    #[test]
    fn test_initial_life_within_bound() {
        let settings = Settings::default()
            .with_particle_count(5_000)
            .with_base_life(1000)
            .with_life_jitter(500);
        let system = ParticleSystem::with_seed(&settings, 42);

        for p in system.particles() {
            assert!(p.life >= 0);
            assert!(p.life <= 1500);
        }
        // Lifetimes should actually be spread out.
        let distinct: std::collections::HashSet<i32> =
            system.particles().iter().map(|p| p.life).collect();
        assert!(distinct.len() > 100);
    }

    #[test]
    fn test_same_seed_same_pool() {
        let settings = Settings::default();
        let a = ParticleSystem::with_seed(&settings, 99);
        let b = ParticleSystem::with_seed(&settings, 99);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_is_dead() {
        assert!(Particle::new(Vec2::ZERO, Vec2::ZERO, 0).is_dead());
        assert!(Particle::new(Vec2::ZERO, Vec2::ZERO, -3).is_dead());
        assert!(!Particle::new(Vec2::ZERO, Vec2::ZERO, 1).is_dead());
    }
}
