//! The per-frame update and draw loop.
//!
//! [`FrameLoop`] owns the particle pool and drives it through the
//! [`EventSource`] and [`Renderer`] seams:
//!
//! 1. drain events (a close request ends the loop before anything is drawn)
//! 2. compute `dt` from the event source's clock
//! 3. clear
//! 4. integrate every particle, then respawn the dead ones
//! 5. glow pass: one large unmodulated sprite per particle
//! 6. particle pass: one colorized sprite per particle
//! 7. present
//!
//! Respawning after integration means a particle that dies during this
//! frame is already back at the origin when it is drawn.

use crate::backend::{ColorMod, EventSource, LoopEvent, Renderer, SpriteRect, TextureHandle};
use crate::colorizer::Colorizer;
use crate::config::Settings;
use crate::emitter::Emitter;
use crate::error::RenderError;
use crate::integrator::Integrator;
use crate::particle::ParticleSystem;
use crate::time::FrameTimer;

/// Lifecycle of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Created, clock not read yet.
    Initializing,
    /// Producing frames.
    Running,
    /// A close event arrived. Terminal.
    Terminating,
}

/// Textures used by the two draw passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprites {
    /// Additive sprite, tinted per particle.
    pub particle: TextureHandle,
    /// Alpha-blended halo drawn underneath, twice the particle size.
    pub glow: TextureHandle,
}

/// Simulation context plus the state machine that advances it.
#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    system: ParticleSystem,
    integrator: Integrator,
    emitter: Emitter,
    colorizer: Colorizer,
    sprites: Sprites,
    timer: FrameTimer,
}

impl FrameLoop {
    pub fn new(settings: &Settings, system: ParticleSystem, sprites: Sprites) -> Self {
        Self {
            state: LoopState::Initializing,
            system,
            integrator: Integrator::new(settings.gravity),
            emitter: Emitter::from_settings(settings),
            colorizer: Colorizer::from_settings(settings),
            sprites,
            timer: FrameTimer::new(0),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut ParticleSystem {
        &mut self.system
    }

    /// Frames produced so far.
    pub fn frame(&self) -> u64 {
        self.timer.frame()
    }

    /// Read the clock and enter `Running`. No-op once started.
    pub fn start<E: EventSource + ?Sized>(&mut self, events: &E) {
        if self.state == LoopState::Initializing {
            self.timer = FrameTimer::new(events.current_time_ms());
            self.state = LoopState::Running;
            log::debug!("frame loop started with {} particles", self.system.len());
        }
    }

    /// Run one frame. Returns the state after the frame.
    ///
    /// Starts the loop first if needed. Once `Terminating`, further calls
    /// do nothing.
    pub fn tick<E, R>(&mut self, events: &mut E, renderer: &mut R) -> Result<LoopState, RenderError>
    where
        E: EventSource + ?Sized,
        R: Renderer + ?Sized,
    {
        self.start(&*events);
        if self.state == LoopState::Terminating {
            return Ok(self.state);
        }

        while let Some(event) = events.poll_event() {
            match event {
                LoopEvent::Close => {
                    log::info!("close requested after {} frames", self.timer.frame());
                    self.state = LoopState::Terminating;
                    return Ok(self.state);
                }
            }
        }

        let dt = self.timer.tick(events.current_time_ms());
        if self.timer.frame() % 600 == 0 {
            log::debug!("frame {} dt {} ms ({:.1} fps)", self.timer.frame(), dt, self.timer.fps());
        }

        renderer.clear();
        self.update(dt);
        self.draw(renderer);
        renderer.present()?;

        Ok(self.state)
    }

    /// Run frames until a close event arrives or presenting fails.
    pub fn run<E, R>(&mut self, events: &mut E, renderer: &mut R) -> Result<(), RenderError>
    where
        E: EventSource + ?Sized,
        R: Renderer + ?Sized,
    {
        self.start(&*events);
        while self.tick(events, renderer)? != LoopState::Terminating {}
        Ok(())
    }

    /// Integrate, then respawn dead slots.
    pub fn update(&mut self, dt: u32) {
        let (particles, rng) = self.system.parts_mut();
        for particle in particles.iter_mut() {
            let moved = self.integrator.step(*particle, dt);
            *particle = self.emitter.emit(moved, dt, rng);
        }
    }

    /// Queue the glow pass followed by the particle pass.
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let particles = self.system.particles();

        for p in particles {
            let size = self.colorizer.size(p.life);
            let dest = SpriteRect::square(p.position.x - size, p.position.y - size, size * 2.0);
            renderer.draw_sprite(self.sprites.glow, dest, ColorMod::WHITE);
        }

        for p in particles {
            let shade = self.colorizer.shade(p.life);
            let half = shade.size / 2.0;
            let dest = SpriteRect::square(p.position.x - half, p.position.y - half, shade.size);
            renderer.draw_sprite(self.sprites.particle, dest, shade.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use glam::Vec2;
    use std::collections::VecDeque;

    struct Script {
        times: VecDeque<u64>,
        now: u64,
        close_at: Option<u64>,
    }

    impl Script {
        fn new(times: &[u64]) -> Self {
            Self {
                times: times.iter().copied().collect(),
                now: 0,
                close_at: None,
            }
        }
    }

    impl EventSource for Script {
        fn poll_event(&mut self) -> Option<LoopEvent> {
            // Each frame reads the clock once after polling, so advance here.
            if let Some(t) = self.times.pop_front() {
                self.now = t;
            }
            match self.close_at {
                Some(t) if self.now >= t => {
                    self.close_at = None;
                    Some(LoopEvent::Close)
                }
                _ => None,
            }
        }

        fn current_time_ms(&self) -> u64 {
            self.now
        }
    }

    #[derive(Default)]
    struct Recorder {
        clears: usize,
        draws: Vec<(TextureHandle, SpriteRect, ColorMod)>,
        presents: usize,
    }

    impl Renderer for Recorder {
        fn clear(&mut self) {
            self.clears += 1;
            self.draws.clear();
        }

        fn draw_sprite(&mut self, texture: TextureHandle, dest: SpriteRect, color: ColorMod) {
            self.draws.push((texture, dest, color));
        }

        fn present(&mut self) -> Result<(), RenderError> {
            self.presents += 1;
            Ok(())
        }
    }

    fn sprites() -> Sprites {
        Sprites {
            particle: TextureHandle::from_raw(0),
            glow: TextureHandle::from_raw(1),
        }
    }

    fn single(life: i32, position: Vec2) -> FrameLoop {
        let settings = Settings::default();
        let system = ParticleSystem::from_particles(vec![Particle::new(position, Vec2::ZERO, life)], 1);
        FrameLoop::new(&settings, system, sprites())
    }

    #[test]
    fn test_starts_initializing() {
        let frame_loop = single(1000, Vec2::ZERO);
        assert_eq!(frame_loop.state(), LoopState::Initializing);
    }

    #[test]
    fn test_debug_shows_state() {
        let frame_loop = single(1000, Vec2::ZERO);
        assert!(format!("{frame_loop:?}").contains("Initializing"));
    }

    #[test]
    fn test_start_reads_clock_once() {
        let mut frame_loop = single(1000, Vec2::ZERO);
        let mut events = Script::new(&[]);
        events.now = 40;
        frame_loop.start(&events);
        assert_eq!(frame_loop.state(), LoopState::Running);

        events.times.push_back(56);
        let mut renderer = Recorder::default();
        frame_loop.tick(&mut events, &mut renderer).unwrap();
        assert_eq!(frame_loop.system().particles()[0].life, 984);
    }

    #[test]
    fn test_draw_order_glow_then_particle() {
        let mut frame_loop = single(1000, Vec2::new(100.0, 100.0));
        let mut events = Script::new(&[0, 0]);
        let mut renderer = Recorder::default();

        frame_loop.start(&events);
        frame_loop.tick(&mut events, &mut renderer).unwrap();

        assert_eq!(renderer.clears, 1);
        assert_eq!(renderer.presents, 1);
        assert_eq!(
            renderer.draws,
            vec![
                (TextureHandle::from_raw(1), SpriteRect::new(84, 84, 32, 32), ColorMod::WHITE),
                (TextureHandle::from_raw(0), SpriteRect::new(92, 92, 16, 16), ColorMod::WHITE),
            ]
        );
    }

    #[test]
    fn test_close_skips_frame() {
        let mut frame_loop = single(1000, Vec2::ZERO);
        let mut events = Script::new(&[16]);
        events.close_at = Some(16);
        let mut renderer = Recorder::default();

        frame_loop.start(&events);
        assert_eq!(frame_loop.tick(&mut events, &mut renderer).unwrap(), LoopState::Terminating);
        assert_eq!(renderer.presents, 0);
        assert_eq!(renderer.draws.len(), 0);

        // Terminal: nothing else happens.
        assert_eq!(frame_loop.tick(&mut events, &mut renderer).unwrap(), LoopState::Terminating);
        assert_eq!(renderer.presents, 0);
    }

    #[test]
    fn test_expired_particle_respawned_same_frame() {
        let mut frame_loop = single(10, Vec2::new(-16.0, -16.0));
        frame_loop.update(16);

        let p = frame_loop.system().particles()[0];
        assert!(p.life >= 1000);
        assert_eq!(p.position, Settings::default().origin);
    }

    #[test]
    fn test_edited_particle_respawns_next_update() {
        let mut frame_loop = single(1000, Vec2::new(50.0, 60.0));
        frame_loop.system_mut().particles_mut()[0].life = 0;
        frame_loop.update(0);

        let p = frame_loop.system().particles()[0];
        assert!(p.life >= 1000);
        assert_eq!(p.position, Settings::default().origin);
    }

    #[test]
    fn test_present_failure_propagates() {
        struct Failing;
        impl Renderer for Failing {
            fn clear(&mut self) {}
            fn draw_sprite(&mut self, _: TextureHandle, _: SpriteRect, _: ColorMod) {}
            fn present(&mut self) -> Result<(), RenderError> {
                Err(RenderError::Backend("lost".into()))
            }
        }

        let mut frame_loop = single(1000, Vec2::ZERO);
        let mut events = Script::new(&[0, 16, 32]);
        let result = frame_loop.run(&mut events, &mut Failing);
        assert!(matches!(result, Err(RenderError::Backend(_))));
        assert_eq!(frame_loop.state(), LoopState::Running);
    }
}
