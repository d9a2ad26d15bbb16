//! # ember - additive particle emitter
//!
//! A fixed pool of 2D particles sprays out of a single point, falls under
//! gravity, and fades from white through yellow and red as it ages. Dead
//! particles are recycled at the emitter in the same frame they die.
//!
//! Simulation runs on the CPU; drawing goes through a small sprite
//! renderer on wgpu. Each frame draws every particle twice: a soft
//! alpha-blended glow underneath, then a tinted additive sprite on top.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ember::prelude::*;
//!
//! fn main() -> Result<(), AppError> {
//!     ember::run(
//!         Settings::new()
//!             .with_particle_count(2_000)
//!             .with_max_speed(45.0)
//!             .with_textures("assets/particle.png", "assets/back.png"),
//!     )
//! }
//! ```
//!
//! ## Headless use
//!
//! [`FrameLoop`] only talks to the outside world through the
//! [`EventSource`] and [`Renderer`] traits, so it can be driven by a
//! scripted clock and a recording renderer:
//!
//! ```ignore
//! let settings = Settings::default();
//! let mut frame_loop = FrameLoop::new(&settings, ParticleSystem::with_seed(&settings, 7), sprites);
//! frame_loop.run(&mut scripted_events, &mut recorder)?;
//! ```
//!
//! ## Units
//!
//! | Quantity | Unit |
//! |----------|------|
//! | time, life, `dt` | integer milliseconds |
//! | position | pixels, y grows downward |
//! | velocity | pixels per second |
//! | gravity | pixels per second per millisecond |

pub mod backend;
pub mod colorizer;
pub mod config;
pub mod emitter;
pub mod error;
pub mod frame;
mod gpu;
pub mod integrator;
pub mod particle;
pub mod textures;
pub mod time;
mod window;

pub use backend::{
    AssetLoader, BlendMode, ColorMod, EventSource, LoopEvent, Renderer, SpriteRect, TextureHandle,
};
pub use colorizer::{Colorizer, Shade};
pub use config::Settings;
pub use emitter::Emitter;
pub use error::{AppError, AssetError, ConfigError, GpuError, RenderError};
pub use frame::{FrameLoop, LoopState, Sprites};
pub use glam::Vec2;
pub use gpu::SpriteRenderer;
pub use integrator::Integrator;
pub use particle::{Particle, ParticleSystem};
pub use textures::SpriteImage;
pub use window::{run, WindowEvents};

/// Convenient imports for running or driving the emitter.
///
/// ```ignore
/// use ember::prelude::*;
/// ```
pub mod prelude {
    pub use crate::backend::{EventSource, LoopEvent, Renderer};
    pub use crate::config::Settings;
    pub use crate::error::AppError;
    pub use crate::frame::{FrameLoop, LoopState, Sprites};
    pub use crate::particle::{Particle, ParticleSystem};
    pub use crate::window::run;
    pub use glam::Vec2;
}
