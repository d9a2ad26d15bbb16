//! winit host for the frame loop.
//!
//! winit pushes events at the application; the frame loop pulls them. The
//! [`WindowEvents`] queue bridges the two: window callbacks push into it,
//! and every redraw runs one [`FrameLoop::tick`] that drains it.

use std::collections::VecDeque;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::backend::{AssetLoader, BlendMode, EventSource, LoopEvent};
use crate::config::Settings;
use crate::error::AppError;
use crate::frame::{FrameLoop, LoopState, Sprites};
use crate::gpu::SpriteRenderer;
use crate::particle::ParticleSystem;
use crate::time::SystemClock;

/// Events collected from winit callbacks, plus the wall clock.
#[derive(Debug, Default)]
pub struct WindowEvents {
    pending: VecDeque<LoopEvent>,
    clock: SystemClock,
}

impl WindowEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: LoopEvent) {
        self.pending.push_back(event);
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl EventSource for WindowEvents {
    fn poll_event(&mut self) -> Option<LoopEvent> {
        self.pending.pop_front()
    }

    fn current_time_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}

struct App {
    settings: Settings,
    window: Option<Arc<Window>>,
    renderer: Option<SpriteRenderer>,
    frame_loop: Option<FrameLoop>,
    events: WindowEvents,
    error: Option<AppError>,
}

impl App {
    fn new(settings: Settings) -> Self {
        Self {
            settings,
            window: None,
            renderer: None,
            frame_loop: None,
            events: WindowEvents::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(
                self.settings.window_width,
                self.settings.window_height,
            ))
            .with_resizable(true);

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let mut renderer =
            pollster::block_on(SpriteRenderer::new(window.clone(), self.settings.clear_color))?;

        let sprites = Sprites {
            particle: renderer.load_texture(&self.settings.particle_texture, BlendMode::Additive)?,
            glow: renderer.load_texture(&self.settings.glow_texture, BlendMode::Alpha)?,
        };

        let mut frame_loop = FrameLoop::new(&self.settings, ParticleSystem::new(&self.settings), sprites);
        frame_loop.start(&self.events);
        log::info!("running with {} particles", self.settings.particle_count);

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.frame_loop = Some(frame_loop);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        self.error = Some(error);
        event_loop.exit();
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(frame_loop)) = (self.renderer.as_mut(), self.frame_loop.as_mut())
        else {
            return;
        };

        match frame_loop.tick(&mut self.events, renderer) {
            Ok(LoopState::Terminating) => event_loop.exit(),
            Ok(_) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            Err(e) => self.fail(event_loop, e.into()),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() && self.error.is_none() {
            if let Err(e) = self.init(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if self.frame_loop.is_none() {
                    event_loop.exit();
                    return;
                }
                self.events.push(LoopEvent::Close);
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Hidden windows may stop getting redraws; don't let a close request sit in the queue.
        if self.events.has_pending() {
            self.frame(event_loop);
        }
    }
}

/// Open the window and run until it is closed.
///
/// Returns the first fatal error: invalid settings, window or GPU setup,
/// a sprite that fails to load, or a frame that cannot be presented.
pub fn run(settings: Settings) -> Result<(), AppError> {
    settings.validate()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_events_fifo() {
        let mut events = WindowEvents::new();
        assert!(!events.has_pending());
        assert_eq!(events.poll_event(), None);

        events.push(LoopEvent::Close);
        assert!(events.has_pending());
        assert_eq!(events.poll_event(), Some(LoopEvent::Close));
        assert_eq!(events.poll_event(), None);
    }

    #[test]
    fn test_window_events_clock_monotonic() {
        let events = WindowEvents::new();
        let a = events.current_time_ms();
        let b = events.current_time_ms();
        assert!(b >= a);
    }
}
