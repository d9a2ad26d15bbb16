//! Frame timing.
//!
//! The frame loop works in whole milliseconds. [`SystemClock`] turns
//! `std::time::Instant` into a millisecond tick count, and [`FrameTimer`]
//! turns successive tick readings into per-frame deltas while keeping a
//! frame counter and a periodically refreshed FPS estimate.
//!
//! # Example
//!
//! ```ignore
//! use ember::time::{FrameTimer, SystemClock};
//!
//! let clock = SystemClock::new();
//! let mut timer = FrameTimer::new(clock.now_ms());
//!
//! // In your frame loop:
//! let dt = timer.tick(clock.now_ms());
//! log::debug!("dt {} ms, frame {}, {:.1} fps", dt, timer.frame(), timer.fps());
//! ```

use std::time::Instant;

/// How often the FPS estimate is refreshed, in milliseconds.
const FPS_UPDATE_INTERVAL_MS: u64 = 500;

/// Monotonic millisecond clock starting at zero on construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the clock was created.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frame delta tracking.
///
/// Deltas are not clamped: a stall produces one large step.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    /// Tick count at the previous frame.
    last_tick: u64,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Tick count of last FPS calculation.
    fps_update_tick: u64,
}

impl FrameTimer {
    /// Start timing from the tick count `now_ms`.
    pub fn new(now_ms: u64) -> Self {
        Self {
            last_tick: now_ms,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_tick: now_ms,
        }
    }

    /// Advance to `now_ms` and return the milliseconds since the previous tick.
    ///
    /// A clock reading earlier than the previous tick yields a zero delta.
    pub fn tick(&mut self, now_ms: u64) -> u32 {
        let dt = now_ms.saturating_sub(self.last_tick);
        self.last_tick += dt;
        self.frame_count += 1;

        let since_update = self.last_tick - self.fps_update_tick;
        if since_update >= FPS_UPDATE_INTERVAL_MS {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 * 1000.0 / since_update as f32;
            self.fps_frame_count = self.frame_count;
            self.fps_update_tick = self.last_tick;
        }

        dt.min(u32::MAX as u64) as u32
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Tick count of the most recent frame.
    #[inline]
    pub fn last_tick(&self) -> u64 {
        self.last_tick
    }
}
