//! Lifetime-based coloring.
//!
//! Each channel follows its own piecewise-linear ramp over the remaining
//! life, so an aging particle goes roughly
//! white → yellow → red → shrink-and-vanish, with blue and then green
//! dropping out first.
//!
//! | Channel | Off below | Ramp | Full from |
//! |---------|-----------|------|-----------|
//! | red | – | `life·255 / (0.25·base)` | `0.25·base` |
//! | green | `0.25·base` | `-128 + life·512/base` | `0.75·base` |
//! | blue | `0.5·base` | `-255 + life·512/base` | `base` |
//!
//! The size stays at `base_size` until the last tenth of the base life and
//! then shrinks linearly to zero.

use crate::backend::ColorMod;
use crate::config::Settings;

/// Color and size of a particle sprite for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shade {
    pub color: ColorMod,
    pub size: f32,
}

/// Maps remaining life to [`Shade`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Colorizer {
    base_life: f32,
    base_size: f32,
}

impl Colorizer {
    /// `base_life` must be positive; [`Settings::validate`] enforces this.
    pub fn new(base_life: i32, base_size: f32) -> Self {
        Self {
            base_life: base_life as f32,
            base_size,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.base_life, settings.base_size)
    }

    pub fn shade(&self, life: i32) -> Shade {
        Shade {
            color: self.color(life),
            size: self.size(life),
        }
    }

    pub fn color(&self, life: i32) -> ColorMod {
        let life = life.max(0) as f32;
        let base = self.base_life;

        let r = if life < 0.25 * base {
            life * 255.0 / (0.25 * base)
        } else {
            255.0
        };

        let g = if life < 0.25 * base {
            0.0
        } else if life < 0.75 * base {
            -128.0 + life * 512.0 / base
        } else {
            255.0
        };

        let b = if life < 0.5 * base {
            0.0
        } else if life < base {
            -255.0 + life * 512.0 / base
        } else {
            255.0
        };

        ColorMod::new(channel(r), channel(g), channel(b))
    }

    /// Sprite edge length in pixels.
    pub fn size(&self, life: i32) -> f32 {
        let life = life.max(0) as f32;
        let fade_start = 0.1 * self.base_life;

        if life < fade_start {
            life * self.base_size / fade_start
        } else {
            self.base_size
        }
    }
}

/// Truncate toward zero, then saturate into a color channel.
#[inline]
fn channel(value: f32) -> u8 {
    (value as i32).clamp(0, 255) as u8
}
