//! Seams between the frame loop and the platform.
//!
//! The frame loop only talks to these traits. The windowed build implements
//! them with winit and wgpu (the `window` and `gpu` modules);
//! tests implement them with scripted events and recording renderers.

use std::path::Path;

use crate::error::{AssetError, RenderError};

/// Opaque handle to a texture owned by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub(crate) u32);

impl TextureHandle {
    /// Build a handle from a raw index. Renderers hand these out in load order.
    pub const fn from_raw(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Destination rectangle in integer window pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl SpriteRect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of edge `edge` with its top-left corner at `(x, y)`.
    ///
    /// Coordinates are truncated toward zero.
    pub fn square(x: f32, y: f32, edge: f32) -> Self {
        Self::new(x as i32, y as i32, edge as i32, edge as i32)
    }
}

/// Per-draw color modulation, multiplied into the texture's RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMod {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorMod {
    pub const WHITE: ColorMod = ColorMod::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Normalized RGBA with opaque alpha.
    pub fn to_rgba_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

/// How a texture's pixels combine with what is already on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard alpha blending (default).
    #[default]
    Alpha,
    /// Additive blending: overlapping sprites get brighter.
    Additive,
}

/// Events the frame loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    /// The window was asked to close.
    Close,
}

/// Event queue plus the millisecond clock the frame loop derives dt from.
pub trait EventSource {
    /// Next pending event, if any. Never blocks.
    fn poll_event(&mut self) -> Option<LoopEvent>;

    /// Milliseconds since some fixed starting point. Monotonic.
    fn current_time_ms(&self) -> u64;
}

/// Minimal sprite renderer.
pub trait Renderer {
    /// Start a new frame by clearing to the background color.
    fn clear(&mut self);

    /// Queue `texture` stretched over `dest`, tinted by `color`.
    fn draw_sprite(&mut self, texture: TextureHandle, dest: SpriteRect, color: ColorMod);

    /// Show everything queued since the last `clear`.
    fn present(&mut self) -> Result<(), RenderError>;
}

/// Texture loading. Loaded textures live as long as the renderer.
pub trait AssetLoader {
    fn load_texture(&mut self, path: &Path, blend: BlendMode) -> Result<TextureHandle, AssetError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_truncates_toward_zero() {
        assert_eq!(SpriteRect::square(10.9, 4.2, 7.99), SpriteRect::new(10, 4, 7, 7));
        assert_eq!(SpriteRect::square(-0.5, -8.7, 0.0), SpriteRect::new(0, -8, 0, 0));
    }

    #[test]
    fn test_color_mod_normalized() {
        assert_eq!(ColorMod::WHITE.to_rgba_f32(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(ColorMod::new(0, 0, 0).to_rgba_f32(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_handle_index() {
        assert_eq!(TextureHandle::from_raw(3).index(), 3);
    }
}
