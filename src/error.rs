//! Error types.
//!
//! Everything here is fatal: the binary reports the error on stderr and
//! exits with a non-zero status. The simulation itself never fails.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid [`Settings`](crate::config::Settings).
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("base life must be positive, got {0} ms")]
    NonPositiveBaseLife(i32),
    #[error("life jitter must not be negative, got {0} ms")]
    NegativeJitter(i32),
    #[error("max speed must be finite and non-negative, got {0}")]
    InvalidMaxSpeed(f32),
    #[error("base size must be finite and non-negative, got {0}")]
    InvalidBaseSize(f32),
    #[error("{0} must be finite")]
    NonFinite(&'static str),
    #[error("base life {base_life} ms plus jitter {life_jitter} ms overflows")]
    LifeOverflow { base_life: i32, life_jitter: i32 },
    #[error("window size must be non-zero, got {width}x{height}")]
    EmptyWindow { width: u32, height: u32 },
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("Failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    #[error("No compatible GPU adapter found: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    #[error("Surface reports no supported texture formats")]
    NoSurfaceFormat,
}

/// Errors that can occur during texture loading.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to load image '{}': {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("RGBA data size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// A frame could not be presented.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("Render backend error: {0}")]
    Backend(String),
}

/// Top-level error returned by [`crate::run`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid settings: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::NonPositiveBaseLife(0).to_string(),
            "base life must be positive, got 0 ms"
        );
        assert_eq!(
            ConfigError::EmptyWindow { width: 0, height: 480 }.to_string(),
            "window size must be non-zero, got 0x480"
        );
    }

    #[test]
    fn test_app_error_wraps_render_error() {
        let err: AppError = RenderError::Backend("device lost".into()).into();
        assert_eq!(err.to_string(), "Render error: Render backend error: device lost");
    }
}
