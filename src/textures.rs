//! Sprite image decoding.
//!
//! Images are decoded on the CPU into tightly packed RGBA8 and uploaded by
//! the renderer. Supported formats:
//!
//! - PNG (recommended, keeps the alpha channel the glow sprite relies on)
//! - JPEG

use std::path::Path;

use crate::error::AssetError;

/// Decoded RGBA8 sprite pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteImage {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SpriteImage {
    /// Wrap raw RGBA data, checking its length against the dimensions.
    ///
    /// ```ignore
    /// // 2x2 checkerboard
    /// let data = vec![
    ///     255, 255, 255, 255,
    ///     0, 0, 0, 255,
    ///     0, 0, 0, 255,
    ///     255, 255, 255, 255,
    /// ];
    /// let img = SpriteImage::from_rgba(data, 2, 2)?;
    /// ```
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Result<Self, AssetError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(AssetError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, width, height })
    }

    /// Load and decode an image file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|source| AssetError::Image {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            data: img.into_raw(),
            width,
            height,
        })
    }

    /// Bytes per row, as the GPU upload expects.
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}
