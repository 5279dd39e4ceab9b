//! Texture rasters for textured boxes.
//!
//! A texture is the raw 8-bit raster exactly as decoded: width, height,
//! channel count and a row-major interleaved byte buffer. Sampling is
//! nearest-neighbor with no filtering and no wrapping.

use std::path::{Path, PathBuf};

use glint_math::Color;
use image::DynamicImage;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid texture raster: {0}")]
    InvalidRaster(String),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A decoded texture raster.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl Texture {
    /// Wrap an already decoded raster.
    ///
    /// `data` must hold exactly `width * height * channels` bytes and
    /// `channels` must be between 1 and 4.
    pub fn from_raw(width: u32, height: u32, channels: u8, data: Vec<u8>) -> TextureResult<Self> {
        if !(1..=4).contains(&channels) {
            return Err(TextureError::InvalidRaster(format!(
                "unsupported channel count {}",
                channels
            )));
        }

        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(TextureError::InvalidRaster(format!(
                "{}x{}x{} raster needs {} bytes, got {}",
                width,
                height,
                channels,
                expected,
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Decode a texture from an image file.
    ///
    /// 8-bit gray, gray+alpha, RGB and RGBA images keep their channel count;
    /// anything else is converted to RGBA8.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| TextureError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let (width, height) = (img.width(), img.height());
        let (channels, data) = match img {
            DynamicImage::ImageLuma8(buf) => (1, buf.into_raw()),
            DynamicImage::ImageLumaA8(buf) => (2, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (3, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (4, buf.into_raw()),
            other => (4, other.into_rgba8().into_raw()),
        };

        log::debug!(
            "Decoded texture {} ({}x{}, {} channels)",
            path.display(),
            width,
            height,
            channels
        );

        Self::from_raw(width, height, channels, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// The interleaved raster bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Nearest-neighbor lookup at face coordinates `(u, v)`.
    ///
    /// The pixel is `(u * width, v * height)` truncated toward zero, read from
    /// byte offset `(y * width + x) * channels`. Returns `None` when that
    /// offset falls outside the raster. Bytes map to `[0, 1]` by `/ 255`;
    /// one- and two-channel rasters read their first channel as gray.
    pub fn sample_nearest(&self, u: f32, v: f32) -> Option<Color> {
        let x = (u * self.width as f32) as i64;
        let y = (v * self.height as f32) as i64;
        let offset = (y * self.width as i64 + x) * self.channels as i64;

        let needed = if self.channels >= 3 { 3 } else { 1 };
        if offset < 0 || offset + needed > self.data.len() as i64 {
            return None;
        }

        let offset = offset as usize;
        let texel = if self.channels >= 3 {
            Color::new(
                self.data[offset] as f32,
                self.data[offset + 1] as f32,
                self.data[offset + 2] as f32,
            )
        } else {
            Color::splat(self.data[offset] as f32)
        };

        Some(texel / 255.0)
    }
}
