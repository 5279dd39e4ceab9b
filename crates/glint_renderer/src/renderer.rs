//! Pixel loop and framebuffer.
//!
//! Every pixel owns a random stream seeded from the render seed and its
//! linear index, so the image does not depend on traversal order or on how
//! pixels are split across threads.

use crate::camera::PinholeCamera;
use crate::tracer::{TraceSettings, TraceStats, Tracer};
use crate::{Color, Scene};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

/// Row-major buffer of unclamped linear colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Quantize to packed 8-bit RGB.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }

    /// Quantize into an `image` buffer ready to be saved.
    pub fn to_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            image::Rgb(color_to_rgb(self.get(x, y)))
        })
    }
}

#[inline]
fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a linear color to 8-bit RGB. No gamma is applied.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let r = (255.0 * clamp_01(color.x)) as u8;
    let g = (255.0 * clamp_01(color.y)) as u8;
    let b = (255.0 * clamp_01(color.z)) as u8;
    [r, g, b]
}

/// Random stream for one pixel.
pub fn pixel_rng(seed: u64, index: u64) -> StdRng {
    // Spread neighbouring indices before mixing in the seed
    StdRng::seed_from_u64(seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Trace the primary ray for one pixel.
pub fn render_pixel(
    tracer: &Tracer<'_>,
    camera: &PinholeCamera,
    x: u32,
    y: u32,
    stats: &mut TraceStats,
) -> Color {
    let index = y as u64 * camera.width as u64 + x as u64;
    let mut rng = pixel_rng(tracer.settings().seed, index);
    let ray = camera.ray_for_pixel(x, y);
    tracer.trace_with_stats(&ray, 0, &mut rng, stats)
}

/// Render the entire scene on the calling thread.
pub fn render(scene: &Scene, camera: &PinholeCamera, settings: &TraceSettings) -> Framebuffer {
    let start = Instant::now();
    let tracer = Tracer::new(scene, settings);
    let mut image = Framebuffer::new(camera.width, camera.height);
    let mut stats = TraceStats::default();

    log::info!(
        "Rendering {}x{} sequentially ({} shadow samples)",
        camera.width,
        camera.height,
        settings.shadows.samples
    );

    for y in 0..camera.height {
        for x in 0..camera.width {
            let color = render_pixel(&tracer, camera, x, y, &mut stats);
            image.set(x, y, color);
        }
    }

    log::debug!("Traced {} rays, deepest bounce {}", stats.rays, stats.deepest);
    log::info!("Render finished in {:.2?}", start.elapsed());

    image
}
