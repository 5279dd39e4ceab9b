//! Pinhole camera for primary ray generation.

use crate::Ray;
use glint_core::SceneDescription;
use glint_math::Vec3;

/// Fixed pinhole camera looking down -Z.
///
/// The image plane sits one unit in front of the eye and spans one unit per
/// image height, so the vertical field of view is fixed and the horizontal
/// one follows the aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinholeCamera {
    pub position: Vec3,
    pub width: u32,
    pub height: u32,
}

impl PinholeCamera {
    /// Create a camera at the default eye position.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 1.0),
            width,
            height,
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn from_description(description: &SceneDescription) -> Self {
        Self::new(description.image.width, description.image.height)
            .with_position(description.camera.position)
    }

    /// Generate the primary ray through pixel (x, y).
    ///
    /// Pixel (0, 0) is the top-left corner and rays go through pixel corners,
    /// not centers.
    pub fn ray_for_pixel(&self, x: u32, y: u32) -> Ray {
        let w = self.width as f32;
        let h = self.height as f32;

        let u = (x as f32 - w / 2.0) / h;
        let v = -(y as f32 - h / 2.0) / h;

        Ray::new(self.position, Vec3::new(u, v, -1.0).normalize())
    }
}

impl Default for PinholeCamera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
