//! Glint Core - scene descriptions and textures for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Scene descriptions**: `SceneDescription` and its parts, serializable
//!   with serde so scenes can live in JSON files
//! - **Textures**: `Texture`, a decoded 8-bit raster with nearest-neighbor
//!   sampling
//!
//! # Example
//!
//! ```no_run
//! use glint_core::{DescriptionResult, SceneDescription};
//!
//! fn main() -> DescriptionResult<()> {
//!     let scene = SceneDescription::from_json_file("room.json")?;
//!     println!("Loaded {} primitives", scene.primitive_count());
//!     Ok(())
//! }
//! ```

pub mod description;
pub mod texture;

// Re-export commonly used types
pub use description::{
    BoxDesc, CameraDesc, DescriptionError, DescriptionResult, ImageDesc, LightDesc, MaterialKind,
    SceneDescription, SphereDesc,
};
pub use texture::{Texture, TextureError, TextureResult};
