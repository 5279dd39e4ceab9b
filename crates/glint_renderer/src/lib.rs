//! Glint renderer - CPU Whitted ray tracing
//!
//! Spheres and axis-aligned boxes lit by a single point light, shaded with
//! Phong plus a stochastic soft-shadow estimate, with mirror reflections up
//! to three bounces deep.
//!
//! Scenes are built once and shared read-only, so the pixel loop can run
//! sequentially (`render`) or split into buckets across rayon threads
//! (`render_parallel`) with identical results.

mod bucket;
mod camera;
mod cuboid;
mod hittable;
mod material;
mod renderer;
mod scene;
pub mod shading;
mod sphere;
mod tracer;

pub use bucket::{
    generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use camera::PinholeCamera;
pub use cuboid::{Cuboid, Face, FACE_TOLERANCE};
pub use hittable::{HitRecord, Hittable, Primitive, PrimitiveKind};
pub use material::{Color, Material, MaterialKind};
pub use renderer::{color_to_rgb, pixel_rng, render, render_pixel, Framebuffer};
pub use scene::{PointLight, Scene, SceneBuilder, SceneError, SceneResult};
pub use shading::{ShadowPolicy, ShadowSettings};
pub use sphere::Sphere;
pub use tracer::{TraceSettings, TraceStats, Tracer, BACKGROUND, MAX_DEPTH};

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Aabb, Interval, Ray, Vec3};
