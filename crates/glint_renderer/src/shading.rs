//! Local illumination and stochastic soft shadows.
//!
//! Phong shading with an ambient, a Lambertian and a specular term, scaled
//! by a shadow factor estimated from jittered shadow rays toward the light.

use crate::hittable::{Hittable, PrimitiveKind};
use crate::{Color, Ray, Scene};
use glint_math::{reflect, Vec3};
use rand::{Rng, RngCore};

/// Fraction of the albedo always present, lit or not.
pub const AMBIENT_STRENGTH: f32 = 0.3;

/// Highlight color.
pub const SPECULAR_COLOR: Color = Color::new(0.3, 0.3, 0.3);

/// Phong exponent.
pub const SHININESS: i32 = 32;

/// Offset along the normal for shadow ray origins, and the minimum occluder distance.
pub const SHADOW_BIAS: f32 = 0.001;

/// Which primitives may block light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowPolicy {
    /// Spheres cast shadows
    pub sphere_occluders: bool,
    /// Boxes cast shadows
    pub box_occluders: bool,
    /// Surfaces are never shadowed by primitives of their own kind
    pub skip_same_kind: bool,
}

impl ShadowPolicy {
    /// Every primitive casts shadows onto every surface.
    pub const ALL: ShadowPolicy = ShadowPolicy {
        sphere_occluders: true,
        box_occluders: true,
        skip_same_kind: false,
    };

    /// Whether an `occluder` may shadow a surface on a `shaded` primitive.
    pub fn casts(&self, occluder: PrimitiveKind, shaded: PrimitiveKind) -> bool {
        let enabled = match occluder {
            PrimitiveKind::Sphere => self.sphere_occluders,
            PrimitiveKind::Cuboid => self.box_occluders,
        };
        enabled && !(self.skip_same_kind && occluder == shaded)
    }
}

impl Default for ShadowPolicy {
    /// Spheres shadow boxes; nothing else casts shadows.
    fn default() -> Self {
        Self {
            sphere_occluders: true,
            box_occluders: false,
            skip_same_kind: true,
        }
    }
}

/// Soft shadow sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSettings {
    /// Shadow rays per shaded point
    pub samples: u32,
    /// Half-width of the cube the light position is jittered within
    pub light_jitter: f32,
    pub policy: ShadowPolicy,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            samples: 256,
            light_jitter: 0.35,
            policy: ShadowPolicy::default(),
        }
    }
}

/// Uniform offset in `[-amount, amount]` on each axis.
fn random_offset(amount: f32, rng: &mut dyn RngCore) -> Vec3 {
    if !(amount > 0.0) {
        return Vec3::ZERO;
    }
    Vec3::new(
        rng.gen_range(-amount..=amount),
        rng.gen_range(-amount..=amount),
        rng.gen_range(-amount..=amount),
    )
}

/// Perturb a unit normal by up to `amount` per component and renormalize.
pub fn jitter_normal(normal: Vec3, amount: f32, rng: &mut dyn RngCore) -> Vec3 {
    if amount <= 0.0 {
        return normal;
    }
    (normal + random_offset(amount, rng))
        .try_normalize()
        .unwrap_or(normal)
}

/// Estimate the unoccluded fraction of the light seen from `point`.
///
/// Each sample jitters the light position, casts a ray from just above the
/// surface toward it, and counts it occluded if any eligible primitive is hit
/// beyond `SHADOW_BIAS`. The result is always in `[0, 1]`.
pub fn shadow_factor(
    scene: &Scene,
    point: Vec3,
    normal: Vec3,
    shaded: PrimitiveKind,
    settings: &ShadowSettings,
    rng: &mut dyn RngCore,
) -> f32 {
    let policy = settings.policy;
    let has_occluders = scene
        .primitives()
        .iter()
        .any(|p| policy.casts(p.kind(), shaded));
    if settings.samples == 0 || !has_occluders {
        return 1.0;
    }

    let origin = point + normal * SHADOW_BIAS;
    let light = scene.light().position;
    let mut occluded = 0u32;

    for _ in 0..settings.samples {
        let target = light + random_offset(settings.light_jitter, rng);
        let ray = Ray::new(origin, (target - point).normalize_or_zero());

        let blocked = scene
            .primitives()
            .iter()
            .filter(|p| policy.casts(p.kind(), shaded))
            .any(|p| p.intersect(&ray).is_some_and(|t| t > SHADOW_BIAS));
        if blocked {
            occluded += 1;
        }
    }

    1.0 - occluded as f32 / settings.samples as f32
}

/// Unit directions needed to shade one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingFrame {
    pub normal: Vec3,
    /// Toward the light
    pub light_dir: Vec3,
    /// Toward the viewer
    pub view_dir: Vec3,
    /// The light direction mirrored about the normal
    pub reflect_dir: Vec3,
}

impl ShadingFrame {
    pub fn new(point: Vec3, normal: Vec3, eye: Vec3, light: Vec3) -> Self {
        let light_dir = (light - point).normalize_or_zero();
        Self {
            normal,
            light_dir,
            view_dir: (eye - point).normalize_or_zero(),
            reflect_dir: reflect(light_dir, normal).normalize_or_zero(),
        }
    }
}

/// The three Phong terms at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shading {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
}

impl Shading {
    pub fn total(&self) -> Color {
        self.ambient + self.diffuse + self.specular
    }
}

/// Evaluate Phong shading. Diffuse and specular are scaled by `shadow`.
pub fn phong(
    albedo: Color,
    diffuse_coefficient: f32,
    frame: &ShadingFrame,
    light_intensity: f32,
    shadow: f32,
) -> Shading {
    let ambient = albedo * AMBIENT_STRENGTH;

    let diffuse_strength = frame.normal.dot(frame.light_dir).max(0.0);
    let diffuse = albedo * diffuse_strength * light_intensity * diffuse_coefficient * shadow;

    let specular_strength = frame.view_dir.dot(frame.reflect_dir).max(0.0).powi(SHININESS);
    let specular = SPECULAR_COLOR * specular_strength * light_intensity * shadow;

    Shading {
        ambient,
        diffuse,
        specular,
    }
}
