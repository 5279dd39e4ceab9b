//! Recursive Whitted-style tracer.
//!
//! `trace` finds the nearest hit, shades it with Phong and a soft shadow
//! estimate, and recurses along the mirror direction for reflective
//! materials. Recursion stops unconditionally at `max_depth`.

use crate::hittable::Hittable;
use crate::shading::{jitter_normal, phong, shadow_factor, ShadingFrame, ShadowSettings};
use crate::{Color, Ray, Scene};
use glint_math::reflect;
use rand::RngCore;

/// Default bounce limit: the primary ray plus three reflections.
pub const MAX_DEPTH: u32 = 3;

/// Color of rays that leave the scene.
pub const BACKGROUND: Color = Color::new(0.2, 0.2, 0.2);

/// Weight of the reflected color on mirror surfaces.
pub const REFLECTION_WEIGHT: f32 = 0.8;

/// Weight of the local diffuse term on mirror surfaces.
pub const MIRROR_DIFFUSE_WEIGHT: f32 = 0.55;

/// Offset along the reflected direction for bounce ray origins.
pub const REFLECTION_BIAS: f32 = 0.001;

/// Tracing configuration.
#[derive(Debug, Clone)]
pub struct TraceSettings {
    /// Deepest recursion level that is still traced
    pub max_depth: u32,
    /// Background color when ray doesn't hit anything
    pub background: Color,
    /// Per-component normal perturbation, 0 disables it
    pub normal_jitter: f32,
    pub shadows: ShadowSettings,
    /// Base seed for the per-pixel random streams
    pub seed: u64,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            background: BACKGROUND,
            normal_jitter: 0.005,
            shadows: ShadowSettings::default(),
            seed: 0,
        }
    }
}

/// Counters gathered while tracing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TraceStats {
    /// Number of `trace` invocations that were not cut off by depth
    pub rays: u64,
    /// Deepest recursion level reached
    pub deepest: u32,
}

impl TraceStats {
    fn record(&mut self, depth: u32) {
        self.rays += 1;
        self.deepest = self.deepest.max(depth);
    }

    /// Fold another set of counters into this one.
    pub fn merge(&mut self, other: &TraceStats) {
        self.rays += other.rays;
        self.deepest = self.deepest.max(other.deepest);
    }
}

/// Traces rays against a read-only scene.
#[derive(Debug, Clone, Copy)]
pub struct Tracer<'a> {
    scene: &'a Scene,
    settings: &'a TraceSettings,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, settings: &'a TraceSettings) -> Self {
        Self { scene, settings }
    }

    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    pub fn settings(&self) -> &'a TraceSettings {
        self.settings
    }

    /// Compute the color seen along `ray` at recursion level `depth`.
    pub fn trace(&self, ray: &Ray, depth: u32, rng: &mut dyn RngCore) -> Color {
        let mut stats = TraceStats::default();
        self.trace_with_stats(ray, depth, rng, &mut stats)
    }

    /// Like `trace`, also recording how many rays were traced and how deep.
    pub fn trace_with_stats(
        &self,
        ray: &Ray,
        depth: u32,
        rng: &mut dyn RngCore,
        stats: &mut TraceStats,
    ) -> Color {
        if depth > self.settings.max_depth {
            return Color::ZERO;
        }
        stats.record(depth);

        let Some(hit) = self.scene.hit(ray) else {
            return self.settings.background;
        };

        let normal = jitter_normal(hit.normal, self.settings.normal_jitter, rng);
        let light = self.scene.light();
        let frame = ShadingFrame::new(hit.point, normal, ray.origin, light.position);

        let shadow = shadow_factor(
            self.scene,
            hit.point,
            normal,
            hit.primitive.kind(),
            &self.settings.shadows,
            rng,
        );

        let material = hit.primitive.material();
        let albedo = hit.primitive.albedo_at(hit.point);
        let shading = phong(albedo, material.diffuse, &frame, light.intensity, shadow);

        if material.is_reflective() && depth < self.settings.max_depth {
            let direction = reflect(ray.direction, normal).normalize_or_zero();
            let bounce = Ray::new(hit.point + direction * REFLECTION_BIAS, direction);
            let reflection = self.trace_with_stats(&bounce, depth + 1, rng, stats);

            // Ambient and specular are dropped on mirrors; the sum is not clamped
            return reflection * REFLECTION_WEIGHT + shading.diffuse * MIRROR_DIFFUSE_WEIGHT;
        }

        shading.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cuboid, Material, PointLight, Sphere};
    use glint_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const WARM: Color = Color::new(1.0, 0.9, 0.7);

    /// One diffuse sphere, the reference light and nothing else.
    fn single_sphere_scene() -> Scene {
        let mut builder = Scene::builder();
        builder.set_light(PointLight::new(Vec3::new(0.0, 2.5, -4.0), 1.1));
        builder.add_sphere(
            Sphere::new(Vec3::new(-1.0, 0.0, -5.0), 1.0, Material::diffuse(WARM, 0.8))
                .expect("valid sphere"),
        );
        builder.build()
    }

    /// Two mirror walls facing each other across the origin.
    fn mirror_corridor() -> Scene {
        let mirror = Material::reflective(Color::ONE, 0.5);
        let mut builder = Scene::builder();
        builder.set_light(PointLight::new(Vec3::new(0.0, 0.5, 0.0), 1.0));
        builder.add_cuboid(
            Cuboid::new(Vec3::new(2.0, -1.0, -1.0), Vec3::new(3.0, 1.0, 1.0), mirror)
                .expect("valid box"),
        );
        builder.add_cuboid(
            Cuboid::new(Vec3::new(-3.0, -1.0, -1.0), Vec3::new(-2.0, 1.0, 1.0), mirror)
                .expect("valid box"),
        );
        builder.build()
    }

    #[test]
    fn test_miss_returns_background_exactly() {
        let scene = single_sphere_scene();
        let settings = TraceSettings::default();
        let tracer = Tracer::new(&scene, &settings);
        let mut rng = StdRng::seed_from_u64(0);

        let up = Ray::new(Vec3::new(0.0, 1.0, 1.0), Vec3::Y);
        assert_eq!(tracer.trace(&up, 0, &mut rng), Color::new(0.2, 0.2, 0.2));
    }

    #[test]
    fn test_past_max_depth_is_black() {
        let scene = single_sphere_scene();
        let settings = TraceSettings::default();
        let tracer = Tracer::new(&scene, &settings);
        let mut rng = StdRng::seed_from_u64(0);

        let toward_sphere = Ray::new(Vec3::new(0.0, 1.0, 1.0), Vec3::new(-1.0, -1.0, -6.0).normalize());
        assert_eq!(tracer.trace(&toward_sphere, 4, &mut rng), Color::ZERO);

        let up = Ray::new(Vec3::new(0.0, 1.0, 1.0), Vec3::Y);
        assert_eq!(tracer.trace(&up, 4, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_diffuse_sphere_brighter_than_background() {
        let scene = single_sphere_scene();
        let settings = TraceSettings::default();
        let tracer = Tracer::new(&scene, &settings);
        let mut rng = StdRng::seed_from_u64(5);

        let eye = Vec3::new(0.0, 1.0, 1.0);
        let ray = Ray::new(eye, (Vec3::new(-1.0, 0.0, -5.0) - eye).normalize());
        let color = tracer.trace(&ray, 0, &mut rng);

        assert!(color.cmpgt(BACKGROUND).all(), "color {} not brighter than background", color);
    }

    #[test]
    fn test_mirror_sphere_reflecting_background() {
        let mut builder = Scene::builder();
        builder.set_light(PointLight::new(Vec3::ZERO, 1.1));
        builder.add_sphere(
            Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, Material::reflective(WARM, 0.5))
                .expect("valid sphere"),
        );
        let scene = builder.build();

        let settings = TraceSettings {
            normal_jitter: 0.0,
            ..Default::default()
        };
        let tracer = Tracer::new(&scene, &settings);
        let mut rng = StdRng::seed_from_u64(0);
        let mut stats = TraceStats::default();

        // Head-on hit at (0, 0, -4); the bounce heads back toward +z and escapes
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let color = tracer.trace_with_stats(&ray, 0, &mut rng, &mut stats);

        // diffuse = albedo * (n . l = 1) * 1.1 * 0.5 * (shadow = 1)
        let diffuse = WARM * 1.1 * 0.5;
        let expected = BACKGROUND * 0.8 + diffuse * 0.55;
        assert!(
            (color - expected).abs().max_element() < 1e-5,
            "got {}, expected {}",
            color,
            expected
        );
        assert_eq!(stats, TraceStats { rays: 2, deepest: 1 });
    }

    #[test]
    fn test_mirror_chain_stops_at_max_depth() {
        let scene = mirror_corridor();
        let settings = TraceSettings {
            normal_jitter: 0.0,
            ..Default::default()
        };
        let tracer = Tracer::new(&scene, &settings);
        let mut rng = StdRng::seed_from_u64(0);
        let mut stats = TraceStats::default();

        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let color = tracer.trace_with_stats(&ray, 0, &mut rng, &mut stats);

        assert_eq!(stats.deepest, 3);
        assert_eq!(stats.rays, 4);
        assert!(color.is_finite());
    }

    #[test]
    fn test_mirror_chain_with_jitter_never_exceeds_depth() {
        let scene = mirror_corridor();
        let settings = TraceSettings::default();
        let tracer = Tracer::new(&scene, &settings);
        let mut rng = StdRng::seed_from_u64(11);

        for i in 0..20 {
            let mut stats = TraceStats::default();
            let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.01 * i as f32, 0.0).normalize());
            tracer.trace_with_stats(&ray, 0, &mut rng, &mut stats);
            assert!(stats.deepest <= MAX_DEPTH);
            assert!(stats.rays <= MAX_DEPTH as u64 + 1);
        }
    }

    #[test]
    fn test_lower_max_depth() {
        let scene = mirror_corridor();
        let settings = TraceSettings {
            max_depth: 1,
            normal_jitter: 0.0,
            ..Default::default()
        };
        let tracer = Tracer::new(&scene, &settings);
        let mut rng = StdRng::seed_from_u64(0);
        let mut stats = TraceStats::default();

        tracer.trace_with_stats(&Ray::new(Vec3::ZERO, Vec3::X), 0, &mut rng, &mut stats);
        assert_eq!(stats, TraceStats { rays: 2, deepest: 1 });
    }

    #[test]
    fn test_same_seed_same_color() {
        let scene = single_sphere_scene();
        let settings = TraceSettings::default();
        let tracer = Tracer::new(&scene, &settings);
        let eye = Vec3::new(0.0, 1.0, 1.0);
        let ray = Ray::new(eye, (Vec3::new(-1.2, 0.3, -4.5) - eye).normalize());

        let a = tracer.trace(&ray, 0, &mut StdRng::seed_from_u64(42));
        let b = tracer.trace(&ray, 0, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_stats_merge() {
        let mut a = TraceStats { rays: 3, deepest: 1 };
        a.merge(&TraceStats { rays: 2, deepest: 3 });
        assert_eq!(a, TraceStats { rays: 5, deepest: 3 });
    }
}
