//! The renderable scene: primitives plus one point light.
//!
//! A `Scene` is assembled once through `SceneBuilder` (or from a
//! `SceneDescription`) and is read-only afterwards, so it can be shared by
//! every render thread without locking.

use crate::hittable::{HitRecord, Hittable, Primitive};
use crate::{Cuboid, Material, Ray, Sphere};
use glint_core::{SceneDescription, Texture};
use glint_math::Vec3;
use thiserror::Error;

/// Errors raised while building a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("Box corners must satisfy min < max on every axis, got min {min} max {max}")]
    DegenerateBox { min: Vec3, max: Vec3 },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// A point light with a scalar intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: f32,
}

impl PointLight {
    pub fn new(position: Vec3, intensity: f32) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 2.5, -4.0), 1.1)
    }
}

/// An immutable collection of primitives and a light.
///
/// Primitives are stored spheres first, then boxes, each group in the order
/// it was added.
#[derive(Debug, Clone)]
pub struct Scene {
    primitives: Vec<Primitive>,
    light: PointLight,
}

impl Scene {
    /// Start building a scene.
    pub fn builder() -> SceneBuilder {
        SceneBuilder::new()
    }

    /// Build a scene from a description.
    ///
    /// A texture that fails to load is logged and the box keeps its flat
    /// color. Invalid geometry is an error.
    pub fn from_description(description: &SceneDescription) -> SceneResult<Scene> {
        let mut builder = SceneBuilder::new();
        builder.set_light(PointLight::new(
            description.light.position,
            description.light.intensity,
        ));

        for desc in &description.spheres {
            let material = Material::new(desc.color, desc.diffuse, desc.material);
            builder.add_sphere(Sphere::new(desc.center, desc.radius, material)?);
        }

        for desc in &description.boxes {
            let material = Material::new(desc.color, desc.diffuse, desc.material);
            let mut cuboid = Cuboid::new(desc.min, desc.max, material)?;

            if let Some(path) = &desc.texture {
                match Texture::load(path) {
                    Ok(texture) => cuboid = cuboid.with_texture(texture),
                    Err(e) => log::warn!("{}; using flat color {}", e, desc.color),
                }
            }

            builder.add_cuboid(cuboid);
        }

        let scene = builder.build();
        log::info!(
            "Built scene: {} spheres, {} boxes ({} textured)",
            scene.spheres().count(),
            scene.cuboids().count(),
            scene.cuboids().filter(|c| c.texture().is_some()).count()
        );

        Ok(scene)
    }

    /// All primitives, spheres first.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn spheres(&self) -> impl Iterator<Item = &Sphere> {
        self.primitives.iter().filter_map(Primitive::as_sphere)
    }

    pub fn cuboids(&self) -> impl Iterator<Item = &Cuboid> {
        self.primitives.iter().filter_map(Primitive::as_cuboid)
    }

    pub fn light(&self) -> &PointLight {
        &self.light
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Find the nearest primitive hit by `ray`.
    ///
    /// Linear scan over every primitive; on equal distances the earlier
    /// primitive wins.
    pub fn hit(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        let mut nearest: Option<(&Primitive, f32)> = None;

        for primitive in &self.primitives {
            let Some(t) = primitive.intersect(ray) else {
                continue;
            };
            if nearest.map_or(true, |(_, closest)| t < closest) {
                nearest = Some((primitive, t));
            }
        }

        nearest.map(|(primitive, t)| {
            let point = ray.at(t);
            HitRecord {
                t,
                point,
                normal: primitive.normal_at(point),
                primitive,
            }
        })
    }
}

/// Collects primitives and hands out scene-unique ids.
///
/// One counter covers both kinds, so ids reflect overall insertion order.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    spheres: Vec<Primitive>,
    cuboids: Vec<Primitive>,
    light: PointLight,
    next_id: usize,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_light(&mut self, light: PointLight) -> &mut Self {
        self.light = light;
        self
    }

    /// Add a sphere and return its id.
    pub fn add_sphere(&mut self, sphere: Sphere) -> usize {
        let primitive = self.assign_id(sphere.into());
        let id = primitive.id();
        self.spheres.push(primitive);
        id
    }

    /// Add a box and return its id.
    pub fn add_cuboid(&mut self, cuboid: Cuboid) -> usize {
        let primitive = self.assign_id(cuboid.into());
        let id = primitive.id();
        self.cuboids.push(primitive);
        id
    }

    fn assign_id(&mut self, mut primitive: Primitive) -> Primitive {
        primitive.set_id(self.next_id);
        self.next_id += 1;
        primitive
    }

    pub fn build(self) -> Scene {
        let mut primitives = self.spheres;
        primitives.extend(self.cuboids);

        Scene {
            primitives,
            light: self.light,
        }
    }
}
