//! Hittable trait, the `Primitive` variant and `HitRecord`.

use crate::{Color, Cuboid, Material, Ray, Sphere};
use glint_math::Vec3;

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Distance along the ray to the surface, if hit at `t >= 0`.
    fn intersect(&self, ray: &Ray) -> Option<f32>;

    /// Outward unit normal at a point on the surface.
    fn normal_at(&self, point: Vec3) -> Vec3;

    /// Base color at a point on the surface (texture or flat albedo).
    fn albedo_at(&self, point: Vec3) -> Color;

    fn material(&self) -> &Material;
}

/// Which kind of primitive something is; shadow policies filter on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Sphere,
    Cuboid,
}

/// Any scene primitive.
#[derive(Debug, Clone)]
pub enum Primitive {
    Sphere(Sphere),
    Cuboid(Cuboid),
}

impl Primitive {
    /// Scene-unique identity.
    pub fn id(&self) -> usize {
        match self {
            Primitive::Sphere(sphere) => sphere.id(),
            Primitive::Cuboid(cuboid) => cuboid.id(),
        }
    }

    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Sphere(_) => PrimitiveKind::Sphere,
            Primitive::Cuboid(_) => PrimitiveKind::Cuboid,
        }
    }

    pub fn as_sphere(&self) -> Option<&Sphere> {
        match self {
            Primitive::Sphere(sphere) => Some(sphere),
            Primitive::Cuboid(_) => None,
        }
    }

    pub fn as_cuboid(&self) -> Option<&Cuboid> {
        match self {
            Primitive::Sphere(_) => None,
            Primitive::Cuboid(cuboid) => Some(cuboid),
        }
    }

    pub(crate) fn set_id(&mut self, id: usize) {
        match self {
            Primitive::Sphere(sphere) => sphere.id = id,
            Primitive::Cuboid(cuboid) => cuboid.id = id,
        }
    }

    fn hittable(&self) -> &dyn Hittable {
        match self {
            Primitive::Sphere(sphere) => sphere as &dyn Hittable,
            Primitive::Cuboid(cuboid) => cuboid as &dyn Hittable,
        }
    }
}

impl Hittable for Primitive {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        self.hittable().intersect(ray)
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        self.hittable().normal_at(point)
    }

    fn albedo_at(&self, point: Vec3) -> Color {
        self.hittable().albedo_at(point)
    }

    fn material(&self) -> &Material {
        self.hittable().material()
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Cuboid> for Primitive {
    fn from(cuboid: Cuboid) -> Self {
        Primitive::Cuboid(cuboid)
    }
}

/// Record of the nearest ray-primitive intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Outward surface normal at the intersection
    pub normal: Vec3,
    /// The primitive that was hit
    pub primitive: &'a Primitive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_dispatch() {
        let sphere: Primitive = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, Material::default())
            .expect("valid sphere")
            .into();
        let cuboid: Primitive = Cuboid::new(
            Vec3::new(-1.0, -1.0, -9.0),
            Vec3::new(1.0, 1.0, -8.0),
            Material::reflective(Color::ONE, 0.7),
        )
        .expect("valid box")
        .into();

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(sphere.intersect(&ray), Some(4.0));
        assert_eq!(cuboid.intersect(&ray), Some(8.0));

        assert_eq!(sphere.kind(), PrimitiveKind::Sphere);
        assert_eq!(cuboid.kind(), PrimitiveKind::Cuboid);
        assert!(sphere.as_sphere().is_some() && sphere.as_cuboid().is_none());
        assert!(cuboid.as_cuboid().is_some() && cuboid.as_sphere().is_none());

        assert_eq!(sphere.normal_at(Vec3::new(0.0, 0.0, -4.0)), Vec3::Z);
        assert_eq!(cuboid.normal_at(Vec3::new(0.0, 0.0, -8.0)), Vec3::Z);
        assert!(cuboid.material().is_reflective());
        assert_eq!(cuboid.albedo_at(Vec3::new(0.0, 0.0, -8.0)), Color::ONE);
    }

    #[test]
    fn test_set_id() {
        let mut sphere: Primitive = Sphere::new(Vec3::ZERO, 1.0, Material::default())
            .expect("valid sphere")
            .into();
        sphere.set_id(7);
        assert_eq!(sphere.id(), 7);
    }
}
