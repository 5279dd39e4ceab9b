//! Sphere primitive for ray tracing.

use crate::hittable::Hittable;
use crate::scene::{SceneError, SceneResult};
use crate::{Color, Material, Ray};
use glint_math::Vec3;

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    pub(crate) id: usize,
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. The radius must be finite and positive.
    ///
    /// The id is assigned when the sphere is added to a scene.
    pub fn new(center: Vec3, radius: f32, material: Material) -> SceneResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SceneError::InvalidRadius(radius));
        }

        Ok(Self {
            id: 0,
            center,
            radius,
            material,
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Sphere {
    /// Only the near root counts: a ray starting inside (or past) the sphere
    /// reports a miss even when the far root is ahead of it.
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        if ray.is_degenerate() {
            return None;
        }

        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let t = (-b - discriminant.sqrt()) / (2.0 * a);
        (t >= 0.0).then_some(t)
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize_or_zero()
    }

    fn albedo_at(&self, _point: Vec3) -> Color {
        self.material.albedo
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
