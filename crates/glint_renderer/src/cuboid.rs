//! Axis-aligned box primitive (the room's walls, floor and ceiling).
//!
//! Faces are identified from a hit point by proximity to the six bounding
//! planes. The same face lookup drives both the outward normal and the
//! texture mapping, so the two always agree on which face was struck.

use crate::hittable::Hittable;
use crate::scene::{SceneError, SceneResult};
use crate::{Color, Material, Ray};
use glint_core::Texture;
use glint_math::{Aabb, Vec3};

/// Maximum distance from a bounding plane for a point to count as on that face.
pub const FACE_TOLERANCE: f32 = 1e-4;

/// One of the six faces of an axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    NegX,
    PosX,
    NegY,
    PosY,
    NegZ,
    PosZ,
}

impl Face {
    /// All faces in lookup priority order.
    pub const ALL: [Face; 6] = [
        Face::NegX,
        Face::PosX,
        Face::NegY,
        Face::PosY,
        Face::NegZ,
        Face::PosZ,
    ];

    /// Outward unit normal.
    pub fn normal(self) -> Vec3 {
        match self {
            Face::NegX => Vec3::NEG_X,
            Face::PosX => Vec3::X,
            Face::NegY => Vec3::NEG_Y,
            Face::PosY => Vec3::Y,
            Face::NegZ => Vec3::NEG_Z,
            Face::PosZ => Vec3::Z,
        }
    }

    /// Distance from `point` to this face's plane.
    pub fn plane_distance(self, bounds: &Aabb, point: Vec3) -> f32 {
        match self {
            Face::NegX => (point.x - bounds.x.min).abs(),
            Face::PosX => (point.x - bounds.x.max).abs(),
            Face::NegY => (point.y - bounds.y.min).abs(),
            Face::PosY => (point.y - bounds.y.max).abs(),
            Face::NegZ => (point.z - bounds.z.min).abs(),
            Face::PosZ => (point.z - bounds.z.max).abs(),
        }
    }

    /// Face-local texture coordinates of `point`.
    ///
    /// Each in-plane axis is normalized against the box extent; the flips
    /// per face fix the texture orientation.
    pub fn uv(self, bounds: &Aabb, point: Vec3) -> (f32, f32) {
        let rel = (point - bounds.min()) / bounds.extent();

        match self {
            Face::NegX => (rel.z, 1.0 - rel.y),
            Face::PosX => (1.0 - rel.z, 1.0 - rel.y),
            Face::NegY => (rel.x, 1.0 - rel.z),
            Face::PosY => (rel.x, rel.z),
            Face::NegZ => (1.0 - rel.x, rel.y),
            Face::PosZ => (rel.x, 1.0 - rel.y),
        }
    }
}

/// An axis-aligned box with an optional texture on every face.
#[derive(Debug, Clone)]
pub struct Cuboid {
    pub(crate) id: usize,
    bounds: Aabb,
    material: Material,
    texture: Option<Texture>,
}

impl Cuboid {
    /// Create a box from its corners. Requires `min < max` on every axis.
    ///
    /// The id is assigned when the box is added to a scene.
    pub fn new(min: Vec3, max: Vec3, material: Material) -> SceneResult<Self> {
        let bounds = Aabb::from_corners(min, max);
        if !bounds.is_valid() {
            return Err(SceneError::DegenerateBox { min, max });
        }

        Ok(Self {
            id: 0,
            bounds,
            material,
            texture: None,
        })
    }

    /// Bind a texture. The box owns it for the rest of its life.
    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    /// The first face (in `Face::ALL` order) whose plane is within
    /// `FACE_TOLERANCE` of `point`.
    pub fn face_at(&self, point: Vec3) -> Option<Face> {
        Face::ALL
            .into_iter()
            .find(|face| face.plane_distance(&self.bounds, point) < FACE_TOLERANCE)
    }

    /// The face whose plane is closest to `point`, however far.
    fn nearest_face(&self, point: Vec3) -> Face {
        let mut nearest = Face::NegX;
        let mut nearest_distance = f32::INFINITY;
        for face in Face::ALL {
            let distance = face.plane_distance(&self.bounds, point);
            if distance < nearest_distance {
                nearest = face;
                nearest_distance = distance;
            }
        }
        nearest
    }

    /// Surface color at a hit point.
    ///
    /// Falls back to the flat albedo without a texture, when the point is on
    /// no face, or when the lookup lands outside the raster.
    pub fn texture_color(&self, point: Vec3) -> Color {
        let Some(texture) = &self.texture else {
            return self.material.albedo;
        };
        let Some(face) = self.face_at(point) else {
            return self.material.albedo;
        };

        let (u, v) = face.uv(&self.bounds, point);
        texture
            .sample_nearest(u, v)
            .unwrap_or(self.material.albedo)
    }
}

impl Hittable for Cuboid {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        self.bounds.intersect(ray)
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        self.face_at(point)
            .unwrap_or_else(|| self.nearest_face(point))
            .normal()
    }

    fn albedo_at(&self, point: Vec3) -> Color {
        self.texture_color(point)
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
