use crate::{Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
/// Unlike a BVH bound it is never padded: it describes solid scene geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Create an AABB from its minimum and maximum corners, as given.
    pub fn from_corners(min: Vec3, max: Vec3) -> Self {
        Self {
            x: Interval::new(min.x, max.x),
            y: Interval::new(min.y, max.y),
            z: Interval::new(min.z, max.z),
        }
    }

    /// The minimum corner.
    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    /// The maximum corner.
    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Size along each axis.
    pub fn extent(&self) -> Vec3 {
        Vec3::new(self.x.size(), self.y.size(), self.z.size())
    }

    /// Returns the center point of the box.
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.x.min + self.x.max) * 0.5,
            (self.y.min + self.y.max) * 0.5,
            (self.z.min + self.z.max) * 0.5,
        )
    }

    /// Whether every axis has `min < max`.
    pub fn is_valid(&self) -> bool {
        self.x.min < self.x.max && self.y.min < self.y.max && self.z.min < self.z.max
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Intersect a ray with the box using the slab method.
    ///
    /// Each axis contributes the ordered pair `(min - o) / d`, `(max - o) / d`;
    /// the pairs are intersected in x, y, z order and the ray misses as soon as
    /// two of them are disjoint. Axis-parallel rays rely on IEEE-754 infinities.
    /// Returns the entry distance, only when it is non-negative.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        if ray.is_degenerate() {
            return None;
        }

        let mut span = self.slab(ray, 0);
        for axis in 1..3 {
            let slab = self.slab(ray, axis);
            if !span.overlaps(&slab) {
                return None;
            }
            span = span.intersect(&slab);
        }

        (span.min >= 0.0).then_some(span.min)
    }

    fn slab(&self, ray: &Ray, axis: usize) -> Interval {
        let bounds = self.axis_interval(axis);
        let origin = ray.origin[axis];
        let direction = ray.direction[axis];

        Interval::ordered(
            (bounds.min - origin) / direction,
            (bounds.max - origin) / direction,
        )
    }
}
