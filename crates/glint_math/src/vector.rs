use crate::Vec3;

/// Color type alias (linear RGB, not clamped)
pub type Color = Vec3;

/// Mirror `v` about the plane with normal `n`.
///
/// Returns `v - 2 * n * (n . v)`. The result is not normalized; `n` is
/// expected to be unit length.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - n * (2.0 * n.dot(v))
}
