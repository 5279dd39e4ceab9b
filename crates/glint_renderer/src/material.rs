//! Surface materials.

pub use glint_core::MaterialKind;
pub use glint_math::Color;

/// Phong surface parameters shared by every primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base color, used for ambient and diffuse terms and as texture fallback
    pub albedo: Color,
    /// Diffuse coefficient in [0, 1]
    pub diffuse: f32,
    pub kind: MaterialKind,
}

impl Material {
    /// Create a new material.
    pub fn new(albedo: Color, diffuse: f32, kind: MaterialKind) -> Self {
        Self {
            albedo,
            diffuse,
            kind,
        }
    }

    /// A matte surface.
    pub fn diffuse(albedo: Color, diffuse: f32) -> Self {
        Self::new(albedo, diffuse, MaterialKind::Diffuse)
    }

    /// A mirror surface; it still contributes part of its diffuse term.
    pub fn reflective(albedo: Color, diffuse: f32) -> Self {
        Self::new(albedo, diffuse, MaterialKind::Reflective)
    }

    pub fn is_reflective(&self) -> bool {
        self.kind == MaterialKind::Reflective
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse(Color::new(0.5, 0.5, 0.5), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_kinds() {
        let matte = Material::diffuse(Color::ONE, 0.8);
        assert!(!matte.is_reflective());
        assert_eq!(matte.diffuse, 0.8);

        let mirror = Material::reflective(Color::ONE, 0.5);
        assert!(mirror.is_reflective());
        assert_eq!(mirror.kind, MaterialKind::Reflective);
    }
}
