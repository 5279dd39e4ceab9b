//! Serializable scene descriptions.
//!
//! A `SceneDescription` is the renderer-agnostic form of a scene: plain
//! positions, colors, coefficients, material tags and texture paths. The
//! renderer builds its primitives from it. `SceneDescription::default()` is
//! the reference room: two spheres inside five walls, two of them textured.

use std::fs;
use std::path::{Path, PathBuf};

use glint_math::{Color, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while reading a scene description.
#[derive(Error, Debug)]
pub enum DescriptionError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scene description: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DescriptionResult<T> = Result<T, DescriptionError>;

/// How a surface responds to light beyond local shading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    #[default]
    Diffuse,
    Reflective,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Vec3,
    pub radius: f32,
    pub color: Color,
    /// Diffuse coefficient in [0, 1]
    pub diffuse: f32,
    #[serde(default)]
    pub material: MaterialKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxDesc {
    pub min: Vec3,
    pub max: Vec3,
    pub color: Color,
    /// Diffuse coefficient in [0, 1]
    pub diffuse: f32,
    #[serde(default)]
    pub material: MaterialKind,
    /// Image applied to every face; the flat color is used if it fails to load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<PathBuf>,
}

/// A single point light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightDesc {
    pub position: Vec3,
    pub intensity: f32,
}

impl Default for LightDesc {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.5, -4.0),
            intensity: 1.1,
        }
    }
}

/// Fixed pinhole camera looking down -z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraDesc {
    pub position: Vec3,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 1.0),
        }
    }
}

/// Output resolution in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDesc {
    pub width: u32,
    pub height: u32,
}

impl Default for ImageDesc {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Everything needed to build and frame a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub spheres: Vec<SphereDesc>,
    #[serde(default)]
    pub boxes: Vec<BoxDesc>,
    #[serde(default)]
    pub light: LightDesc,
    #[serde(default)]
    pub camera: CameraDesc,
    #[serde(default)]
    pub image: ImageDesc,
}

impl Default for SceneDescription {
    fn default() -> Self {
        let warm = Color::new(1.0, 0.9, 0.7);
        let orange = Color::new(1.0, 0.5, 0.0);

        Self {
            spheres: vec![
                SphereDesc {
                    center: Vec3::new(-1.0, 0.0, -5.0),
                    radius: 1.0,
                    color: warm,
                    diffuse: 0.8,
                    material: MaterialKind::Diffuse,
                },
                SphereDesc {
                    center: Vec3::new(2.0, 0.0, -6.0),
                    radius: 1.0,
                    color: warm,
                    diffuse: 0.5,
                    material: MaterialKind::Reflective,
                },
            ],
            boxes: vec![
                // Left wall
                BoxDesc {
                    min: Vec3::new(-3.5, -1.0, -7.0),
                    max: Vec3::new(-3.0, 3.0, 1.0),
                    color: orange,
                    diffuse: 0.7,
                    material: MaterialKind::Diffuse,
                    texture: Some(PathBuf::from("texture2.png")),
                },
                // Right wall
                BoxDesc {
                    min: Vec3::new(3.0, -1.0, -7.0),
                    max: Vec3::new(3.5, 3.0, 1.0),
                    color: orange,
                    diffuse: 0.7,
                    material: MaterialKind::Diffuse,
                    texture: Some(PathBuf::from("texture1.png")),
                },
                // Ceiling
                BoxDesc {
                    min: Vec3::new(-3.5, 3.0, -7.0),
                    max: Vec3::new(3.0, 3.5, 1.0),
                    color: warm,
                    diffuse: 0.7,
                    material: MaterialKind::Reflective,
                    texture: None,
                },
                // Floor
                BoxDesc {
                    min: Vec3::new(-3.5, -1.5, -7.0),
                    max: Vec3::new(3.0, -1.0, 1.0),
                    color: warm,
                    diffuse: 0.7,
                    material: MaterialKind::Reflective,
                    texture: None,
                },
                // Back wall
                BoxDesc {
                    min: Vec3::new(-3.0, -1.0, -7.5),
                    max: Vec3::new(3.0, 3.0, -7.0),
                    color: Color::new(0.8, 0.7, 0.5),
                    diffuse: 0.7,
                    material: MaterialKind::Reflective,
                    texture: None,
                },
            ],
            light: LightDesc::default(),
            camera: CameraDesc::default(),
            image: ImageDesc::default(),
        }
    }
}

impl SceneDescription {
    /// An empty scene with the default light, camera and resolution.
    pub fn empty() -> Self {
        Self {
            spheres: Vec::new(),
            boxes: Vec::new(),
            light: LightDesc::default(),
            camera: CameraDesc::default(),
            image: ImageDesc::default(),
        }
    }

    /// Parse a description from JSON text. Texture paths are kept as written.
    pub fn from_json_str(json: &str) -> DescriptionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a description from a JSON file.
    ///
    /// Relative texture paths are resolved against the file's directory.
    pub fn from_json_file(path: impl AsRef<Path>) -> DescriptionResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| DescriptionError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut description = Self::from_json_str(&json)?;
        if let Some(base_dir) = path.parent() {
            description.resolve_textures(base_dir);
        }

        log::info!(
            "Loaded scene {} ({} spheres, {} boxes)",
            path.display(),
            description.spheres.len(),
            description.boxes.len()
        );

        Ok(description)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> DescriptionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Make every relative texture path relative to `base_dir` instead.
    pub fn resolve_textures(&mut self, base_dir: &Path) {
        for texture in self.boxes.iter_mut().filter_map(|b| b.texture.as_mut()) {
            if texture.is_relative() {
                *texture = base_dir.join(&*texture);
            }
        }
    }

    /// Number of primitives of both kinds.
    pub fn primitive_count(&self) -> usize {
        self.spheres.len() + self.boxes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_room() {
        let desc = SceneDescription::default();

        assert_eq!(desc.spheres.len(), 2);
        assert_eq!(desc.boxes.len(), 5);
        assert_eq!(desc.primitive_count(), 7);
        assert_eq!(desc.light.position, Vec3::new(0.0, 2.5, -4.0));
        assert_eq!(desc.light.intensity, 1.1);
        assert_eq!(desc.camera.position, Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(desc.image, ImageDesc { width: 800, height: 600 });

        assert_eq!(desc.spheres[0].material, MaterialKind::Diffuse);
        assert_eq!(desc.spheres[1].material, MaterialKind::Reflective);

        let textured: Vec<_> = desc.boxes.iter().filter(|b| b.texture.is_some()).collect();
        assert_eq!(textured.len(), 2);
        assert!(desc.boxes[2..].iter().all(|b| b.material == MaterialKind::Reflective));
    }

    #[test]
    fn test_json_round_trip() {
        let desc = SceneDescription::default();
        let json = desc.to_json_string().expect("serialize");
        let parsed = SceneDescription::from_json_str(&json).expect("parse");
        assert_eq!(parsed, desc);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "spheres": [
                { "center": [0, 0, -3], "radius": 0.5, "color": [1, 0, 0], "diffuse": 1.0 }
            ]
        }"#;
        let desc = SceneDescription::from_json_str(json).expect("parse");

        assert_eq!(desc.spheres.len(), 1);
        assert_eq!(desc.spheres[0].material, MaterialKind::Diffuse);
        assert!(desc.boxes.is_empty());
        assert_eq!(desc.light, LightDesc::default());
        assert_eq!(desc.camera, CameraDesc::default());
    }

    #[test]
    fn test_material_tags_are_lowercase() {
        let json = r#"{ "boxes": [
            { "min": [0, 0, 0], "max": [1, 1, 1], "color": [1, 1, 1], "diffuse": 0.5,
              "material": "reflective", "texture": "wood.png" }
        ] }"#;
        let desc = SceneDescription::from_json_str(json).expect("parse");
        assert_eq!(desc.boxes[0].material, MaterialKind::Reflective);
        assert_eq!(desc.boxes[0].texture.as_deref(), Some(Path::new("wood.png")));

        assert!(SceneDescription::from_json_str(r#"{ "boxes": [
            { "min": [0, 0, 0], "max": [1, 1, 1], "color": [1, 1, 1], "diffuse": 0.5,
              "material": "glass" }
        ] }"#)
        .is_err());
    }

    #[test]
    fn test_resolve_textures() {
        let mut desc = SceneDescription::default();
        desc.boxes[1].texture = Some(PathBuf::from("/abs/texture1.png"));
        desc.resolve_textures(Path::new("scenes"));

        assert_eq!(
            desc.boxes[0].texture.as_deref(),
            Some(Path::new("scenes/texture2.png"))
        );
        assert_eq!(
            desc.boxes[1].texture.as_deref(),
            Some(Path::new("/abs/texture1.png"))
        );
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = SceneDescription::from_json_file("no/such/scene.json").unwrap_err();
        assert!(matches!(err, DescriptionError::Io { .. }));
    }

    #[test]
    fn test_from_json_file_resolves_relative_textures() {
        let dir = std::env::temp_dir().join(format!("glint_desc_{}", std::process::id()));
        fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("scene.json");
        fs::write(
            &path,
            r#"{ "boxes": [ { "min": [0, 0, 0], "max": [1, 1, 1], "color": [1, 1, 1],
                 "diffuse": 0.5, "texture": "brick.png" } ] }"#,
        )
        .expect("write scene");

        let desc = SceneDescription::from_json_file(&path).expect("load scene");
        let _ = fs::remove_dir_all(&dir);

        assert_eq!(desc.boxes[0].texture.as_deref(), Some(dir.join("brick.png").as_path()));
    }
}
