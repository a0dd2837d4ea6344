//! Scene description types for RT.
//!
//! This module defines the renderer-agnostic representation of a scene as it
//! comes out of a scene file: materials, lights, render settings and a tree of
//! surfaces. The renderer turns a [`SceneDescription`] into intersectable
//! objects; nothing here knows how to intersect a ray.

use std::sync::Arc;

use rt_math::{Color, DMat4, DVec3, TransformParams};

/// A Blinn-Phong surface material.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Material name (used by `ref` lookups in scene files)
    pub name: Option<String>,

    /// Diffuse color (RGB, 0-1)
    pub diffuse: Color,

    /// Specular color (RGB, 0-1)
    pub specular: Color,

    /// Ambient reflectance, multiplied with the scene ambient light
    pub ambient: Color,

    /// Specular exponent
    pub hardness: f64,
}

impl Default for Material {
    fn default() -> Self {
        let diffuse = Color::new(1.0, 0.0, 0.0);
        Self {
            name: None,
            diffuse,
            specular: Color::new(0.5, 0.5, 0.5),
            ambient: diffuse,
            hardness: 50.0,
        }
    }
}

impl Material {
    /// Create a material whose ambient reflectance follows its diffuse color.
    pub fn new(diffuse: Color, specular: Color, hardness: f64) -> Self {
        Self {
            name: None,
            diffuse,
            specular,
            ambient: diffuse,
            hardness,
        }
    }

    /// Set the material name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Override the ambient reflectance.
    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }
}

/// Kind of light source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LightKind {
    /// Omnidirectional light at a point
    #[default]
    Point,
}

/// A light source.
#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    pub name: Option<String>,
    pub color: Color,
    /// Light position
    pub position: DVec3,
    /// Scalar multiplier applied to `color`
    pub power: f64,
    pub kind: LightKind,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            name: None,
            color: Color::ONE,
            position: DVec3::new(0.0, 5.0, 5.0),
            power: 1.0,
            kind: LightKind::Point,
        }
    }
}

impl Light {
    /// Create a point light.
    pub fn point(position: DVec3, color: Color, power: f64) -> Self {
        Self {
            position,
            color,
            power,
            ..Default::default()
        }
    }

    /// Light color scaled by its power.
    pub fn intensity(&self) -> Color {
        self.color * self.power
    }
}

/// Pinhole camera parameters as written in a scene file.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraSettings {
    pub name: Option<String>,
    /// Eye position
    pub from: DVec3,
    /// Point the camera looks at
    pub to: DVec3,
    pub up: DVec3,
    /// Field of view in degrees (same in both directions)
    pub fov: f64,
    /// Distance to the image plane
    pub near: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            name: None,
            from: DVec3::new(0.0, 0.0, 8.0),
            to: DVec3::ZERO,
            up: DVec3::Y,
            fov: 45.0,
            near: 1.0,
            width: 400,
            height: 400,
        }
    }
}

/// Output settings for a render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    pub camera: CameraSettings,
    /// Color of pixels whose ray hits nothing
    pub background: Color,
    /// Output image file name
    pub output: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            camera: CameraSettings::default(),
            background: Color::ZERO,
            output: "render.png".to_string(),
        }
    }
}

/// A transform node and the surfaces it owns.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct NodeDescription {
    pub name: Option<String>,
    pub transform: TransformParams,
    pub children: Vec<Surface>,
}

impl NodeDescription {
    /// The node's local-to-parent matrix.
    pub fn matrix(&self) -> DMat4 {
        self.transform.matrix()
    }
}

/// A surface in the scene tree.
///
/// Materials are shared through `Arc` so a named material can be referenced
/// by any number of primitives. Cloning a `Surface` deep-copies node subtrees.
#[derive(Clone, Debug, PartialEq)]
pub enum Surface {
    Sphere {
        center: DVec3,
        radius: f64,
        material: Arc<Material>,
    },
    /// Plane through the origin; a second material turns on the checker pattern.
    Plane {
        normal: DVec3,
        material: Arc<Material>,
        material2: Option<Arc<Material>>,
    },
    Box {
        min: DVec3,
        max: DVec3,
        material: Arc<Material>,
    },
    Node(NodeDescription),
}

impl Surface {
    /// Short lowercase name of the surface type.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Surface::Sphere { .. } => "sphere",
            Surface::Plane { .. } => "plane",
            Surface::Box { .. } => "box",
            Surface::Node(_) => "node",
        }
    }

    /// Number of primitives in this surface, counting through nodes.
    pub fn primitive_count(&self) -> usize {
        match self {
            Surface::Node(node) => node.children.iter().map(Surface::primitive_count).sum(),
            _ => 1,
        }
    }
}

/// A complete scene as loaded from a file.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneDescription {
    /// Ambient light color
    pub ambient: Color,
    pub lights: Vec<Light>,
    /// Top-level surfaces, in file order
    pub surfaces: Vec<Surface>,
    pub render: RenderSettings,
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self {
            ambient: Color::new(0.1, 0.1, 0.1),
            lights: Vec::new(),
            surfaces: Vec::new(),
            render: RenderSettings::default(),
        }
    }
}

impl SceneDescription {
    /// Create an empty scene with default ambient light and render settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// A red unit sphere lit from the camera side over a blue background.
    pub fn demo() -> Self {
        let red = Arc::new(Material::default());
        Self {
            lights: vec![Light::point(
                DVec3::new(0.0, 0.0, 10.0),
                Color::new(0.8, 0.2, 0.2),
                0.6,
            )],
            surfaces: vec![Surface::Sphere {
                center: DVec3::ZERO,
                radius: 1.0,
                material: red,
            }],
            render: RenderSettings {
                camera: CameraSettings {
                    from: DVec3::new(0.0, 0.0, 4.0),
                    width: 160,
                    height: 120,
                    ..Default::default()
                },
                background: Color::new(0.2, 0.2, 0.8),
                output: "red_sphere_blue_background.png".to_string(),
            },
            ..Default::default()
        }
    }

    /// Total number of primitives, counting through nodes.
    pub fn primitive_count(&self) -> usize {
        self.surfaces.iter().map(Surface::primitive_count).sum()
    }

    /// Number of lights.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_ambient_follows_diffuse() {
        let material = Material::new(Color::new(0.0, 0.0, 1.0), Color::ZERO, 10.0);
        assert_eq!(material.ambient, material.diffuse);

        let material = material.with_ambient(Color::splat(0.3));
        assert_eq!(material.ambient, Color::splat(0.3));
    }

    #[test]
    fn test_light_intensity() {
        let light = Light::point(DVec3::ZERO, Color::new(1.0, 0.5, 0.0), 0.5);
        assert_eq!(light.intensity(), Color::new(0.5, 0.25, 0.0));
        assert_eq!(light.kind, LightKind::Point);
    }

    #[test]
    fn test_primitive_count_through_nodes() {
        let material = Arc::new(Material::default());
        let sphere = Surface::Sphere {
            center: DVec3::ZERO,
            radius: 1.0,
            material: material.clone(),
        };
        let inner = Surface::Node(NodeDescription {
            children: vec![sphere.clone(), sphere.clone()],
            ..Default::default()
        });
        let outer = Surface::Node(NodeDescription {
            children: vec![inner, sphere.clone()],
            ..Default::default()
        });

        let scene = SceneDescription {
            surfaces: vec![outer, sphere],
            ..Default::default()
        };
        assert_eq!(scene.primitive_count(), 4);
    }

    #[test]
    fn test_cloned_node_is_independent() {
        let mut original = NodeDescription::default();
        original.children.push(Surface::Box {
            min: DVec3::splat(-1.0),
            max: DVec3::ONE,
            material: Arc::new(Material::default()),
        });

        let mut copy = original.clone();
        copy.children.clear();

        assert_eq!(original.children.len(), 1);
    }

    #[test]
    fn test_demo_scene() {
        let scene = SceneDescription::demo();
        assert_eq!(scene.light_count(), 1);
        assert_eq!(scene.primitive_count(), 1);
        assert_eq!(scene.render.camera.width, 160);
    }
}
