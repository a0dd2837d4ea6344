//! Scene file loading.
//!
//! Walks the element tree produced by [`parse_document`] and builds a
//! [`SceneDescription`]. Named materials and nodes are remembered so later
//! elements can refer to them with `ref="name"`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use rt_math::{Color, DVec3, TransformParams};
use thiserror::Error;

use super::xml::{parse_document, Element, ParseError};
use crate::scene::{
    CameraSettings, Light, LightKind, Material, NodeDescription, RenderSettings,
    SceneDescription, Surface,
};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Expected a <scene> root element, found <{0}>")]
    MissingScene(String),

    #[error("Invalid value for attribute '{attribute}': {value:?}")]
    InvalidValue { attribute: String, value: String },

    #[error("Attribute '{attribute}' needs {expected} components, found {found}")]
    ComponentCount {
        attribute: String,
        expected: usize,
        found: usize,
    },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene file from disk.
///
/// # Example
///
/// ```ignore
/// use rt_core::scene_file::load_scene;
///
/// let scene = load_scene("scenes/boxes.xml")?;
/// println!("Loaded {} primitives, {} lights",
///     scene.primitive_count(),
///     scene.light_count());
/// ```
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    log::info!("Parsing {}", path.display());

    let text = std::fs::read_to_string(path)?;
    let scene = load_scene_from_str(&text)?;

    log::info!(
        "Loaded {} primitives and {} lights from {}",
        scene.primitive_count(),
        scene.light_count(),
        path.display()
    );
    Ok(scene)
}

/// Load a scene from XML text.
pub fn load_scene_from_str(text: &str) -> LoadResult<SceneDescription> {
    let root = parse_document(text)?;
    if root.name != "scene" {
        return Err(LoadError::MissingScene(root.name));
    }

    let mut loader = SceneLoader::default();
    loader.scene(&root)?;
    Ok(loader.scene)
}

#[derive(Default)]
struct SceneLoader {
    materials: HashMap<String, Arc<Material>>,
    nodes: HashMap<String, NodeDescription>,
    scene: SceneDescription,
}

impl SceneLoader {
    fn scene(&mut self, element: &Element) -> LoadResult<()> {
        if let Some(ambient) = color_attr(element, "ambient")? {
            self.scene.ambient = ambient;
        }

        let mut surfaces = Vec::new();
        for child in &element.children {
            match child.name.as_str() {
                "render" => self.scene.render = render_settings(child)?,
                _ => self.surface_child(child, &mut surfaces)?,
            }
        }
        self.scene.surfaces = surfaces;
        Ok(())
    }

    /// Handle an element that may appear at scene level or inside a node.
    fn surface_child(&mut self, element: &Element, surfaces: &mut Vec<Surface>) -> LoadResult<()> {
        match element.name.as_str() {
            "sphere" | "plane" | "box" => surfaces.push(self.primitive(element)?),
            "node" => surfaces.push(Surface::Node(self.node(element)?)),
            "material" => {
                self.material(element)?;
            }
            "light" => self.scene.lights.push(light(element)?),
            other => log::warn!("Ignoring unknown element <{}>", other),
        }
        Ok(())
    }

    /// Define or look up a material.
    fn material(&mut self, element: &Element) -> LoadResult<Arc<Material>> {
        if let Some(name) = element.attr("ref") {
            return Ok(match self.materials.get(name) {
                Some(material) => material.clone(),
                None => {
                    log::warn!("Material '{}' not found, using default", name);
                    Arc::new(Material::default())
                }
            });
        }

        let defaults = Material::default();
        let diffuse = vec3_attr(element, "diffuse")?.unwrap_or(defaults.diffuse);
        let material = Arc::new(Material {
            name: element.attr("name").map(str::to_string),
            diffuse,
            specular: vec3_attr(element, "specular")?.unwrap_or(defaults.specular),
            ambient: color_attr(element, "ambient")?.unwrap_or(diffuse),
            hardness: f64_attr(element, "hardness")?.unwrap_or(defaults.hardness),
        });

        if let Some(name) = &material.name {
            log::debug!("Adding material {}", name);
            self.materials.insert(name.clone(), material.clone());
        }
        Ok(material)
    }

    fn primitive(&mut self, element: &Element) -> LoadResult<Surface> {
        let mut material = None;
        let mut material2 = None;
        for child in &element.children {
            match child.name.as_str() {
                "material" if material.is_none() => material = Some(self.material(child)?),
                "material" | "material2" => material2 = Some(self.material(child)?),
                other => log::warn!("Ignoring <{}> inside <{}>", other, element.name),
            }
        }
        let material = material.unwrap_or_else(|| Arc::new(Material::default()));

        let surface = match element.name.as_str() {
            "sphere" => Surface::Sphere {
                center: vec3_attr(element, "center")?.unwrap_or(DVec3::ZERO),
                radius: f64_attr(element, "radius")?.unwrap_or(1.0),
                material,
            },
            "plane" => Surface::Plane {
                normal: vec3_attr(element, "normal")?.unwrap_or(DVec3::Y),
                material,
                material2,
            },
            _ => Surface::Box {
                min: vec3_attr(element, "min")?.unwrap_or(DVec3::splat(-1.0)),
                max: vec3_attr(element, "max")?.unwrap_or(DVec3::ONE),
                material,
            },
        };
        Ok(surface)
    }

    fn node(&mut self, element: &Element) -> LoadResult<NodeDescription> {
        let defaults = TransformParams::default();
        let mut node = NodeDescription {
            name: element.attr("name").map(str::to_string),
            transform: TransformParams {
                translation: vec3_attr(element, "translation")?.unwrap_or(defaults.translation),
                rotation: vec3_attr(element, "rotation")?.unwrap_or(defaults.rotation),
                scale: vec3_attr(element, "scale")?.unwrap_or(defaults.scale),
            },
            children: Vec::new(),
        };

        let referenced = element.attr("ref").and_then(|name| {
            let found = self.nodes.get(name);
            if found.is_none() {
                log::warn!("Node '{}' not found, ignoring ref", name);
            }
            found.cloned()
        });

        match referenced {
            Some(source) => {
                // The referenced node's own transform is replaced by this one
                node.children = source.children;
                for child in &element.children {
                    match child.name.as_str() {
                        "material" | "material2" => {
                            let material = self.material(child)?;
                            override_material(&mut node.children, &child.name, material);
                        }
                        _ => self.surface_child(child, &mut node.children)?,
                    }
                }
            }
            None => {
                for child in &element.children {
                    self.surface_child(child, &mut node.children)?;
                }
            }
        }

        if let Some(name) = &node.name {
            self.nodes.insert(name.clone(), node.clone());
        }
        Ok(node)
    }
}

/// Replace the material of the last surface in `children`.
fn override_material(children: &mut [Surface], slot: &str, new_material: Arc<Material>) {
    match (children.last_mut(), slot) {
        (Some(Surface::Plane { material2, .. }), "material2") => *material2 = Some(new_material),
        (Some(Surface::Sphere { material, .. }), "material")
        | (Some(Surface::Plane { material, .. }), "material")
        | (Some(Surface::Box { material, .. }), "material") => *material = new_material,
        (Some(other), _) => {
            log::warn!("Cannot apply <{}> to a {}", slot, other.kind_name());
        }
        (None, _) => log::warn!("Ignoring <{}> on a node without children", slot),
    }
}

fn render_settings(element: &Element) -> LoadResult<RenderSettings> {
    let defaults = RenderSettings::default();
    let mut camera = defaults.camera;
    for child in &element.children {
        match child.name.as_str() {
            "camera" => camera = camera_settings(child)?,
            other => log::warn!("Ignoring <{}> inside <render>", other),
        }
    }

    for unused in ["samples", "jitter", "eyepoints", "lensSize"] {
        if element.attr(unused).is_some() {
            log::debug!("Render attribute '{}' is not supported, ignoring", unused);
        }
    }

    Ok(RenderSettings {
        camera,
        background: color_attr(element, "bgcolor")?.unwrap_or(defaults.background),
        output: element
            .attr("output")
            .map(str::to_string)
            .unwrap_or(defaults.output),
    })
}

fn camera_settings(element: &Element) -> LoadResult<CameraSettings> {
    let defaults = CameraSettings::default();
    Ok(CameraSettings {
        name: element.attr("name").map(str::to_string),
        from: vec3_attr(element, "from")?.unwrap_or(defaults.from),
        to: vec3_attr(element, "to")?.unwrap_or(defaults.to),
        up: vec3_attr(element, "up")?.unwrap_or(defaults.up),
        fov: f64_attr(element, "fov")?.unwrap_or(defaults.fov),
        near: f64_attr(element, "near")?.unwrap_or(defaults.near),
        width: size_attr(element, "width")?.unwrap_or(defaults.width),
        height: size_attr(element, "height")?.unwrap_or(defaults.height),
    })
}

fn light(element: &Element) -> LoadResult<Light> {
    let defaults = Light::default();
    let kind = match element.attr("type") {
        None | Some("point") => LightKind::Point,
        Some(other) => {
            log::warn!("Unsupported light type '{}', treating as point", other);
            LightKind::Point
        }
    };

    Ok(Light {
        name: element.attr("name").map(str::to_string),
        color: color_attr(element, "color")?.unwrap_or(defaults.color),
        position: vec3_attr(element, "from")?.unwrap_or(defaults.position),
        power: f64_attr(element, "power")?.unwrap_or(defaults.power),
        kind,
    })
}

// =============================================================================
// Attribute helpers
// =============================================================================

fn invalid(attribute: &str, value: &str) -> LoadError {
    LoadError::InvalidValue {
        attribute: attribute.to_string(),
        value: value.to_string(),
    }
}

/// Parse one number; `nan` and `inf` are rejected.
fn finite_number(token: &str, key: &str, value: &str) -> LoadResult<f64> {
    match token.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(invalid(key, value)),
    }
}

fn numbers_attr(element: &Element, key: &str) -> LoadResult<Option<Vec<f64>>> {
    let Some(value) = element.attr(key) else {
        return Ok(None);
    };
    value
        .split_whitespace()
        .map(|token| finite_number(token, key, value))
        .collect::<LoadResult<Vec<_>>>()
        .map(Some)
}

fn f64_attr(element: &Element, key: &str) -> LoadResult<Option<f64>> {
    let Some(value) = element.attr(key) else {
        return Ok(None);
    };
    finite_number(value.trim(), key, value).map(Some)
}

fn size_attr(element: &Element, key: &str) -> LoadResult<Option<u32>> {
    let Some(value) = element.attr(key) else {
        return Ok(None);
    };
    match value.trim().parse::<u32>() {
        Ok(size) if size > 0 => Ok(Some(size)),
        _ => Err(invalid(key, value)),
    }
}

/// Exactly three components.
fn vec3_attr(element: &Element, key: &str) -> LoadResult<Option<DVec3>> {
    match numbers_attr(element, key)? {
        None => Ok(None),
        Some(v) if v.len() == 3 => Ok(Some(DVec3::new(v[0], v[1], v[2]))),
        Some(v) => Err(LoadError::ComponentCount {
            attribute: key.to_string(),
            expected: 3,
            found: v.len(),
        }),
    }
}

/// RGB or RGBA; alpha is dropped.
fn color_attr(element: &Element, key: &str) -> LoadResult<Option<Color>> {
    match numbers_attr(element, key)? {
        None => Ok(None),
        Some(v) if v.len() == 3 || v.len() == 4 => Ok(Some(Color::new(v[0], v[1], v[2]))),
        Some(v) => Err(LoadError::ComponentCount {
            attribute: key.to_string(),
            expected: 3,
            found: v.len(),
        }),
    }
}
