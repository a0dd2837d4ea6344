//! Renderable scene: nearest-hit search, shadow tests and Blinn-Phong shading.

use crate::{
    AxisAlignedBox, BuildResult, Intersectable, IntersectionResult, Plane, SceneNode, Sphere,
};
use rt_core::{Light, SceneDescription, Surface};
use rt_math::{safe_normalize, Color, DVec3, Ray};

/// A flat list of top-level intersectables plus lights.
///
/// Built once and read-only while rendering; shared freely across threads.
pub struct Scene {
    surfaces: Vec<Box<dyn Intersectable>>,
    lights: Vec<Light>,
    ambient: Color,
}

impl Scene {
    /// Create an empty scene with the given ambient light.
    pub fn new(ambient: Color) -> Self {
        Self {
            surfaces: Vec::new(),
            lights: Vec::new(),
            ambient,
        }
    }

    /// Build intersectables for every surface in a scene description.
    pub fn from_description(description: &SceneDescription) -> BuildResult<Self> {
        let mut scene = Self::new(description.ambient);
        for surface in &description.surfaces {
            scene.add_surface(build_surface(surface)?);
        }
        for light in &description.lights {
            scene.add_light(light.clone());
        }

        log::info!(
            "Built scene: {} surfaces, {} lights",
            scene.surface_count(),
            scene.light_count()
        );
        Ok(scene)
    }

    pub fn add_surface(&mut self, surface: Box<dyn Intersectable>) {
        self.surfaces.push(surface);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }

    /// Nearest hit along `ray` over all surfaces.
    ///
    /// Earlier surfaces win exact ties.
    pub fn nearest_intersection(&self, ray: &Ray) -> IntersectionResult<'_> {
        let mut closest = IntersectionResult::miss();
        for surface in &self.surfaces {
            let result = surface.intersect(ray);
            if result.t < closest.t {
                closest = result;
            }
        }
        closest
    }

    /// True if nothing lies strictly between `point` and the light.
    ///
    /// A blocker exactly at the light's position does not shadow it.
    pub fn is_light_visible(&self, point: DVec3, light: &Light) -> bool {
        let to_light = light.position - point;
        let direction = safe_normalize(to_light);

        // Parameter of the light along the shadow ray, from the first usable axis
        let t_light = (0..3)
            .find(|&axis| direction[axis] != 0.0)
            .map_or(0.0, |axis| to_light[axis] / direction[axis]);

        let blocker = self.nearest_intersection(&Ray::new(point, direction));
        t_light <= blocker.t
    }

    /// Lights that illuminate `point`.
    pub fn visible_lights(&self, point: DVec3) -> Vec<&Light> {
        self.lights
            .iter()
            .filter(|light| self.is_light_visible(point, light))
            .collect()
    }

    /// Blinn-Phong diffuse and specular contribution of one light.
    ///
    /// `viewer_dir` points from the hit towards the viewer. Returns black for
    /// the "no hit" sentinel.
    pub fn shade(&self, hit: &IntersectionResult<'_>, light: &Light, viewer_dir: DVec3) -> Color {
        let Some(material) = hit.material else {
            return Color::ZERO;
        };

        let n = safe_normalize(hit.normal);
        let l = safe_normalize(light.position - hit.p);
        let h = safe_normalize(l + safe_normalize(viewer_dir));
        let intensity = light.intensity();

        let diffuse = intensity * material.diffuse * n.dot(l).max(0.0);
        let specular = intensity * material.specular * h.dot(n).max(0.0).powf(material.hardness);
        diffuse + specular
    }

    /// Color seen along a camera ray.
    pub fn ray_color(&self, ray: &Ray, background: Color) -> Color {
        let hit = self.nearest_intersection(ray);
        let Some(material) = hit.material.filter(|_| hit.is_valid()) else {
            return background;
        };

        let viewer_dir = -ray.direction();
        let mut color = self.ambient * material.ambient;
        for light in self.visible_lights(hit.p) {
            color += self.shade(&hit, light, viewer_dir);
        }
        color
    }
}

/// Recursively build the intersectable for one described surface.
pub fn build_surface(surface: &Surface) -> BuildResult<Box<dyn Intersectable>> {
    let built: Box<dyn Intersectable> = match surface {
        Surface::Sphere {
            center,
            radius,
            material,
        } => Box::new(Sphere::try_new(*center, *radius, material.clone())?),
        Surface::Plane {
            normal,
            material,
            material2,
        } => {
            let plane = Plane::try_new(*normal, material.clone())?;
            match material2 {
                Some(material2) => Box::new(plane.with_checker(material2.clone())),
                None => Box::new(plane),
            }
        }
        Surface::Box { min, max, material } => {
            Box::new(AxisAlignedBox::try_new(*min, *max, material.clone())?)
        }
        Surface::Node(description) => {
            let mut node = SceneNode::try_new(description.matrix())?;
            if let Some(name) = &description.name {
                node = node.with_name(name.clone());
            }
            for child in &description.children {
                node.add_child(build_surface(child)?);
            }
            log::debug!(
                "Built node {} with {} children",
                node.name().unwrap_or("<anonymous>"),
                node.child_count()
            );
            Box::new(node)
        }
    };
    Ok(built)
}
