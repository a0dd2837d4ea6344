//! Infinite plane through the origin, optionally checkered.

use std::sync::Arc;

use crate::{BuildError, BuildResult, Intersectable, IntersectionResult};
use rt_core::Material;
use rt_math::{DVec3, Ray, EPS_DISTANCE};

/// A plane `n·p = 0` with an optional second material.
///
/// With a second material the plane alternates between the two in unit
/// squares on the XZ grid.
pub struct Plane {
    normal: DVec3,
    material: Arc<Material>,
    material2: Option<Arc<Material>>,
}

impl Plane {
    /// Create a plane; the normal is normalized.
    ///
    /// # Panics
    /// If `normal` is zero or not finite.
    pub fn new(normal: DVec3, material: Arc<Material>) -> Self {
        let normal = normal.try_normalize().expect("plane normal must be non-zero");
        Self {
            normal,
            material,
            material2: None,
        }
    }

    /// Create a plane, rejecting a zero normal.
    pub fn try_new(normal: DVec3, material: Arc<Material>) -> BuildResult<Self> {
        if normal.try_normalize().is_none() {
            return Err(BuildError::ZeroNormal);
        }
        Ok(Self::new(normal, material))
    }

    /// Use `material2` for alternating checker squares.
    pub fn with_checker(mut self, material2: Arc<Material>) -> Self {
        self.material2 = Some(material2);
        self
    }

    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    fn material_at(&self, p: DVec3) -> &Material {
        match &self.material2 {
            Some(material2) if checker_parity(p.x) != checker_parity(p.z) => material2.as_ref(),
            _ => self.material.as_ref(),
        }
    }
}

fn checker_parity(coordinate: f64) -> f64 {
    coordinate.ceil().rem_euclid(2.0)
}

impl Intersectable for Plane {
    fn intersect<'a>(&'a self, ray: &Ray) -> IntersectionResult<'a> {
        let denom = self.normal.dot(ray.direction());
        if denom == 0.0 {
            return IntersectionResult::miss();
        }

        let t = -self.normal.dot(ray.origin()) / denom;
        if t <= EPS_DISTANCE {
            return IntersectionResult::miss();
        }

        let p = ray.at(t);
        IntersectionResult::hit(ray, t, self.normal, self.material_at(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn named(name: &str) -> Arc<Material> {
        Arc::new(Material::default().with_name(name))
    }

    fn hit_name(plane: &Plane, x: f64, z: f64) -> Option<String> {
        let ray = Ray::new(DVec3::new(x, 5.0, z), DVec3::new(0.0, -1.0, 0.0));
        let hit = plane.intersect(&ray);
        hit.material.and_then(|m| m.name.clone())
    }

    #[test]
    fn test_plane_hit() {
        let plane = Plane::new(DVec3::new(0.0, 3.0, 0.0), named("floor"));
        let ray = Ray::new(DVec3::new(1.0, 2.0, 3.0), DVec3::new(0.0, -1.0, 0.0));

        let hit = plane.intersect(&ray);

        assert!(hit.is_valid());
        assert_abs_diff_eq!(hit.t, 2.0, epsilon = 1e-12);
        assert!(hit.p.abs_diff_eq(DVec3::new(1.0, 0.0, 3.0), 1e-12));
        // Normal comes back normalized
        assert!(hit.normal.abs_diff_eq(DVec3::Y, 1e-12));
    }

    #[test]
    fn test_ray_in_plane_misses() {
        let plane = Plane::new(DVec3::Y, named("floor"));
        let ray = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::new(1.0, 0.0, -1.0));

        assert!(!plane.intersect(&ray).is_valid());
    }

    #[test]
    fn test_parallel_and_behind_miss() {
        let plane = Plane::new(DVec3::Y, named("floor"));

        let parallel = Ray::new(DVec3::new(0.0, 1.0, 0.0), DVec3::X);
        assert!(!plane.intersect(&parallel).is_valid());

        let away = Ray::new(DVec3::new(0.0, 1.0, 0.0), DVec3::Y);
        assert!(!plane.intersect(&away).is_valid());
    }

    #[test]
    fn test_hit_from_below() {
        let plane = Plane::new(DVec3::Y, named("floor"));
        let ray = Ray::new(DVec3::new(0.0, -4.0, 0.0), DVec3::Y);

        let hit = plane.intersect(&ray);

        assert_abs_diff_eq!(hit.t, 4.0, epsilon = 1e-12);
        // Geometric normal, not flipped towards the ray
        assert_eq!(hit.normal, DVec3::Y);
    }

    #[test]
    fn test_checker_pattern() {
        let plane = Plane::new(DVec3::Y, named("white")).with_checker(named("black"));

        assert_eq!(hit_name(&plane, 0.5, 0.5).as_deref(), Some("white"));
        assert_eq!(hit_name(&plane, 1.5, 0.5).as_deref(), Some("black"));
        assert_eq!(hit_name(&plane, 1.5, 1.5).as_deref(), Some("white"));
        assert_eq!(hit_name(&plane, 0.5, 1.5).as_deref(), Some("black"));
    }

    #[test]
    fn test_checker_negative_coordinates() {
        let plane = Plane::new(DVec3::Y, named("white")).with_checker(named("black"));

        // ceil(-0.5) = 0 and ceil(-1.5) = -1, whose parity is 1
        assert_eq!(hit_name(&plane, -0.5, 0.5).as_deref(), Some("black"));
        assert_eq!(hit_name(&plane, -1.5, 0.5).as_deref(), Some("white"));
        assert_eq!(hit_name(&plane, -1.5, -1.5).as_deref(), Some("white"));
    }

    #[test]
    fn test_without_checker_uses_primary() {
        let plane = Plane::new(DVec3::Y, named("white"));
        assert_eq!(hit_name(&plane, 1.5, 0.5).as_deref(), Some("white"));
    }

    #[test]
    fn test_try_new_rejects_zero_normal() {
        assert!(matches!(
            Plane::try_new(DVec3::ZERO, named("floor")),
            Err(BuildError::ZeroNormal)
        ));
    }
}
