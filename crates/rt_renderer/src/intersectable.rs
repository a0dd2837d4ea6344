//! Intersectable trait and IntersectionResult for ray-object intersection.

use rt_core::Material;
use rt_math::{DVec3, Ray, EPS_DISTANCE};

/// Record of a ray-object intersection.
///
/// The default value is the "no hit" sentinel: infinite distance and no
/// material.
#[derive(Clone, Copy, Debug)]
pub struct IntersectionResult<'a> {
    /// Ray parameter of the hit
    pub t: f64,
    /// Point of intersection
    pub p: DVec3,
    /// Geometric outward normal at the hit
    pub normal: DVec3,
    /// Material at the intersection point
    pub material: Option<&'a Material>,
}

impl<'a> Default for IntersectionResult<'a> {
    fn default() -> Self {
        Self::miss()
    }
}

impl<'a> IntersectionResult<'a> {
    /// The "no hit" sentinel.
    pub fn miss() -> Self {
        Self {
            t: f64::INFINITY,
            p: DVec3::ZERO,
            normal: DVec3::ZERO,
            material: None,
        }
    }

    /// Build a hit at parameter `t` along `ray`.
    pub fn hit(ray: &Ray, t: f64, normal: DVec3, material: &'a Material) -> Self {
        Self {
            t,
            p: ray.at(t),
            normal,
            material: Some(material),
        }
    }

    /// True if this result is an actual hit in front of the ray origin.
    pub fn is_valid(&self) -> bool {
        EPS_DISTANCE < self.t && self.t < f64::INFINITY
    }
}

/// Trait for objects that can be intersected by rays.
pub trait Intersectable: Send + Sync {
    /// Nearest intersection of `ray` with this object, or the sentinel.
    fn intersect<'a>(&'a self, ray: &Ray) -> IntersectionResult<'a>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sentinel() {
        let result = IntersectionResult::default();
        assert!(!result.is_valid());
        assert_eq!(result.t, f64::INFINITY);
        assert!(result.material.is_none());
    }

    #[test]
    fn test_validity_bounds() {
        let material = Material::default();
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);

        assert!(IntersectionResult::hit(&ray, 1.0, DVec3::Z, &material).is_valid());
        assert!(!IntersectionResult::hit(&ray, EPS_DISTANCE, DVec3::Z, &material).is_valid());
        assert!(!IntersectionResult::hit(&ray, -1.0, DVec3::Z, &material).is_valid());
    }

    #[test]
    fn test_hit_point_follows_ray() {
        let material = Material::default();
        let ray = Ray::new(DVec3::new(1.0, 0.0, 0.0), DVec3::new(0.0, 2.0, 0.0));
        let result = IntersectionResult::hit(&ray, 1.5, DVec3::Y, &material);

        assert_eq!(result.p, DVec3::new(1.0, 3.0, 0.0));
    }
}
