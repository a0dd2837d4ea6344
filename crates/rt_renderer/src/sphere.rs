//! Sphere primitive for ray tracing.

use std::sync::Arc;

use crate::{BuildError, BuildResult, Intersectable, IntersectionResult};
use rt_core::Material;
use rt_math::{DVec3, Ray, EPS_DISTANCE};

/// A sphere primitive.
pub struct Sphere {
    center: DVec3,
    radius: f64,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// # Panics
    /// If `radius` is not positive and finite, or `center` is not finite.
    pub fn new(center: DVec3, radius: f64, material: Arc<Material>) -> Self {
        assert!(
            radius > 0.0 && radius.is_finite(),
            "sphere radius must be positive and finite"
        );
        assert!(center.is_finite(), "sphere center must be finite");
        Self {
            center,
            radius,
            material,
        }
    }

    /// Create a new sphere, rejecting invalid radii and centers.
    pub fn try_new(center: DVec3, radius: f64, material: Arc<Material>) -> BuildResult<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(BuildError::InvalidRadius(radius));
        }
        if !center.is_finite() {
            return Err(BuildError::NonFiniteCenter(center));
        }
        Ok(Self::new(center, radius, material))
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Intersectable for Sphere {
    fn intersect<'a>(&'a self, ray: &Ray) -> IntersectionResult<'a> {
        let v = ray.direction();
        let p0pc = ray.origin() - self.center;

        let a = v.dot(v);
        let b = 2.0 * v.dot(p0pc);
        let c = p0pc.dot(p0pc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 || a == 0.0 {
            return IntersectionResult::miss();
        }

        let sqrtd = discriminant.sqrt();
        let t1 = (-b - sqrtd) / (2.0 * a);
        let t2 = (-b + sqrtd) / (2.0 * a);

        // From outside, prefer the root nearer the origin unless it coincides
        // with the origin. From inside or on the surface, only the exit root
        // can lie ahead.
        let outside = c > 0.0;
        let t = if outside {
            let (near, far) = if t1.abs() <= t2.abs() { (t1, t2) } else { (t2, t1) };
            if (near * v).length() > EPS_DISTANCE {
                near
            } else {
                far
            }
        } else {
            t2
        };

        if t <= EPS_DISTANCE {
            return IntersectionResult::miss();
        }

        let p = ray.at(t);
        let normal = (p - self.center).normalize();
        IntersectionResult::hit(ray, t, normal, &self.material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_sphere() -> Sphere {
        Sphere::new(DVec3::ZERO, 1.0, Arc::new(Material::default()))
    }

    #[test]
    fn test_sphere_hit_front() {
        let sphere = unit_sphere();
        let ray = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::new(0.0, 0.0, -1.0));

        let hit = sphere.intersect(&ray);

        assert!(hit.is_valid());
        assert_abs_diff_eq!(hit.t, 9.0, epsilon = 1e-12);
        assert!(hit.p.abs_diff_eq(DVec3::new(0.0, 0.0, 1.0), 1e-12));
        assert!(hit.normal.abs_diff_eq(DVec3::Z, 1e-12));
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere();

        // Passes beside the sphere
        let ray = Ray::new(DVec3::new(2.0, 0.0, 10.0), DVec3::new(0.0, 0.0, -1.0));
        assert!(!sphere.intersect(&ray).is_valid());

        // Points away from the sphere
        let ray = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::Z);
        assert!(!sphere.intersect(&ray).is_valid());
    }

    #[test]
    fn test_origin_on_surface_pointing_out() {
        let sphere = unit_sphere();
        let ray = Ray::new(DVec3::new(0.0, 0.0, 1.0), DVec3::Z);

        assert!(!sphere.intersect(&ray).is_valid());
    }

    #[test]
    fn test_origin_on_surface_pointing_in() {
        let sphere = unit_sphere();
        let ray = Ray::new(DVec3::new(0.0, 0.0, 1.0), DVec3::new(0.0, 0.0, -1.0));

        let hit = sphere.intersect(&ray);

        assert!(hit.is_valid());
        assert_abs_diff_eq!(hit.t, 2.0, epsilon = 1e-12);
        assert!(hit.normal.abs_diff_eq(DVec3::new(0.0, 0.0, -1.0), 1e-12));
    }

    #[test]
    fn test_origin_inside_returns_exit() {
        let sphere = unit_sphere();

        let hit = sphere.intersect(&Ray::new(DVec3::ZERO, DVec3::X));
        assert!(hit.is_valid());
        assert_abs_diff_eq!(hit.t, 1.0, epsilon = 1e-12);
        assert!(hit.normal.abs_diff_eq(DVec3::X, 1e-12));

        // Off-center origin still finds the exit ahead of it
        let origin = DVec3::new(0.0, 0.5, 0.0);
        let hit = sphere.intersect(&Ray::new(origin, DVec3::Y));
        assert!(hit.is_valid());
        assert_abs_diff_eq!(hit.t, 0.5, epsilon = 1e-12);
        assert!(hit.normal.dot(DVec3::Y) > 0.0);

        let hit = sphere.intersect(&Ray::new(origin, DVec3::new(0.0, -1.0, 0.0)));
        assert_abs_diff_eq!(hit.t, 1.5, epsilon = 1e-12);
        assert!(hit.p.abs_diff_eq(DVec3::new(0.0, -1.0, 0.0), 1e-12));
    }

    #[test]
    fn test_unnormalized_direction_scales_t() {
        let sphere = unit_sphere();
        let ray = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::new(0.0, 0.0, -2.0));

        let hit = sphere.intersect(&ray);

        assert_abs_diff_eq!(hit.t, 4.5, epsilon = 1e-12);
        assert!(hit.p.abs_diff_eq(DVec3::new(0.0, 0.0, 1.0), 1e-12));
    }

    #[test]
    fn test_material_reference() {
        let material = Arc::new(Material::default().with_name("shiny"));
        let sphere = Sphere::new(DVec3::ZERO, 1.0, material);
        let ray = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::new(0.0, 0.0, -1.0));

        let hit = sphere.intersect(&ray);

        assert_eq!(hit.material.and_then(|m| m.name.as_deref()), Some("shiny"));
    }

    #[test]
    fn test_try_new_rejects_bad_radius() {
        let material = Arc::new(Material::default());
        assert!(matches!(
            Sphere::try_new(DVec3::ZERO, 0.0, material.clone()),
            Err(BuildError::InvalidRadius(_))
        ));
        assert!(Sphere::try_new(DVec3::ZERO, f64::NAN, material.clone()).is_err());
        assert!(Sphere::try_new(DVec3::ZERO, 2.0, material).is_ok());
    }

    #[test]
    fn test_try_new_rejects_non_finite_center() {
        let material = Arc::new(Material::default());
        let center = DVec3::new(0.0, f64::NAN, 0.0);
        assert!(matches!(
            Sphere::try_new(center, 1.0, material.clone()),
            Err(BuildError::NonFiniteCenter(_))
        ));
        assert!(Sphere::try_new(DVec3::new(f64::INFINITY, 0.0, 0.0), 1.0, material).is_err());
    }

    #[test]
    #[should_panic(expected = "sphere center must be finite")]
    fn test_new_panics_on_nan_center() {
        Sphere::new(DVec3::splat(f64::NAN), 1.0, Arc::new(Material::default()));
    }
}
