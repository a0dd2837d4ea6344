//! Axis-aligned box primitive.
//!
//! The box is intersected as six bounded planes rather than with the slab
//! method, so every hit carries the normal of the face it landed on.

use std::sync::Arc;

use crate::{BuildError, BuildResult, Intersectable, IntersectionResult};
use rt_core::Material;
use rt_math::{DVec3, Interval, Ray, EPS_DISTANCE};

/// Face normals in tie-break order.
const FACES: [DVec3; 6] = [
    DVec3::X,
    DVec3::NEG_X,
    DVec3::Y,
    DVec3::NEG_Y,
    DVec3::Z,
    DVec3::NEG_Z,
];

/// A solid box spanning `min..=max`.
pub struct AxisAlignedBox {
    min: DVec3,
    max: DVec3,
    material: Arc<Material>,
}

impl AxisAlignedBox {
    /// Create a new box.
    ///
    /// # Panics
    /// If any component of `min` exceeds the matching component of `max`.
    pub fn new(min: DVec3, max: DVec3, material: Arc<Material>) -> Self {
        assert!(min.cmple(max).all(), "box min must not exceed max");
        Self { min, max, material }
    }

    /// Create a new box, rejecting inverted corners.
    pub fn try_new(min: DVec3, max: DVec3, material: Arc<Material>) -> BuildResult<Self> {
        if !min.cmple(max).all() {
            return Err(BuildError::InvalidBox { min, max });
        }
        Ok(Self::new(min, max, material))
    }

    pub fn min(&self) -> DVec3 {
        self.min
    }

    pub fn max(&self) -> DVec3 {
        self.max
    }

    fn axis_interval(&self, axis: usize) -> Interval {
        Interval::new(self.min[axis], self.max[axis])
    }

    /// Offset `d` of face `i` in `n·p = d`.
    fn face_offset(&self, face: usize) -> f64 {
        let axis = face / 2;
        if face % 2 == 0 {
            self.max[axis]
        } else {
            -self.min[axis]
        }
    }

    /// True if the ray travels inside the plane of one of the faces.
    fn grazes_face(&self, ray: &Ray) -> bool {
        let origin = ray.origin();
        let direction = ray.direction();
        (0..3).any(|axis| {
            direction[axis] == 0.0
                && ((origin[axis] - self.min[axis]).abs() <= EPS_DISTANCE
                    || (origin[axis] - self.max[axis]).abs() <= EPS_DISTANCE)
        })
    }
}

impl Intersectable for AxisAlignedBox {
    fn intersect<'a>(&'a self, ray: &Ray) -> IntersectionResult<'a> {
        if self.grazes_face(ray) {
            return IntersectionResult::miss();
        }

        let mut closest: Option<(f64, DVec3)> = None;

        for (face, normal) in FACES.iter().enumerate() {
            let denom = normal.dot(ray.direction());
            if denom == 0.0 {
                continue;
            }

            let t = (self.face_offset(face) - normal.dot(ray.origin())) / denom;
            if t <= EPS_DISTANCE {
                continue;
            }
            if matches!(closest, Some((best, _)) if t >= best) {
                continue;
            }

            let p = ray.at(t);
            let axis = face / 2;
            let inside = (0..3)
                .filter(|&other| other != axis)
                .all(|other| self.axis_interval(other).pad(EPS_DISTANCE).contains(p[other]));

            if inside {
                closest = Some((t, *normal));
            }
        }

        match closest {
            Some((t, normal)) => IntersectionResult::hit(ray, t, normal, &self.material),
            None => IntersectionResult::miss(),
        }
    }
}
