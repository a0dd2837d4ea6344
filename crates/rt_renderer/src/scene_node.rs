//! Transform node for hierarchical scenes.
//!
//! A node owns its children in local space. Rays are mapped into local space
//! with the inverse transform, tested against every child, and the nearest hit
//! is mapped back. The ray parameter is left untouched, so `t` from a node is
//! directly comparable with `t` from a world-space primitive.

use crate::{BuildError, BuildResult, Intersectable, IntersectionResult};
use rt_math::{DMat3, DMat4, DMat4Ext, Ray, EPS_DISTANCE};

/// A group of intersectables placed by an affine transform.
pub struct SceneNode {
    name: Option<String>,

    /// Local-to-parent transform
    transform: DMat4,

    /// Parent-to-local transform (for ray transformation)
    inv_transform: DMat4,

    /// Inverse-transpose of the upper 3x3 block, for normals
    normal_matrix: DMat3,

    children: Vec<Box<dyn Intersectable>>,
}

impl SceneNode {
    /// Create an empty node.
    ///
    /// # Panics
    /// If `transform` is not invertible.
    pub fn new(transform: DMat4) -> Self {
        assert!(transform.is_invertible(), "node transform must be invertible");
        let inv_transform = transform.inverse();

        Self {
            name: None,
            transform,
            inv_transform,
            normal_matrix: transform.normal_matrix(),
            children: Vec::new(),
        }
    }

    /// Create an empty node, rejecting singular transforms.
    pub fn try_new(transform: DMat4) -> BuildResult<Self> {
        if !transform.is_invertible() {
            return Err(BuildError::SingularTransform);
        }
        Ok(Self::new(transform))
    }

    /// Set the node name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Append a child in this node's local space.
    pub fn add_child(&mut self, child: Box<dyn Intersectable>) {
        self.children.push(child);
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn transform(&self) -> DMat4 {
        self.transform
    }

    pub fn inverse_transform(&self) -> DMat4 {
        self.inv_transform
    }
}

impl Intersectable for SceneNode {
    fn intersect<'a>(&'a self, ray: &Ray) -> IntersectionResult<'a> {
        // Transform ray to local space; the direction is not renormalized
        let local_origin = self.inv_transform.transform_point3(ray.origin());
        let local_direction =
            self.inv_transform.transform_point3(ray.origin() + ray.direction()) - local_origin;
        let local_ray = Ray::new(local_origin, local_direction);

        let mut closest = IntersectionResult::miss();
        for child in &self.children {
            let result = child.intersect(&local_ray);
            if result.t > EPS_DISTANCE && result.t < closest.t {
                closest = result;
            }
        }

        if !closest.is_valid() {
            return IntersectionResult::miss();
        }

        // Transform hit back to parent space
        closest.p = self.transform.transform_point3(closest.p);
        closest.normal = (self.normal_matrix * closest.normal).normalize();
        closest
    }
}
