// Transform utilities for DMat4
//
// Extends glam::DMat4 with the pieces a hierarchical ray tracer needs on top
// of transform_point3()/inverse(): normal matrices and an invertibility check.

use glam::{DMat3, DMat4, DVec3};

/// Extension trait for DMat4 to provide additional transform utilities
pub trait DMat4Ext {
    /// Matrix that maps surface normals through this transform.
    ///
    /// This is the transpose of the inverse of the upper 3x3 block, which keeps
    /// normals perpendicular to surfaces under non-uniform scale.
    fn normal_matrix(&self) -> DMat3;

    /// True if the matrix has finite entries and a usable inverse.
    fn is_invertible(&self) -> bool;
}

impl DMat4Ext for DMat4 {
    fn normal_matrix(&self) -> DMat3 {
        DMat3::from_mat4(self.inverse()).transpose()
    }

    fn is_invertible(&self) -> bool {
        let det = self.determinant();
        self.is_finite() && det.is_finite() && det.abs() > f64::EPSILON
    }
}

/// Normalize a vector, leaving vectors of (near) zero length untouched.
pub fn safe_normalize(v: DVec3) -> DVec3 {
    let len = v.length();
    if len > 1e-12 {
        v / len
    } else {
        v
    }
}

/// Translation, rotation and scale of a scene node.
///
/// Rotation angles are in degrees about the X, Y and Z axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParams {
    pub translation: DVec3,
    pub rotation: DVec3,
    pub scale: DVec3,
}

impl TransformParams {
    /// Compose the node matrix: `T * Rx * Ry * Rz * S`.
    pub fn matrix(&self) -> DMat4 {
        DMat4::from_translation(self.translation)
            * DMat4::from_rotation_x(self.rotation.x.to_radians())
            * DMat4::from_rotation_y(self.rotation.y.to_radians())
            * DMat4::from_rotation_z(self.rotation.z.to_radians())
            * DMat4::from_scale(self.scale)
    }
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            translation: DVec3::ZERO,
            rotation: DVec3::ZERO,
            scale: DVec3::ONE,
        }
    }
}
