//! Errors raised while building renderable objects.

use rt_math::DVec3;
use thiserror::Error;

/// Errors that can occur when constructing primitives, nodes or cameras.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("Sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("Sphere center must be finite, got {0}")]
    NonFiniteCenter(DVec3),

    #[error("Plane normal must be non-zero")]
    ZeroNormal,

    #[error("Box min {min} must not exceed max {max}")]
    InvalidBox { min: DVec3, max: DVec3 },

    #[error("Node transform is not invertible")]
    SingularTransform,

    #[error("Camera up vector is parallel to the view direction")]
    DegenerateCamera,

    #[error("Image resolution must be non-zero, got {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },
}

/// Result type for build operations.
pub type BuildResult<T> = Result<T, BuildError>;
