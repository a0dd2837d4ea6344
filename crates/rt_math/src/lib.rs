// Re-export glam for convenience
pub use glam::*;

// RT math types
mod interval;
mod ray;
mod transform;

pub use interval::Interval;
pub use ray::Ray;
pub use transform::{safe_normalize, DMat4Ext, TransformParams};

/// Distance below which a ray parameter is treated as zero.
///
/// Hits closer than this to the ray origin are discarded so a ray leaving a
/// surface never re-hits that surface at t≈0.
pub const EPS_DISTANCE: f64 = 1e-9;

/// RGB color, components nominally in [0, 1].
pub type Color = DVec3;
