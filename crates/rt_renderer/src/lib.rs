//! RT Renderer - Whitted-style CPU ray tracing
//!
//! Spheres, planes, boxes and transform nodes shaded with Blinn-Phong and
//! hard shadows from point lights. One primary ray per pixel.

mod error;
mod intersectable;
mod sphere;
mod plane;
mod axis_box;
mod scene_node;
mod scene;
mod camera;
mod renderer;
mod bucket;

pub use error::{BuildError, BuildResult};
pub use intersectable::{Intersectable, IntersectionResult};
pub use sphere::Sphere;
pub use plane::Plane;
pub use axis_box::AxisAlignedBox;
pub use scene_node::SceneNode;
pub use scene::{build_surface, Scene};
pub use camera::Camera;
pub use renderer::{channel_to_u8, color_to_rgb, render, render_pixel, ImageBuffer, RenderConfig};
pub use bucket::{
    generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};

/// Re-export common math types from rt_math
pub use rt_math::{Color, DVec3, Interval, Ray, EPS_DISTANCE};
