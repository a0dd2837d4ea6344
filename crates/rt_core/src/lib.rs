//! RT Core - Scene description and scene file loading.
//!
//! This crate provides:
//!
//! - **Scene types**: `SceneDescription`, `Surface`, `Material`, `Light`
//! - **Scene files**: XML parsing and scene loading
//!
//! # Example
//!
//! ```ignore
//! use rt_core::scene_file::load_scene;
//!
//! let scene = load_scene("scenes/boxes.xml")?;
//! println!("Loaded {} primitives, {} lights",
//!     scene.primitive_count(),
//!     scene.light_count());
//! ```

pub mod scene;
pub mod scene_file;

// Re-export commonly used types
pub use scene::{
    CameraSettings, Light, LightKind, Material, NodeDescription, RenderSettings,
    SceneDescription, Surface,
};
pub use scene_file::{load_scene, load_scene_from_str, LoadError, LoadResult};
