//! Pinhole camera for primary ray generation.

use crate::{BuildError, BuildResult};
use rt_core::CameraSettings;
use rt_math::{DVec3, Ray};

/// Camera for generating rays into the scene.
#[derive(Clone, Debug)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    look_from: DVec3,
    look_at: DVec3,
    vup: DVec3,

    // Lens settings
    fov: f64,  // Field of view in degrees
    near: f64, // Distance to the image plane

    // Cached computed values (set by initialize())
    right: f64,
    top: f64,
    u: DVec3,
    v: DVec3,
    w: DVec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 400,
            image_height: 400,
            look_from: DVec3::new(0.0, 0.0, 8.0),
            look_at: DVec3::ZERO,
            vup: DVec3::Y,
            fov: 45.0,
            near: 1.0,
            right: 0.0,
            top: 0.0,
            u: DVec3::X,
            v: DVec3::Y,
            w: DVec3::NEG_Z,
        }
    }

    /// Create an initialized camera from scene file settings.
    pub fn from_settings(settings: &CameraSettings) -> BuildResult<Self> {
        let mut camera = Self::new()
            .with_resolution(settings.width, settings.height)
            .with_position(settings.from, settings.to, settings.up)
            .with_lens(settings.fov, settings.near);
        camera.initialize()?;
        Ok(camera)
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: DVec3, look_at: DVec3, vup: DVec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, fov: f64, near: f64) -> Self {
        self.fov = fov;
        self.near = near;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) -> BuildResult<()> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(BuildError::InvalidResolution {
                width: self.image_width,
                height: self.image_height,
            });
        }

        let aspect = self.image_width as f64 / self.image_height as f64;
        self.top = self.near * (self.fov.to_radians() / 2.0).tan();
        self.right = self.top * aspect;

        // Calculate camera basis vectors; w looks into the scene
        self.w = (self.look_at - self.look_from)
            .try_normalize()
            .ok_or(BuildError::DegenerateCamera)?;
        self.u = self
            .w
            .cross(self.vup)
            .try_normalize()
            .ok_or(BuildError::DegenerateCamera)?;
        self.v = self.u.cross(self.w).normalize();

        log::debug!(
            "Camera at {} looking at {}, image plane {:.3}x{:.3}",
            self.look_from,
            self.look_at,
            2.0 * self.right,
            2.0 * self.top
        );
        Ok(())
    }

    /// Generate the primary ray through pixel (`col`, `row`).
    ///
    /// Rows count down from the top of the image. The direction is unit
    /// length, so hit distances are in world units.
    pub fn create_ray(&self, row: u32, col: u32) -> Ray {
        let cx = col as f64 * (2.0 * self.right) / self.image_width as f64 - self.right;
        let cy = -(row as f64) * (2.0 * self.top) / self.image_height as f64 + self.top;
        let direction = (cx * self.u + cy * self.v + self.near * self.w).normalize();

        Ray::new(self.look_from, direction)
    }

    pub fn look_from(&self) -> DVec3 {
        self.look_from
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn initialized(width: u32, height: u32) -> Camera {
        let mut camera = Camera::new()
            .with_resolution(width, height)
            .with_position(DVec3::new(0.0, 0.0, 8.0), DVec3::ZERO, DVec3::Y)
            .with_lens(90.0, 1.0);
        camera.initialize().unwrap();
        camera
    }

    #[test]
    fn test_camera_initialize() {
        let camera = initialized(200, 100);

        assert!(camera.w.abs_diff_eq(DVec3::NEG_Z, 1e-12));
        assert!(camera.u.abs_diff_eq(DVec3::X, 1e-12));
        assert!(camera.v.abs_diff_eq(DVec3::Y, 1e-12));
        assert_abs_diff_eq!(camera.top, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(camera.right, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_center_ray() {
        let camera = initialized(100, 100);
        let ray = camera.create_ray(50, 50);

        assert_eq!(ray.origin(), DVec3::new(0.0, 0.0, 8.0));
        assert!(ray.direction().abs_diff_eq(DVec3::NEG_Z, 1e-12));
    }

    #[test]
    fn test_corner_rays() {
        let camera = initialized(100, 100);

        // Top-left pixel points up and to the left at 45 degrees
        let ray = camera.create_ray(0, 0);
        let expected = DVec3::new(-1.0, 1.0, -1.0).normalize();
        assert!(ray.direction().abs_diff_eq(expected, 1e-12));

        // Rows go down, columns go right
        let ray = camera.create_ray(75, 75);
        assert!(ray.direction().x > 0.0);
        assert!(ray.direction().y < 0.0);
        assert_abs_diff_eq!(ray.direction().length(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_from_settings() {
        let settings = CameraSettings {
            from: DVec3::new(0.0, 0.0, 4.0),
            width: 160,
            height: 120,
            ..Default::default()
        };
        let camera = Camera::from_settings(&settings).unwrap();

        assert_eq!(camera.image_width, 160);
        assert_eq!(camera.look_from(), settings.from);
        assert!(camera.create_ray(60, 80).direction().abs_diff_eq(DVec3::NEG_Z, 1e-12));
    }

    #[test]
    fn test_degenerate_camera() {
        let mut camera = Camera::new().with_position(DVec3::new(0.0, 5.0, 0.0), DVec3::ZERO, DVec3::Y);
        assert_eq!(camera.initialize(), Err(BuildError::DegenerateCamera));

        let mut camera = Camera::new().with_position(DVec3::ZERO, DVec3::ZERO, DVec3::Y);
        assert_eq!(camera.initialize(), Err(BuildError::DegenerateCamera));

        let mut camera = Camera::new().with_resolution(0, 10);
        assert!(matches!(
            camera.initialize(),
            Err(BuildError::InvalidResolution { width: 0, height: 10 })
        ));
    }
}
