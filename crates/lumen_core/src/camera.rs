//! Pinhole camera for primary ray generation.

use lumen_math::{Ray, Vec3};
use serde::{Deserialize, Serialize};

/// Camera for generating rays into the scene.
///
/// The serialized part is the placement and lens; the viewport basis is
/// derived by [`Camera::initialize`] once the image aspect ratio is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    // Camera positioning
    pub position: Vec3,
    pub look_at: Vec3,
    #[serde(default = "default_up")]
    pub up: Vec3,

    /// Vertical field of view in degrees
    #[serde(default = "default_vfov")]
    pub vfov: f64,

    // Cached computed values (set by initialize())
    #[serde(skip)]
    lower_left: Vec3,
    #[serde(skip)]
    horizontal: Vec3,
    #[serde(skip)]
    vertical: Vec3,
}

fn default_up() -> Vec3 {
    Vec3::Y
}

fn default_vfov() -> f64 {
    40.0
}

impl Camera {
    /// Create a camera at `position` looking at `look_at` with +Y up.
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self {
            position,
            look_at,
            up: default_up(),
            vfov: default_vfov(),
            lower_left: Vec3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
        }
    }

    /// Set the vertical field of view in degrees.
    pub fn with_vfov(mut self, vfov: f64) -> Self {
        self.vfov = vfov;
        self
    }

    /// Set the up vector.
    pub fn with_up(mut self, up: Vec3) -> Self {
        self.up = up;
        self
    }

    /// Initialize the viewport for an image of the given aspect ratio
    /// (must be called before generating rays).
    pub fn initialize(&mut self, aspect: f64) {
        let h = (self.vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = viewport_height * aspect;

        // Camera basis vectors
        let w = (self.position - self.look_at).normalize();
        let u = self.up.cross(w).normalize();
        let v = w.cross(u);

        self.horizontal = viewport_width * u;
        self.vertical = viewport_height * v;
        self.lower_left = self.position - w - self.horizontal / 2.0 - self.vertical / 2.0;
    }

    /// Return an initialized copy for a `width` x `height` image.
    pub fn fitted(&self, width: u32, height: u32) -> Self {
        let mut camera = self.clone();
        camera.initialize(width as f64 / height.max(1) as f64);
        camera
    }

    /// Shoot a ray through normalized image-plane coordinates.
    ///
    /// `u` runs left to right and `v` bottom to top, both in [0, 1].
    pub fn shoot(&self, u: f64, v: f64) -> Ray {
        let target = self.lower_left + u * self.horizontal + v * self.vertical;
        Ray::new(self.position, (target - self.position).normalize())
    }
}
