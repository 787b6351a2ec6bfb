//! Lumen Core - scene description for the Lumen path tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Sphere`, `Triangle`, `Plane`, `AreaLight`
//! - **Materials**: `Material` with a typed property set, addressed by `MaterialHandle`
//! - **Camera**: a pinhole camera exposing `shoot(u, v)`
//! - **Loading**: JSON scene files via serde
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::load_scene;
//!
//! let scene = load_scene("scenes/sphere.json")?;
//! println!("Loaded {} spheres, {} lights",
//!     scene.spheres.len(),
//!     scene.area_lights.len());
//! ```

pub mod camera;
pub mod loader;
pub mod material;
pub mod scene;

// Re-export commonly used types
pub use camera::Camera;
pub use loader::{
    load_scene, load_scene_from_str, validate, validate_materials, SceneError, SceneResult,
};
pub use material::{Material, MaterialHandle, Property};
pub use scene::{AreaLight, Plane, RenderSettings, Scene, Sphere, Triangle};
