//! Scene types for Lumen.
//!
//! A scene is a flat, read-only set of primitives, area lights and
//! materials plus a camera. Renderers share it across worker threads
//! for the duration of a render call.

use lumen_math::{Color, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::material::{Material, MaterialHandle};

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f64,
    pub material: MaterialHandle,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f64, material: MaterialHandle) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }
}

/// A triangle primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    pub material: MaterialHandle,
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: MaterialHandle) -> Self {
        Self { v0, v1, v2, material }
    }

    /// Geometric normal, following the winding v0 -> v1 -> v2.
    pub fn normal(&self) -> Vec3 {
        (self.v1 - self.v0).cross(self.v2 - self.v0).normalize()
    }
}

/// A bounded plane: the parallelogram `position + s*u + t*v`, `s, t` in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub position: Vec3,
    pub u: Vec3,
    pub v: Vec3,
    pub material: MaterialHandle,
}

impl Plane {
    pub fn new(position: Vec3, u: Vec3, v: Vec3, material: MaterialHandle) -> Self {
        Self { position, u, v, material }
    }

    pub fn normal(&self) -> Vec3 {
        self.u.cross(self.v).normalize()
    }
}

/// A parallelogram area light with constant radiance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaLight {
    pub position: Vec3,
    pub u: Vec3,
    pub v: Vec3,
    pub radiance: Color,
}

impl AreaLight {
    pub fn new(position: Vec3, u: Vec3, v: Vec3, radiance: Color) -> Self {
        Self { position, u, v, radiance }
    }

    /// Normal of the light's supporting plane, `normalize(u x v)`.
    pub fn normal(&self) -> Vec3 {
        self.u.cross(self.v).normalize()
    }

    /// Point at parallelogram coordinates `(s, t)`.
    pub fn point(&self, s: f64, t: f64) -> Vec3 {
        self.position + self.u * s + self.v * t
    }
}

/// Per-scene render defaults, overridable by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub samples: u32,
    pub max_depth: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            samples: 16,
            max_depth: 64,
        }
    }
}

/// A complete scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (usually from filename)
    #[serde(default)]
    pub name: String,

    pub camera: Camera,

    #[serde(default)]
    pub spheres: Vec<Sphere>,
    #[serde(default)]
    pub triangles: Vec<Triangle>,
    #[serde(default)]
    pub planes: Vec<Plane>,
    #[serde(default)]
    pub area_lights: Vec<AreaLight>,
    #[serde(default)]
    pub materials: Vec<Material>,

    #[serde(default)]
    pub render: RenderSettings,
}

impl Scene {
    /// Create an empty scene viewed through `camera`.
    pub fn new(name: impl Into<String>, camera: Camera) -> Self {
        Self {
            name: name.into(),
            camera,
            spheres: Vec::new(),
            triangles: Vec::new(),
            planes: Vec::new(),
            area_lights: Vec::new(),
            materials: Vec::new(),
            render: RenderSettings::default(),
        }
    }

    /// Add a material to the scene and return its handle.
    pub fn add_material(&mut self, material: Material) -> MaterialHandle {
        let handle = MaterialHandle(self.materials.len());
        self.materials.push(material);
        handle
    }

    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn add_plane(&mut self, plane: Plane) {
        self.planes.push(plane);
    }

    pub fn add_area_light(&mut self, light: AreaLight) {
        self.area_lights.push(light);
    }

    /// Get a material by handle.
    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle.index())
    }

    /// Material handles referenced by every opaque primitive.
    pub fn material_handles(&self) -> impl Iterator<Item = MaterialHandle> + '_ {
        self.spheres
            .iter()
            .map(|s| s.material)
            .chain(self.triangles.iter().map(|t| t.material))
            .chain(self.planes.iter().map(|p| p.material))
    }

    /// Total number of opaque primitives.
    pub fn object_count(&self) -> usize {
        self.spheres.len() + self.triangles.len() + self.planes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_scene() -> Scene {
        Scene::new("test", Camera::new(Vec3::new(0.0, 0.0, 4.0), Vec3::ZERO))
    }

    #[test]
    fn test_scene_creation() {
        let mut scene = test_scene();
        let white = scene.add_material(Material::lambertian("white", Vec3::ONE));
        assert_eq!(white, MaterialHandle(0));

        scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0, white));
        scene.add_plane(Plane::new(Vec3::ZERO, Vec3::X, Vec3::Z, white));
        scene.add_area_light(AreaLight::new(
            Vec3::new(-1.0, 3.0, -1.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
            Color::ONE,
        ));

        assert_eq!(scene.object_count(), 2);
        assert_eq!(scene.material_handles().count(), 2);
        assert!(scene.material(white).is_some());
        assert!(scene.material(MaterialHandle(3)).is_none());
    }

    #[test]
    fn test_area_light_geometry() {
        let light = AreaLight::new(
            Vec3::new(-1.0, 3.0, -1.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
            Color::ONE,
        );
        // x cross z = -y: this light faces down
        assert_eq!(light.normal(), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(light.point(0.5, 0.5), Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn test_negative_radius_clamped() {
        let s = Sphere::new(Vec3::ZERO, -2.0, MaterialHandle(0));
        assert_eq!(s.radius, 0.0);
    }
}
