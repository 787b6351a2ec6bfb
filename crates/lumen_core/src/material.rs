//! Materials and their property sets.
//!
//! A material is a named shading model plus a bag of typed properties.
//! Renderers look properties up by name when they build their shading
//! programs, and fall back to defaults when a property is missing.

use std::collections::HashMap;

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};

/// Index of a material in [`crate::Scene::materials`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialHandle(pub usize);

impl MaterialHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single material property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    Rgb(Vec3),
    Float(f64),
    Int(i64),
}

/// A material definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Material name (for logs)
    #[serde(default)]
    pub name: String,

    /// Shading model, e.g. `"lambertian"`
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,

    /// Named properties, e.g. `diffuseColor`
    #[serde(default)]
    pub properties: HashMap<String, Property>,
}

fn default_kind() -> String {
    String::from("lambertian")
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: default_kind(),
            properties: HashMap::new(),
        }
    }
}

impl Material {
    /// Create a Lambertian material with a diffuse color.
    pub fn lambertian(name: impl Into<String>, diffuse_color: Vec3) -> Self {
        Self::default()
            .with_name(name)
            .with_property("diffuseColor", Property::Rgb(diffuse_color))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: Property) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Look up an RGB property. Returns `None` if absent or of another type.
    pub fn rgb(&self, key: &str) -> Option<Vec3> {
        match self.properties.get(key) {
            Some(Property::Rgb(v)) => Some(*v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_lookup() {
        let m = Material::lambertian("red", Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(m.rgb("diffuseColor"), Some(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(m.rgb("missing"), None);
        assert_eq!(m.kind, "lambertian");
    }

    #[test]
    fn test_typed_lookup_mismatch() {
        let m = Material::default()
            .with_property("diffuseColor", Property::Float(0.5))
            .with_property("exponent", Property::Int(8));
        // Wrong type reads as absent
        assert_eq!(m.rgb("diffuseColor"), None);
        assert_eq!(m.properties.get("exponent"), Some(&Property::Int(8)));
    }

    #[test]
    fn test_material_json() {
        let json = r#"{
            "name": "white",
            "type": "lambertian",
            "properties": { "diffuseColor": { "rgb": [0.8, 0.8, 0.8] } }
        }"#;
        let m: Material = serde_json::from_str(json).unwrap();
        assert_eq!(m.name, "white");
        assert_eq!(m.rgb("diffuseColor"), Some(Vec3::splat(0.8)));
    }
}
