//! JSON scene loading.
//!
//! Scene files are plain serde JSON documents mirroring [`Scene`]. Loading
//! validates material handles up front so renderers can index the material
//! table without bounds failures.

use std::path::Path;

use thiserror::Error;

use crate::scene::Scene;

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Material handle {handle} out of range ({count} materials)")]
    InvalidMaterial { handle: usize, count: usize },

    #[error("Image size must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}

/// Result type for loading operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Load a scene from a JSON file.
///
/// The scene name defaults to the file stem when the document has none.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<Scene> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let mut scene = load_scene_from_str(&text)?;

    if scene.name.is_empty() {
        scene.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string();
    }

    log::info!(
        "Loaded scene '{}' from {}: {} objects, {} lights, {} materials",
        scene.name,
        path.display(),
        scene.object_count(),
        scene.area_lights.len(),
        scene.materials.len()
    );

    Ok(scene)
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_from_str(text: &str) -> SceneResult<Scene> {
    let scene: Scene = serde_json::from_str(text)?;
    validate(&scene)?;
    Ok(scene)
}

/// Check the invariants the renderer relies on.
pub fn validate(scene: &Scene) -> SceneResult<()> {
    validate_materials(scene)?;

    let settings = &scene.render;
    if settings.width == 0 || settings.height == 0 {
        return Err(SceneError::EmptyImage {
            width: settings.width,
            height: settings.height,
        });
    }

    Ok(())
}

/// Check that every primitive references an existing material.
pub fn validate_materials(scene: &Scene) -> SceneResult<()> {
    let count = scene.materials.len();
    match scene.material_handles().find(|h| h.index() >= count) {
        Some(bad) => Err(SceneError::InvalidMaterial {
            handle: bad.index(),
            count,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::Vec3;

    const SPHERE_SCENE: &str = r#"{
        "camera": { "position": [0, 0, 4], "look_at": [0, 0, 0], "vfov": 40 },
        "materials": [
            { "name": "white", "type": "lambertian",
              "properties": { "diffuseColor": { "rgb": [1, 1, 1] } } }
        ],
        "spheres": [ { "center": [0, 0, 0], "radius": 1, "material": 0 } ],
        "area_lights": [
            { "position": [-1, 3, -1], "u": [2, 0, 0], "v": [0, 0, 2], "radiance": [1, 1, 1] }
        ],
        "render": { "width": 32, "height": 24, "samples": 8 }
    }"#;

    #[test]
    fn test_load_sphere_scene() {
        let _ = env_logger::builder().is_test(true).try_init();

        let scene = load_scene_from_str(SPHERE_SCENE).unwrap();
        assert_eq!(scene.spheres.len(), 1);
        assert_eq!(scene.area_lights.len(), 1);
        assert_eq!(scene.area_lights[0].radiance, Vec3::ONE);
        assert_eq!(scene.render.width, 32);
        assert_eq!(scene.render.samples, 8);
        // Unspecified settings keep their defaults
        assert_eq!(scene.render.max_depth, 64);
        assert_eq!(scene.camera.up, Vec3::Y);
    }

    #[test]
    fn test_invalid_material_handle() {
        let json = r#"{
            "camera": { "position": [0, 0, 4], "look_at": [0, 0, 0] },
            "spheres": [ { "center": [0, 0, 0], "radius": 1, "material": 2 } ]
        }"#;
        match load_scene_from_str(json) {
            Err(SceneError::InvalidMaterial { handle, count }) => {
                assert_eq!(handle, 2);
                assert_eq!(count, 0);
            }
            other => panic!("expected InvalidMaterial, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_sized_image_rejected() {
        let json = r#"{
            "camera": { "position": [0, 0, 4], "look_at": [0, 0, 0] },
            "render": { "width": 0 }
        }"#;
        assert!(matches!(
            load_scene_from_str(json),
            Err(SceneError::EmptyImage { width: 0, .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            load_scene_from_str("{ not json"),
            Err(SceneError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_scene("/nonexistent/scene.json"),
            Err(SceneError::Io(_))
        ));
    }

    #[test]
    fn test_bundled_scenes_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scenes");

        let sphere = load_scene(dir.join("sphere.json")).unwrap();
        assert_eq!(sphere.name, "sphere");
        assert_eq!(sphere.object_count(), 1);

        let boxed = load_scene(dir.join("box.json")).unwrap();
        assert_eq!(boxed.planes.len(), 5);
        assert_eq!(boxed.materials.len(), 3);
        assert_eq!(boxed.materials[1].kind, "lambertian");
        assert_eq!(boxed.render.samples, 64);
    }
}
