//! Simple path tracer example.
//!
//! Renders a white sphere on a grey floor under one area light and saves
//! it as PNG.

use lumen_core::{AreaLight, Camera, Material, Plane, Scene, Sphere};
use lumen_renderer::{Color, EstimatorMode, RenderConfig, Renderer, Vec3};

fn main() {
    env_logger::init();

    println!("Lumen Path Tracer - Simple Example");
    println!("==================================");

    let scene = build_scene();
    println!("Created {} objects", scene.object_count());

    let config = RenderConfig {
        width: 400,
        height: 300,
        samples: 32,
        mode: EstimatorMode::Literal,
        ..Default::default()
    };

    println!(
        "Rendering {}x{} @ {} spp...",
        config.width, config.height, config.samples
    );

    let start = std::time::Instant::now();
    let renderer = Renderer::new(&scene, config);
    let image = renderer.render().expect("Failed to render");
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.png";
    image.save_png(filename).expect("Failed to save image");
    println!("Saved to {}", filename);

    renderer.release(image);
}

fn build_scene() -> Scene {
    let camera = Camera::new(Vec3::new(0.0, 1.5, 6.0), Vec3::new(0.0, 0.8, 0.0)).with_vfov(35.0);
    let mut scene = Scene::new("simple", camera);

    let grey = scene.add_material(Material::lambertian("floor", Color::new(0.5, 0.5, 0.5)));
    let white = scene.add_material(Material::lambertian("ball", Color::new(0.9, 0.9, 0.9)));
    let red = scene.add_material(Material::lambertian("red", Color::new(0.7, 0.15, 0.1)));

    // Ground
    scene.add_plane(Plane::new(
        Vec3::new(-10.0, 0.0, -10.0),
        Vec3::new(0.0, 0.0, 20.0),
        Vec3::new(20.0, 0.0, 0.0),
        grey,
    ));

    scene.add_sphere(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, white));
    scene.add_sphere(Sphere::new(Vec3::new(1.8, 0.5, 0.8), 0.5, red));

    scene.add_area_light(AreaLight::new(
        Vec3::new(-1.0, 4.0, -1.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 2.0),
        Color::new(4.0, 4.0, 4.0),
    ));

    scene
}
