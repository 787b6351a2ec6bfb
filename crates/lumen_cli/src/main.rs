//! `lumen`: render a JSON scene to PNG.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use lumen_renderer::{RenderConfig, Renderer};

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::from(args.log_level))
        .init();

    let scene = lumen_core::load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;
    info!(
        "Scene '{}': {} objects, {} lights, {} materials",
        scene.name,
        scene.object_count(),
        scene.area_lights.len(),
        scene.materials.len()
    );

    let config = args.apply(RenderConfig::from_settings(&scene.render));
    let renderer = Renderer::new(&scene, config);
    let image = renderer.render().context("Render failed")?;

    image
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("Saved to {}", args.output.display());

    renderer.release(image);
    Ok(())
}
