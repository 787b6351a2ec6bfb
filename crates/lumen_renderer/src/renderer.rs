//! Multi-threaded image renderer.
//!
//! Implements Monte Carlo rendering of a whole image with:
//! - Jittered multi-sampling with a box filter
//! - Gamma correction (gamma = 2.0)
//! - Row-interleaved fork-join parallelism over a fixed worker count

use std::path::Path;
use std::time::Instant;

use lumen_core::{Camera, RenderSettings, Scene, SceneError};
use lumen_math::{Color, Interval};
use thiserror::Error;

use crate::integrator::{EstimatorMode, PathTracer, DEFAULT_MAX_DEPTH};
use crate::sampler::{Sampler2d, SeedSource, WorkerSamplers};

/// Output pixel: linear-to-gamma encoded RGB plus alpha.
pub type Rgba = [f32; 4];

/// Errors that can occur while rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid scene: {0}")]
    Scene(#[from] SceneError),

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel
    pub samples: u32,
    /// Maximum number of bounces per path
    pub max_depth: u32,
    /// Worker count; `None` uses the available hardware parallelism
    pub threads: Option<usize>,
    /// Fixed seed for reproducible renders; `None` seeds from the clock
    pub seed: Option<u64>,
    /// Estimator variant
    pub mode: EstimatorMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            samples: 16,
            max_depth: DEFAULT_MAX_DEPTH,
            threads: None,
            seed: None,
            mode: EstimatorMode::Literal,
        }
    }
}

impl RenderConfig {
    /// Start from a scene's render block.
    pub fn from_settings(settings: &RenderSettings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            samples: settings.samples,
            max_depth: settings.max_depth,
            ..Default::default()
        }
    }

    /// Number of workers this configuration renders with.
    pub fn thread_count(&self) -> usize {
        self.threads
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
            })
            .max(1)
    }

    fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.samples == 0 {
            return Err(RenderError::InvalidConfig(
                "samples per pixel must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A rendered image, row-major, top scanline first.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderResult {
    pub pixels: Vec<Rgba>,
    pub width: u32,
    pub height: u32,
}

impl RenderResult {
    /// Get the pixel at (x, y), y = 0 being the top scanline.
    pub fn get(&self, x: u32, y: u32) -> Rgba {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Convert to 8-bit RGBA bytes (for display or saving).
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            for channel in pixel {
                bytes.push((255.0 * channel.clamp(0.0, 1.0)).round() as u8);
            }
        }
        bytes
    }

    /// Save as an 8-bit RGBA image; the format follows the extension (PNG for `.png`).
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        image::save_buffer(
            path,
            &self.to_rgba8(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )?;
        Ok(())
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        Interval::UNIT.clamp(linear.sqrt())
    } else {
        0.0
    }
}

/// Gamma-encode a color; results are clamped to [0, 1].
pub fn gamma(color: Color) -> Color {
    Color::new(
        linear_to_gamma(color.x),
        linear_to_gamma(color.y),
        linear_to_gamma(color.z),
    )
}

/// Renders a scene with a path tracer.
pub struct Renderer<'a> {
    scene: &'a Scene,
    config: RenderConfig,
}

impl<'a> Renderer<'a> {
    pub fn new(scene: &'a Scene, config: RenderConfig) -> Self {
        Self { scene, config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render the whole image.
    ///
    /// Spawns one task per worker on a dedicated pool and joins them all
    /// before returning. Worker `k` of `N` owns trace rows `k, k + N, ...`,
    /// so every task writes to its own disjoint rows of the buffer.
    pub fn render(&self) -> Result<RenderResult, RenderError> {
        self.config.validate()?;
        lumen_core::validate_materials(self.scene)?;

        let width = self.config.width;
        let height = self.config.height;
        // Every worker owns at least one row.
        let threads = self.config.thread_count().min(height as usize);
        let seeds = SeedSource::from(self.config.seed);

        log::info!(
            "Rendering '{}' {}x{} @ {} spp on {} threads ({:?} estimator)",
            self.scene.name,
            width,
            height,
            self.config.samples,
            threads,
            self.config.mode
        );
        let start = Instant::now();

        let camera = self.scene.camera.fitted(width, height);
        let tracer = PathTracer::new(self.scene, self.config.mode, self.config.max_depth);

        let mut pixels: Vec<Rgba> = vec![[0.0, 0.0, 0.0, 1.0]; (width * height) as usize];

        // Trace row i is stored at row height - 1 - i.
        let mut worker_rows: Vec<Vec<(u32, &mut [Rgba])>> = (0..threads).map(|_| Vec::new()).collect();
        for (stored, row) in pixels.chunks_mut(width as usize).enumerate().rev() {
            let i = height - 1 - stored as u32;
            worker_rows[i as usize % threads].push((i, row));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|k| format!("lumen-worker-{}", k))
            .build()?;

        let config = &self.config;
        pool.scope(|scope| {
            for (k, rows) in worker_rows.into_iter().enumerate() {
                let tracer = &tracer;
                let camera = &camera;
                scope.spawn(move |_| {
                    let mut samplers = WorkerSamplers::new(seeds, k);
                    let row_count = rows.len();
                    for (i, row) in rows {
                        for (j, pixel) in row.iter_mut().enumerate() {
                            let color =
                                render_pixel(tracer, camera, config, j as u32, i, &mut samplers);
                            let c = gamma(color);
                            *pixel = [c.x as f32, c.y as f32, c.z as f32, 1.0];
                        }
                    }
                    log::debug!("Worker {} finished {} rows", k, row_count);
                });
            }
        });

        log::info!("Done in {:?}", start.elapsed());

        Ok(RenderResult {
            pixels,
            width,
            height,
        })
    }

    /// Hand a render result back. Consuming it makes a second release a
    /// compile error.
    pub fn release(&self, result: RenderResult) {
        log::debug!("Releasing {}x{} render result", result.width, result.height);
        drop(result);
    }
}

/// Average `config.samples` jittered estimates for pixel (j, i), i counted from the bottom.
pub fn render_pixel(
    tracer: &PathTracer<'_>,
    camera: &Camera,
    config: &RenderConfig,
    j: u32,
    i: u32,
    samplers: &mut WorkerSamplers,
) -> Color {
    let mut color = Color::ZERO;

    for _ in 0..config.samples {
        let r = samplers.square.sample2d();
        let x = (j as f64 + r.x) / config.width as f64;
        let y = (i as f64 + r.y) / config.height as f64;
        let ray = camera.shoot(x, y);
        color += tracer.trace(&ray, 0, &mut samplers.hemisphere);
    }

    color / config.samples as f64
}
