//! Lumen Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer with next-event estimation toward area
//! lights and a stochastic early-out on every bounce.
//!
//! Rendering is split into:
//! - [`sampler`]: per-worker random number streams
//! - [`shader`]: per-material scattering and light sampling
//! - [`intersection`]: ray/primitive tests
//! - [`integrator`]: the per-ray radiance estimator
//! - [`renderer`]: image loop, gamma and worker pool

pub mod integrator;
pub mod intersection;
pub mod renderer;
pub mod sampler;
pub mod shader;

pub use integrator::{EstimatorMode, PathTracer, CONTINUE_PROBABILITY, DEFAULT_MAX_DEPTH, EPSILON};
pub use intersection::HitRecord;
pub use renderer::{
    gamma, linear_to_gamma, render_pixel, RenderConfig, RenderError, RenderResult, Renderer, Rgba,
};
pub use sampler::{
    HemiSphere, Sampler1d, Sampler2d, Sampler3d, SeedSource, UniformInSquare, WorkerSamplers,
};
pub use shader::{
    Direct, DirectionSampling, Lambertian, Scattered, Shader, ShaderCreator, ShaderProgram,
    ShaderTable,
};

/// Re-export common math types from lumen_math
pub use lumen_math::{Color, Ray, Vec3};
