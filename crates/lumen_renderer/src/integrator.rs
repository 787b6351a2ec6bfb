//! Path tracing integrator.
//!
//! Estimates incoming radiance along a ray by combining next-event
//! estimation toward every area light with a BRDF-sampled continuation,
//! stopped stochastically and by a hard depth limit.

use lumen_core::Scene;
use lumen_math::{Color, Interval, Ray, Vec3};

use crate::intersection::{hit_area_light, hit_plane, hit_sphere, hit_triangle, HitRecord};
use crate::sampler::{Sampler1d, Sampler2d, Sampler3d};
use crate::shader::{DirectionSampling, Shader, ShaderCreator, ShaderProgram, ShaderTable};

/// Minimum hit distance, suppresses self-intersection.
pub const EPSILON: f64 = 1e-6;

/// A path continues past a surface when the gate draw is at most this.
pub const CONTINUE_PROBABILITY: f64 = 0.7;

/// Default bound on the number of bounces.
pub const DEFAULT_MAX_DEPTH: u32 = 64;

/// Which version of the estimator [`PathTracer::trace`] evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EstimatorMode {
    /// Uniform hemisphere sampling, unweighted early-out, light emission
    /// counted on every path vertex. Biased, see [`PathTracer::trace`].
    #[default]
    Literal,
    /// Cosine-weighted sampling, Russian roulette reweighting and light
    /// emission counted on camera rays only.
    Corrected,
}

impl EstimatorMode {
    pub fn direction_sampling(self) -> DirectionSampling {
        match self {
            EstimatorMode::Literal => DirectionSampling::Uniform,
            EstimatorMode::Corrected => DirectionSampling::Cosine,
        }
    }
}

/// Per-axis comparison of two points.
#[inline]
fn epsilon_equal(a: Vec3, b: Vec3, epsilon: f64) -> bool {
    (a - b).abs().max_element() < epsilon
}

/// Scene queries plus the radiance estimator.
pub struct PathTracer<'a> {
    scene: &'a Scene,
    shaders: ShaderTable,
    mode: EstimatorMode,
    max_depth: u32,
}

impl<'a> PathTracer<'a> {
    /// Build the shader table for `scene` and set up the estimator.
    pub fn new(scene: &'a Scene, mode: EstimatorMode, max_depth: u32) -> Self {
        let shaders = ShaderTable::build(scene, ShaderCreator::new(mode.direction_sampling()));
        Self {
            scene,
            shaders,
            mode,
            max_depth,
        }
    }

    pub fn mode(&self) -> EstimatorMode {
        self.mode
    }

    /// Nearest opaque hit (sphere, triangle or plane) in `(EPSILON, +inf)`.
    pub fn closest_hit_object(&self, ray: &Ray) -> Option<HitRecord> {
        let mut ray_t = Interval::from_min(EPSILON);
        let mut closest_hit = None;

        // Each query is bounded by the nearest hit so far, so any hit is nearer.
        for s in &self.scene.spheres {
            if let Some(rec) = hit_sphere(ray, s, ray_t) {
                ray_t = ray_t.with_max(rec.t);
                closest_hit = Some(rec);
            }
        }
        for t in &self.scene.triangles {
            if let Some(rec) = hit_triangle(ray, t, ray_t) {
                ray_t = ray_t.with_max(rec.t);
                closest_hit = Some(rec);
            }
        }
        for p in &self.scene.planes {
            if let Some(rec) = hit_plane(ray, p, ray_t) {
                ray_t = ray_t.with_max(rec.t);
                closest_hit = Some(rec);
            }
        }

        closest_hit
    }

    /// Distance to and radiance of the nearest area light; `(+inf, 0)` on a miss.
    pub fn closest_hit_light(&self, ray: &Ray) -> (f64, Color) {
        let mut ray_t = Interval::from_min(EPSILON);
        let mut radiance = Color::ZERO;

        for light in &self.scene.area_lights {
            if let Some(t) = hit_area_light(ray, light, ray_t) {
                ray_t = ray_t.with_max(t);
                radiance = light.radiance;
            }
        }

        (ray_t.max, radiance)
    }

    /// Next-event estimate at `hit`: one sample per area light, summed.
    ///
    /// A light sample counts only if the shadow ray cast from the light
    /// back toward the surface first hits the shading point itself.
    pub fn direct_lighting<S: Sampler2d>(
        &self,
        shader: &Shader,
        hit: &HitRecord,
        sampler: &mut S,
    ) -> Color {
        let mut l_dir = Color::ZERO;

        for light in &self.scene.area_lights {
            let direct = shader.shade_direct(light, hit.hit_point, hit.normal, sampler);
            if !(direct.pdf.is_finite() && direct.pdf > 0.0 && direct.distance > 0.0) {
                continue;
            }

            let unoccluded = self
                .closest_hit_object(&direct.ray)
                .is_some_and(|first| epsilon_equal(first.hit_point, hit.hit_point, EPSILON));
            if !unoccluded {
                continue;
            }

            let d = direct.ray.direction;
            let cos_surface = hit.normal.dot(-d).max(0.0);
            let cos_light = direct.light_normal.dot(d).abs();
            l_dir += light.radiance * direct.attenuation * cos_surface * cos_light
                / direct.distance
                / direct.pdf;
        }

        l_dir
    }

    /// Estimate the radiance arriving along `ray`, `depth` bounces into a path.
    ///
    /// Each surface vertex adds its direct term; with probability
    /// `CONTINUE_PROBABILITY` the path then continues along a sampled
    /// direction weighted by `brdf * cos / pdf`. A ray that reaches an area
    /// light before any surface returns that light's radiance, and a ray
    /// that escapes returns black. No vertex is expanded beyond `max_depth`.
    ///
    /// In [`EstimatorMode::Literal`] the estimator is biased on purpose:
    /// surviving paths are not divided by the continuation probability, so
    /// indirect light is darkened by a factor 0.7 per bounce, and a bounce
    /// that lands on a light adds emission already covered by the direct
    /// term. [`EstimatorMode::Corrected`] removes both.
    pub fn trace<S>(&self, ray: &Ray, depth: u32, sampler: &mut S) -> Color
    where
        S: Sampler1d + Sampler2d + Sampler3d,
    {
        let mut radiance = Color::ZERO;
        let mut throughput = Color::ONE;
        let mut ray = *ray;
        let mut depth = depth;
        let mut camera_ray = true;

        loop {
            let hit_object = self.closest_hit_object(&ray);
            let (light_t, emitted) = self.closest_hit_light(&ray);

            match hit_object {
                Some(hit) if hit.t < light_t => {
                    let Some(shader) = self.shaders.get(hit.material) else {
                        log::debug!("No shader for material {:?}, path absorbed", hit.material);
                        break;
                    };

                    radiance += throughput * self.direct_lighting(shader, &hit, sampler);

                    if depth >= self.max_depth {
                        break;
                    }
                    if sampler.sample1d() > CONTINUE_PROBABILITY {
                        break;
                    }

                    let scattered = shader.shade_scattered(&ray, hit.hit_point, hit.normal, sampler);
                    if scattered.pdf <= 0.0 {
                        break;
                    }
                    radiance += throughput * scattered.emitted;

                    let n_dot_in = hit.normal.dot(scattered.ray.direction);
                    let mut weight = scattered.attenuation * n_dot_in / scattered.pdf;
                    if self.mode == EstimatorMode::Corrected {
                        weight /= CONTINUE_PROBABILITY;
                    }
                    throughput *= weight;

                    ray = scattered.ray;
                    depth += 1;
                    camera_ray = false;
                }
                _ if light_t != f64::INFINITY => {
                    if camera_ray || self.mode == EstimatorMode::Literal {
                        radiance += throughput * emitted;
                    }
                    break;
                }
                _ => break,
            }
        }

        radiance
    }
}
