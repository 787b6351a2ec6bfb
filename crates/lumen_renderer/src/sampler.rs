//! Random samplers driving every stochastic decision of the path tracer.
//!
//! Each sampler owns one seeded engine plus a uniform distribution over
//! [0, 1). Samplers are never shared: the renderer builds a
//! [`WorkerSamplers`] per worker at spawn time and hands it down explicitly.

use std::f64::consts::PI;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use lumen_math::{Vec2, Vec3};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// One uniform scalar in [0, 1).
pub trait Sampler1d {
    fn sample1d(&mut self) -> f64;
}

/// A 2D point sampled over the sampler's domain.
pub trait Sampler2d {
    fn sample2d(&mut self) -> Vec2;
}

/// A 3D direction sampled over the sampler's domain.
pub trait Sampler3d {
    fn sample3d(&mut self) -> Vec3;

    /// Cosine-weighted alternative to [`Sampler3d::sample3d`].
    fn sample_cosine3d(&mut self) -> Vec3;
}

/// Where sampler seeds come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSource {
    /// Wall-clock time mixed with the worker index and a process-wide counter.
    Clock,
    /// Reproducible seeds derived from a user seed and the worker index.
    Fixed(u64),
}

impl From<Option<u64>> for SeedSource {
    fn from(seed: Option<u64>) -> Self {
        seed.map_or(SeedSource::Clock, SeedSource::Fixed)
    }
}

/// Bumped for every clock seed so two samplers created in the same clock
/// tick still get different streams.
static SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

impl SeedSource {
    /// Seed for stream `stream` of worker `worker`.
    pub fn seed(self, worker: usize, stream: u64) -> u64 {
        let lane = ((worker as u64) << 8) | stream;
        match self {
            SeedSource::Fixed(seed) => splitmix64(seed ^ splitmix64(lane)),
            SeedSource::Clock => {
                let nanos = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or(0);
                let count = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);
                splitmix64(nanos ^ splitmix64(lane) ^ splitmix64(count.wrapping_add(0x5851_f42d)))
            }
        }
    }
}

/// SplitMix64 finalizer, spreads nearby integers over the whole seed space.
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Engine plus [0, 1) distribution shared by the concrete samplers.
#[derive(Debug, Clone)]
struct UniformEngine {
    engine: StdRng,
    unit: Uniform<f64>,
}

impl UniformEngine {
    fn new(seed: u64) -> Self {
        Self {
            engine: StdRng::seed_from_u64(seed),
            unit: Uniform::new(0.0, 1.0),
        }
    }

    #[inline]
    fn next(&mut self) -> f64 {
        self.unit.sample(&mut self.engine)
    }
}

/// Two independent uniforms over the unit square, used for pixel jitter.
#[derive(Debug, Clone)]
pub struct UniformInSquare {
    uniform: UniformEngine,
}

impl UniformInSquare {
    pub fn new(seed: u64) -> Self {
        Self {
            uniform: UniformEngine::new(seed),
        }
    }
}

impl Sampler2d for UniformInSquare {
    fn sample2d(&mut self) -> Vec2 {
        let x = self.uniform.next();
        let y = self.uniform.next();
        Vec2::new(x, y)
    }
}

/// Hemisphere sampler: scalar gate, light-point pairs and hemisphere directions.
#[derive(Debug, Clone)]
pub struct HemiSphere {
    uniform: UniformEngine,
}

impl HemiSphere {
    pub fn new(seed: u64) -> Self {
        Self {
            uniform: UniformEngine::new(seed),
        }
    }
}

impl Sampler1d for HemiSphere {
    fn sample1d(&mut self) -> f64 {
        self.uniform.next()
    }
}

impl Sampler2d for HemiSphere {
    fn sample2d(&mut self) -> Vec2 {
        let x = self.uniform.next();
        let y = self.uniform.next();
        Vec2::new(x, y)
    }
}

impl Sampler3d for HemiSphere {
    fn sample3d(&mut self) -> Vec3 {
        let xi1 = self.uniform.next();
        let xi2 = self.uniform.next();
        uniform_hemisphere(xi1, xi2)
    }

    fn sample_cosine3d(&mut self) -> Vec3 {
        let xi1 = self.uniform.next();
        let xi2 = self.uniform.next();
        cosine_hemisphere(xi1, xi2)
    }
}

/// Map two uniforms to a direction on the +Z hemisphere.
///
/// `z = xi1` makes cos(theta) uniform, which is uniform in solid angle
/// (density `1 / (2 pi)`).
#[inline]
pub fn uniform_hemisphere(xi1: f64, xi2: f64) -> Vec3 {
    let r = (1.0 - xi1 * xi1).max(0.0).sqrt();
    let phi = 2.0 * PI * xi2;
    Vec3::new(phi.cos() * r, phi.sin() * r, xi1)
}

/// Malley's method: cosine-weighted direction on the +Z hemisphere
/// (density `cos(theta) / pi`).
#[inline]
pub fn cosine_hemisphere(xi1: f64, xi2: f64) -> Vec3 {
    let r = xi1.sqrt();
    let phi = 2.0 * PI * xi2;
    Vec3::new(phi.cos() * r, phi.sin() * r, (1.0 - xi1).max(0.0).sqrt())
}

/// The private samplers of one render worker.
#[derive(Debug, Clone)]
pub struct WorkerSamplers {
    pub square: UniformInSquare,
    pub hemisphere: HemiSphere,
}

impl WorkerSamplers {
    pub fn new(source: SeedSource, worker: usize) -> Self {
        Self {
            square: UniformInSquare::new(source.seed(worker, 0)),
            hemisphere: HemiSphere::new(source.seed(worker, 1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_hemisphere_unit_and_upper() {
        let steps = 64;
        for i in 0..steps {
            for j in 0..steps {
                let xi1 = i as f64 / steps as f64;
                let xi2 = j as f64 / steps as f64;
                let d = uniform_hemisphere(xi1, xi2);
                assert!((d.length_squared() - 1.0).abs() < 1e-5, "{:?}", d);
                assert!(d.z >= 0.0);
            }
        }
    }

    #[test]
    fn test_cosine_hemisphere_unit_and_upper() {
        let mut sampler = HemiSphere::new(3);
        for _ in 0..10_000 {
            let d = sampler.sample_cosine3d();
            assert!((d.length_squared() - 1.0).abs() < 1e-5);
            assert!(d.z >= 0.0);
        }
    }

    #[test]
    fn test_hemisphere_sampler_draws() {
        let mut sampler = HemiSphere::new(42);
        for _ in 0..10_000 {
            let x = sampler.sample1d();
            assert!((0.0..1.0).contains(&x));

            let p = sampler.sample2d();
            assert!((0.0..1.0).contains(&p.x) && (0.0..1.0).contains(&p.y));

            let d = sampler.sample3d();
            assert!((d.length_squared() - 1.0).abs() < 1e-5);
            assert!(d.z >= 0.0);
        }
    }

    #[test]
    fn test_uniform_in_square_range_and_mean() {
        let mut sampler = UniformInSquare::new(7);
        let n = 20_000;
        let mut sum = Vec2::ZERO;
        for _ in 0..n {
            let p = sampler.sample2d();
            assert!((0.0..1.0).contains(&p.x) && (0.0..1.0).contains(&p.y));
            sum += p;
        }
        let mean = sum / n as f64;
        assert!((mean.x - 0.5).abs() < 0.02);
        assert!((mean.y - 0.5).abs() < 0.02);
    }

    #[test]
    fn test_fixed_seeds_reproduce() {
        let mut a = WorkerSamplers::new(SeedSource::Fixed(9), 2);
        let mut b = WorkerSamplers::new(SeedSource::Fixed(9), 2);
        for _ in 0..100 {
            assert_eq!(a.square.sample2d(), b.square.sample2d());
            assert_eq!(a.hemisphere.sample3d(), b.hemisphere.sample3d());
        }
    }

    #[test]
    fn test_workers_get_distinct_streams() {
        for source in [SeedSource::Fixed(9), SeedSource::Clock] {
            let mut a = WorkerSamplers::new(source, 0);
            let mut b = WorkerSamplers::new(source, 1);
            let xs: Vec<f64> = (0..16).map(|_| a.hemisphere.sample1d()).collect();
            let ys: Vec<f64> = (0..16).map(|_| b.hemisphere.sample1d()).collect();
            assert_ne!(xs, ys);
        }
    }

    #[test]
    fn test_clock_seeds_differ_within_one_tick() {
        // Same worker, same stream, created back to back
        let a = SeedSource::Clock.seed(0, 0);
        let b = SeedSource::Clock.seed(0, 0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_seed_source_from_option() {
        assert_eq!(SeedSource::from(None), SeedSource::Clock);
        assert_eq!(SeedSource::from(Some(5)), SeedSource::Fixed(5));
    }
}
