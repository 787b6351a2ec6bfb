//! Shading strategies: how a material responds to light.
//!
//! Every material is turned into a [`Shader`] once per render by
//! [`ShaderCreator`]; the integrator then looks shaders up by material
//! handle in a [`ShaderTable`] without any per-sample dispatch on names.

use std::f64::consts::PI;

use lumen_core::{AreaLight, Material, MaterialHandle, Scene};
use lumen_math::{Color, Onb, Ray, Vec3};

use crate::sampler::{Sampler2d, Sampler3d};

/// Output of indirect shading: a continuation sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scattered {
    /// Continuation ray starting at the shading point
    pub ray: Ray,
    /// BRDF value for the sampled direction
    pub attenuation: Color,
    /// Radiance emitted by the surface itself
    pub emitted: Color,
    /// Density of the sampled direction (solid angle)
    pub pdf: f64,
}

/// Output of direct-light shading: a sampled point on an area light.
///
/// `ray` starts AT the light sample and points toward the shading point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direct {
    pub ray: Ray,
    pub attenuation: Color,
    /// Unused by the current estimator, always zero
    pub emitted: Color,
    /// Density of the sampled light point (area measure)
    pub pdf: f64,
    pub light_normal: Vec3,
    /// Squared distance between shading point and light sample
    pub distance: f64,
}

/// How continuation directions are drawn over the hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectionSampling {
    /// Uniform in solid angle, density `1 / (2 pi)`.
    #[default]
    Uniform,
    /// Cosine-weighted, density `cos(theta) / pi`.
    Cosine,
}

/// The two operations every shading model provides.
pub trait ShaderProgram {
    /// Sample a continuation direction around `normal`.
    fn shade_scattered<S: Sampler3d>(
        &self,
        ray: &Ray,
        hit_point: Vec3,
        normal: Vec3,
        sampler: &mut S,
    ) -> Scattered;

    /// Sample a point on `light` as seen from `hit_point`.
    fn shade_direct<S: Sampler2d>(
        &self,
        light: &AreaLight,
        hit_point: Vec3,
        normal: Vec3,
        sampler: &mut S,
    ) -> Direct;
}

/// Lambertian (diffuse) shading.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambertian {
    albedo: Color,
    sampling: DirectionSampling,
}

impl Lambertian {
    /// Create a Lambertian shader with the given albedo color.
    pub fn new(albedo: Color, sampling: DirectionSampling) -> Self {
        Self { albedo, sampling }
    }

    /// Read `diffuseColor` from the material, defaulting to white.
    pub fn from_material(material: &Material, sampling: DirectionSampling) -> Self {
        let albedo = material.rgb("diffuseColor").unwrap_or(Color::ONE);
        Self::new(albedo, sampling)
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    #[inline]
    fn brdf(&self) -> Color {
        self.albedo / PI
    }
}

impl ShaderProgram for Lambertian {
    fn shade_scattered<S: Sampler3d>(
        &self,
        _ray: &Ray,
        hit_point: Vec3,
        normal: Vec3,
        sampler: &mut S,
    ) -> Scattered {
        let onb = Onb::new(normal);
        let (local, pdf) = match self.sampling {
            DirectionSampling::Uniform => (sampler.sample3d(), 1.0 / (2.0 * PI)),
            DirectionSampling::Cosine => {
                let local = sampler.sample_cosine3d();
                (local, local.z / PI)
            }
        };
        let direction = onb.local(local).normalize();

        Scattered {
            ray: Ray::new(hit_point, direction),
            attenuation: self.brdf(),
            emitted: Color::ZERO,
            pdf,
        }
    }

    fn shade_direct<S: Sampler2d>(
        &self,
        light: &AreaLight,
        hit_point: Vec3,
        _normal: Vec3,
        sampler: &mut S,
    ) -> Direct {
        let xi = sampler.sample2d();
        let sample = light.point(xi.x, xi.y);
        let to_surface = hit_point - sample;

        Direct {
            ray: Ray::new(sample, to_surface.normalize()),
            attenuation: self.brdf(),
            emitted: Color::ZERO,
            pdf: 1.0 / (light.u.length() * light.v.length()),
            light_normal: light.normal(),
            distance: to_surface.length_squared(),
        }
    }
}

/// Closed set of shading models.
#[derive(Debug, Clone, PartialEq)]
pub enum Shader {
    Lambertian(Lambertian),
}

impl ShaderProgram for Shader {
    fn shade_scattered<S: Sampler3d>(
        &self,
        ray: &Ray,
        hit_point: Vec3,
        normal: Vec3,
        sampler: &mut S,
    ) -> Scattered {
        match self {
            Shader::Lambertian(l) => l.shade_scattered(ray, hit_point, normal, sampler),
        }
    }

    fn shade_direct<S: Sampler2d>(
        &self,
        light: &AreaLight,
        hit_point: Vec3,
        normal: Vec3,
        sampler: &mut S,
    ) -> Direct {
        match self {
            Shader::Lambertian(l) => l.shade_direct(light, hit_point, normal, sampler),
        }
    }
}

/// Builds shaders from material descriptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShaderCreator {
    sampling: DirectionSampling,
}

impl ShaderCreator {
    pub fn new(sampling: DirectionSampling) -> Self {
        Self { sampling }
    }

    pub fn create(&self, material: &Material) -> Shader {
        match material.kind.as_str() {
            "lambertian" => Shader::Lambertian(Lambertian::from_material(material, self.sampling)),
            other => {
                log::warn!(
                    "Material '{}' has unsupported type '{}', shading it as lambertian",
                    material.name,
                    other
                );
                Shader::Lambertian(Lambertian::from_material(material, self.sampling))
            }
        }
    }
}

/// Shaders for every material of a scene, indexed by material handle.
#[derive(Debug, Clone, Default)]
pub struct ShaderTable {
    shaders: Vec<Shader>,
}

impl ShaderTable {
    pub fn build(scene: &Scene, creator: ShaderCreator) -> Self {
        Self {
            shaders: scene.materials.iter().map(|m| creator.create(m)).collect(),
        }
    }

    pub fn get(&self, handle: MaterialHandle) -> Option<&Shader> {
        self.shaders.get(handle.index())
    }

    pub fn len(&self) -> usize {
        self.shaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty()
    }
}
