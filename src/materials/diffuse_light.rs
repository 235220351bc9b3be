// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::material::Material;
use crate::materials::lambertian_diffuse::LambertianDiffuseBSDF;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::spectrum::RGBSpectrum;

/// Emitting surface that otherwise reflects like a Lambertian.
pub struct DiffuseLight {
    emission: RGBSpectrum,
    diffuse: LambertianDiffuseBSDF,
}

impl DiffuseLight {
    pub fn new(emission: RGBSpectrum, kd: RGBSpectrum) -> Self {
        Self { emission, diffuse: LambertianDiffuseBSDF::new(kd) }
    }
}

impl ComputationNode for DiffuseLight {
    fn describe(&self) -> String {
        format!("DiffuseLight: Le ({:.3}, {:.3}, {:.3})", self.emission.x, self.emission.y, self.emission.z)
    }
}

impl Material for DiffuseLight {
    fn emission(&self) -> RGBSpectrum {
        self.emission
    }

    fn eval(&self, wo: &Vector3f, wi: &Vector3f, n: &Vector3f) -> RGBSpectrum {
        self.diffuse.eval(wo, wi, n)
    }

    fn sample(&self, wo: &Vector3f, n: &Vector3f, u: &Vector2f) -> Vector3f {
        self.diffuse.sample(wo, n, u)
    }

    fn pdf(&self, wo: &Vector3f, wi: &Vector3f, n: &Vector3f) -> Float {
        self.diffuse.pdf(wo, wi, n)
    }
}
