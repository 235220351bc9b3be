// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::material::Material;
use crate::materials::microfacet::{fresnel_schlick, ggx_d, ggx_g, reflect, sample_ggx};
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;

/// Glossy GGX reflector with Schlick Fresnel.
pub struct RoughConductorBSDF {
    alpha: Float,
    specular_reflectance: RGBSpectrum,
}

impl ComputationNode for RoughConductorBSDF {
    fn describe(&self) -> String {
        format!("RoughConductorBSDF: alpha {:.3}", self.alpha)
    }
}

impl RoughConductorBSDF {
    pub fn new(alpha: Float, specular_reflectance: RGBSpectrum) -> Self {
        Self { alpha, specular_reflectance }
    }
}

impl Material for RoughConductorBSDF {
    fn eval(&self, wo: &Vector3f, wi: &Vector3f, n: &Vector3f) -> RGBSpectrum {
        let view = -wo;
        let cos_o = view.dot(n);
        let cos_i = wi.dot(n);
        if cos_o <= 1e-6 || cos_i <= 1e-6 {
            return RGBSpectrum::zeros();
        }

        let m = view + wi;
        if m.norm_squared() <= 0.0 {
            return RGBSpectrum::zeros();
        }
        let m = m.normalize();

        let d = ggx_d(m.dot(n), self.alpha);
        let g = ggx_g(cos_i, cos_o, self.alpha);
        let f = fresnel_schlick(self.specular_reflectance, wi.dot(&m).abs());
        f * (d * g / (4.0 * cos_i * cos_o))
    }

    fn sample(&self, wo: &Vector3f, n: &Vector3f, u: &Vector2f) -> Vector3f {
        let frame = Frame::from_normal(n);
        let view = frame.to_local(&(-wo));
        let m = sample_ggx(u, self.alpha);
        frame.to_world(&reflect(&view, &m)).normalize()
    }

    fn pdf(&self, wo: &Vector3f, wi: &Vector3f, n: &Vector3f) -> Float {
        let view = -wo;
        if view.dot(n) <= 0.0 || wi.dot(n) <= 0.0 {
            return 0.0;
        }

        let m = view + wi;
        if m.norm_squared() <= 0.0 {
            return 0.0;
        }
        let m = m.normalize();
        let cos_m = m.dot(n);
        let denom = 4.0 * view.dot(&m).abs();
        if cos_m <= 0.0 || denom <= 1e-6 {
            return 0.0;
        }
        ggx_d(cos_m, self.alpha) * cos_m / denom
    }
}
