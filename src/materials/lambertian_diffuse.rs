// Copyright @yucwang 2023

use crate::core::computation_node::ComputationNode;
use crate::core::material::Material;
use crate::math::constants::{ Float, INV_PI, Vector2f, Vector3f };
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{ sample_uniform_hemisphere, sample_uniform_hemisphere_pdf };

/// Ideal diffuse reflector, sampled uniformly over the hemisphere around the
/// normal.
pub struct LambertianDiffuseBSDF {
    color: RGBSpectrum
}

impl ComputationNode for LambertianDiffuseBSDF {
    fn describe(&self) -> String {
        format!("LambertianDiffuseBSDF: kd ({:.3}, {:.3}, {:.3})", self.color.x, self.color.y, self.color.z)
    }
}

impl Material for LambertianDiffuseBSDF {
    fn eval(&self, _wo: &Vector3f, wi: &Vector3f, n: &Vector3f) -> RGBSpectrum {
        if wi.dot(n) > 0.0 {
            self.color * INV_PI
        } else {
            RGBSpectrum::zeros()
        }
    }

    fn sample(&self, _wo: &Vector3f, n: &Vector3f, u: &Vector2f) -> Vector3f {
        let local = sample_uniform_hemisphere(u);
        Frame::from_normal(n).to_world(&local)
    }

    fn pdf(&self, _wo: &Vector3f, wi: &Vector3f, n: &Vector3f) -> Float {
        if wi.dot(n) > 0.0 {
            sample_uniform_hemisphere_pdf()
        } else {
            0.0
        }
    }
}

impl LambertianDiffuseBSDF {
    pub fn new(rgb: RGBSpectrum) -> Self {
        Self {
            color: rgb,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::constants::PI;

    #[test]
    fn test_lambertian_eval_and_pdf() {
        let bsdf = LambertianDiffuseBSDF::new(RGBSpectrum::new(0.5, 0.25, 1.0));
        let n = Vector3f::new(0.0, 1.0, 0.0);
        let wo = Vector3f::new(0.0, -1.0, 0.0);
        let up = Vector3f::new(0.6, 0.8, 0.0);
        let down = Vector3f::new(0.6, -0.8, 0.0);

        assert!((bsdf.eval(&wo, &up, &n) - RGBSpectrum::new(0.5, 0.25, 1.0) / PI).norm() < 1e-6);
        assert_eq!(bsdf.eval(&wo, &down, &n), RGBSpectrum::zeros());
        assert!((bsdf.pdf(&wo, &up, &n) - 0.5 / PI).abs() < 1e-6);
        assert_eq!(bsdf.pdf(&wo, &down, &n), 0.0);
        assert!(!bsdf.has_emission());
    }

    #[test]
    fn test_lambertian_samples_upper_hemisphere() {
        let bsdf = LambertianDiffuseBSDF::new(RGBSpectrum::new(0.5, 0.5, 0.5));
        let n = Vector3f::new(-1.0, 0.0, 0.0);
        let wo = Vector3f::new(1.0, 0.0, 0.0);
        for i in 0..8 {
            for j in 0..8 {
                let u = Vector2f::new((i as Float + 0.5) / 8.0, (j as Float + 0.5) / 8.0);
                let wi = bsdf.sample(&wo, &n, &u);
                assert!((wi.norm() - 1.0).abs() < 1e-5);
                assert!(wi.dot(&n) > 0.0);
                assert!(bsdf.pdf(&wo, &wi, &n) > 0.0);
            }
        }
    }
}
