// Copyright @yucwang 2026

use crate::core::scene::Scene;
use crate::core::rng::LcgRng;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

pub trait Integrator: Sync {
    /// One radiance estimate along `ray`.
    fn li(&self, scene: &Scene, ray: &Ray3f, rng: &mut LcgRng) -> RGBSpectrum;
}
