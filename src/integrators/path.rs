// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::integrator::Integrator;
use crate::core::interaction::SurfaceIntersection;
use crate::core::material::Material;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::core::settings::RenderSettings;
use crate::math::constants::{Float, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::spectrum::{RGBSpectrum, Spectrum};

/// Slack allowed between the shadow hit and the sampled light point.
pub const SHADOW_EPSILON: Float = 0.005;

/// True when a shadow ray that stopped at `shadow_t` still reaches a light
/// point `light_t` away. A shadow ray that hits nothing reports infinity.
pub fn shadow_unoccluded(shadow_t: Float, light_t: Float) -> bool {
    shadow_t - light_t > -SHADOW_EPSILON
}

/// Unidirectional path tracer with next-event estimation and Russian
/// roulette. Paths that bounce into an emitter drop that bounce; emission is
/// only picked up by camera rays and by the light sample at each vertex.
pub struct PathIntegrator {
    max_depth: u32,
    russian_roulette: Float,
}

impl PathIntegrator {
    pub fn new(max_depth: u32, russian_roulette: Float) -> Self {
        Self { max_depth, russian_roulette }
    }

    pub fn from_settings(settings: &RenderSettings) -> Self {
        Self::new(settings.max_depth, settings.russian_roulette)
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Radiance along `ray` for a path vertex at `depth`.
    pub fn radiance(&self, scene: &Scene, ray: &Ray3f, depth: u32, rng: &mut LcgRng) -> RGBSpectrum {
        if depth > self.max_depth {
            return RGBSpectrum::zeros();
        }

        let mut hit = match scene.intersect(ray) {
            Some(hit) => hit,
            None => return RGBSpectrum::zeros(),
        };
        if hit.is_emitter() {
            return hit.le();
        }

        let mut radiance = RGBSpectrum::zeros();
        let mut throughput = RGBSpectrum::new(1.0, 1.0, 1.0);
        let mut wo = ray.dir();
        let mut depth = depth;

        loop {
            let material = match hit.material() {
                Some(material) => material,
                None => break,
            };
            let n = hit.geo_normal();

            let direct = self.direct_lighting(scene, &hit, material, &wo, rng);
            radiance += throughput.component_mul(&direct);

            if !(rng.next_f32() < self.russian_roulette) {
                break;
            }

            let wi = material.sample(&wo, &n, &rng.next_2d()).normalize();
            let next_ray = Ray3f::spawn(hit.p(), wi);
            let next_hit = match scene.intersect(&next_ray) {
                Some(next_hit) if !next_hit.is_emitter() => next_hit,
                _ => break,
            };

            let pdf = material.pdf(&wo, &wi, &n);
            if !(pdf > 0.0) {
                break;
            }

            let f = material.eval(&wo, &wi, &n);
            let weight = f * (wi.dot(&n).max(0.0) / pdf / self.russian_roulette);
            if !weight.is_valid() {
                break;
            }
            throughput = throughput.component_mul(&weight);

            // Only the depth limit ends a walk here; a black throughput
            // still draws its roulette and bounce samples.
            depth += 1;
            if depth > self.max_depth {
                break;
            }

            hit = next_hit;
            wo = wi;
        }

        radiance
    }

    /// One light sample for the non-emissive vertex `hit` reached along `wo`.
    pub fn direct_lighting(&self,
                           scene: &Scene,
                           hit: &SurfaceIntersection,
                           material: &dyn Material,
                           wo: &Vector3f,
                           rng: &mut LcgRng) -> RGBSpectrum {
        let light = match scene.sample_light(rng) {
            Some(light) => light,
            None => return RGBSpectrum::zeros(),
        };
        let pdf_light = light.pdf();
        let x = light.intersection().p();
        let nn = light.intersection().geo_normal();
        let le = light.intersection().le();

        let p = hit.p();
        let n = hit.geo_normal();
        let to_light = x - p;
        let dist2 = to_light.norm_squared();
        if !(dist2 > 0.0) || !(pdf_light > 0.0) {
            return RGBSpectrum::zeros();
        }
        let dist = dist2.sqrt();
        let ws = to_light / dist;

        let shadow_ray = Ray3f::spawn(p, ws);
        let shadow_t = scene.intersect(&shadow_ray).map_or(Float::INFINITY, |h| h.t());
        if !shadow_unoccluded(shadow_t, dist) {
            return RGBSpectrum::zeros();
        }

        let f = material.eval(wo, &ws, &n);
        let cos_surface = ws.dot(&n).max(0.0);
        let cos_light = (-ws).dot(&nn).max(0.0);
        let l_dir = le.component_mul(&f) * (cos_surface * cos_light / dist2 / pdf_light);

        if l_dir.is_valid() { l_dir } else { RGBSpectrum::zeros() }
    }
}

impl ComputationNode for PathIntegrator {
    fn describe(&self) -> String {
        format!("PathIntegrator: max depth {}, russian roulette {}", self.max_depth, self.russian_roulette)
    }
}

impl Integrator for PathIntegrator {
    fn li(&self, scene: &Scene, ray: &Ray3f, rng: &mut LcgRng) -> RGBSpectrum {
        self.radiance(scene, ray, 0, rng)
    }
}
