// Copyright @yucwang 2023

use crate::core::computation_node::ComputationNode;
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::spectrum::{ RGBSpectrum, Spectrum };

/// Surface response consumed by the integrator.
///
/// Directions follow one convention throughout: `wo` is the direction of the
/// ray arriving at the surface (pointing into it) and `wi` is the direction
/// light leaves along towards the next vertex (a light sample or a bounce).
/// `n` is the unit geometric normal.
pub trait Material: ComputationNode + Send + Sync {
    fn emission(&self) -> RGBSpectrum {
        RGBSpectrum::zeros()
    }

    fn has_emission(&self) -> bool {
        !self.emission().is_black()
    }

    /// BRDF value for the pair of directions.
    fn eval(&self, wo: &Vector3f, wi: &Vector3f, n: &Vector3f) -> RGBSpectrum;

    /// Importance-samples a continuation direction from two uniform numbers.
    fn sample(&self, wo: &Vector3f, n: &Vector3f, u: &Vector2f) -> Vector3f;

    /// Solid-angle density of `sample` producing `wi`; 0 marks an invalid
    /// direction.
    fn pdf(&self, wo: &Vector3f, wi: &Vector3f, n: &Vector3f) -> Float;
}
