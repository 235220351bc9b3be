// Copyright @yucwang 2023

use crate::core::material::Material;
use crate::math::constants::{ Float, Vector3f };
use crate::math::spectrum::{RGBSpectrum, Spectrum};
use std::sync::Arc;

/// Nearest-hit record. A miss is represented by the absence of a record.
#[derive(Clone)]
pub struct SurfaceIntersection {
    p: Vector3f,
    geo_normal: Vector3f,
    t: Float,
    le: RGBSpectrum,
    material: Option<Arc<dyn Material>>,
}

pub struct SurfaceSampleRecord {
    intersection: SurfaceIntersection,
    pdf: Float,
}

impl SurfaceIntersection {
    pub fn new(new_p: Vector3f,
               new_geo_normal: Vector3f,
               new_t: Float) -> Self {
        Self { p: new_p, geo_normal: new_geo_normal, t: new_t,
               le: RGBSpectrum::zeros(), material: None }
    }

    pub fn t(&self) -> Float {
        self.t
    }

    pub fn le(&self) -> RGBSpectrum {
        self.le
    }

    pub fn p(&self) -> Vector3f {
        self.p
    }

    pub fn geo_normal(&self) -> Vector3f {
        self.geo_normal
    }

    /// True when the surface that was hit is a light source.
    pub fn is_emitter(&self) -> bool {
        match &self.material {
            Some(m) => m.has_emission(),
            None => !self.le.is_black(),
        }
    }

    pub fn with_le(mut self, new_le: RGBSpectrum) -> Self {
        self.le = new_le;
        self
    }

    pub fn material(&self) -> Option<&dyn Material> {
        self.material.as_deref()
    }

    pub fn with_material(mut self, new_material: Arc<dyn Material>) -> Self {
        self.material = Some(new_material);
        self
    }
}

impl SurfaceSampleRecord {
    pub fn new(new_intersection: SurfaceIntersection,
               new_pdf: Float) -> Self {
        Self { intersection: new_intersection, pdf: new_pdf }
    }

    pub fn intersection(&self) -> &SurfaceIntersection {
        &self.intersection
    }

    pub fn into_intersection(self) -> SurfaceIntersection {
        self.intersection
    }

    /// Area-measure density of the sampled point.
    pub fn pdf(&self) -> Float {
        self.pdf
    }
}
