// Copyright @yucwang 2026

use crate::core::bvh::BVH;
use crate::core::interaction::{SurfaceIntersection, SurfaceSampleRecord};
use crate::core::material::Material;
use crate::core::rng::LcgRng;
use crate::core::settings::RenderSettings;
use crate::core::shape::Shape;
use crate::math::constants::Float;
use crate::math::ray::Ray3f;
use std::sync::Arc;

pub struct SceneObject {
    pub shape: Arc<dyn Shape>,
    pub material: Arc<dyn Material>,
    pub name: Option<String>,
}

impl SceneObject {
    pub fn new(shape: Arc<dyn Shape>, material: Arc<dyn Material>) -> Self {
        Self { shape, material, name: None }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn shape(&self) -> &Arc<dyn Shape> {
        &self.shape
    }

    pub fn is_emitter(&self) -> bool {
        self.material.has_emission()
    }
}

/// Primitives plus the render configuration. Built once, then shared
/// read-only by every render worker.
pub struct Scene {
    objects: Vec<SceneObject>,
    settings: RenderSettings,
    bvh: Option<BVH>,
}

impl Scene {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            objects: Vec::new(),
            settings,
            bvh: None,
        }
    }

    pub fn with_objects(settings: RenderSettings, objects: Vec<SceneObject>) -> Self {
        let mut scene = Self::new(settings);
        scene.objects = objects;
        scene.build_bvh();
        scene
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
        self.bvh = None;
    }

    pub fn objects(&self) -> &Vec<SceneObject> {
        &self.objects
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn has_bvh(&self) -> bool {
        self.bvh.is_some()
    }

    pub fn build_bvh(&mut self) {
        log::info!("Generating BVH over {} objects ({:?} split, leaf size {}).",
                   self.objects.len(), self.settings.split_method, self.settings.max_leaf_size);
        let mut prim_bounds = Vec::with_capacity(self.objects.len());
        let mut prim_centroids = Vec::with_capacity(self.objects.len());
        for (idx, obj) in self.objects.iter().enumerate() {
            let bounds = obj.shape.bounding_box();
            prim_centroids.push(bounds.center());
            prim_bounds.push(bounds);
            log::debug!("object {} {}: {} / {}", idx, obj.name.as_deref().unwrap_or("-"),
                        obj.shape.describe(), obj.material.describe());
        }

        let bvh = BVH::with_options(prim_bounds, prim_centroids,
                                    self.settings.max_leaf_size, self.settings.split_method);
        log::debug!("BVH built with {} nodes.", bvh.node_count());
        self.bvh = Some(bvh);

        if !self.objects.iter().any(|o| o.is_emitter()) {
            log::warn!("Scene has no emissive objects; direct lighting will be black.");
        }
    }

    /// Nearest hit along `ray`, with the hit object's material and emission
    /// attached. Falls back to `trace` when the BVH has not been built.
    pub fn intersect(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let (idx, hit) = match self.bvh.as_ref() {
            Some(bvh) => bvh.ray_intersection(ray, |prim_idx, ray| {
                self.objects[prim_idx].shape.ray_intersection(ray).map(|h| {
                    let t = h.t();
                    (h, t)
                })
            })?,
            None => self.trace(ray)?,
        };
        Some(self.attach(idx, hit))
    }

    /// Brute-force nearest hit over every object.
    pub fn trace(&self, ray: &Ray3f) -> Option<(usize, SurfaceIntersection)> {
        let mut query = *ray;
        let mut closest = None;
        for (idx, object) in self.objects.iter().enumerate() {
            if let Some(hit) = object.shape.ray_intersection(&query) {
                if query.update(hit.t()) {
                    closest = Some((idx, hit));
                }
            }
        }
        closest
    }

    fn attach(&self, idx: usize, hit: SurfaceIntersection) -> SurfaceIntersection {
        let object = &self.objects[idx];
        hit.with_le(object.material.emission())
           .with_material(object.material.clone())
    }

    /// Total surface area of all emissive objects.
    pub fn emit_area_sum(&self) -> Float {
        self.objects
            .iter()
            .filter(|o| o.is_emitter())
            .map(|o| o.shape.surface_area())
            .sum()
    }

    /// Picks an emissive object with probability proportional to its area
    /// and samples a point on it. The returned record carries the light's
    /// emission and the object's own area-measure pdf. `None` when nothing
    /// in the scene emits.
    pub fn sample_light(&self, rng: &mut LcgRng) -> Option<SurfaceSampleRecord> {
        let emit_area_sum = self.emit_area_sum();
        if !(emit_area_sum > 0.0) {
            return None;
        }

        let p = rng.next_f32() * emit_area_sum;
        let mut accum = 0.0;
        let mut chosen = None;
        for object in self.objects.iter().filter(|o| o.is_emitter()) {
            accum += object.shape.surface_area();
            // Rounding can leave p past the final sum; the last emitter wins then.
            chosen = Some(object);
            if p < accum {
                break;
            }
        }

        let object = chosen?;
        let sample = object.shape.sample(&rng.next_2d());
        let pdf = sample.pdf();
        let intersection = sample
            .into_intersection()
            .with_le(object.material.emission())
            .with_material(object.material.clone());
        Some(SurfaceSampleRecord::new(intersection, pdf))
    }
}
