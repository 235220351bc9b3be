// Copyright @yucwang 2023

use super::triangle::Triangle;

use crate::core::bvh::BVH;
use crate::core::computation_node::ComputationNode;
use crate::core::interaction::{SurfaceIntersection, SurfaceSampleRecord};
use crate::core::shape::Shape;
use crate::io::obj_utils;
use crate::io::obj_utils::ObjLoadError;
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::ray::Ray3f;

use std::path::Path;
use std::vec::Vec;

/// A triangle soup treated as one primitive, with its own BVH over the
/// triangles.
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    tri_areas: Vec<Float>,
    total_area: Float,
    bounds: AABB,
    bvh: Option<BVH>,
}

impl TriangleMesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        let tri_areas: Vec<Float> = triangles.iter().map(|t| t.surface_area()).collect();
        let total_area = tri_areas.iter().sum();
        let mut bounds = AABB::default();
        for tri in &triangles {
            bounds.expand_by_aabb(&tri.bounding_box());
        }

        let mut mesh = Self {
            triangles,
            tri_areas,
            total_area,
            bounds,
            bvh: None,
        };
        mesh.build_bvh();
        mesh
    }

    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, ObjLoadError> {
        let obj_set = obj_utils::load_obj_from_file(path)?;
        let mut triangles = Vec::new();

        for object in obj_set.objects {
            let vertices: Vec<Vector3f> = object
                .vertices
                .iter()
                .map(|v| Vector3f::new(v.x as Float, v.y as Float, v.z as Float))
                .collect();
            for geom in object.geometry {
                for shape in geom.shapes {
                    if let wavefront_obj::obj::Primitive::Triangle(a, b, c) = shape.primitive {
                        let fetch = |idx: usize| {
                            vertices.get(idx).copied().ok_or(ObjLoadError::InvalidIndex(idx))
                        };
                        triangles.push(Triangle::new(fetch(a.0)?, fetch(b.0)?, fetch(c.0)?));
                    }
                }
            }
        }

        log::debug!("loaded {} triangles", triangles.len());
        Ok(Self::new(triangles))
    }

    /// Rebuilds every triangle so its normal faces `toward`.
    pub fn oriented_toward(self, toward: &Vector3f) -> Self {
        let triangles = self
            .triangles
            .iter()
            .map(|tri| {
                let (p0, p1, p2) = tri.vertices();
                Triangle::facing(p0, p1, p2, toward)
            })
            .collect();
        Self::new(triangles)
    }

    /// Rebuilds every triangle so its normal points away from `from`.
    pub fn oriented_away_from(self, from: &Vector3f) -> Self {
        let triangles = self
            .triangles
            .iter()
            .map(|tri| {
                let (p0, p1, p2) = tri.vertices();
                let outward = tri.centroid() + (tri.centroid() - from);
                Triangle::facing(p0, p1, p2, &outward)
            })
            .collect();
        Self::new(triangles)
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn centroid(&self) -> Vector3f {
        self.bounds.center()
    }

    fn build_bvh(&mut self) {
        if self.triangles.is_empty() {
            self.bvh = None;
            return;
        }

        let mut prim_bounds = Vec::with_capacity(self.triangles.len());
        let mut prim_centroids = Vec::with_capacity(self.triangles.len());
        for tri in &self.triangles {
            let bounds = tri.bounding_box();
            prim_centroids.push(bounds.center());
            prim_bounds.push(bounds);
        }

        self.bvh = Some(BVH::new(prim_bounds, prim_centroids));
    }
}

impl ComputationNode for TriangleMesh {
    fn describe(&self) -> String {
        format!("TriangleMesh: {} triangles, area {:.3}", self.triangles.len(), self.total_area)
    }
}

impl Shape for TriangleMesh {
    fn bounding_box(&self) -> AABB {
        self.bounds
    }

    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let bvh = self.bvh.as_ref()?;
        bvh.ray_intersection(ray, |prim_idx, ray| {
            self.triangles[prim_idx].ray_intersection(ray).map(|h| {
                let t = h.t();
                (h, t)
            })
        })
        .map(|(_, hit)| hit)
    }

    fn sample(&self, u: &Vector2f) -> SurfaceSampleRecord {
        if self.triangles.is_empty() || self.total_area <= 0.0 {
            let n = Vector3f::new(0.0, 0.0, 1.0);
            let intersection = SurfaceIntersection::new(Vector3f::zeros(), n, 0.0);
            return SurfaceSampleRecord::new(intersection, 0.0);
        }

        // Pick a triangle proportionally to its area, then reuse the
        // remainder of u.x inside it.
        let target = u.x * self.total_area;
        let mut accum = 0.0;
        let mut idx = self.triangles.len() - 1;
        for (i, area) in self.tri_areas.iter().enumerate() {
            accum += *area;
            if target < accum {
                idx = i;
                break;
            }
        }

        let tri_area = self.tri_areas[idx].max(1e-6);
        let before = accum - self.tri_areas[idx];
        let local_u = Vector2f::new(((target - before) / tri_area).clamp(0.0, 0.999999), u.y);

        let record = self.triangles[idx].sample(&local_u);
        SurfaceSampleRecord::new(record.into_intersection(), 1.0 / self.total_area)
    }

    fn surface_area(&self) -> Float {
        self.total_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> TriangleMesh {
        let a = Vector3f::new(0.0, 0.0, 0.0);
        let b = Vector3f::new(1.0, 0.0, 0.0);
        let c = Vector3f::new(1.0, 1.0, 0.0);
        let d = Vector3f::new(0.0, 1.0, 0.0);
        TriangleMesh::new(vec![Triangle::new(a, b, c), Triangle::new(a, c, d)])
    }

    #[test]
    fn test_mesh_area_and_bounds() {
        let mesh = unit_quad();
        assert!((mesh.surface_area() - 1.0).abs() < 1e-6);
        assert_eq!(mesh.bounding_box().p_max, Vector3f::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_mesh_intersection() {
        let mesh = unit_quad();
        let hit_ray = Ray3f::new(Vector3f::new(0.25, 0.75, 2.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        let miss_ray = Ray3f::new(Vector3f::new(1.25, 0.75, 2.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        assert!((mesh.ray_intersection(&hit_ray).expect("expected hit").t() - 2.0).abs() < 1e-5);
        assert!(mesh.ray_intersection(&miss_ray).is_none());
    }

    #[test]
    fn test_mesh_sample_pdf_is_inverse_area() {
        let mesh = unit_quad();
        for i in 0..20 {
            let u = Vector2f::new(i as Float / 20.0, 0.5);
            let record = mesh.sample(&u);
            let p = record.intersection().p();
            assert!(p.x >= -1e-6 && p.x <= 1.0 + 1e-6 && p.y >= -1e-6 && p.y <= 1.0 + 1e-6);
            assert!((record.pdf() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_orientation_helpers() {
        let mesh = unit_quad().oriented_toward(&Vector3f::new(0.5, 0.5, -3.0));
        assert!(mesh.triangles().iter().all(|t| t.geometric_normal().z < 0.0));

        let mesh = mesh.oriented_away_from(&Vector3f::new(0.5, 0.5, -3.0));
        assert!(mesh.triangles().iter().all(|t| t.geometric_normal().z > 0.0));
    }
}
