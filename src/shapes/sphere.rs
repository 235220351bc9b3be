// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::interaction::{SurfaceIntersection, SurfaceSampleRecord};
use crate::core::shape::Shape;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector2f, Vector3f, PI};
use crate::math::ray::Ray3f;
use crate::math::warp::sample_uniform_sphere;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vector3f,
    radius: Float,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius: radius.abs() }
    }

    pub fn center(&self) -> Vector3f {
        self.center
    }

    pub fn radius(&self) -> Float {
        self.radius
    }
}

impl ComputationNode for Sphere {
    fn describe(&self) -> String {
        format!("Sphere: radius {:.3}", self.radius)
    }
}

impl Shape for Sphere {
    fn bounding_box(&self) -> AABB {
        let r = Vector3f::new(self.radius, self.radius, self.radius);
        AABB::new(self.center - r, self.center + r)
    }

    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        // Direction is unit length, so a = 1.
        let oc = ray.origin() - self.center;
        let half_b = oc.dot(&ray.dir());
        let c = oc.dot(&oc) - self.radius * self.radius;
        let discriminant = half_b * half_b - c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let near = -half_b - root;
        let far = -half_b + root;
        let t = if ray.test_segment(near) {
            near
        } else if ray.test_segment(far) {
            far
        } else {
            return None;
        };

        let p = ray.at(t);
        let n = (p - self.center) / self.radius;
        Some(SurfaceIntersection::new(p, n, t))
    }

    fn sample(&self, u: &Vector2f) -> SurfaceSampleRecord {
        let n = sample_uniform_sphere(u);
        let p = self.center + n * self.radius;
        let area = self.surface_area();
        let pdf = if area > 0.0 { 1.0 / area } else { 0.0 };
        SurfaceSampleRecord::new(SurfaceIntersection::new(p, n, 0.0), pdf)
    }

    fn surface_area(&self) -> Float {
        4.0 * PI * self.radius * self.radius
    }
}
