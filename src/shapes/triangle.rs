// Copyright @yucwang 2023

use crate::core::computation_node::ComputationNode;
use crate::core::shape::Shape;
use crate::core::interaction::{ SurfaceIntersection, SurfaceSampleRecord };
use crate::math::aabb::AABB;
use crate::math::constants:: { Float, Vector2f, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::warp::square_to_triangle;

use std::option::Option;

// Determinant threshold below which the ray is treated as parallel.
const PARALLEL_EPSILON: Float = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    p0: Vector3f,
    p1: Vector3f,
    p2: Vector3f,
    normal: Vector3f,
    area: Float,
}

impl ComputationNode for Triangle {
    fn describe(&self) -> String {
        format!("Triangle: area {:.3}", self.area)
    }
}

impl Shape for Triangle {
    fn bounding_box(&self) -> AABB {
        let mut bound = AABB::new(self.p0, self.p1);
        bound.expand_by_point(&self.p2);

        bound
    }

    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        // Möller-Trumbore, two-sided.
        let edge0 = self.p1 - self.p0;
        let edge1 = self.p2 - self.p0;
        let pvec = ray.dir().cross(&edge1);
        let det = edge0.dot(&pvec);
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let tvec = ray.origin() - self.p0;
        let b1 = tvec.dot(&pvec) * inv_det;
        if b1 < 0.0 || b1 > 1.0 {
            return None;
        }

        let qvec = tvec.cross(&edge0);
        let b2 = ray.dir().dot(&qvec) * inv_det;
        if b2 < 0.0 || b1 + b2 > 1.0 {
            return None;
        }

        let t = edge1.dot(&qvec) * inv_det;
        if !ray.test_segment(t) {
            return None;
        }

        let p = self.p0 * (1.0 - b1 - b2) + self.p1 * b1 + self.p2 * b2;
        Some(SurfaceIntersection::new(p, self.normal, t))
    }

    fn sample(&self, u: &Vector2f) -> SurfaceSampleRecord {
        let bary = square_to_triangle(u);
        let p = self.p0 * bary.x + self.p1 * bary.y + self.p2 * bary.z;
        let pdf = if self.area > 0.0 { 1.0 / self.area } else { 0.0 };

        SurfaceSampleRecord::new(SurfaceIntersection::new(p, self.normal, 0.0), pdf)
    }

    fn surface_area(&self) -> Float {
        self.area
    }
}

impl Triangle {
    pub fn new(new_p0: Vector3f, new_p1: Vector3f, new_p2: Vector3f) -> Self {
        let cross = (new_p1 - new_p0).cross(&(new_p2 - new_p0));
        let norm = cross.norm();
        let normal = if norm > 0.0 { cross / norm } else { Vector3f::new(0.0, 0.0, 1.0) };
        Triangle {
            p0: new_p0,
            p1: new_p1,
            p2: new_p2,
            normal,
            area: 0.5 * norm,
        }
    }

    /// Builds the triangle with its winding flipped if needed so the normal
    /// points to the side of `toward`.
    pub fn facing(p0: Vector3f, p1: Vector3f, p2: Vector3f, toward: &Vector3f) -> Self {
        let tri = Triangle::new(p0, p1, p2);
        if tri.normal.dot(&(toward - p0)) < 0.0 {
            Triangle::new(p0, p2, p1)
        } else {
            tri
        }
    }

    pub fn geometric_normal(&self) -> Vector3f {
        self.normal
    }

    pub fn vertices(&self) -> (Vector3f, Vector3f, Vector3f) {
        (self.p0, self.p1, self.p2)
    }

    pub fn centroid(&self) -> Vector3f {
        (self.p0 + self.p1 + self.p2) / 3.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box1() {
        let p0 = Vector3f::new(1.0, 1.0, 1.0);
        let p1 = Vector3f::new(1.5, 4.0, -1.0);
        let p2 = Vector3f::new(-1.0, 2.0, 2.5);

        let triangle = Triangle::new(p0, p1, p2);
        let bounding_box = triangle.bounding_box();

        assert_eq!(bounding_box.p_min, Vector3f::new(-1.0, 1.0, -1.0));
        assert_eq!(bounding_box.p_max, Vector3f::new(1.5, 4.0, 2.5));
    }

    #[test]
    fn test_ray_intersection_both_sides() {
        let triangle = Triangle::new(Vector3f::new(1.0, 1.0, 0.0),
                                     Vector3f::new(2.0, 2.0, 0.0),
                                     Vector3f::new(2.0, 1.0, 0.0));

        let down = Ray3f::new(Vector3f::new(1.5, 1.1, 3.0),
            Vector3f::new(0.0, 0.0, -1.0),
            None,
            None);
        let away = Ray3f::new(Vector3f::new(1.5, 1.1, 3.0),
            Vector3f::new(0.0, 0.0, 1.0),
            None,
            None);
        let up = Ray3f::new(Vector3f::new(1.5, 1.1, -2.0),
            Vector3f::new(0.0, 0.0, 1.0),
            None,
            None);
        let outside = Ray3f::new(Vector3f::new(1.5, 2.0, 3.0),
            Vector3f::new(0.0, 0.0, -1.0),
            None,
            None);

        let hit = triangle.ray_intersection(&down).expect("expected hit");
        assert!((hit.t() - 3.0).abs() < 1e-5);
        assert!((hit.p() - Vector3f::new(1.5, 1.1, 0.0)).norm() < 1e-5);
        assert!(triangle.ray_intersection(&away).is_none());
        assert!((triangle.ray_intersection(&up).expect("expected hit").t() - 2.0).abs() < 1e-5);
        assert!(triangle.ray_intersection(&outside).is_none());
    }

    #[test]
    fn test_ray_respects_segment() {
        let triangle = Triangle::new(Vector3f::new(0.0, 0.0, 0.0),
                                     Vector3f::new(1.0, 0.0, 0.0),
                                     Vector3f::new(0.0, 1.0, 0.0));
        let ray = Ray3f::new(Vector3f::new(0.2, 0.2, 1.0), Vector3f::new(0.0, 0.0, -1.0), None, Some(0.5));
        assert!(triangle.ray_intersection(&ray).is_none());

        let spawned = Ray3f::spawn(Vector3f::new(0.2, 0.2, 0.0), Vector3f::new(0.0, 0.3, 1.0));
        assert!(triangle.ray_intersection(&spawned).is_none());
    }

    #[test]
    fn test_facing_orients_normal() {
        let a = Vector3f::new(0.0, 0.0, 0.0);
        let b = Vector3f::new(1.0, 0.0, 0.0);
        let c = Vector3f::new(0.0, 0.0, 1.0);
        let above = Vector3f::new(0.3, 5.0, 0.3);
        let below = Vector3f::new(0.3, -5.0, 0.3);
        assert!(Triangle::facing(a, b, c, &above).geometric_normal().y > 0.99);
        assert!(Triangle::facing(a, b, c, &below).geometric_normal().y < -0.99);
    }

    #[test]
    fn test_sample_lies_on_triangle() {
        let triangle = Triangle::new(Vector3f::new(0.0, 0.0, 0.0),
                                     Vector3f::new(4.0, 0.0, 0.0),
                                     Vector3f::new(0.0, 2.0, 0.0));
        assert!((triangle.surface_area() - 4.0).abs() < 1e-6);

        for i in 0..10 {
            let u = Vector2f::new(i as Float / 10.0, 1.0 - i as Float / 10.0);
            let record = triangle.sample(&u);
            let p = record.intersection().p();
            assert!(p.z.abs() < 1e-6);
            assert!(p.x >= 0.0 && p.y >= 0.0 && p.x / 4.0 + p.y / 2.0 <= 1.0 + 1e-5);
            assert!((record.pdf() - 0.25).abs() < 1e-6);
        }
    }
}
