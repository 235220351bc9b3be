// Copyright 2020 @TwoCookingMice

use super::constants::{EPSILON, Float, Vector3f};

/// A ray with a unit-length direction and a valid parametric segment
/// `[min_t, max_t]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray3f {
    origin: Vector3f,
    dir: Vector3f,
    pub min_t: Float,
    pub max_t: Float
}

impl Ray3f {
    pub fn new(o: Vector3f, d: Vector3f,
               min_t: Option<Float>, max_t: Option<Float>) -> Self {
        Self { origin: o, dir: d.normalize(),
               min_t: min_t.unwrap_or(0.0),
               max_t: max_t.unwrap_or(std::f32::INFINITY)}
    }

    /// Ray leaving a surface point. Hits closer than `EPSILON` are ignored so
    /// the surface the ray starts on is not reported again.
    pub fn spawn(p: Vector3f, d: Vector3f) -> Self {
        Self::new(p, d, Some(EPSILON), None)
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn dir(&self) -> Vector3f {
        self.dir
    }

    pub fn at(&self, t: Float) -> Vector3f {
        self.origin + self.dir * t
    }

    pub fn update(&mut self, t: Float) -> bool {
        if t < self.min_t || t > self.max_t {
            false
        } else {
            self.max_t = t;
            true
        }
    }

    pub fn test_segment(&self, t: Float) -> bool {
        t >= self.min_t && t <= self.max_t
    }
}

#[cfg(test)]
mod tests {
    use super::Vector3f;
    use super::Ray3f;

    #[test]
    fn test_ray3f() {
        let o = Vector3f::new(0.0, 0.0, 0.0);
        let d = Vector3f::new(1.0, 0.0, 1.0);
        let mut ray = Ray3f::new(o, d, None, None);
        assert_eq!(o, ray.origin());
        assert!((ray.dir().norm() - 1.0).abs() < 1e-6);

        let v1 = ray.at(2.0);
        assert!((v1[0] - std::f32::consts::SQRT_2).abs() < 1e-5);
        assert!(v1[1].abs() < 1e-6);
        assert!((v1[2] - std::f32::consts::SQRT_2).abs() < 1e-5);

        let status1 = ray.update(100.0);
        let status2 = ray.update(105.0);
        assert_eq!(status1, true);
        assert_eq!(status2, false);
        assert!(ray.test_segment(50.0));
        assert!(!ray.test_segment(101.0));
    }

    #[test]
    fn test_spawned_ray_skips_origin() {
        let ray = Ray3f::spawn(Vector3f::zeros(), Vector3f::new(0.0, 3.0, 0.0));
        assert!(!ray.test_segment(0.0));
        assert!(ray.test_segment(1.0));
        assert_eq!(ray.dir(), Vector3f::new(0.0, 1.0, 0.0));
    }
}
