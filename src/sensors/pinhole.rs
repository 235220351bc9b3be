// Copyright @yucwang 2026

use crate::core::sensor::Sensor;
use crate::core::settings::RenderSettings;
use crate::math::constants::{deg_to_rad, Float, Vector3f};
use crate::math::ray::Ray3f;

/// Fixed pinhole at `eye` looking down +z. Image x grows to the left in
/// world space, so the generated direction carries `-x`.
pub struct PinholeCamera {
    eye: Vector3f,
    scale: Float,
    aspect: Float,
    width: usize,
    height: usize,
}

impl PinholeCamera {
    pub fn new(eye: Vector3f, fov_deg: Float, width: usize, height: usize) -> Self {
        Self {
            eye,
            scale: deg_to_rad(fov_deg * 0.5).tan(),
            aspect: width as Float / height.max(1) as Float,
            width,
            height,
        }
    }

    pub fn from_settings(settings: &RenderSettings) -> Self {
        Self::new(settings.eye, settings.fov, settings.width, settings.height)
    }

    pub fn eye(&self) -> Vector3f {
        self.eye
    }
}

impl Sensor for PinholeCamera {
    fn primary_ray(&self, i: usize, j: usize) -> Ray3f {
        let x = (2.0 * (i as Float + 0.5) / self.width as Float - 1.0) * self.aspect * self.scale;
        let y = (1.0 - 2.0 * (j as Float + 0.5) / self.height as Float) * self.scale;
        Ray3f::new(self.eye, Vector3f::new(-x, y, 1.0), None, None)
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn describe(&self) -> String {
        format!("PinholeCamera: eye ({}, {}, {}), {}x{}, tan(fov/2) {:.4}",
                self.eye.x, self.eye.y, self.eye.z, self.width, self.height, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinhole_center_ray() {
        // Odd resolution puts a pixel centre exactly on the optical axis.
        let cam = PinholeCamera::new(Vector3f::new(278.0, 273.0, -800.0), 40.0, 5, 5);
        let ray = cam.primary_ray(2, 2);
        assert_eq!(ray.origin(), Vector3f::new(278.0, 273.0, -800.0));
        assert!(ray.dir().x.abs() < 1e-6);
        assert!(ray.dir().y.abs() < 1e-6);
        assert!((ray.dir().z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pinhole_pixel_mapping() {
        let (w, h) = (8usize, 4usize);
        let cam = PinholeCamera::new(Vector3f::zeros(), 90.0, w, h);
        let scale = deg_to_rad(45.0).tan();
        let aspect = 2.0;

        let ray = cam.primary_ray(0, 0);
        let x = (2.0 * 0.5 / w as Float - 1.0) * aspect * scale;
        let y = (1.0 - 2.0 * 0.5 / h as Float) * scale;
        let expected = Vector3f::new(-x, y, 1.0).normalize();
        assert!((ray.dir() - expected).norm() < 1e-6);

        // Leftmost column looks towards +x, top row looks up.
        assert!(ray.dir().x > 0.0 && ray.dir().y > 0.0);
        let corner = cam.primary_ray(w - 1, h - 1);
        assert!(corner.dir().x < 0.0 && corner.dir().y < 0.0);
        assert!((corner.dir().norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pinhole_from_settings() {
        let settings = RenderSettings::default().with_resolution(16, 9);
        let cam = PinholeCamera::from_settings(&settings);
        assert_eq!(cam.width(), 16);
        assert_eq!(cam.height(), 9);
        assert_eq!(cam.eye(), settings.eye);
    }
}
