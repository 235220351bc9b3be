// Copyright @yucwang 2026

use crate::math::ray::Ray3f;

pub trait Sensor: Sync {
    /// Primary ray through the centre of pixel `(i, j)`, row 0 at the top.
    fn primary_ray(&self, i: usize, j: usize) -> Ray3f;
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn describe(&self) -> String {
        String::from("Sensor")
    }
}
