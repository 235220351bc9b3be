// Copyright @yucwang 2026

use crate::core::bvh::SplitMethod;
use crate::core::error::{RenderError, Result};
use crate::math::constants::{Float, Vector3f};

/// Everything the core needs to turn a scene into a framebuffer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub width: usize,
    pub height: usize,
    /// Vertical field of view in degrees.
    pub fov: Float,
    pub eye: Vector3f,
    pub max_depth: u32,
    /// Probability of continuing a path at each bounce, in (0, 1].
    pub russian_roulette: Float,
    pub samples_per_pixel: u32,
    pub seed: u64,
    /// Worker count; `None` uses the hardware concurrency.
    pub threads: Option<usize>,
    pub max_leaf_size: usize,
    pub split_method: SplitMethod,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 784,
            height: 784,
            fov: 40.0,
            eye: Vector3f::new(278.0, 273.0, -800.0),
            max_depth: 1,
            russian_roulette: 0.8,
            samples_per_pixel: 16,
            seed: 0,
            threads: None,
            max_leaf_size: 1,
            split_method: SplitMethod::Naive,
        }
    }
}

impl RenderSettings {
    pub fn with_resolution(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_spp(mut self, spp: u32) -> Self {
        self.samples_per_pixel = spp;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn aspect(&self) -> Float {
        self.width as Float / self.height as Float
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidSettings(format!(
                "image size must be non-zero, got {}x{}", self.width, self.height)));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidSettings("samples per pixel must be at least 1".into()));
        }
        if !(self.russian_roulette > 0.0 && self.russian_roulette <= 1.0) {
            return Err(RenderError::InvalidSettings(format!(
                "russian roulette probability must lie in (0, 1], got {}", self.russian_roulette)));
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(RenderError::InvalidSettings(format!(
                "field of view must lie in (0, 180) degrees, got {}", self.fov)));
        }
        if self.threads == Some(0) {
            return Err(RenderError::InvalidSettings("thread count must be at least 1".into()));
        }
        Ok(())
    }
}
