// Copyright @yucwang 2026

use crate::core::bvh::SplitMethod;
use crate::core::error::Result;
use crate::core::scene::Scene;
use crate::core::settings::RenderSettings;
use crate::math::constants::Float;
use crate::scenes::cornell_box::{build_cornell_box, load_cornell_box, CornellVariant};

use clap::Args;
use std::path::PathBuf;

/// Scene and sampling flags shared by the binaries.
#[derive(Args, Debug, Clone)]
pub struct SceneArgs {
    /// Samples per pixel
    #[arg(long, default_value_t = 16)]
    pub spp: u32,

    #[arg(long, default_value_t = 784)]
    pub width: usize,

    #[arg(long, default_value_t = 784)]
    pub height: usize,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 40.0)]
    pub fov: Float,

    #[arg(long, default_value_t = 1)]
    pub max_depth: u32,

    /// Russian roulette continuation probability
    #[arg(long, default_value_t = 0.8)]
    pub rr: Float,

    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Worker threads (defaults to the hardware concurrency)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Directory holding the Cornell box OBJ models; the built-in box is used otherwise
    #[arg(long)]
    pub models: Option<PathBuf>,

    /// Cornell box materials: classic or glossy
    #[arg(long, default_value = "classic")]
    pub scene: CornellVariant,

    /// BVH split method: naive or sah
    #[arg(long, default_value = "naive")]
    pub split: SplitMethod,

    #[arg(long, default_value_t = 1)]
    pub max_leaf_size: usize,
}

impl SceneArgs {
    pub fn settings(&self) -> RenderSettings {
        RenderSettings {
            width: self.width,
            height: self.height,
            fov: self.fov,
            max_depth: self.max_depth,
            russian_roulette: self.rr,
            samples_per_pixel: self.spp,
            seed: self.seed,
            threads: self.threads,
            max_leaf_size: self.max_leaf_size,
            split_method: self.split,
            ..RenderSettings::default()
        }
    }

    /// Validated settings plus the Cornell box scene they describe.
    pub fn build_scene(&self) -> Result<Scene> {
        let settings = self.settings();
        settings.validate()?;
        match &self.models {
            Some(dir) => load_cornell_box(dir, settings, self.scene),
            None => Ok(build_cornell_box(settings, self.scene)),
        }
    }
}

/// Process exit code for a finished run. A failure is logged once here and
/// maps to 1.
pub fn exit_status(result: &Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            log::error!("{}", err);
            1
        }
    }
}
