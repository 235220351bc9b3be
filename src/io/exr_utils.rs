/* Copyright 2020 @TwoCookingMice */

use crate::core::error::Result;
use crate::math::bitmap::Bitmap;
use crate::math::constants::Vector3f;

use exr::prelude::*;
use std::path::Path;

// Write linear radiance as float RGB.
pub fn write_exr_to_file<P: AsRef<Path>>(bitmap: &Bitmap, file_path: P) -> Result<()> {
    let file_path = file_path.as_ref();
    log::info!("Starting writing openexr images: {}.", file_path.display());

    write_rgb_file(file_path, bitmap.width(), bitmap.height(), |x, y| {
        let c = bitmap[(x, y)];
        (c.x, c.y, c.z)
    })?;

    log::info!("EXR written to: {}.", file_path.display());
    Ok(())
}
