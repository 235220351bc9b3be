// Copyright @yucwang 2021

pub mod exr_utils;
pub mod image_utils;
pub mod obj_utils;
pub mod ppm;

use crate::core::error::Result;
use crate::math::bitmap::Bitmap;
use std::path::Path;

/// Writes `bitmap` in the format named by the file extension: `exr` keeps
/// linear radiance, `png`/`jpg`/`bmp`/`tga` go through `image`, anything else
/// is written as PPM.
pub fn write_image<P: AsRef<Path>>(bitmap: &Bitmap, path: P) -> Result<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("exr") => exr_utils::write_exr_to_file(bitmap, path),
        Some("png") | Some("jpg") | Some("jpeg") | Some("bmp") | Some("tga") => {
            image_utils::write_ldr_to_file(bitmap, path)
        }
        _ => ppm::write_ppm_to_file(bitmap, path),
    }
}
