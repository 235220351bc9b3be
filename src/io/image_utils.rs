// Copyright @yucwang 2026

use super::ppm::encode_channel;
use crate::core::error::Result;
use crate::math::bitmap::Bitmap;

use image::{Rgb, RgbImage};
use std::path::Path;

/// 8-bit display image with the same tone mapping as the PPM writer.
pub fn to_rgb_image(bitmap: &Bitmap) -> RgbImage {
    RgbImage::from_fn(bitmap.width() as u32, bitmap.height() as u32, |x, y| {
        let c = bitmap[(x as usize, y as usize)];
        Rgb([encode_channel(c.x), encode_channel(c.y), encode_channel(c.z)])
    })
}

/// Writes any LDR format the `image` crate infers from the extension.
pub fn write_ldr_to_file<P: AsRef<Path>>(bitmap: &Bitmap, path: P) -> Result<()> {
    let path = path.as_ref();
    to_rgb_image(bitmap).save(path)?;
    log::info!("Image written to: {}.", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::constants::Vector3f;

    #[test]
    fn test_png_written_with_display_encoding() {
        let mut bitmap = Bitmap::new(2, 2);
        bitmap[(1, 0)] = Vector3f::new(1.0, 0.5, 0.0);

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.png");
        write_ldr_to_file(&bitmap, &path).expect("png write");

        let loaded = image::open(&path).expect("png read").to_rgb8();
        assert_eq!(loaded.dimensions(), (2, 2));
        assert_eq!(loaded.get_pixel(1, 0), &Rgb([255, 168, 0]));
        assert_eq!(loaded.get_pixel(0, 1), &Rgb([0, 0, 0]));
    }
}
