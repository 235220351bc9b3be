// Copyright @yucwang 2026

use crate::core::error::Result;
use crate::math::bitmap::Bitmap;
use crate::math::constants::Float;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Display gamma applied before quantising a linear channel.
pub const DISPLAY_GAMMA: Float = 0.6;

/// Clamps to [0, 1], applies the display gamma and truncates to a byte.
pub fn encode_channel(v: Float) -> u8 {
    (255.0 * v.clamp(0.0, 1.0).powf(DISPLAY_GAMMA)) as u8
}

/// Binary PPM (P6): ASCII header followed by packed RGB bytes, top row first.
pub fn write_ppm<W: Write>(bitmap: &Bitmap, writer: &mut W) -> std::io::Result<()> {
    write!(writer, "P6\n{} {}\n255\n", bitmap.width(), bitmap.height())?;
    let bytes: Vec<u8> = bitmap
        .pixels()
        .iter()
        .flat_map(|c| [encode_channel(c.x), encode_channel(c.y), encode_channel(c.z)])
        .collect();
    writer.write_all(&bytes)?;
    writer.flush()
}

pub fn write_ppm_to_file<P: AsRef<Path>>(bitmap: &Bitmap, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_ppm(bitmap, &mut writer)?;
    log::info!("PPM written to: {}.", path.display());
    Ok(())
}
