//! PNG export of a rasterized world.
//!
//! This module is feature-gated behind `png` (default on). The buffer comes
//! from [`Grid::rasterize`](wgen_core::Grid::rasterize) or [`World::image`](crate::World::image).

use log::info;
use std::path::Path;
use wgen_core::WorldError;

/// Writes a row-major RGBA8 buffer as a `width x height` PNG.
///
/// Returns `WorldError::InvalidDimensions` if the dimensions overflow `u32`,
/// or `WorldError::Io` if the buffer length does not match or the write fails.
pub fn write_png(pixels: &[u8], width: usize, height: usize, path: &Path) -> Result<(), WorldError> {
    let w = u32::try_from(width).map_err(|_| WorldError::InvalidDimensions)?;
    let h = u32::try_from(height).map_err(|_| WorldError::InvalidDimensions)?;
    let expected = width
        .checked_mul(height)
        .and_then(|cells| cells.checked_mul(4))
        .ok_or(WorldError::InvalidDimensions)?;
    if pixels.len() != expected {
        return Err(WorldError::Io(format!(
            "RGBA buffer holds {} bytes, expected {expected} for {width}x{height}",
            pixels.len()
        )));
    }
    let img = image::RgbaImage::from_raw(w, h, pixels.to_vec())
        .ok_or_else(|| WorldError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| WorldError::Io(e.to_string()))?;
    info!("wrote {}x{} snapshot to {}", width, height, path.display());
    Ok(())
}
