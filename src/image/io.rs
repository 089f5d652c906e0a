//! I/O helpers for raster bands, masks and JSON.
//!
//! - `load_bands`: read a PNG/JPEG/TIFF into one owned 8-bit buffer per band.
//! - `save_mask_png`: write a `BitGrid` as a black/white PNG.
//! - `save_rgb_png`: write an RGB debug canvas.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{BandU8, BitGrid};
use image::{ColorType, GrayImage, Luma, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image and split it into 8-bit bands (1 for gray, 3 for RGB, 4 for RGBA).
pub fn load_bands(path: &Path) -> Result<Vec<BandU8>, String> {
    let img = image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    let (w, h) = (img.width() as usize, img.height() as usize);
    let channels = match img.color() {
        ColorType::L8 | ColorType::L16 => 1usize,
        ColorType::La8 | ColorType::La16 => 2,
        ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => 4,
        _ => 3,
    };
    let interleaved = match channels {
        1 => img.into_luma8().into_raw(),
        2 => img.into_luma_alpha8().into_raw(),
        4 => img.into_rgba8().into_raw(),
        _ => img.into_rgb8().into_raw(),
    };
    let bands = (0..channels)
        .map(|c| {
            let data = interleaved
                .iter()
                .skip(c)
                .step_by(channels)
                .copied()
                .collect::<Vec<u8>>();
            BandU8::new(w, h, data)
        })
        .collect();
    Ok(bands)
}

/// Save a mask as a grayscale PNG (valid = 255).
pub fn save_mask_png(mask: &BitGrid, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(mask.width() as u32, mask.height() as u32);
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            let v = if mask.get(x, y) { 255u8 } else { 0u8 };
            out.put_pixel(x as u32, y as u32, Luma([v]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

pub fn save_rgb_png(image: &RgbImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
