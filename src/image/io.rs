//! I/O helpers for the demo tools.
//!
//! - `load_feature_map`: read a PNG/JPEG/etc. as grayscale and lift it into a
//!   `(1, C, H, W)` map, the plane replicated into every channel.
//! - `save_plane_png`: write one `(n, c)` plane to a grayscale PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::tensor::{FeatureMap, Plane, Shape4};
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Lift an 8-bit grayscale buffer into a `(1, channels, height, width)` map
/// with values scaled to [0, 1].
pub fn feature_map_from_gray(
    width: usize,
    height: usize,
    gray: &[u8],
    channels: usize,
) -> Result<FeatureMap, String> {
    let plane_len = width * height;
    if gray.len() != plane_len {
        return Err(format!(
            "Gray buffer holds {} bytes, expected {}",
            gray.len(),
            plane_len
        ));
    }
    let mut data = Vec::with_capacity(plane_len * channels);
    for _ in 0..channels {
        data.extend(gray.iter().map(|&px| px as f32 / 255.0));
    }
    FeatureMap::from_vec(Shape4::new(1, channels, height, width), data).map_err(|e| e.to_string())
}

/// Load an image from disk as a `(1, channels, H, W)` feature map.
pub fn load_feature_map(path: &Path, channels: usize) -> Result<FeatureMap, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    feature_map_from_gray(width, height, img.as_raw(), channels)
}

/// Save a plane to a grayscale PNG as `clamp(v * scale, 0, 1) * 255`.
pub fn save_plane_png(plane: Plane<'_>, scale: f32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(plane.width() as u32, plane.height() as u32);
    for y in 0..plane.height() {
        for (x, &v) in plane.row(y).iter().enumerate() {
            let px = ((v * scale).clamp(0.0, 1.0) * 255.0).round();
            out.put_pixel(x as u32, y as u32, Luma([px as u8]));
        }
    }
    out.save(path)
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
