//! Human-facing views of a field: ASCII art for the terminal and an 8-bit
//! grayscale PNG.

use anyhow::{Context, Result};
use image::{GrayImage, Luma};
use std::fs;
use std::path::Path;
use tilenoise_field::NoiseField;

const RAMP: &[u8] = b" .:-=+*#%@";

/// Map a height to a gray level, clamping to `[0, 1]` first.
pub fn gray_level(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Render `field` as ASCII art, one character per cell.
pub fn ascii_preview(field: &NoiseField) -> String {
    let mut out = String::with_capacity((field.width() + 1) * field.height());
    for y in 0..field.height() {
        for &value in field.row(y) {
            let idx = (value.clamp(0.0, 1.0) * (RAMP.len() - 1) as f32).round() as usize;
            out.push(RAMP[idx] as char);
        }
        out.push('\n');
    }
    out
}

/// Build a grayscale image of `field`.
pub fn to_gray_image(field: &NoiseField) -> GrayImage {
    GrayImage::from_fn(field.width() as u32, field.height() as u32, |x, y| {
        Luma([gray_level(field.get(x as usize, y as usize))])
    })
}

/// Write `field` as a grayscale PNG at `path`.
pub fn write_png(field: &NoiseField, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {parent:?}"))?;
        }
    }
    to_gray_image(field)
        .save(path)
        .with_context(|| format!("Failed to write preview to {}", path.display()))
}
