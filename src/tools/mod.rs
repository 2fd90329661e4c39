//! Loading helpers and summary statistics shared by the CLI and the pipeline

use crate::error::Result;
use crate::models::Frame;
use image::GenericImageView;
use log::debug;
use std::env;
use std::path::Path;

/// Parse a `CV_PRIMER_MAX_DIM` value; zero or garbage disables downscaling
fn parse_max_dim(value: &str) -> Option<u32> {
    match value.trim().parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(v) => Some(v),
    }
}

fn max_dim_from_env() -> Option<u32> {
    env::var("CV_PRIMER_MAX_DIM")
        .ok()
        .and_then(|value| parse_max_dim(&value))
}

/// Load an image as an RGB frame.
///
/// Any format the `image` crate can decode is accepted; alpha is dropped.
/// When `CV_PRIMER_MAX_DIM` is set to a non-zero value, images whose longer
/// side exceeds it are downscaled to fit before conversion.
pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<Frame> {
    load_rgb_with_max_dim(path, max_dim_from_env())
}

/// Load an image as an RGB frame, shrinking it so neither side exceeds `max_dim`
///
/// The aspect ratio is preserved. `None` loads at full size.
pub fn load_rgb_with_max_dim<P: AsRef<Path>>(path: P, max_dim: Option<u32>) -> Result<Frame> {
    let path = path.as_ref();
    let img = image::open(path)?;
    let (orig_w, orig_h) = img.dimensions();
    let rgb = match max_dim {
        Some(max_dim) if orig_w.max(orig_h) > max_dim => {
            let resized = img.resize(max_dim, max_dim, image::imageops::FilterType::Triangle);
            debug!(
                "downscaled {} from {}x{} to {}x{}",
                path.display(),
                orig_w,
                orig_h,
                resized.width(),
                resized.height()
            );
            resized.to_rgb8()
        }
        _ => img.to_rgb8(),
    };
    Ok(Frame::from(rgb))
}

/// Summary statistics for grayscale data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrayStats {
    /// Minimum grayscale value.
    pub min: u8,
    /// Maximum grayscale value.
    pub max: u8,
    /// Average grayscale value.
    pub avg: u8,
}

/// Summary statistics for a binary mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskStats {
    /// Count of non-zero (foreground) pixels.
    pub foreground_pixels: usize,
    /// Total pixels in the mask.
    pub total_pixels: usize,
    /// Ratio of foreground pixels to total pixels.
    pub foreground_ratio: f64,
}

/// Compute min/max/avg for grayscale values.
pub fn grayscale_stats(gray: &[u8]) -> GrayStats {
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    for &v in gray {
        min = min.min(v);
        max = max.max(v);
        sum += v as u64;
    }
    if gray.is_empty() {
        return GrayStats {
            min: 0,
            max: 0,
            avg: 0,
        };
    }
    let avg = (sum / gray.len() as u64) as u8;
    GrayStats { min, max, avg }
}

/// Compute foreground pixel stats for an 8-bit mask.
pub fn mask_stats(mask: &[u8]) -> MaskStats {
    let foreground = mask.iter().filter(|&&v| v != 0).count();
    let total = mask.len();
    let ratio = if total == 0 {
        0.0
    } else {
        foreground as f64 / total as f64
    };
    MaskStats {
        foreground_pixels: foreground,
        total_pixels: total,
        foreground_ratio: ratio,
    }
}
