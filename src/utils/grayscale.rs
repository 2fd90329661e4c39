//! Convert RGB image to grayscale
//! Y = 0.299*R + 0.587*G + 0.114*B
//! Uses fast integer arithmetic: Y = (77*R + 150*G + 29*B + 128) >> 8
//!
//! The coefficients sum to 256, so pure white maps to 255 and pure black to 0.
use rayon::prelude::*;

/// Coefficients for grayscale conversion, in 1/256 units
const COEF_R: u32 = 77;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;
const ROUND: u32 = 128;

#[inline(always)]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32 + ROUND) >> 8) as u8
}

/// Convert RGB image to grayscale
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    rgb_to_grayscale_with_buffer(rgb, width, height, &mut gray);
    gray
}

/// Convert RGB to grayscale into a pre-allocated buffer (no allocation)
///
/// # Arguments
/// * `rgb` - Input RGB image data
/// * `width` - Image width
/// * `height` - Image height
/// * `output` - Output buffer (must have length >= width * height)
///
/// # Returns
/// Number of pixels written (width * height)
pub fn rgb_to_grayscale_with_buffer(
    rgb: &[u8],
    width: usize,
    height: usize,
    output: &mut [u8],
) -> usize {
    let pixel_count = width * height;
    assert!(output.len() >= pixel_count, "Output buffer too small");

    // Process 8 pixels at a time so the optimizer can vectorize the body
    let mut chunks = rgb[..pixel_count * 3].chunks_exact(24);
    let mut out_chunks = output[..pixel_count].chunks_exact_mut(8);
    for (src, dst) in (&mut chunks).zip(&mut out_chunks) {
        for j in 0..8 {
            dst[j] = luma(src[j * 3], src[j * 3 + 1], src[j * 3 + 2]);
        }
    }

    // Process remaining pixels
    for (px, dst) in chunks
        .remainder()
        .chunks_exact(3)
        .zip(out_chunks.into_remainder())
    {
        *dst = luma(px[0], px[1], px[2]);
    }

    pixel_count
}

// ============== Parallel Processing with Rayon ==============

/// Convert RGB to grayscale using parallel processing
/// Processes rows in parallel for multi-core speedup
pub fn rgb_to_grayscale_parallel(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    if width == 0 {
        return gray;
    }

    gray.par_chunks_mut(width)
        .zip(rgb.par_chunks(width * 3))
        .take(height)
        .for_each(|(row, src)| {
            for (dst, px) in row.iter_mut().zip(src.chunks_exact(3)) {
                *dst = luma(px[0], px[1], px[2]);
            }
        });

    gray
}
