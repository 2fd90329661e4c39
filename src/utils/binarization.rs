use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// How a pixel compares against the threshold level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMode {
    /// `v > level` becomes `max_value`, everything else 0
    Binary,
    /// `v > level` becomes 0, everything else `max_value`
    #[default]
    BinaryInv,
}

impl ThresholdMode {
    #[inline(always)]
    fn apply(self, value: u8, level: u8, max_value: u8) -> u8 {
        let above = value > level;
        match (self, above) {
            (ThresholdMode::Binary, true) | (ThresholdMode::BinaryInv, false) => max_value,
            _ => 0,
        }
    }
}

/// Global threshold of a grayscale image into an 8-bit mask
///
/// The comparison is strict: a pixel equal to `level` counts as "not above".
pub fn threshold(
    gray: &[u8],
    width: usize,
    height: usize,
    level: u8,
    max_value: u8,
    mode: ThresholdMode,
) -> Vec<u8> {
    let pixel_count = width * height;
    let mut out = vec![0u8; pixel_count];
    out.par_iter_mut()
        .zip(gray[..pixel_count].par_iter())
        .for_each(|(dst, &v)| *dst = mode.apply(v, level, max_value));
    out
}

/// Calculate Otsu's optimal threshold
///
/// Returns the level `t` that maximises the between-class variance when the
/// classes are `v <= t` and `v > t`, matching the strict comparison used by
/// [`threshold`].
pub fn otsu_threshold(gray: &[u8]) -> u8 {
    // Build histogram
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total = gray.len() as f64;
    if total == 0.0 {
        return 0;
    }
    let sum_all: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut weight_low = 0.0f64;
    let mut sum_low = 0.0f64;
    let mut max_variance = 0.0f64;
    let mut optimal = 0u8;

    for t in 0..256usize {
        weight_low += histogram[t] as f64;
        if weight_low == 0.0 {
            continue;
        }
        let weight_high = total - weight_low;
        if weight_high == 0.0 {
            break;
        }
        sum_low += t as f64 * histogram[t] as f64;

        let mean_low = sum_low / weight_low;
        let mean_high = (sum_all - sum_low) / weight_high;
        let variance = weight_low * weight_high * (mean_low - mean_high).powi(2);

        if variance > max_variance {
            max_variance = variance;
            optimal = t as u8;
        }
    }

    optimal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_inverse_is_strict() {
        let gray = vec![224, 225, 226, 0];
        let mask = threshold(&gray, 4, 1, 225, 255, ThresholdMode::BinaryInv);
        assert_eq!(mask, vec![255, 255, 0, 255]);

        let mask = threshold(&gray, 4, 1, 225, 255, ThresholdMode::Binary);
        assert_eq!(mask, vec![0, 0, 255, 0]);
    }

    #[test]
    fn test_threshold_custom_max_value() {
        let mask = threshold(&[10, 240], 2, 1, 128, 7, ThresholdMode::Binary);
        assert_eq!(mask, vec![0, 7]);
    }

    #[test]
    fn test_otsu_threshold() {
        // Create a simple two-class image
        let mut gray = vec![50u8; 50]; // Dark class
        gray.extend(vec![200u8; 50]); // Light class

        let t = otsu_threshold(&gray);
        assert!((50..200).contains(&t));

        let mask = threshold(&gray, 10, 10, t, 255, ThresholdMode::Binary);
        assert_eq!(mask[0], 0); // Dark
        assert_eq!(mask[70], 255); // Light
    }

    #[test]
    fn test_otsu_uniform_image() {
        assert_eq!(otsu_threshold(&[90u8; 16]), 0);
        assert_eq!(otsu_threshold(&[]), 0);
    }
}
