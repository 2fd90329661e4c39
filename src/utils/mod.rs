//! Utility functions for image processing
//!
//! This module provides the per-pixel kernels of the walkthrough:
//! - Grayscale conversion (RGB to luminance)
//! - Binarization (global threshold, inverse threshold, Otsu's level)
//! - Morphology (erosion and dilation with a structuring element)
//! - Masking (bitwise AND of a colour image under a binary mask)

/// Thresholding and Otsu's method
pub mod binarization;
/// Masking
pub mod bitwise;
/// RGB to luminance
pub mod grayscale;
/// Erosion and dilation
pub mod morphology;
