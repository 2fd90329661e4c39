//! Feature extraction on grayscale and binary images
//!
//! - Edge detection (Sobel gradients + Canny hysteresis)
//! - Connected component labelling (union-find, 8-connectivity)
//! - Contour tracing (outer borders, external-only or all components)

/// Connected component labelling and region bounding boxes
pub mod connected_components;
/// Boundary tracing of connected components
pub mod contour;
/// Sobel gradients and Canny edge detection
pub mod edges;
