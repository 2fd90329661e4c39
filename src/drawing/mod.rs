//! Raster drawing on packed RGB buffers
//!
//! - Lines and closed contour outlines with a round brush
//! - Text with a built-in 5x7 bitmap font

/// Built-in 5x7 glyphs
pub mod font;
/// Pixels, rectangles, lines and contour outlines
pub mod shapes;
/// Text rendering with the bitmap font
pub mod text;

pub use shapes::{draw_contours, draw_line, fill_rect};
pub use text::put_text;
