use image::Rgb;

use super::font::{ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH, cell_lit, glyph};
use super::shapes::fill_rect;
use crate::models::PointI;

/// Font cell size in pixels at scale 1.0
const CELL_PX_AT_UNIT_SCALE: f32 = 3.0;

/// Side length in pixels of one font cell at the given scale
pub fn cell_size(scale: f32) -> i32 {
    ((CELL_PX_AT_UNIT_SCALE * scale).round() as i32).max(1)
}

/// Pixel size (width, height) of a rendered string, excluding thickness growth
pub fn text_size(text: &str, scale: f32) -> (i32, i32) {
    let cell = cell_size(scale);
    let chars = text.chars().count() as i32;
    let width = if chars == 0 {
        0
    } else {
        (chars * ADVANCE as i32 - 1) * cell
    };
    (width, GLYPH_HEIGHT as i32 * cell)
}

/// Render `text` with the built-in bitmap font
///
/// `origin` is the bottom-left corner of the text: the bottom row of every
/// glyph sits on `origin.y`. Each lit font cell becomes a square of
/// [`cell_size`] pixels, grown by `(thickness - 1) / 2` pixels on every side.
#[allow(clippy::too_many_arguments)]
pub fn put_text(
    rgb: &mut [u8],
    width: usize,
    height: usize,
    text: &str,
    origin: PointI,
    scale: f32,
    color: Rgb<u8>,
    thickness: u32,
) {
    let cell = cell_size(scale);
    let grow = (thickness.max(1) as i32 - 1) / 2;
    let top = origin.y - GLYPH_HEIGHT as i32 * cell + 1;

    for (i, c) in text.chars().enumerate() {
        let g = glyph(c);
        let left = origin.x + (i * ADVANCE) as i32 * cell;
        for col in 0..GLYPH_WIDTH {
            for row in 0..GLYPH_HEIGHT {
                if !cell_lit(g, col, row) {
                    continue;
                }
                let x0 = left + col as i32 * cell;
                let y0 = top + row as i32 * cell;
                fill_rect(
                    rgb,
                    width,
                    height,
                    PointI::new(x0 - grow, y0 - grow),
                    PointI::new(x0 + cell - 1 + grow, y0 + cell - 1 + grow),
                    color,
                );
            }
        }
    }
}
