use image::Rgb;

use crate::models::{Contour, PointI};

/// Paint one pixel of a packed RGB buffer, ignoring out-of-range coordinates
#[inline]
pub fn put_pixel(rgb: &mut [u8], width: usize, height: usize, x: i32, y: i32, color: Rgb<u8>) {
    if x < 0 || y < 0 || x as usize >= width || y as usize >= height {
        return;
    }
    let idx = (y as usize * width + x as usize) * 3;
    rgb[idx..idx + 3].copy_from_slice(&color.0);
}

/// Fill an axis-aligned rectangle, inclusive on both ends, clipped to the image
pub fn fill_rect(
    rgb: &mut [u8],
    width: usize,
    height: usize,
    min: PointI,
    max: PointI,
    color: Rgb<u8>,
) {
    let x0 = min.x.max(0);
    let y0 = min.y.max(0);
    let x1 = max.x.min(width as i32 - 1);
    let y1 = max.y.min(height as i32 - 1);
    for y in y0..=y1 {
        for x in x0..=x1 {
            put_pixel(rgb, width, height, x, y, color);
        }
    }
}

/// Stamp a round brush of the given diameter centred on (cx, cy)
fn stamp(rgb: &mut [u8], width: usize, height: usize, c: PointI, thickness: u32, color: Rgb<u8>) {
    if thickness <= 1 {
        put_pixel(rgb, width, height, c.x, c.y, color);
        return;
    }
    let r = thickness as f32 / 2.0;
    let ri = r.ceil() as i32;
    let r2 = r * r;
    for dy in -ri..=ri {
        for dx in -ri..=ri {
            if (dx * dx + dy * dy) as f32 <= r2 {
                put_pixel(rgb, width, height, c.x + dx, c.y + dy, color);
            }
        }
    }
}

/// Draw a line segment with Bresenham's algorithm and a round brush
pub fn draw_line(
    rgb: &mut [u8],
    width: usize,
    height: usize,
    p0: PointI,
    p1: PointI,
    color: Rgb<u8>,
    thickness: u32,
) {
    let dx = (p1.x - p0.x).abs();
    let dy = -(p1.y - p0.y).abs();
    let sx = if p0.x < p1.x { 1 } else { -1 };
    let sy = if p0.y < p1.y { 1 } else { -1 };
    let mut err = dx + dy;
    let mut p = p0;

    loop {
        stamp(rgb, width, height, p, thickness, color);
        if p == p1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            p.x += sx;
        }
        if e2 <= dx {
            err += dx;
            p.y += sy;
        }
    }
}

/// Draw every contour as a closed polyline through its points
pub fn draw_contours(
    rgb: &mut [u8],
    width: usize,
    height: usize,
    contours: &[Contour],
    color: Rgb<u8>,
    thickness: u32,
) {
    for contour in contours {
        let points = contour.points();
        match points.len() {
            0 => {}
            1 => stamp(rgb, width, height, points[0], thickness, color),
            n => {
                for i in 0..n {
                    draw_line(rgb, width, height, points[i], points[(i + 1) % n], color, thickness);
                }
            }
        }
    }
}
