//! Canny edge detection
//!
//! Steps:
//! 1. 3x3 Sobel gradients with replicated borders (no pre-blur)
//! 2. L1 magnitude `|gx| + |gy|` and direction quantised to 0/45/90/135 degrees
//! 3. Non-maximum suppression across the gradient direction
//! 4. Hysteresis: pixels above `high` seed edges, pixels above `low` extend them

use log::debug;
use rayon::prelude::*;

/// tan(22.5 deg), the boundary between the horizontal and diagonal sectors
const TAN_22_5: f32 = 0.414_213_57;

const EDGE: u8 = 255;

/// Per-pixel Sobel responses
#[derive(Debug, Clone)]
pub struct Gradients {
    /// Image width
    pub width: usize,
    /// Image height
    pub height: usize,
    /// Horizontal derivative
    pub gx: Vec<i32>,
    /// Vertical derivative
    pub gy: Vec<i32>,
}

impl Gradients {
    /// L1 gradient magnitude at a pixel index
    #[inline]
    pub fn magnitude(&self, idx: usize) -> i32 {
        self.gx[idx].abs() + self.gy[idx].abs()
    }

    /// Gradient direction sector: 0 = horizontal gradient, 1 = 45 deg,
    /// 2 = vertical gradient, 3 = 135 deg (image y axis points down)
    #[inline]
    pub fn sector(&self, idx: usize) -> u8 {
        let gx = self.gx[idx] as f32;
        let gy = self.gy[idx] as f32;
        let (ax, ay) = (gx.abs(), gy.abs());
        if ay <= ax * TAN_22_5 {
            0
        } else if ax <= ay * TAN_22_5 {
            2
        } else if gx * gy > 0.0 {
            1
        } else {
            3
        }
    }
}

/// 3x3 Sobel derivatives with replicated borders
pub fn sobel_gradients(gray: &[u8], width: usize, height: usize) -> Gradients {
    let pixel_count = width * height;
    let mut gx = vec![0i32; pixel_count];
    let mut gy = vec![0i32; pixel_count];

    if width > 0 && height > 0 {
        gx.par_chunks_mut(width)
            .zip(gy.par_chunks_mut(width))
            .enumerate()
            .for_each(|(y, (gx_row, gy_row))| {
                let rows = [y.saturating_sub(1), y, (y + 1).min(height - 1)];
                let r0 = &gray[rows[0] * width..rows[0] * width + width];
                let r1 = &gray[rows[1] * width..rows[1] * width + width];
                let r2 = &gray[rows[2] * width..rows[2] * width + width];

                for x in 0..width {
                    let xl = x.saturating_sub(1);
                    let xr = (x + 1).min(width - 1);

                    let p00 = r0[xl] as i32;
                    let p01 = r0[x] as i32;
                    let p02 = r0[xr] as i32;
                    let p10 = r1[xl] as i32;
                    let p12 = r1[xr] as i32;
                    let p20 = r2[xl] as i32;
                    let p21 = r2[x] as i32;
                    let p22 = r2[xr] as i32;

                    gx_row[x] = (p02 + 2 * p12 + p22) - (p00 + 2 * p10 + p20);
                    gy_row[x] = (p20 + 2 * p21 + p22) - (p00 + 2 * p01 + p02);
                }
            });
    }

    Gradients {
        width,
        height,
        gx,
        gy,
    }
}

/// Detect edges; returns a mask with 255 on edge pixels and 0 elsewhere
///
/// `low` and `high` are compared against the L1 gradient magnitude. When
/// `low > high` the two are swapped.
pub fn canny(gray: &[u8], width: usize, height: usize, low: f32, high: f32) -> Vec<u8> {
    let (low, high) = if low > high { (high, low) } else { (low, high) };
    let grad = sobel_gradients(gray, width, height);
    let suppressed = non_max_suppression(&grad);
    let edges = hysteresis(width, height, &suppressed, low, high);

    debug!(
        "canny {}x{} low={} high={} -> {} edge pixels",
        width,
        height,
        low,
        high,
        edges.iter().filter(|&&v| v == EDGE).count()
    );
    edges
}

/// Keep only magnitudes that are local maxima across the gradient direction
///
/// A pixel survives when it is strictly greater than the neighbour on one
/// side and not smaller than the neighbour on the other, so plateaus two
/// pixels wide produce a single-pixel ridge. Out-of-image neighbours count as 0.
fn non_max_suppression(grad: &Gradients) -> Vec<i32> {
    let (width, height) = (grad.width, grad.height);
    let mut out = vec![0i32; width * height];
    if width == 0 {
        return out;
    }

    let mag_at = |x: isize, y: isize| -> i32 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0
        } else {
            grad.magnitude(y as usize * width + x as usize)
        }
    };

    out.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        for (x, dst) in row.iter_mut().enumerate() {
            let idx = y * width + x;
            let m = grad.magnitude(idx);
            if m == 0 {
                continue;
            }
            let (xi, yi) = (x as isize, y as isize);
            // (before, after) along the gradient direction
            let (m1, m2) = match grad.sector(idx) {
                0 => (mag_at(xi - 1, yi), mag_at(xi + 1, yi)),
                1 => (mag_at(xi - 1, yi - 1), mag_at(xi + 1, yi + 1)),
                2 => (mag_at(xi, yi - 1), mag_at(xi, yi + 1)),
                _ => (mag_at(xi + 1, yi - 1), mag_at(xi - 1, yi + 1)),
            };
            if m > m1 && m >= m2 {
                *dst = m;
            }
        }
    });

    out
}

fn hysteresis(width: usize, height: usize, suppressed: &[i32], low: f32, high: f32) -> Vec<u8> {
    const WEAK: u8 = 1;

    let mut state = vec![0u8; width * height];
    let mut stack = Vec::new();

    for (idx, &m) in suppressed.iter().enumerate() {
        let m = m as f32;
        if m > high {
            state[idx] = EDGE;
            stack.push(idx);
        } else if m > low {
            state[idx] = WEAK;
        }
    }

    // Promote weak pixels 8-connected to a strong one
    while let Some(idx) = stack.pop() {
        let (x, y) = (idx % width, idx / width);
        let x0 = x.saturating_sub(1);
        let x1 = (x + 1).min(width - 1);
        let y0 = y.saturating_sub(1);
        let y1 = (y + 1).min(height - 1);
        for ny in y0..=y1 {
            for nx in x0..=x1 {
                let nidx = ny * width + nx;
                if state[nidx] == WEAK {
                    state[nidx] = EDGE;
                    stack.push(nidx);
                }
            }
        }
    }

    for px in state.iter_mut() {
        if *px != EDGE {
            *px = 0;
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_image(size: usize, lo: usize, hi: usize, fg: u8, bg: u8) -> Vec<u8> {
        let mut img = vec![bg; size * size];
        for y in lo..hi {
            for x in lo..hi {
                img[y * size + x] = fg;
            }
        }
        img
    }

    fn edge_count(edges: &[u8]) -> usize {
        edges.iter().filter(|&&v| v == 255).count()
    }

    #[test]
    fn test_sobel_constant_image_is_zero() {
        let grad = sobel_gradients(&[77u8; 25], 5, 5);
        assert!(grad.gx.iter().all(|&v| v == 0));
        assert!(grad.gy.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_sobel_vertical_edge() {
        // Left half dark, right half bright
        let mut img = vec![0u8; 6 * 6];
        for y in 0..6 {
            for x in 3..6 {
                img[y * 6 + x] = 100;
            }
        }
        let grad = sobel_gradients(&img, 6, 6);
        let idx = 2 * 6 + 2;
        assert_eq!(grad.gx[idx], 400);
        assert_eq!(grad.gy[idx], 0);
        assert_eq!(grad.sector(idx), 0);
    }

    #[test]
    fn test_canny_uniform_image() {
        let edges = canny(&[128u8; 32 * 32], 32, 32, 30.0, 150.0);
        assert_eq!(edge_count(&edges), 0);
    }

    #[test]
    fn test_canny_square_outline() {
        let img = square_image(32, 8, 24, 255, 0);
        let edges = canny(&img, 32, 32, 30.0, 150.0);
        assert_eq!(edges.len(), 32 * 32);
        assert!(edge_count(&edges) > 0);
        // Interior and far background stay empty
        assert_eq!(edges[16 * 32 + 16], 0);
        assert_eq!(edges[2 * 32 + 2], 0);
        // Every edge pixel hugs the square boundary
        for y in 0..32 {
            for x in 0..32 {
                if edges[y * 32 + x] == 255 {
                    assert!((6..=25).contains(&x) && (6..=25).contains(&y));
                }
            }
        }
    }

    #[test]
    fn test_canny_threshold_effect() {
        let img = square_image(32, 8, 24, 120, 100);
        let edges_low = canny(&img, 32, 32, 10.0, 50.0);
        let edges_high = canny(&img, 32, 32, 100.0, 200.0);
        assert!(edge_count(&edges_low) > 0);
        assert_eq!(edge_count(&edges_high), 0);
    }

    #[test]
    fn test_canny_swaps_inverted_thresholds() {
        let img = square_image(24, 6, 18, 255, 0);
        assert_eq!(
            canny(&img, 24, 24, 150.0, 30.0),
            canny(&img, 24, 24, 30.0, 150.0)
        );
    }

    #[test]
    fn test_canny_empty_image() {
        assert!(canny(&[], 0, 0, 30.0, 150.0).is_empty());
    }
}
