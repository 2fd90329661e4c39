//! Binary/grayscale morphology: erosion and dilation
//!
//! Erosion keeps the minimum under the structuring element, dilation the
//! maximum. Neighbours that fall outside the image are skipped, so the border
//! never erodes or grows a region on its own.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Shape of the neighbourhood a morphology pass looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "size", rename_all = "snake_case")]
pub enum StructuringElement {
    /// Full `size x size` square
    Rect(usize),
    /// Plus-shaped element, one row and one column through the centre
    Cross(usize),
}

impl Default for StructuringElement {
    fn default() -> Self {
        StructuringElement::Rect(3)
    }
}

impl StructuringElement {
    /// Side length of the element
    pub fn size(&self) -> usize {
        match *self {
            StructuringElement::Rect(size) | StructuringElement::Cross(size) => size,
        }
    }

    /// Reject even or zero sizes, which have no centre pixel
    pub fn validate(&self) -> Result<()> {
        let size = self.size();
        if size == 0 || size % 2 == 0 {
            return Err(Error::InvalidConfig(format!(
                "structuring element size must be odd and >= 1, got {size}"
            )));
        }
        Ok(())
    }

    /// Offsets (dx, dy) relative to the anchor at the element centre
    pub fn offsets(&self) -> Vec<(isize, isize)> {
        let r = (self.size() / 2) as isize;
        let mut offsets = Vec::new();
        for dy in -r..=r {
            for dx in -r..=r {
                let keep = match self {
                    StructuringElement::Rect(_) => true,
                    StructuringElement::Cross(_) => dx == 0 || dy == 0,
                };
                if keep {
                    offsets.push((dx, dy));
                }
            }
        }
        offsets
    }
}

#[derive(Clone, Copy)]
enum MorphOp {
    Erode,
    Dilate,
}

/// Shrink foreground regions: each pixel becomes the minimum under the element
pub fn erode(
    mask: &[u8],
    width: usize,
    height: usize,
    element: StructuringElement,
    iterations: usize,
) -> Vec<u8> {
    morph(mask, width, height, element, iterations, MorphOp::Erode)
}

/// Grow foreground regions: each pixel becomes the maximum under the element
pub fn dilate(
    mask: &[u8],
    width: usize,
    height: usize,
    element: StructuringElement,
    iterations: usize,
) -> Vec<u8> {
    morph(mask, width, height, element, iterations, MorphOp::Dilate)
}

fn morph(
    mask: &[u8],
    width: usize,
    height: usize,
    element: StructuringElement,
    iterations: usize,
    op: MorphOp,
) -> Vec<u8> {
    let pixel_count = width * height;
    let mut current = mask[..pixel_count].to_vec();
    if pixel_count == 0 {
        return current;
    }

    let offsets = element.offsets();
    let mut next = vec![0u8; pixel_count];
    for _ in 0..iterations {
        morph_once(&current, &mut next, width, height, &offsets, op);
        std::mem::swap(&mut current, &mut next);
    }
    current
}

fn morph_once(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    offsets: &[(isize, isize)],
    op: MorphOp,
) {
    let (w, h) = (width as isize, height as isize);

    // Process rows in parallel
    dst.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let y = y as isize;
        for (x, out) in row.iter_mut().enumerate() {
            let x = x as isize;
            let mut acc = match op {
                MorphOp::Erode => u8::MAX,
                MorphOp::Dilate => u8::MIN,
            };
            for &(dx, dy) in offsets {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= w || ny >= h {
                    continue;
                }
                let v = src[(ny * w + nx) as usize];
                acc = match op {
                    MorphOp::Erode => acc.min(v),
                    MorphOp::Dilate => acc.max(v),
                };
            }
            *out = acc;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_mask(size: usize, x0: usize, y0: usize, side: usize) -> Vec<u8> {
        let mut mask = vec![0u8; size * size];
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                mask[y * size + x] = 255;
            }
        }
        mask
    }

    fn count_on(mask: &[u8]) -> usize {
        mask.iter().filter(|&&v| v != 0).count()
    }

    #[test]
    fn test_offsets() {
        assert_eq!(StructuringElement::Rect(3).offsets().len(), 9);
        assert_eq!(StructuringElement::Cross(3).offsets().len(), 5);
        assert_eq!(StructuringElement::Rect(1).offsets(), vec![(0, 0)]);
    }

    #[test]
    fn test_validate_rejects_even_sizes() {
        assert!(StructuringElement::Rect(3).validate().is_ok());
        assert!(StructuringElement::Rect(4).validate().is_err());
        assert!(StructuringElement::Cross(0).validate().is_err());
    }

    #[test]
    fn test_erode_shrinks_square() {
        let mask = square_mask(20, 5, 5, 10);
        let eroded = erode(&mask, 20, 20, StructuringElement::Rect(3), 1);
        assert_eq!(count_on(&eroded), 8 * 8);

        let eroded = erode(&mask, 20, 20, StructuringElement::Rect(3), 5);
        assert_eq!(count_on(&eroded), 0);
    }

    #[test]
    fn test_dilate_grows_square() {
        let mask = square_mask(20, 8, 8, 4);
        let dilated = dilate(&mask, 20, 20, StructuringElement::Rect(3), 2);
        assert_eq!(count_on(&dilated), 8 * 8);
        assert_eq!(dilated[6 * 20 + 6], 255);
        assert_eq!(dilated[5 * 20 + 5], 0);
    }

    #[test]
    fn test_border_does_not_erode() {
        let mask = vec![255u8; 6 * 4];
        let eroded = erode(&mask, 6, 4, StructuringElement::Rect(3), 3);
        assert_eq!(eroded, mask);
    }

    #[test]
    fn test_zero_iterations_is_copy() {
        let mask = square_mask(8, 2, 2, 3);
        assert_eq!(erode(&mask, 8, 8, StructuringElement::Rect(3), 0), mask);
        assert_eq!(dilate(&mask, 8, 8, StructuringElement::Rect(3), 0), mask);
    }

    #[test]
    fn test_cross_dilation_of_single_pixel() {
        let mut mask = vec![0u8; 25];
        mask[12] = 255;
        let dilated = dilate(&mask, 5, 5, StructuringElement::Cross(3), 1);
        assert_eq!(count_on(&dilated), 5);
        assert_eq!(dilated[6], 0);
    }
}
