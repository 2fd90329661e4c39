/// Keep colour pixels where the mask is set and blacken the rest
///
/// Equivalent to `src AND src` under `mask`: every channel of a pixel whose
/// mask byte is zero becomes 0, all other pixels are copied unchanged.
pub fn bitwise_and_masked(rgb: &[u8], mask: &[u8], width: usize, height: usize) -> Vec<u8> {
    let pixel_count = width * height;
    let mut out = vec![0u8; pixel_count * 3];
    for ((dst, src), &m) in out
        .chunks_exact_mut(3)
        .zip(rgb.chunks_exact(3))
        .zip(mask[..pixel_count].iter())
    {
        if m != 0 {
            dst.copy_from_slice(src);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_keeps_and_clears() {
        let rgb = vec![10, 20, 30, 40, 50, 60, 70, 80, 90];
        let mask = vec![255, 0, 1];
        let out = bitwise_and_masked(&rgb, &mask, 3, 1);
        assert_eq!(out, vec![10, 20, 30, 0, 0, 0, 70, 80, 90]);
    }

    #[test]
    fn test_empty_mask_blackens_everything() {
        let rgb = vec![200u8; 4 * 3];
        let out = bitwise_and_masked(&rgb, &[0; 4], 2, 2);
        assert!(out.iter().all(|&v| v == 0));
    }
}
