/// Synthetic scene: dark blocks on a light background, packed RGB
#[allow(dead_code)]
pub fn blocks_rgb(width: usize, height: usize) -> Vec<u8> {
    let mut rgb = vec![235u8; width * height * 3];
    let block = (width.min(height) / 6).max(2);
    for by in (block..height.saturating_sub(block)).step_by(block * 2) {
        for bx in (block..width.saturating_sub(block)).step_by(block * 2) {
            for y in by..(by + block).min(height) {
                for x in bx..(bx + block).min(width) {
                    let idx = (y * width + x) * 3;
                    rgb[idx..idx + 3].copy_from_slice(&[40, 90, 160]);
                }
            }
        }
    }
    rgb
}

/// Grayscale version of [`blocks_rgb`]
#[allow(dead_code)]
pub fn blocks_gray(width: usize, height: usize) -> Vec<u8> {
    blocks_rgb(width, height)
        .chunks_exact(3)
        .map(|px| px[0])
        .collect()
}
