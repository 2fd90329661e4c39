/// Packed binary foreground map
///
/// One bit per pixel, row-major. `true` marks a foreground pixel, which is
/// how labelling and contour tracing see a non-zero mask or edge pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new, all-background matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Build a matrix from an 8-bit mask: every non-zero byte is foreground
    pub fn from_nonzero(mask: &[u8], width: usize, height: usize) -> Self {
        let mut matrix = Self::new(width, height);
        for (idx, &v) in mask.iter().take(width * height).enumerate() {
            if v != 0 {
                matrix.data[idx / 8] |= 1 << (idx % 8);
            }
        }
        matrix
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y); out-of-range coordinates read as background
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Signed lookup used by neighbourhood walks
    pub fn get_i(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.get(x as usize, y as usize)
    }

    /// Set bit at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        let byte_index = index / 8;
        let bit_index = index % 8;
        if value {
            self.data[byte_index] |= 1 << bit_index;
        } else {
            self.data[byte_index] &= !(1 << bit_index);
        }
    }

    /// Number of foreground pixels
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Expand back to an 8-bit mask (foreground = `on`, background = 0)
    pub fn to_mask(&self, on: u8) -> Vec<u8> {
        let mut mask = vec![0u8; self.width * self.height];
        for (idx, px) in mask.iter_mut().enumerate() {
            if (self.data[idx / 8] >> (idx % 8)) & 1 == 1 {
                *px = on;
            }
        }
        mask
    }

    /// Clear all bits to 0
    pub fn clear(&mut self) {
        self.data.fill(0);
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
