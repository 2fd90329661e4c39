//! Connected component labelling of a binary foreground map
//! Two-pass union-find over 8-connected foreground pixels

use crate::models::BitMatrix;

/// Union-Find data structure
pub struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    /// `n` singleton sets
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
        }
    }

    /// Root of `x`, compressing the path on the way
    pub fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        // Path compression
        let mut node = x;
        while self.parent[node as usize] != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }
        root
    }

    /// Merge the sets holding `x` and `y`
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x != root_y {
            // Keep the smaller label as root so labels stay in raster order
            let (lo, hi) = if root_x < root_y {
                (root_x, root_y)
            } else {
                (root_y, root_x)
            };
            self.parent[hi as usize] = lo;
        }
    }
}

/// Per-pixel component labels
#[derive(Debug, Clone)]
pub struct ComponentLabels {
    width: usize,
    height: usize,
    labels: Vec<u32>,
    count: usize,
}

impl ComponentLabels {
    /// Label at (x, y): 0 for background, `1..=count` for components
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.labels[y * self.width + x]
    }

    /// Number of components
    pub fn count(&self) -> usize {
        self.count
    }

    /// Width of the labelled matrix
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the labelled matrix
    pub fn height(&self) -> usize {
        self.height
    }

    /// Labels in row-major order
    pub fn as_slice(&self) -> &[u32] {
        &self.labels
    }
}

/// Label 8-connected foreground components
///
/// Labels are dense (`1..=count`) and numbered in raster order of each
/// component's first pixel.
pub fn label_components(matrix: &BitMatrix) -> ComponentLabels {
    let width = matrix.width();
    let height = matrix.height();

    let mut labels = vec![0u32; width * height];
    let mut next_label = 1u32;
    // Provisional labels are bounded by the pixel count
    let mut uf = UnionFind::new(width * height + 1);

    // First pass: provisional labels
    for y in 0..height {
        for x in 0..width {
            if !matrix.get(x, y) {
                continue;
            }

            let idx = y * width + x;
            let mut min_label = u32::MAX;
            let mut neighbors = [0u32; 4];
            let mut n = 0;

            // Left
            if x > 0 && matrix.get(x - 1, y) {
                neighbors[n] = labels[idx - 1];
                n += 1;
            }
            // Upper-left, above, upper-right
            if y > 0 {
                let above = idx - width;
                if x > 0 && matrix.get(x - 1, y - 1) {
                    neighbors[n] = labels[above - 1];
                    n += 1;
                }
                if matrix.get(x, y - 1) {
                    neighbors[n] = labels[above];
                    n += 1;
                }
                if x + 1 < width && matrix.get(x + 1, y - 1) {
                    neighbors[n] = labels[above + 1];
                    n += 1;
                }
            }

            for &l in &neighbors[..n] {
                min_label = min_label.min(l);
            }

            if n == 0 {
                labels[idx] = next_label;
                next_label += 1;
            } else {
                labels[idx] = min_label;
                for &l in &neighbors[..n] {
                    if l != min_label {
                        uf.union(min_label, l);
                    }
                }
            }
        }
    }

    // Second pass: resolve roots and renumber densely
    let mut remap = vec![0u32; next_label as usize];
    let mut count = 0u32;
    for label in labels.iter_mut() {
        if *label == 0 {
            continue;
        }
        let root = uf.find(*label) as usize;
        if remap[root] == 0 {
            count += 1;
            remap[root] = count;
        }
        *label = remap[root];
    }

    ComponentLabels {
        width,
        height,
        labels,
        count: count as usize,
    }
}

/// Bounding box of a component as (min_x, min_y, max_x, max_y)
pub type Region = (usize, usize, usize, usize);

/// Find connected foreground regions and return their bounding boxes,
/// indexed by `label - 1`
pub fn find_regions(matrix: &BitMatrix) -> Vec<Region> {
    let labels = label_components(matrix);
    let mut bboxes: Vec<Option<Region>> = vec![None; labels.count()];

    for y in 0..labels.height() {
        for x in 0..labels.width() {
            let label = labels.get(x, y);
            if label == 0 {
                continue;
            }
            let entry = bboxes[label as usize - 1].get_or_insert((x, y, x, y));
            entry.0 = entry.0.min(x);
            entry.1 = entry.1.min(y);
            entry.2 = entry.2.max(x);
            entry.3 = entry.3.max(y);
        }
    }

    bboxes.into_iter().flatten().collect()
}
