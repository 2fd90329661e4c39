use log::debug;
use serde::{Deserialize, Serialize};

use crate::detector::connected_components::{ComponentLabels, label_components};
use crate::models::{BitMatrix, Contour, PointI};

/// Which component borders [`find_contours`] returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalMode {
    /// Only components that are not enclosed by another component
    #[default]
    External,
    /// The outer border of every component, nested ones included
    Outer,
}

/// Neighbour directions in clockwise order (image y axis points down)
const DIRS_8: [(i32, i32); 8] = [
    (1, 0),   // E
    (1, 1),   // SE
    (0, 1),   // S
    (-1, 1),  // SW
    (-1, 0),  // W
    (-1, -1), // NW
    (0, -1),  // N
    (1, -1),  // NE
];

const WEST: usize = 4;

/// Trace the outer boundary of foreground components
///
/// Every boundary pixel is kept. Contours are returned in raster order of
/// their start pixel, which is each component's top-left-most pixel.
pub fn find_contours(matrix: &BitMatrix, mode: RetrievalMode) -> Vec<Contour> {
    let labels = label_components(matrix);
    if labels.count() == 0 {
        return Vec::new();
    }

    let keep = match mode {
        RetrievalMode::Outer => vec![true; labels.count()],
        RetrievalMode::External => external_components(matrix, &labels),
    };

    let mut seen = vec![false; labels.count()];
    let mut contours = Vec::new();
    for y in 0..matrix.height() {
        for x in 0..matrix.width() {
            let label = labels.get(x, y);
            if label == 0 {
                continue;
            }
            let slot = label as usize - 1;
            if seen[slot] {
                continue;
            }
            seen[slot] = true;
            if keep[slot] {
                contours.push(trace_boundary(matrix, PointI::new(x as i32, y as i32)));
            }
        }
    }

    debug!(
        "find_contours {:?}: {} components -> {} contours",
        mode,
        labels.count(),
        contours.len()
    );
    contours
}

/// Flag components that touch the background reachable from the image border
///
/// Background is flood-filled with 4-connectivity, the dual of the
/// 8-connectivity used for foreground, so a closed 8-connected ring really
/// seals off its hole.
fn external_components(matrix: &BitMatrix, labels: &ComponentLabels) -> Vec<bool> {
    let width = matrix.width();
    let height = matrix.height();
    let mut outside = vec![false; width * height];
    let mut stack = Vec::new();

    let seed = |x: usize, y: usize, outside: &mut Vec<bool>, stack: &mut Vec<usize>| {
        let idx = y * width + x;
        if !matrix.get(x, y) && !outside[idx] {
            outside[idx] = true;
            stack.push(idx);
        }
    };
    for x in 0..width {
        seed(x, 0, &mut outside, &mut stack);
        seed(x, height - 1, &mut outside, &mut stack);
    }
    for y in 0..height {
        seed(0, y, &mut outside, &mut stack);
        seed(width - 1, y, &mut outside, &mut stack);
    }

    while let Some(idx) = stack.pop() {
        let (x, y) = (idx % width, idx / width);
        if x > 0 {
            seed(x - 1, y, &mut outside, &mut stack);
        }
        if x + 1 < width {
            seed(x + 1, y, &mut outside, &mut stack);
        }
        if y > 0 {
            seed(x, y - 1, &mut outside, &mut stack);
        }
        if y + 1 < height {
            seed(x, y + 1, &mut outside, &mut stack);
        }
    }

    let mut external = vec![false; labels.count()];
    for y in 0..height {
        for x in 0..width {
            let label = labels.get(x, y);
            if label == 0 || external[label as usize - 1] {
                continue;
            }
            let on_border = x == 0 || y == 0 || x + 1 == width || y + 1 == height;
            let touches_outside = on_border
                || outside[y * width + x - 1]
                || outside[y * width + x + 1]
                || outside[(y - 1) * width + x]
                || outside[(y + 1) * width + x];
            if touches_outside {
                external[label as usize - 1] = true;
            }
        }
    }
    external
}

/// Moore-neighbour tracing with Jacob's stopping criterion
///
/// `start` must be the first foreground pixel of its component in raster
/// order, so its west neighbour is known to be background.
fn trace_boundary(matrix: &BitMatrix, start: PointI) -> Contour {
    let mut points = vec![start];

    let Some(first_dir) = next_neighbor(matrix, start, WEST) else {
        // Isolated pixel
        return Contour::new(points);
    };

    let max_steps = matrix.width() * matrix.height() * 4 + 8;
    let mut current = start;
    let mut dir = first_dir;
    for _ in 0..max_steps {
        let next = current.translate(DIRS_8[dir].0, DIRS_8[dir].1);
        // Backtrack: the background pixel checked just before `next`, seen from `next`
        let back = if dir % 2 == 0 { (dir + 6) % 8 } else { (dir + 5) % 8 };
        let Some(next_dir) = next_neighbor(matrix, next, back) else {
            break;
        };
        if next == start && next_dir == first_dir {
            break;
        }
        points.push(next);
        current = next;
        dir = next_dir;
    }

    Contour::new(points)
}

/// First foreground neighbour clockwise after direction `back`
fn next_neighbor(matrix: &BitMatrix, p: PointI, back: usize) -> Option<usize> {
    (1..=8).map(|step| (back + step) % 8).find(|&k| {
        let (dx, dy) = DIRS_8[k];
        matrix.get_i(p.x + dx, p.y + dy)
    })
}
