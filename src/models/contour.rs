use super::point::PointI;

/// Ordered boundary of one connected foreground region
///
/// Points follow the traced border pixel by pixel; consecutive points are
/// 8-neighbours and the last point connects back to the first. Thin regions
/// visit some pixels twice, once per side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    points: Vec<PointI>,
}

/// Axis-aligned bounding box, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    /// Left-most column
    pub min_x: i32,
    /// Top-most row
    pub min_y: i32,
    /// Right-most column
    pub max_x: i32,
    /// Bottom-most row
    pub max_y: i32,
}

impl BoundingBox {
    /// Width in pixels
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x + 1
    }

    /// Height in pixels
    pub fn height(&self) -> i32 {
        self.max_y - self.min_y + 1
    }
}

impl Contour {
    /// Wrap a traced point sequence
    pub fn new(points: Vec<PointI>) -> Self {
        Self { points }
    }

    /// Boundary points in tracing order
    pub fn points(&self) -> &[PointI] {
        &self.points
    }

    /// Number of boundary points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the contour holds no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First traced point (the region's top-left-most pixel)
    pub fn start(&self) -> Option<PointI> {
        self.points.first().copied()
    }

    /// Tightest box around the points; `None` for an empty contour
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = self.points.first()?;
        let mut bbox = BoundingBox {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in &self.points[1..] {
            bbox.min_x = bbox.min_x.min(p.x);
            bbox.min_y = bbox.min_y.min(p.y);
            bbox.max_x = bbox.max_x.max(p.x);
            bbox.max_y = bbox.max_y.max(p.y);
        }
        Some(bbox)
    }

    /// Area of the polygon through the pixel centres (shoelace formula)
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice_area = 0i64;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            twice_area += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
        }
        twice_area.abs() as f64 * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: i32) -> Contour {
        let mut points = Vec::new();
        for x in 0..size {
            points.push(PointI::new(x, 0));
        }
        for y in 1..size {
            points.push(PointI::new(size - 1, y));
        }
        for x in (0..size - 1).rev() {
            points.push(PointI::new(x, size - 1));
        }
        for y in (1..size - 1).rev() {
            points.push(PointI::new(0, y));
        }
        Contour::new(points)
    }

    #[test]
    fn test_square_geometry() {
        let c = square(5);
        assert_eq!(c.len(), 16);
        assert_eq!(c.start(), Some(PointI::new(0, 0)));
        let bbox = c.bounding_box().unwrap();
        assert_eq!((bbox.width(), bbox.height()), (5, 5));
        assert_eq!(c.area(), 16.0);
    }

    #[test]
    fn test_degenerate_contours() {
        let single = Contour::new(vec![PointI::new(2, 3)]);
        assert_eq!(single.area(), 0.0);
        assert_eq!(single.bounding_box().unwrap().width(), 1);

        let empty = Contour::new(Vec::new());
        assert!(empty.is_empty());
        assert!(empty.bounding_box().is_none());
    }
}
