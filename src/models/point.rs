/// Integer pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointI {
    /// X coordinate (column)
    pub x: i32,
    /// Y coordinate (row, growing downwards)
    pub y: i32,
}

impl PointI {
    /// Create a new integer point
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate point by (dx, dy)
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev (chessboard) distance, the step count between 8-connected pixels
    pub fn chebyshev(&self, other: &PointI) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl From<(i32, i32)> for PointI {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_and_distance() {
        let p = PointI::new(3, 4);
        assert_eq!(p.translate(-1, 2), PointI::new(2, 6));
        assert_eq!(p.chebyshev(&PointI::new(5, 5)), 2);
        assert_eq!(PointI::from((7, 8)), PointI::new(7, 8));
    }
}
