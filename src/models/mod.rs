/// Traced region boundaries
pub mod contour;
/// Owned image buffers
pub mod frame;
/// Binary foreground maps
pub mod matrix;
/// Integer pixel coordinates
pub mod point;

pub use contour::Contour;
pub use frame::{Frame, PixelLayout};
pub use matrix::BitMatrix;
pub use point::PointI;
