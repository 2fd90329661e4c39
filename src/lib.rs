//! cv_primer - a guided tour of basic image processing
//!
//! Takes one image through grayscale conversion, Canny edge detection,
//! external contour extraction, inverse thresholding, erosion, dilation and
//! masking, handing every intermediate result to a [`Presenter`].
//! All kernels are implemented in pure Rust on packed byte buffers.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Walkthrough parameters (JSON, serde)
pub mod config;
/// Edge detection, component labelling and contour tracing
pub mod detector;
/// Lines, contour outlines and bitmap text on RGB buffers
pub mod drawing;
/// Crate error type
pub mod error;
/// Core data structures (Frame, BitMatrix, Contour, PointI)
pub mod models;
/// The staged walkthrough and its presenters
pub mod pipeline;
/// Image loading and summary statistics
pub mod tools;
/// Per-pixel kernels (grayscale, threshold, morphology, masking)
pub mod utils;

mod debug;

pub use config::{WalkthroughConfig, load_config};
pub use error::{Error, Result};
pub use models::{BitMatrix, Contour, Frame, PixelLayout, PointI};
pub use pipeline::{
    CollectingPresenter, DirectoryPresenter, PausingPresenter, Presenter, Stage, Walkthrough,
    WalkthroughReport,
};

/// Run the walkthrough with the default (tutorial) parameters
///
/// # Arguments
/// * `image` - RGB frame to process
/// * `presenter` - Receives each of the nine stage frames in order
///
/// # Returns
/// The contours found and per-stage timings
///
/// # Example
/// ```
/// use cv_primer::{CollectingPresenter, Frame, run_walkthrough};
///
/// let image = Frame::rgb(64, 48, vec![255u8; 64 * 48 * 3]).unwrap();
/// let mut presenter = CollectingPresenter::new();
/// let report = run_walkthrough(&image, &mut presenter).unwrap();
/// assert_eq!(report.contour_count(), 0);
/// assert_eq!(presenter.frames().len(), 9);
/// ```
pub fn run_walkthrough<P: Presenter + ?Sized>(
    image: &Frame,
    presenter: &mut P,
) -> Result<WalkthroughReport> {
    Walkthrough::default().run(image, presenter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_image_has_no_contours() {
        let image = Frame::rgb(20, 20, vec![255u8; 20 * 20 * 3]).unwrap();
        let mut presenter = CollectingPresenter::new();
        let report = run_walkthrough(&image, &mut presenter).unwrap();
        assert_eq!(report.contour_count(), 0);
        assert_eq!(report.timings.len(), 9);

        // White is above 225, so the inverse mask is empty
        let thresh = presenter.get(Stage::Thresh).unwrap();
        assert!(thresh.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_dark_image_keeps_everything() {
        let image = Frame::rgb(8, 8, vec![40u8; 8 * 8 * 3]).unwrap();
        let mut presenter = CollectingPresenter::new();
        run_walkthrough(&image, &mut presenter).unwrap();

        let thresh = presenter.get(Stage::Thresh).unwrap();
        assert!(thresh.data().iter().all(|&v| v == 255));
        let output = presenter.get(Stage::Output).unwrap();
        assert_eq!(output, presenter.get(Stage::ContourCount).unwrap());
    }
}
