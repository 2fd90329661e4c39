//! Error type shared by every fallible operation in the crate

use std::path::PathBuf;

use crate::models::PixelLayout;

/// Errors raised while loading, processing or presenting images
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Decoding or encoding an image file failed
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem or terminal I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON configuration file could not be parsed
    #[error("failed to parse config {}: {source}", .path.display())]
    Config {
        /// Path of the offending file
        path: PathBuf,
        /// Underlying parser error
        #[source]
        source: serde_json::Error,
    },

    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A pixel buffer does not match its declared dimensions
    #[error("buffer holds {actual} bytes, expected {expected}")]
    BufferSize {
        /// Bytes implied by width, height and layout
        expected: usize,
        /// Bytes actually supplied
        actual: usize,
    },

    /// An operation received a frame with the wrong pixel layout
    #[error("expected a {expected:?} frame, got {actual:?}")]
    Layout {
        /// Layout the operation works on
        expected: PixelLayout,
        /// Layout it was given
        actual: PixelLayout,
    },
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
