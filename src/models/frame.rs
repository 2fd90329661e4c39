use std::path::Path;

use image::{GrayImage, RgbImage};

use crate::error::{Error, Result};

/// How the bytes of a [`Frame`] are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// One intensity byte per pixel
    Gray,
    /// Three bytes per pixel, in R, G, B order
    Rgb,
}

impl PixelLayout {
    /// Bytes per pixel
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Gray => 1,
            PixelLayout::Rgb => 3,
        }
    }
}

/// An owned, tightly packed, row-major image buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    layout: PixelLayout,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap a buffer after checking it matches the declared dimensions
    pub fn new(width: usize, height: usize, layout: PixelLayout, data: Vec<u8>) -> Result<Self> {
        let expected = width * height * layout.channels();
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// Wrap an RGB buffer
    pub fn rgb(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, PixelLayout::Rgb, data)
    }

    /// Wrap a single-channel buffer
    pub fn gray(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, PixelLayout::Gray, data)
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel layout
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Raw pixel bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw pixel bytes
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the frame and return its buffer
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Fail with [`Error::Layout`] unless the frame has the given layout
    pub fn expect_layout(&self, expected: PixelLayout) -> Result<()> {
        if self.layout == expected {
            Ok(())
        } else {
            Err(Error::Layout {
                expected,
                actual: self.layout,
            })
        }
    }

    /// Encode the frame to disk; the format follows the file extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let (w, h) = (self.width as u32, self.height as u32);
        match self.layout {
            PixelLayout::Gray => GrayImage::from_raw(w, h, self.data.clone())
                .ok_or(Error::BufferSize {
                    expected: self.width * self.height,
                    actual: self.data.len(),
                })?
                .save(path)?,
            PixelLayout::Rgb => RgbImage::from_raw(w, h, self.data.clone())
                .ok_or(Error::BufferSize {
                    expected: self.width * self.height * 3,
                    actual: self.data.len(),
                })?
                .save(path)?,
        }
        Ok(())
    }
}

impl From<RgbImage> for Frame {
    fn from(img: RgbImage) -> Self {
        let (w, h) = img.dimensions();
        Self {
            width: w as usize,
            height: h as usize,
            layout: PixelLayout::Rgb,
            data: img.into_raw(),
        }
    }
}

impl From<GrayImage> for Frame {
    fn from(img: GrayImage) -> Self {
        let (w, h) = img.dimensions();
        Self {
            width: w as usize,
            height: h as usize,
            layout: PixelLayout::Gray,
            data: img.into_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_size_checked() {
        assert!(Frame::rgb(2, 2, vec![0; 12]).is_ok());
        let err = Frame::rgb(2, 2, vec![0; 4]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferSize {
                expected: 12,
                actual: 4
            }
        ));
    }

    #[test]
    fn test_layout_check() {
        let gray = Frame::gray(1, 1, vec![9]).unwrap();
        assert!(gray.expect_layout(PixelLayout::Gray).is_ok());
        assert!(matches!(
            gray.expect_layout(PixelLayout::Rgb),
            Err(Error::Layout { .. })
        ));
    }

    #[test]
    fn test_from_image_buffer() {
        let img = RgbImage::from_pixel(3, 2, image::Rgb([1, 2, 3]));
        let frame = Frame::from(img);
        assert_eq!((frame.width(), frame.height()), (3, 2));
        assert_eq!(&frame.data()[..3], &[1, 2, 3]);
    }
}
