//! Walkthrough parameters
//!
//! Every field has a default equal to the classic tutorial constants, so an
//! empty JSON object (or no config file at all) reproduces the standard run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::detector::contour::RetrievalMode;
use crate::error::{Error, Result};
use crate::utils::binarization::ThresholdMode;
use crate::utils::morphology::StructuringElement;

/// Top-level configuration for [`crate::pipeline::Walkthrough`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkthroughConfig {
    /// Edge detection thresholds
    pub canny: CannyConfig,
    /// Contour retrieval
    pub contours: ContourConfig,
    /// Contour count overlay
    pub annotation: AnnotationConfig,
    /// Contour outline style
    pub outline: OutlineConfig,
    /// Binary mask
    pub threshold: ThresholdConfig,
    /// Erosion and dilation
    pub morphology: MorphologyConfig,
}

/// Canny hysteresis thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyConfig {
    /// Hysteresis low threshold (L1 gradient magnitude)
    pub low: f32,
    /// Hysteresis high threshold
    pub high: f32,
}

impl Default for CannyConfig {
    fn default() -> Self {
        Self {
            low: 30.0,
            high: 150.0,
        }
    }
}

/// Contour extraction options
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourConfig {
    /// Which components yield a contour
    pub retrieval: RetrievalMode,
}

/// Text written on the image after counting contours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Bottom-left corner of the text, in pixels
    pub origin: [i32; 2],
    /// Font scale; glyph cells are `round(3 * scale)` pixels
    pub scale: f32,
    /// RGB
    pub color: [u8; 3],
    pub thickness: u32,
    /// Message template; `{}` is replaced by the contour count
    pub template: String,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            origin: [10, 25],
            scale: 0.7,
            color: [159, 0, 240],
            thickness: 2,
            template: "I found {} objects!".to_string(),
        }
    }
}

impl AnnotationConfig {
    /// Fill the template with a contour count
    pub fn message(&self, count: usize) -> String {
        self.template.replacen("{}", &count.to_string(), 1)
    }
}

/// Style of the drawn contour outlines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// RGB
    pub color: [u8; 3],
    /// Brush diameter in pixels
    pub thickness: u32,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            color: [0, 255, 0],
            thickness: 3,
        }
    }
}

/// Grayscale to mask conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Fixed level, ignored when `otsu` is set
    pub level: u8,
    /// Value written for set pixels
    pub max_value: u8,
    /// Plain or inverted comparison
    pub mode: ThresholdMode,
    /// Pick the level with Otsu's method instead of `level`
    pub otsu: bool,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            level: 225,
            max_value: 255,
            mode: ThresholdMode::BinaryInv,
            otsu: false,
        }
    }
}

/// Erosion and dilation of the mask
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphologyConfig {
    /// Kernel shared by both operations
    pub element: StructuringElement,
    /// Erosion passes
    pub erode_iterations: usize,
    /// Dilation passes
    pub dilate_iterations: usize,
}

impl Default for MorphologyConfig {
    fn default() -> Self {
        Self {
            element: StructuringElement::default(),
            erode_iterations: 5,
            dilate_iterations: 5,
        }
    }
}

impl WalkthroughConfig {
    /// Reject values no step can work with
    pub fn validate(&self) -> Result<()> {
        if !(self.canny.low.is_finite() && self.canny.high.is_finite()) {
            return Err(Error::InvalidConfig(
                "canny thresholds must be finite".to_string(),
            ));
        }
        if self.canny.low < 0.0 || self.canny.high < 0.0 {
            return Err(Error::InvalidConfig(
                "canny thresholds must not be negative".to_string(),
            ));
        }
        if !(self.annotation.scale.is_finite() && self.annotation.scale > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "annotation scale must be positive, got {}",
                self.annotation.scale
            )));
        }
        if self.annotation.thickness == 0 || self.outline.thickness == 0 {
            return Err(Error::InvalidConfig(
                "line thickness must be at least 1".to_string(),
            ));
        }
        self.morphology.element.validate()
    }
}

/// Load and validate a JSON config file
pub fn load_config(path: &Path) -> Result<WalkthroughConfig> {
    let data = fs::read_to_string(path)?;
    let config: WalkthroughConfig =
        serde_json::from_str(&data).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}
