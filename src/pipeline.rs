//! The walkthrough: nine display stages run once, top to bottom
//!
//! Image -> Gray -> Edged -> contour count overlay -> contour outlines ->
//! Thresh -> Eroded -> Dilated -> masked Output. Every stage hands its frame
//! to a [`Presenter`] before the next one starts.

mod present;

pub use present::{CollectingPresenter, DirectoryPresenter, PausingPresenter, Presenter};

use std::time::{Duration, Instant};

use image::Rgb;
use log::{debug, info};

use crate::config::WalkthroughConfig;
use crate::debug::debug_enabled;
use crate::detector::connected_components::find_regions;
use crate::detector::contour::find_contours;
use crate::detector::edges::canny;
use crate::drawing::{draw_contours, put_text};
use crate::error::Result;
use crate::models::{BitMatrix, Contour, Frame, PixelLayout, PointI};
use crate::tools::{grayscale_stats, mask_stats};
use crate::utils::binarization::{otsu_threshold, threshold};
use crate::utils::bitwise::bitwise_and_masked;
use crate::utils::grayscale::rgb_to_grayscale_parallel;
use crate::utils::morphology::{dilate, erode};

/// One displayed step of the walkthrough, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// The input image as loaded
    Image,
    /// Luminance of the input
    Gray,
    /// Canny edge map
    Edged,
    /// Input with the contour count written on it
    ContourCount,
    /// Copy of the annotated input with every contour outlined
    ContourOutlines,
    /// Inverse-thresholded grayscale mask
    Thresh,
    /// Mask after erosion
    Eroded,
    /// Mask after dilation
    Dilated,
    /// Annotated input kept only where the mask is set
    Output,
}

impl Stage {
    /// All stages in execution order
    pub const ALL: [Stage; 9] = [
        Stage::Image,
        Stage::Gray,
        Stage::Edged,
        Stage::ContourCount,
        Stage::ContourOutlines,
        Stage::Thresh,
        Stage::Eroded,
        Stage::Dilated,
        Stage::Output,
    ];

    /// Window title; both contour stages share "Contours"
    pub fn title(self) -> &'static str {
        match self {
            Stage::Image => "Image",
            Stage::Gray => "Gray",
            Stage::Edged => "Edged",
            Stage::ContourCount | Stage::ContourOutlines => "Contours",
            Stage::Thresh => "Thresh",
            Stage::Eroded => "Eroded",
            Stage::Dilated => "Dilated",
            Stage::Output => "Output",
        }
    }

    /// Unique short name used for file names
    pub fn slug(self) -> &'static str {
        match self {
            Stage::Image => "image",
            Stage::Gray => "gray",
            Stage::Edged => "edged",
            Stage::ContourCount => "contour_count",
            Stage::ContourOutlines => "contour_outlines",
            Stage::Thresh => "thresh",
            Stage::Eroded => "eroded",
            Stage::Dilated => "dilated",
            Stage::Output => "output",
        }
    }

    /// 1-based position in [`Stage::ALL`]
    pub fn number(self) -> usize {
        Stage::ALL.iter().position(|&s| s == self).map_or(0, |i| i + 1)
    }

    /// File name such as `03_edged.png`
    pub fn file_name(self) -> String {
        format!("{:02}_{}.png", self.number(), self.slug())
    }
}

/// Wall-clock compute time of one stage, presenter time excluded
#[derive(Debug, Clone, Copy)]
pub struct StageTiming {
    /// Stage measured
    pub stage: Stage,
    /// Compute time
    pub elapsed: Duration,
}

/// What a walkthrough run found
#[derive(Debug, Clone)]
pub struct WalkthroughReport {
    /// Contours extracted from the edge map
    pub contours: Vec<Contour>,
    /// Threshold level actually applied (differs from the config under Otsu)
    pub threshold_level: u8,
    /// Per-stage timings in execution order
    pub timings: Vec<StageTiming>,
}

impl WalkthroughReport {
    /// Number of contours found
    pub fn contour_count(&self) -> usize {
        self.contours.len()
    }

    /// Sum of all stage timings
    pub fn total_time(&self) -> Duration {
        self.timings.iter().map(|t| t.elapsed).sum()
    }
}

/// Runs the walkthrough with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Walkthrough {
    config: WalkthroughConfig,
}

impl Walkthrough {
    /// Create a walkthrough; the config is validated when it runs
    pub fn new(config: WalkthroughConfig) -> Self {
        Self { config }
    }

    /// Parameters in use
    pub fn config(&self) -> &WalkthroughConfig {
        &self.config
    }

    /// Execute every stage once on an RGB image
    ///
    /// The count overlay is drawn on a working copy of the input, and that
    /// annotated copy feeds the outline and masked-output stages, so the
    /// message shows up in both.
    pub fn run<P: Presenter + ?Sized>(
        &self,
        image: &Frame,
        presenter: &mut P,
    ) -> Result<WalkthroughReport> {
        image.expect_layout(PixelLayout::Rgb)?;
        self.config.validate()?;

        let cfg = &self.config;
        let (width, height) = (image.width(), image.height());
        let mut timings = Vec::with_capacity(Stage::ALL.len());

        // Step 1: show the input
        let started = Instant::now();
        let mut annotated = image.clone();
        finish(Stage::Image, started, image, presenter, &mut timings)?;

        // Step 2: grayscale
        let started = Instant::now();
        let gray = Frame::gray(
            width,
            height,
            rgb_to_grayscale_parallel(image.data(), width, height),
        )?;
        if debug_enabled() {
            let stats = grayscale_stats(gray.data());
            debug!(
                "grayscale range {}-{}, average {}",
                stats.min, stats.max, stats.avg
            );
        }
        finish(Stage::Gray, started, &gray, presenter, &mut timings)?;

        // Step 3: edges
        let started = Instant::now();
        let edged = Frame::gray(
            width,
            height,
            canny(gray.data(), width, height, cfg.canny.low, cfg.canny.high),
        )?;
        self.log_mask(Stage::Edged, &edged);
        finish(Stage::Edged, started, &edged, presenter, &mut timings)?;

        // Step 4: contours, count written on the input
        let started = Instant::now();
        let edge_map = BitMatrix::from_nonzero(edged.data(), width, height);
        let contours = find_contours(&edge_map, cfg.contours.retrieval);
        info!("found {} contours", contours.len());
        if debug_enabled() {
            let regions = find_regions(&edge_map);
            if let Some(widest) = regions.iter().max_by_key(|r| r.2 - r.0) {
                debug!(
                    "edge map: {} components, widest spans {:?}",
                    regions.len(),
                    widest
                );
            }
        }
        if let Some(largest) = contours.iter().max_by(|a, b| a.area().total_cmp(&b.area())) {
            debug!(
                "largest contour: {} points, area {:.1}, bbox {:?}",
                largest.len(),
                largest.area(),
                largest.bounding_box()
            );
        }
        let annotation = &cfg.annotation;
        put_text(
            annotated.data_mut(),
            width,
            height,
            &annotation.message(contours.len()),
            PointI::new(annotation.origin[0], annotation.origin[1]),
            annotation.scale,
            Rgb(annotation.color),
            annotation.thickness,
        );
        presenter.note(
            Stage::ContourCount,
            &format!("Number of Contours found = {}", contours.len()),
        )?;
        finish(Stage::ContourCount, started, &annotated, presenter, &mut timings)?;

        // Step 5: outlines on a copy
        let started = Instant::now();
        let mut outlined = annotated.clone();
        draw_contours(
            outlined.data_mut(),
            width,
            height,
            &contours,
            Rgb(cfg.outline.color),
            cfg.outline.thickness,
        );
        finish(Stage::ContourOutlines, started, &outlined, presenter, &mut timings)?;

        // Step 6: threshold
        let started = Instant::now();
        let level = if cfg.threshold.otsu {
            let level = otsu_threshold(gray.data());
            debug!("otsu level {}", level);
            level
        } else {
            cfg.threshold.level
        };
        let thresh = Frame::gray(
            width,
            height,
            threshold(
                gray.data(),
                width,
                height,
                level,
                cfg.threshold.max_value,
                cfg.threshold.mode,
            ),
        )?;
        self.log_mask(Stage::Thresh, &thresh);
        finish(Stage::Thresh, started, &thresh, presenter, &mut timings)?;

        // Step 7: erosion of a fresh copy of the mask
        let started = Instant::now();
        let morph = &cfg.morphology;
        let eroded = Frame::gray(
            width,
            height,
            erode(thresh.data(), width, height, morph.element, morph.erode_iterations),
        )?;
        self.log_mask(Stage::Eroded, &eroded);
        finish(Stage::Eroded, started, &eroded, presenter, &mut timings)?;

        // Step 8: dilation of another fresh copy
        let started = Instant::now();
        let dilated = Frame::gray(
            width,
            height,
            dilate(thresh.data(), width, height, morph.element, morph.dilate_iterations),
        )?;
        self.log_mask(Stage::Dilated, &dilated);
        finish(Stage::Dilated, started, &dilated, presenter, &mut timings)?;

        // Step 9: keep the annotated input under the mask
        let started = Instant::now();
        let output = Frame::rgb(
            width,
            height,
            bitwise_and_masked(annotated.data(), thresh.data(), width, height),
        )?;
        finish(Stage::Output, started, &output, presenter, &mut timings)?;

        let report = WalkthroughReport {
            contours,
            threshold_level: level,
            timings,
        };
        info!(
            "walkthrough finished in {:.2?} ({} contours)",
            report.total_time(),
            report.contour_count()
        );
        Ok(report)
    }

    fn log_mask(&self, stage: Stage, mask: &Frame) {
        if !debug_enabled() {
            return;
        }
        let stats = mask_stats(mask.data());
        debug!(
            "{}: foreground={} total={} ratio={:.2}%",
            stage.slug(),
            stats.foreground_pixels,
            stats.total_pixels,
            stats.foreground_ratio * 100.0
        );
    }
}

fn finish<P: Presenter + ?Sized>(
    stage: Stage,
    started: Instant,
    frame: &Frame,
    presenter: &mut P,
    timings: &mut Vec<StageTiming>,
) -> Result<()> {
    let elapsed = started.elapsed();
    info!(
        "[{}/{}] {} ({}x{}, {:.2?})",
        stage.number(),
        Stage::ALL.len(),
        stage.title(),
        frame.width(),
        frame.height(),
        elapsed
    );
    timings.push(StageTiming { stage, elapsed });
    presenter.present(stage, frame)
}
