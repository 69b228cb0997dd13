//! Photo measurement pipeline.
//!
//! Turns one photo of a reference coin and an object into a physical length:
//!
//! 1. [`background`]: estimate the backdrop colour from the four corners.
//! 2. [`segment`]: scan a coarse grid for foreground seeds.
//! 3. [`grow`]: flood each seed into a connected region.
//! 4. [`classify`]: pick the reference (round, small) and measured (largest)
//!    regions.
//! 5. [`calibrate`]: turn the reference size into a scale and apply it.
//!
//! [`render`] paints the regions into a debug image after the fact.
//!
//! Every call owns its state. Nothing is shared between analyses, so
//! separate photos can be analysed from separate threads.

pub mod background;
pub mod calibrate;
pub mod classify;
pub mod grow;
pub mod region;
pub mod render;
mod report;
pub mod segment;

pub use background::{estimate_background, BackgroundColor};
pub use calibrate::{calibrate, Calibration};
pub use classify::{classify_regions, Classification, ClassifyOptions};
pub use region::{Bounds, GrownRegion, PixelCoord, Region};
pub use report::MeasureReport;
pub use segment::{segment, SegmentParams, Segmentation};

use image::RgbImage;
use serde::Serialize;
use thiserror::Error;

use crate::config::MeasureConfig;
use crate::error::CobgaugeError;
use crate::photo::Photo;

/// Why a photo that was analysed produced no length.
///
/// None of these abort the analysis; the caller falls back to a manual or
/// default length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeasureFailure {
    #[error("found {found} object(s) above the noise threshold, need at least 2")]
    InsufficientObjects { found: usize },

    #[error("no region is both round enough and small enough to be the reference")]
    NoReferenceCandidate,

    #[error("no region left to measure after picking the reference")]
    NoMeasuredCandidate,

    #[error("reference object has zero size")]
    DegenerateCalibration,
}

/// The two roles and the scale derived from them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Measurement {
    pub reference: Region,
    pub measured: Region,
    pub calibration: Calibration,
}

impl Measurement {
    #[inline]
    pub fn length_units(&self) -> f64 {
        self.calibration.measured_length_units
    }

    #[inline]
    pub fn pixels_per_unit(&self) -> f64 {
        self.calibration.pixels_per_unit
    }
}

/// Everything one analysis produced.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub width: u32,
    pub height: u32,
    pub background: BackgroundColor,
    /// Regions that survived the noise filter, in discovery order.
    pub regions: Vec<Region>,
    /// Number of grown regions dropped as noise.
    pub discarded_regions: usize,
    pub outcome: Result<Measurement, MeasureFailure>,
    /// Same size as the photo; black where nothing was grown.
    pub debug_image: RgbImage,
}

impl Analysis {
    /// The measured length, if any.
    pub fn length(&self) -> Option<f64> {
        self.outcome.as_ref().ok().map(Measurement::length_units)
    }

    /// The measured length, or 0.0 when nothing was measured.
    pub fn length_or_zero(&self) -> f64 {
        self.length().unwrap_or(0.0)
    }

    pub fn is_measured(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Builds the serializable report for this analysis.
    pub fn report(&self, unit_label: &str) -> MeasureReport {
        MeasureReport::from_analysis(self, unit_label)
    }
}

/// Runs the whole pipeline on `photo`.
///
/// Fails only for an invalid config or a photo over `config.max_pixels`.
/// Measurement problems are reported in [`Analysis::outcome`].
pub fn analyze(photo: &Photo, config: &MeasureConfig) -> Result<Analysis, CobgaugeError> {
    config.validate()?;
    if photo.area() > config.max_pixels {
        return Err(CobgaugeError::invalid_input(format!(
            "{}x{} photo has {} pixels, limit is {}",
            photo.width(),
            photo.height(),
            photo.area(),
            config.max_pixels
        )));
    }

    let background = estimate_background(photo);
    let segmentation = segment(photo, background, &SegmentParams::from(config));
    let regions = segmentation.regions();
    tracing::debug!(
        kept = regions.len(),
        discarded = segmentation.discarded.len(),
        sample_points = segmentation.sample_points,
        "segmentation done"
    );

    let classify_opts = ClassifyOptions {
        min_pixel_area: config.min_pixel_area,
        reference_max_area_fraction: config.reference_max_area_fraction,
    };
    let outcome = classify_regions(&regions, photo.area(), &classify_opts).and_then(|roles| {
        let calibration = calibrate(&roles.reference, &roles.measured, config.coin_real_diameter)?;
        Ok(Measurement {
            reference: roles.reference,
            measured: roles.measured,
            calibration,
        })
    });

    match &outcome {
        Ok(m) => tracing::info!(
            length = m.length_units(),
            pixels_per_unit = m.pixels_per_unit(),
            unit = %config.unit_label,
            "object measured"
        ),
        Err(failure) => tracing::info!(%failure, "no length measured"),
    }

    let debug_image = render::render_debug_image(
        photo.width(),
        photo.height(),
        &segmentation,
        config.growth_step,
        config.debug_seed,
    );

    Ok(Analysis {
        width: photo.width(),
        height: photo.height(),
        background,
        regions,
        discarded_regions: segmentation.discarded.len(),
        outcome,
        debug_image,
    })
}
