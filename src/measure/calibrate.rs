//! Pixel-to-length calibration against the reference object.

use serde::Serialize;

use super::region::Region;
use super::MeasureFailure;

/// Scale derived from the reference object and the resulting length.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Calibration {
    /// Pixels per length unit.
    pub pixels_per_unit: f64,
    /// Length of the measured object in length units.
    pub measured_length_units: f64,
}

/// Converts the measured region's longer bounding side to physical units.
///
/// The reference size is the mean of its bounding width and height, which
/// softens the effect of a coin photographed slightly off-axis. The measured
/// size is the longer bounding side, so objects lying diagonally come out
/// short.
pub fn calibrate(
    reference: &Region,
    measured: &Region,
    known_diameter: f64,
) -> Result<Calibration, MeasureFailure> {
    let reference_px = reference.bounds.mean_side();
    if reference_px <= 0.0 || !known_diameter.is_finite() || known_diameter <= 0.0 {
        return Err(MeasureFailure::DegenerateCalibration);
    }

    let pixels_per_unit = reference_px / known_diameter;
    let measured_px = measured.bounds.longest_side() as f64;

    Ok(Calibration {
        pixels_per_unit,
        measured_length_units: measured_px / pixels_per_unit,
    })
}
