//! Serializable summary of one analysis.
//!
//! The same structure backs the text output (`Display`) and the JSON output
//! of the CLI.

use serde::Serialize;
use std::fmt;

use super::{Analysis, BackgroundColor, MeasureFailure, Region};

/// Report for one analysed photo.
#[derive(Clone, Debug, Serialize)]
pub struct MeasureReport {
    pub width: u32,
    pub height: u32,
    pub unit: String,
    pub background: BackgroundColor,
    pub regions: Vec<Region>,
    pub discarded_regions: usize,
    pub measured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixels_per_unit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Region>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measured_object: Option<Region>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<MeasureFailure>,
}

impl MeasureReport {
    pub fn from_analysis(analysis: &Analysis, unit_label: &str) -> Self {
        let (measurement, failure) = match &analysis.outcome {
            Ok(m) => (Some(*m), None),
            Err(f) => (None, Some(*f)),
        };

        Self {
            width: analysis.width,
            height: analysis.height,
            unit: unit_label.to_string(),
            background: analysis.background,
            regions: analysis.regions.clone(),
            discarded_regions: analysis.discarded_regions,
            measured: measurement.is_some(),
            length: measurement.map(|m| m.length_units()),
            pixels_per_unit: measurement.map(|m| m.pixels_per_unit()),
            reference: measurement.map(|m| m.reference),
            measured_object: measurement.map(|m| m.measured),
            failure,
        }
    }
}

impl fmt::Display for MeasureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Photo: {}x{}", self.width, self.height)?;
        writeln!(
            f,
            "Background: ({:.1}, {:.1}, {:.1})",
            self.background.r, self.background.g, self.background.b
        )?;
        writeln!(
            f,
            "Regions: {} kept, {} discarded as noise",
            self.regions.len(),
            self.discarded_regions
        )?;
        for (idx, region) in self.regions.iter().enumerate() {
            let b = region.bounds;
            writeln!(
                f,
                "  #{:<3} at ({}, {}) {}x{} px, {} samples, aspect {:.2}",
                idx,
                b.min_x,
                b.min_y,
                b.width,
                b.height,
                region.pixel_count,
                region.aspect_ratio()
            )?;
        }
        writeln!(f)?;

        match (self.length, self.pixels_per_unit, &self.failure) {
            (Some(length), Some(ppu), _) => {
                if let Some(r) = self.reference {
                    writeln!(
                        f,
                        "Reference: {}x{} px at ({}, {})",
                        r.bounds.width, r.bounds.height, r.bounds.min_x, r.bounds.min_y
                    )?;
                }
                if let Some(m) = self.measured_object {
                    writeln!(
                        f,
                        "Measured object: {}x{} px at ({}, {})",
                        m.bounds.width, m.bounds.height, m.bounds.min_x, m.bounds.min_y
                    )?;
                }
                writeln!(f, "Scale: {:.3} px/{}", ppu, self.unit)?;
                writeln!(f, "Length: {:.2} {}", length, self.unit)
            }
            (_, _, Some(failure)) => writeln!(f, "Not measured: {}", failure),
            _ => writeln!(f, "Not measured"),
        }
    }
}
