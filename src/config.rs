//! Measurement configuration.
//!
//! [`MeasureConfig`] gathers every tunable of the pipeline. It can be built
//! in code, loaded from a YAML or JSON file, and then overridden field by
//! field from the command line.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CobgaugeError;

/// Diameter of the reference coin, in length units.
pub const DEFAULT_COIN_DIAMETER: f64 = 2.4;

/// Default seed for debug-image region colours.
pub const DEFAULT_DEBUG_SEED: u64 = 0x00c0_b5ca_1e00;

/// Tunables for one analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MeasureConfig {
    /// Known physical diameter of the reference object.
    pub coin_real_diameter: f64,
    /// Label printed next to lengths (`"cm"`, `"in"`, ...).
    pub unit_label: String,
    /// Normalized colour distance above which a pixel is foreground.
    pub sensitivity: f64,
    /// Regions with fewer visited pixels than this are noise.
    pub min_pixel_area: u32,
    /// Step of the coarse seed scan.
    pub scan_stride: u32,
    /// Neighbour probe distance used while growing a region.
    pub growth_step: u32,
    /// A reference candidate must cover less than this fraction of the photo.
    pub reference_max_area_fraction: f64,
    /// Photos with more pixels than this are rejected.
    pub max_pixels: u64,
    /// Seed for the pseudo-random debug colours.
    pub debug_seed: u64,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            coin_real_diameter: DEFAULT_COIN_DIAMETER,
            unit_label: "cm".to_string(),
            sensitivity: 0.15,
            min_pixel_area: 40,
            scan_stride: 4,
            growth_step: 2,
            reference_max_area_fraction: 0.30,
            max_pixels: 40_000_000,
            debug_seed: DEFAULT_DEBUG_SEED,
        }
    }
}

impl MeasureConfig {
    /// Loads a config file. `.json` files are read as JSON, anything else as
    /// YAML. Missing fields fall back to their defaults.
    pub fn from_path(path: &Path) -> Result<Self, CobgaugeError> {
        let data = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config: MeasureConfig = if is_json {
            serde_json::from_str(&data).map_err(|e| CobgaugeError::ConfigParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        } else {
            serde_yaml::from_str(&data).map_err(|e| CobgaugeError::ConfigParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks every field against its allowed range.
    pub fn validate(&self) -> Result<(), CobgaugeError> {
        if !self.coin_real_diameter.is_finite() || self.coin_real_diameter <= 0.0 {
            return Err(CobgaugeError::invalid_config(format!(
                "coin_real_diameter must be a positive number, got {}",
                self.coin_real_diameter
            )));
        }
        if !(self.sensitivity > 0.0 && self.sensitivity < 1.0) {
            return Err(CobgaugeError::invalid_config(format!(
                "sensitivity must lie strictly between 0 and 1, got {}",
                self.sensitivity
            )));
        }
        if self.min_pixel_area == 0 {
            return Err(CobgaugeError::invalid_config("min_pixel_area must be >= 1"));
        }
        if self.scan_stride == 0 || self.growth_step == 0 {
            return Err(CobgaugeError::invalid_config(format!(
                "scan_stride ({}) and growth_step ({}) must be >= 1",
                self.scan_stride, self.growth_step
            )));
        }
        // Every scan point must lie on the probe lattice of any seed found
        // earlier in the same row or column, otherwise one object fragments
        // into several interleaved regions.
        if self.scan_stride % self.growth_step != 0 {
            return Err(CobgaugeError::invalid_config(format!(
                "scan_stride ({}) must be a multiple of growth_step ({})",
                self.scan_stride, self.growth_step
            )));
        }
        if !(self.reference_max_area_fraction > 0.0 && self.reference_max_area_fraction <= 1.0) {
            return Err(CobgaugeError::invalid_config(format!(
                "reference_max_area_fraction must lie in (0, 1], got {}",
                self.reference_max_area_fraction
            )));
        }
        if self.max_pixels == 0 {
            return Err(CobgaugeError::invalid_config("max_pixels must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        MeasureConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_out_of_range_sensitivity() {
        for sensitivity in [0.0, 1.0, -0.5, f64::NAN] {
            let config = MeasureConfig {
                sensitivity,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(CobgaugeError::InvalidConfig { .. })),
                "sensitivity {} accepted",
                sensitivity
            );
        }
    }

    #[test]
    fn rejects_non_positive_diameter() {
        let config = MeasureConfig {
            coin_real_diameter: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_stride_not_multiple_of_step() {
        let config = MeasureConfig {
            scan_stride: 4,
            growth_step: 3,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("multiple of growth_step"));

        let config = MeasureConfig {
            scan_stride: 2,
            growth_step: 4,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn accepts_unit_step_with_any_stride() {
        let config = MeasureConfig {
            scan_stride: 5,
            growth_step: 1,
            ..Default::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn loads_partial_yaml_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gauge.yaml");
        fs::write(&path, "coin_real_diameter: 2.65\nunit_label: in\n").unwrap();

        let config = MeasureConfig::from_path(&path).unwrap();
        assert_eq!(config.coin_real_diameter, 2.65);
        assert_eq!(config.unit_label, "in");
        assert_eq!(config.scan_stride, 4);
    }

    #[test]
    fn loads_json_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gauge.json");
        fs::write(&path, r#"{"sensitivity": 0.3, "min_pixel_area": 10}"#).unwrap();

        let config = MeasureConfig::from_path(&path).unwrap();
        assert_eq!(config.sensitivity, 0.3);
        assert_eq!(config.min_pixel_area, 10);
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gauge.yaml");
        fs::write(&path, "coin_diameter: 2.4\n").unwrap();

        let err = MeasureConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, CobgaugeError::ConfigParse { .. }));
    }

    #[test]
    fn loaded_config_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gauge.yaml");
        fs::write(&path, "growth_step: 0\n").unwrap();

        let err = MeasureConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, CobgaugeError::InvalidConfig { .. }));
    }
}
