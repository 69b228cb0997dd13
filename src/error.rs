use std::path::PathBuf;
use thiserror::Error;

use crate::measure::MeasureFailure;

/// The main error type for cobgauge operations.
///
/// Only conditions that make an analysis impossible live here. A photo that
/// was analysed but yielded no length is reported through [`MeasureFailure`]
/// inside the analysis result instead.
#[derive(Debug, Error)]
pub enum CobgaugeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input image: {message}")]
    InvalidInput { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to parse config from {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write image {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to serialize report: {0}")]
    ReportWrite(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed while traversing {path}: {message}")]
    Traverse { path: PathBuf, message: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("No length measured: {failure}")]
    MeasurementFailed { failure: MeasureFailure },
}

impl CobgaugeError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
