//! Batch report types: one row per photo.

use serde::Serialize;
use std::fmt;

use crate::error::CobgaugeError;
use crate::measure::Analysis;

/// What happened to one photo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Measured,
    NotMeasured,
    Error,
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchStatus::Measured => write!(f, "measured"),
            BatchStatus::NotMeasured => write!(f, "not measured"),
            BatchStatus::Error => write!(f, "error"),
        }
    }
}

/// One photo of a batch run.
#[derive(Clone, Debug, Serialize)]
pub struct BatchRow {
    /// Path relative to the batch root.
    pub file: String,
    pub status: BatchStatus,
    pub length: Option<f64>,
    pub pixels_per_unit: Option<f64>,
    pub regions: usize,
    /// Failure or error message; empty when measured.
    pub detail: String,
}

impl BatchRow {
    pub fn from_analysis(file: String, analysis: &Analysis) -> Self {
        match &analysis.outcome {
            Ok(m) => Self {
                file,
                status: BatchStatus::Measured,
                length: Some(m.length_units()),
                pixels_per_unit: Some(m.pixels_per_unit()),
                regions: analysis.regions.len(),
                detail: String::new(),
            },
            Err(failure) => Self {
                file,
                status: BatchStatus::NotMeasured,
                length: None,
                pixels_per_unit: None,
                regions: analysis.regions.len(),
                detail: failure.to_string(),
            },
        }
    }

    pub fn error(file: String, message: String) -> Self {
        Self {
            file,
            status: BatchStatus::Error,
            length: None,
            pixels_per_unit: None,
            regions: 0,
            detail: message,
        }
    }
}

/// All rows of a batch run, in file order.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BatchReport {
    pub unit: String,
    pub rows: Vec<BatchRow>,
}

impl BatchReport {
    pub fn new(unit: String) -> Self {
        Self {
            unit,
            rows: Vec::new(),
        }
    }

    pub fn add(&mut self, row: BatchRow) {
        self.rows.push(row);
    }

    pub fn measured_count(&self) -> usize {
        self.count(BatchStatus::Measured)
    }

    pub fn count(&self, status: BatchStatus) -> usize {
        self.rows.iter().filter(|r| r.status == status).count()
    }

    /// Renders the rows as CSV with a header line.
    pub fn to_csv_string(&self) -> Result<String, CobgaugeError> {
        let mut csv_writer = csv::Writer::from_writer(Vec::new());
        for row in &self.rows {
            csv_writer.serialize(row)?;
        }

        let bytes = csv_writer
            .into_inner()
            .map_err(|e| CobgaugeError::Io(e.into_error()))?;

        String::from_utf8(bytes).map_err(|e| {
            CobgaugeError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} photo(s): {} measured, {} not measured, {} error(s)",
            self.rows.len(),
            self.measured_count(),
            self.count(BatchStatus::NotMeasured),
            self.count(BatchStatus::Error)
        )?;
        writeln!(f)?;

        for row in &self.rows {
            match row.length {
                Some(length) => writeln!(f, "  {}: {:.2} {}", row.file, length, self.unit)?,
                None => writeln!(f, "  {}: {} ({})", row.file, row.status, row.detail)?,
            }
        }

        Ok(())
    }
}
