//! Measuring every photo under a directory.
//!
//! Each photo gets its own analysis with its own state; a photo that fails
//! to decode or to measure becomes a row in the report rather than stopping
//! the run.

mod report;

pub use report::{BatchReport, BatchRow, BatchStatus};

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::MeasureConfig;
use crate::error::CobgaugeError;
use crate::measure::analyze;
use crate::photo::Photo;

/// File extensions picked up by [`collect_photos`].
pub const PHOTO_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Options for a batch run.
#[derive(Clone, Debug, Default)]
pub struct BatchOptions {
    /// Downscale photos whose longer side exceeds this.
    pub max_side: Option<u32>,
}

/// Lists photo files under `root`, recursively, sorted by path.
pub fn collect_photos(root: &Path) -> Result<Vec<PathBuf>, CobgaugeError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|source| CobgaugeError::Traverse {
            path: root.to_path_buf(),
            message: source.to_string(),
        })?;

        if entry.file_type().is_file() && has_extension(entry.path(), PHOTO_EXTENSIONS) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    allowed
        .iter()
        .any(|allowed_ext| ext.eq_ignore_ascii_case(allowed_ext))
}

/// Analyses every photo under `root`.
///
/// Fails only when the config is invalid or the directory cannot be walked.
pub fn measure_dir(
    root: &Path,
    config: &MeasureConfig,
    opts: &BatchOptions,
) -> Result<BatchReport, CobgaugeError> {
    config.validate()?;
    let files = collect_photos(root)?;
    tracing::info!(count = files.len(), root = %root.display(), "measuring photos");

    let mut report = BatchReport::new(config.unit_label.clone());
    for path in files {
        let name = rel_string(root, &path);
        let row = match Photo::open(&path, opts.max_side).and_then(|p| analyze(&p, config)) {
            Ok(analysis) => BatchRow::from_analysis(name, &analysis),
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "photo skipped");
                BatchRow::error(name, e.to_string())
            }
        };
        if row.status == BatchStatus::NotMeasured {
            tracing::warn!(file = %row.file, detail = %row.detail, "no length measured");
        }
        report.add(row);
    }

    Ok(report)
}

fn rel_string(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
