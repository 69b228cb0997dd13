//! Assignment of the reference and measured roles.
//!
//! The reference object is assumed small and round, the measured object the
//! largest remaining shape. Two round objects, or a partly hidden coin, can
//! be misassigned; that is a limit of the heuristic and is left as is.

use super::region::Region;
use super::MeasureFailure;

/// Options for role assignment.
#[derive(Clone, Copy, Debug)]
pub struct ClassifyOptions {
    /// Regions with fewer visited pixels than this are ignored.
    pub min_pixel_area: u32,
    /// The reference must cover less than this fraction of the photo.
    pub reference_max_area_fraction: f64,
}

/// The two roles picked from a region list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    pub reference: Region,
    pub measured: Region,
}

/// Picks the reference and measured regions.
///
/// Regions below `min_pixel_area` are dropped first. Survivors are ordered by
/// how far their aspect ratio is from 1.0, ties keeping input order; the
/// first one smaller than `reference_max_area_fraction` of `total_area`
/// becomes the reference. The largest other survivor by pixel count becomes
/// the measured object, the earliest one winning a tie.
pub fn classify_regions(
    regions: &[Region],
    total_area: u64,
    opts: &ClassifyOptions,
) -> Result<Classification, MeasureFailure> {
    let candidates: Vec<(usize, &Region)> = regions
        .iter()
        .enumerate()
        .filter(|(_, r)| r.pixel_count >= opts.min_pixel_area)
        .collect();

    if candidates.len() < 2 {
        return Err(MeasureFailure::InsufficientObjects {
            found: candidates.len(),
        });
    }

    let mut by_squareness = candidates.clone();
    by_squareness.sort_by(|a, b| a.1.squareness_error().total_cmp(&b.1.squareness_error()));

    let area_limit = total_area as f64 * opts.reference_max_area_fraction;
    let (reference_idx, reference) = by_squareness
        .into_iter()
        .find(|(_, r)| (r.pixel_count as f64) < area_limit)
        .ok_or(MeasureFailure::NoReferenceCandidate)?;

    let mut measured: Option<&Region> = None;
    for &(idx, region) in &candidates {
        if idx == reference_idx {
            continue;
        }
        if measured.is_none_or(|best| region.pixel_count > best.pixel_count) {
            measured = Some(region);
        }
    }
    let measured = measured.ok_or(MeasureFailure::NoMeasuredCandidate)?;

    Ok(Classification {
        reference: *reference,
        measured: *measured,
    })
}
