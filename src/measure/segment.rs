//! Coarse-grid foreground segmentation.

use super::background::BackgroundColor;
use super::grow::{grow_region, GrowParams, VisitedMask};
use super::region::{GrownRegion, PixelCoord, Region};
use crate::config::MeasureConfig;
use crate::photo::Photo;

/// Parameters of one segmentation pass.
///
/// Unlike [`MeasureConfig`] these are not validated, which lets tests
/// explore combinations the config would refuse.
#[derive(Clone, Copy, Debug)]
pub struct SegmentParams {
    pub sensitivity: f64,
    pub scan_stride: u32,
    pub growth_step: u32,
    pub min_pixel_area: u32,
}

impl From<&MeasureConfig> for SegmentParams {
    fn from(config: &MeasureConfig) -> Self {
        Self {
            sensitivity: config.sensitivity,
            scan_stride: config.scan_stride,
            growth_step: config.growth_step,
            min_pixel_area: config.min_pixel_area,
        }
    }
}

/// Output of one segmentation pass.
#[derive(Clone, Debug, Default)]
pub struct Segmentation {
    /// Regions that cleared `min_pixel_area`, in discovery order.
    pub kept: Vec<GrownRegion>,
    /// Regions rejected as noise, in discovery order.
    pub discarded: Vec<GrownRegion>,
    /// Number of grid points examined by the seed scan.
    pub sample_points: usize,
    /// Number of pixels claimed by any region.
    pub visited: usize,
}

impl Segmentation {
    /// The kept regions without their membership.
    pub fn regions(&self) -> Vec<Region> {
        self.kept.iter().map(|g| g.region).collect()
    }

    /// Every grown region, kept first.
    pub fn all_grown(&self) -> impl Iterator<Item = &GrownRegion> {
        self.kept.iter().chain(self.discarded.iter())
    }
}

/// Scans `photo` on a `scan_stride` grid and grows a region from every
/// foreground sample not already claimed.
///
/// A `scan_stride`-wide border is never used as a seed, though regions may
/// grow into it. Objects smaller than the stride can fall between grid
/// points and go unseen.
pub fn segment(photo: &Photo, background: BackgroundColor, params: &SegmentParams) -> Segmentation {
    let (width, height) = (photo.width(), photo.height());
    let stride = params.scan_stride.max(1);
    let grow = GrowParams {
        background,
        sensitivity: params.sensitivity,
        step: params.growth_step.max(1),
    };

    let mut visited = VisitedMask::new(width, height);
    let mut out = Segmentation::default();

    for y in (stride..height.saturating_sub(stride)).step_by(stride as usize) {
        for x in (stride..width.saturating_sub(stride)).step_by(stride as usize) {
            out.sample_points += 1;
            let seed = PixelCoord::new(x, y);
            if visited.is_visited(seed) {
                continue;
            }
            if !background.is_foreground(photo.pixel(x, y), params.sensitivity) {
                continue;
            }

            let grown = grow_region(photo, &mut visited, seed, &grow);
            if grown.region.pixel_count >= params.min_pixel_area {
                tracing::debug!(
                    x,
                    y,
                    pixels = grown.region.pixel_count,
                    bounds = ?grown.region.bounds,
                    "region found"
                );
                out.kept.push(grown);
            } else {
                tracing::trace!(x, y, pixels = grown.region.pixel_count, "noise region dropped");
                out.discarded.push(grown);
            }
        }
    }

    out.visited = visited.count();
    out
}
