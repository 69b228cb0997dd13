//! Debug visualization of a segmentation pass.
//!
//! Kept separate from the grower: it only reads region membership and paints
//! a fresh image, so the geometry never depends on whether a debug image is
//! wanted.

use image::RgbImage;
use rand::{rngs::StdRng, RngExt, SeedableRng};

use super::segment::Segmentation;

/// Paints every grown region in its own pseudo-random colour on black.
///
/// Each member pixel is drawn as a `cell × cell` block, clipped to the
/// frame, so that regions grown on a sparse lattice read as solid shapes.
/// Colours come from a generator seeded with `seed` and every channel is at
/// least 64, keeping regions distinguishable from the background.
pub fn render_debug_image(
    width: u32,
    height: u32,
    segmentation: &Segmentation,
    cell: u32,
    seed: u64,
) -> RgbImage {
    let mut img = RgbImage::new(width, height);
    let mut rng = StdRng::seed_from_u64(seed);
    let cell = cell.max(1);

    for grown in segmentation.all_grown() {
        let color = image::Rgb([
            rng.random_range(64..=255u8),
            rng.random_range(64..=255u8),
            rng.random_range(64..=255u8),
        ]);

        for p in &grown.members {
            let x_end = p.x.saturating_add(cell).min(width);
            let y_end = p.y.saturating_add(cell).min(height);
            for y in p.y..y_end {
                for x in p.x..x_end {
                    img.put_pixel(x, y, color);
                }
            }
        }
    }

    img
}
