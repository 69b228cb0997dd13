//! Background colour estimation from the photo corners.

use serde::Serialize;

use crate::photo::{Photo, Rgb};

/// Expected background colour, as per-channel floating point means.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BackgroundColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl BackgroundColor {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Mean absolute per-channel difference, normalized to `[0, 1]`.
    #[inline]
    pub fn distance(&self, px: Rgb) -> f64 {
        let dr = (px.r as f64 - self.r).abs();
        let dg = (px.g as f64 - self.g).abs();
        let db = (px.b as f64 - self.b).abs();
        (dr + dg + db) / (3.0 * 255.0)
    }

    /// True if `px` differs from the background by more than `sensitivity`.
    #[inline]
    pub fn is_foreground(&self, px: Rgb, sensitivity: f64) -> bool {
        self.distance(px) > sensitivity
    }
}

impl From<Rgb> for BackgroundColor {
    fn from(px: Rgb) -> Self {
        Self::new(px.r as f64, px.g as f64, px.b as f64)
    }
}

/// Averages the four corner pixels of `photo`.
///
/// Corners are the pixels least likely to be covered by the photographed
/// objects. A 1×1 photo yields its only pixel.
pub fn estimate_background(photo: &Photo) -> BackgroundColor {
    let (w, h) = (photo.width() - 1, photo.height() - 1);
    let corners = [
        photo.pixel(0, 0),
        photo.pixel(w, 0),
        photo.pixel(0, h),
        photo.pixel(w, h),
    ];

    let (r, g, b) = corners.iter().fold((0.0, 0.0, 0.0), |(r, g, b), px| {
        (r + px.r as f64, g + px.g as f64, b + px.b as f64)
    });
    BackgroundColor::new(r / 4.0, g / 4.0, b / 4.0)
}
