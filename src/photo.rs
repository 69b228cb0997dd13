//! Input photo model.
//!
//! A [`Photo`] is an immutable grid of 8-bit RGB pixels stored row-major.
//! Construction is the only place where the `width × height` length
//! invariant is checked; every stage downstream relies on it.

use std::path::Path;

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::error::CobgaugeError;

/// An 8-bit RGB triple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uniform grey.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    pub const BLACK: Rgb = Rgb::gray(0);
    pub const WHITE: Rgb = Rgb::gray(255);
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(px: Rgb) -> Self {
        [px.r, px.g, px.b]
    }
}

/// A validated, row-major RGB photo.
#[derive(Clone, PartialEq, Eq)]
pub struct Photo {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Photo {
    /// Builds a photo from a pixel buffer of exactly `width × height` entries.
    ///
    /// Fails with [`CobgaugeError::InvalidInput`] when either dimension is
    /// zero or when the buffer length disagrees with the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<Self, CobgaugeError> {
        if width == 0 || height == 0 {
            return Err(CobgaugeError::invalid_input(format!(
                "dimensions {}x{} must be positive",
                width, height
            )));
        }

        let expected = (width as u64) * (height as u64);
        if pixels.len() as u64 != expected {
            return Err(CobgaugeError::invalid_input(format!(
                "buffer holds {} pixels but {}x{} needs {}",
                pixels.len(),
                width,
                height,
                expected
            )));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds a photo from interleaved `RGBRGB...` bytes.
    pub fn from_raw_rgb(width: u32, height: u32, bytes: &[u8]) -> Result<Self, CobgaugeError> {
        if bytes.len() % 3 != 0 {
            return Err(CobgaugeError::invalid_input(format!(
                "raw buffer length {} is not a multiple of 3",
                bytes.len()
            )));
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Decodes an image file.
    ///
    /// When `max_side` is given and the longer side exceeds it, the image is
    /// downscaled (triangle filter) so the longer side equals `max_side`.
    pub fn open(path: &Path, max_side: Option<u32>) -> Result<Self, CobgaugeError> {
        let decoded = image::open(path).map_err(|source| CobgaugeError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;
        let mut rgb = decoded.to_rgb8();

        if let Some(limit) = max_side.filter(|&m| m > 0) {
            let (w, h) = rgb.dimensions();
            let longest = w.max(h);
            if longest > limit {
                let scale = limit as f64 / longest as f64;
                let nw = ((w as f64 * scale).round() as u32).max(1);
                let nh = ((h as f64 * scale).round() as u32).max(1);
                tracing::debug!(from = ?(w, h), to = ?(nw, nh), "downscaling photo");
                rgb = image::imageops::resize(&rgb, nw, nh, FilterType::Triangle);
            }
        }

        Self::try_from(rgb)
    }

    /// Builds a photo filled with a single colour.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Result<Self, CobgaugeError> {
        let len = (width as usize).saturating_mul(height as usize);
        Self::new(width, height, vec![color; len])
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    #[inline]
    pub fn area(&self) -> u64 {
        self.pixels.len() as u64
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Returns the pixel at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the photo.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        self.pixels[self.index(x, y)]
    }

    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Copies the photo into an `image` buffer, e.g. for saving.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        let raw = self.pixels.iter().flat_map(|&px| <[u8; 3]>::from(px)).collect();
        image::RgbImage::from_raw(self.width, self.height, raw)
            .expect("pixel count matches dimensions")
    }

    /// Overwrites the pixel at `(x, y)`. Used by scene builders.
    pub(crate) fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }
}

impl std::fmt::Debug for Photo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Photo")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl TryFrom<image::RgbImage> for Photo {
    type Error = CobgaugeError;

    /// Converts a decoded image, rejecting empty ones.
    fn try_from(img: image::RgbImage) -> Result<Self, Self::Error> {
        let (width, height) = img.dimensions();
        Photo::from_raw_rgb(width, height, img.as_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_matching_buffer() {
        let photo = Photo::new(3, 2, vec![Rgb::gray(7); 6]).unwrap();
        assert_eq!(photo.width(), 3);
        assert_eq!(photo.height(), 2);
        assert_eq!(photo.area(), 6);
        assert_eq!(photo.pixel(2, 1), Rgb::gray(7));
    }

    #[test]
    fn new_rejects_length_mismatch() {
        let err = Photo::new(3, 2, vec![Rgb::BLACK; 5]).unwrap_err();
        assert!(matches!(err, CobgaugeError::InvalidInput { .. }));
        assert!(err.to_string().contains("needs 6"));
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(matches!(
            Photo::new(0, 4, Vec::new()),
            Err(CobgaugeError::InvalidInput { .. })
        ));
        assert!(matches!(
            Photo::new(4, 0, Vec::new()),
            Err(CobgaugeError::InvalidInput { .. })
        ));
    }

    #[test]
    fn raw_rgb_is_interleaved() {
        let photo = Photo::from_raw_rgb(2, 1, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(photo.pixel(0, 0), Rgb::new(1, 2, 3));
        assert_eq!(photo.pixel(1, 0), Rgb::new(4, 5, 6));
    }

    #[test]
    fn empty_decoded_image_is_rejected() {
        let img = image::RgbImage::new(0, 0);
        assert!(Photo::try_from(img).is_err());
    }

    #[test]
    fn raw_rgb_rejects_partial_triples() {
        assert!(Photo::from_raw_rgb(1, 1, &[1, 2]).is_err());
    }

    #[test]
    fn open_downscales_long_side() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        image::RgbImage::from_pixel(400, 100, image::Rgb([9, 9, 9]))
            .save(&path)
            .unwrap();

        let photo = Photo::open(&path, Some(200)).unwrap();
        assert_eq!((photo.width(), photo.height()), (200, 50));

        let photo = Photo::open(&path, Some(1000)).unwrap();
        assert_eq!((photo.width(), photo.height()), (400, 100));
    }

    #[test]
    fn open_reports_decode_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        assert!(matches!(
            Photo::open(&path, None),
            Err(CobgaugeError::ImageDecode { .. })
        ));
    }

    #[test]
    fn converts_from_image_crate() {
        let mut img = image::RgbImage::new(4, 3);
        img.put_pixel(3, 2, image::Rgb([10, 20, 30]));
        let photo = Photo::try_from(img).unwrap();
        assert_eq!(photo.pixel(3, 2), Rgb::new(10, 20, 30));
        assert_eq!(photo.pixel(0, 0), Rgb::BLACK);
        assert_eq!(photo.to_rgb_image().get_pixel(3, 2).0, [10, 20, 30]);
    }
}
