//! Connected-component types.

use serde::Serialize;

/// A pixel coordinate (column, row).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PixelCoord {
    pub x: u32,
    pub y: u32,
}

impl PixelCoord {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box in pixel coordinates.
///
/// `width` and `height` are the distances between the extreme accepted
/// pixels, so a single-pixel region has a 0×0 box.
#[derive(Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Bounds {
    pub min_x: u32,
    pub min_y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    #[inline]
    pub fn new(min_x: u32, min_y: u32, width: u32, height: u32) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    /// Builds the box spanning two inclusive corners.
    #[inline]
    pub fn from_corners(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    #[inline]
    pub fn max_x(&self) -> u32 {
        self.min_x + self.width
    }

    #[inline]
    pub fn max_y(&self) -> u32 {
        self.min_y + self.height
    }

    /// Returns true if `p` lies inside the box (edges inclusive).
    #[inline]
    pub fn contains(&self, p: PixelCoord) -> bool {
        (self.min_x..=self.max_x()).contains(&p.x) && (self.min_y..=self.max_y()).contains(&p.y)
    }

    /// Width over height, or 0 for a box with no height.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            0.0
        } else {
            self.width as f64 / self.height as f64
        }
    }

    /// The longer of the two sides.
    #[inline]
    pub fn longest_side(&self) -> u32 {
        self.width.max(self.height)
    }

    /// Mean of width and height.
    #[inline]
    pub fn mean_side(&self) -> f64 {
        (self.width as f64 + self.height as f64) / 2.0
    }
}

impl std::fmt::Debug for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bounds({}, {}; {}x{})",
            self.min_x, self.min_y, self.width, self.height
        )
    }
}

/// One connected component found by the segmenter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Region {
    pub bounds: Bounds,
    /// Number of pixels visited while growing. The grower probes on a
    /// lattice, so this is a coarse proxy for area.
    pub pixel_count: u32,
}

impl Region {
    #[inline]
    pub fn new(bounds: Bounds, pixel_count: u32) -> Self {
        Self {
            bounds,
            pixel_count,
        }
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.bounds.aspect_ratio()
    }

    /// Distance of the aspect ratio from a perfect square.
    #[inline]
    pub fn squareness_error(&self) -> f64 {
        (1.0 - self.aspect_ratio()).abs()
    }
}

/// A region together with the coordinates of every pixel it accepted.
///
/// Membership is what the debug renderer consumes; the geometric stages only
/// look at [`Region`].
#[derive(Clone, Debug, PartialEq)]
pub struct GrownRegion {
    pub region: Region,
    pub members: Vec<PixelCoord>,
}
