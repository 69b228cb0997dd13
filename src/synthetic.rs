//! Deterministic synthetic photos.
//!
//! Solid rectangles and discs painted over a uniform background. Used by the
//! test suites, the benchmarks and the fuzz target to build photos with known
//! geometry.

use crate::photo::{Photo, Rgb};

/// Default backdrop: light grey paper.
pub const PAPER: Rgb = Rgb::gray(240);
/// Default coin colour.
pub const BRONZE: Rgb = Rgb::new(150, 110, 50);
/// Default cob colour.
pub const KERNEL_YELLOW: Rgb = Rgb::new(235, 200, 60);

#[derive(Clone, Copy, Debug)]
enum Shape {
    Rect { x: u32, y: u32, w: u32, h: u32 },
    Disc { cx: u32, cy: u32, r: u32 },
}

/// A photo under construction. Shapes are painted in insertion order and
/// clipped to the frame.
#[derive(Clone, Debug)]
pub struct Scene {
    width: u32,
    height: u32,
    background: Rgb,
    shapes: Vec<(Shape, Rgb)>,
}

impl Scene {
    /// An empty scene on [`PAPER`].
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: PAPER,
            shapes: Vec::new(),
        }
    }

    pub fn background(mut self, color: Rgb) -> Self {
        self.background = color;
        self
    }

    /// Fills the `w × h` rectangle whose top-left pixel is `(x, y)`.
    pub fn rect(mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) -> Self {
        self.shapes.push((Shape::Rect { x, y, w, h }, color));
        self
    }

    /// Fills every pixel within `r` of `(cx, cy)`.
    pub fn disc(mut self, cx: u32, cy: u32, r: u32, color: Rgb) -> Self {
        self.shapes.push((Shape::Disc { cx, cy, r }, color));
        self
    }

    /// Paints the scene.
    ///
    /// # Panics
    /// Panics if the scene has a zero dimension.
    pub fn render(&self) -> Photo {
        let mut photo = Photo::filled(self.width, self.height, self.background)
            .expect("scene dimensions must be positive");

        for &(shape, color) in &self.shapes {
            match shape {
                Shape::Rect { x, y, w, h } => {
                    let x_end = x.saturating_add(w).min(self.width);
                    let y_end = y.saturating_add(h).min(self.height);
                    for py in y.min(y_end)..y_end {
                        for px in x.min(x_end)..x_end {
                            photo.set_pixel(px, py, color);
                        }
                    }
                }
                Shape::Disc { cx, cy, r } => {
                    let r2 = r as i64 * r as i64;
                    let y_end = cy.saturating_add(r).min(self.height - 1);
                    let x_end = cx.saturating_add(r).min(self.width - 1);
                    for py in cy.saturating_sub(r)..=y_end {
                        for px in cx.saturating_sub(r)..=x_end {
                            let dx = px as i64 - cx as i64;
                            let dy = py as i64 - cy as i64;
                            if dx * dx + dy * dy <= r2 {
                                photo.set_pixel(px, py, color);
                            }
                        }
                    }
                }
            }
        }

        photo
    }
}

/// A coin on the left and a horizontal cob on the right, scaled to the frame.
///
/// The coin has radius `height / 10` and is centred at `(width / 5,
/// height / 2)`. The cob spans `width / 2` pixels starting at
/// `x = 3 * width / 8` and is `height / 6` pixels tall.
pub fn coin_and_cob(width: u32, height: u32) -> Photo {
    let cob_h = height / 6;
    Scene::new(width, height)
        .disc(width / 5, height / 2, height / 10, BRONZE)
        .rect(
            3 * width / 8,
            height / 2 - cob_h / 2,
            width / 2,
            cob_h,
            KERNEL_YELLOW,
        )
        .render()
}
