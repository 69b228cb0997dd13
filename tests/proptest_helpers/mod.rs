#![allow(dead_code)]

use cobgauge::measure::{Bounds, Region};
use cobgauge::photo::{Photo, Rgb};
use cobgauge::synthetic::Scene;
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A solid rectangle on a uniform backdrop, with its true inclusive extent.
#[derive(Clone, Debug)]
pub struct RectScene {
    pub photo: Photo,
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

/// Backdrop and object colours far enough apart for any sensitivity below
/// 0.3.
pub fn arb_contrasting_colors() -> impl Strategy<Value = (Rgb, Rgb)> {
    (0u8..=255, 0u8..=255, 0u8..=255).prop_flat_map(|(r, g, b)| {
        let bg = Rgb::new(r, g, b);
        let fg = Rgb::new(
            if r < 128 { r + 127 } else { r - 127 },
            if g < 128 { g + 127 } else { g - 127 },
            if b < 128 { b + 127 } else { b - 127 },
        );
        Just((bg, fg))
    })
}

/// One rectangle, at least `min_side` pixels on each side, placed clear of
/// the frame corners and of a `margin`-pixel border.
pub fn arb_rect_scene(min_side: u32, margin: u32) -> impl Strategy<Value = RectScene> {
    (
        (margin * 2 + min_side + 8)..160u32,
        (margin * 2 + min_side + 8)..120u32,
        arb_contrasting_colors(),
    )
        .prop_flat_map(move |(w, h, colors)| {
            let max_rw = w - 2 * margin;
            let max_rh = h - 2 * margin;
            (
                Just((w, h, colors)),
                min_side..=max_rw,
                min_side..=max_rh,
            )
        })
        .prop_flat_map(move |((w, h, colors), rw, rh)| {
            (
                Just((w, h, colors, rw, rh)),
                margin..=(w - margin - rw),
                margin..=(h - margin - rh),
            )
        })
        .prop_map(|((w, h, (bg, fg), rw, rh), x0, y0)| RectScene {
            photo: Scene::new(w, h).background(bg).rect(x0, y0, rw, rh, fg).render(),
            x0,
            y0,
            x1: x0 + rw - 1,
            y1: y0 + rh - 1,
        })
}

/// An arbitrary region with bounds up to 400 pixels a side.
pub fn arb_region() -> impl Strategy<Value = Region> {
    (0u32..200, 0u32..200, 0u32..400, 0u32..400, 1u32..5000)
        .prop_map(|(x, y, w, h, pixels)| Region::new(Bounds::new(x, y, w, h), pixels))
}
