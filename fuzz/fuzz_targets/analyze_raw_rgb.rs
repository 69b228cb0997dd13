//! Fuzz target for the measurement pipeline.
//!
//! The first two bytes pick the photo width; the rest is taken as an
//! interleaved RGB buffer. Mismatched buffers must be rejected, and any photo
//! that is accepted must be analysed without panicking.

#![no_main]

use cobgauge::config::MeasureConfig;
use cobgauge::measure::analyze;
use cobgauge::photo::Photo;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 || data.len() > 1024 * 1024 {
        return;
    }

    let width = u16::from_le_bytes([data[0], data[1]]) as u32;
    let body = &data[2..];
    let pixels = (body.len() / 3) as u32;
    let height = if width == 0 { 0 } else { pixels / width };

    let Ok(photo) = Photo::from_raw_rgb(width, height, &body[..body.len() - body.len() % 3]) else {
        return;
    };

    if let Ok(analysis) = analyze(&photo, &MeasureConfig::default()) {
        assert_eq!(analysis.debug_image.dimensions(), (width, height));
        if let Some(length) = analysis.length() {
            assert!(length.is_finite() && length >= 0.0);
        }
    }
});
