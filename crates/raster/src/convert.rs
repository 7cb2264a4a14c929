//! Color-space conversions: grayscale and hue-to-intensity remapping.

use framelens_common::error::FramelensResult;
use rayon::prelude::*;

use crate::frame::{Frame, GrayFrame};

/// Scale factor packing a 0-360 degree hue into one byte.
const HUE_BYTE_RATIO: f32 = 256.0 / 360.0;

/// Convert a BGR frame to grayscale using BT.601 luma weights.
pub fn grayscale(frame: &Frame) -> GrayFrame {
    let (width, height) = frame.dimensions();
    let mut out = GrayFrame::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let p = frame.pixel(x, y);
            let luma = 0.299 * p.r as f32 + 0.587 * p.g as f32 + 0.114 * p.b as f32;
            out.set_value(x, y, luma.round().min(255.0) as u8);
        }
    }
    out
}

/// Remap every pixel's hue into a gray intensity.
///
/// The hue component (0-360 degrees) of each BGR pixel is scaled into one
/// byte (`floor(hue * 256/360)`). This is a dense per-pixel pass over the
/// whole frame; rows are processed in parallel.
pub fn hue_gray(frame: &Frame) -> FramelensResult<GrayFrame> {
    let (width, height) = frame.dimensions();
    let mut buf = vec![0u8; width * height];

    buf.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        for (x, out) in row.iter_mut().enumerate() {
            let p = frame.pixel(x, y);
            *out = (hue_degrees(p.r, p.g, p.b) * HUE_BYTE_RATIO).floor() as u8;
        }
    });

    GrayFrame::from_raw(width, height, buf)
}

/// Hue of an RGB color in degrees, 0.0 for achromatic pixels.
fn hue_degrees(r: u8, g: u8, b: u8) -> f32 {
    let (r, g, b) = (r as f32, g as f32, b as f32);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if delta == 0.0 {
        return 0.0;
    }

    let hue = if max == r {
        60.0 * ((g - b) / delta)
    } else if max == g {
        60.0 * ((b - r) / delta) + 120.0
    } else {
        60.0 * ((r - g) / delta) + 240.0
    };

    if hue < 0.0 {
        hue + 360.0
    } else {
        hue
    }
}
