//! Binary thresholding.

use crate::frame::GrayFrame;

/// Two-sided binary threshold: pixels above `min` become `max`, others 0.
pub fn binary(src: &GrayFrame, min: i32, max: i32) -> GrayFrame {
    let (width, height) = src.dimensions();
    let min = min.clamp(0, 255) as u8;
    let max = max.clamp(0, 255) as u8;

    let mut out = GrayFrame::new(width, height);
    for y in 0..height {
        for x in 0..width {
            if src.value(x, y) > min {
                out.set_value(x, y, max);
            }
        }
    }
    out
}
