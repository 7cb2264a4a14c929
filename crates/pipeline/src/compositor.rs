//! Multi-scale edge compositor behind the canny mode.
//!
//! Four edge layers are painted coarse-to-fine onto a blank canvas, so finer
//! scales win on overlap. With accumulation enabled the fine layer's slot
//! shows the summed trail of recent fine-scale edges instead.

use framelens_common::error::FramelensResult;
use framelens_raster::{blur, edge, Bgr, Frame, GrayFrame};

use crate::accum::AccumBuffer;
use crate::palette::{Palette, PaletteColor};
use crate::params::TuningParams;

/// Fixed scales: gaussian kernel size and canny threshold pair.
const SCALE_COARSEST: (usize, i32, i32) = (15, 40, 60);
const SCALE_COARSE: (usize, i32, i32) = (11, 15, 30);
const SCALE_FINE: (usize, i32, i32) = (7, 20, 15);

/// Render the composite edge image for one frame.
///
/// `gray` is the plain grayscale conversion; `gray_smooth` is the same image
/// smoothed with the live gaussian parameter and feeds the finest layer
/// together with the live threshold pair.
pub fn composite(
    gray: &GrayFrame,
    gray_smooth: &GrayFrame,
    params: &TuningParams,
    accum: &mut AccumBuffer,
    accumulate: bool,
    palette: &Palette,
) -> FramelensResult<Frame> {
    let coarsest = scaled_edges(gray, SCALE_COARSEST);
    let coarse = scaled_edges(gray, SCALE_COARSE);
    let fine = scaled_edges(gray, SCALE_FINE);
    let live = edge::canny(gray_smooth, params.thresh1, params.thresh2);

    // The buffer is only ever replaced frame by frame through capacity
    // eviction; toggling accumulation off leaves its contents in place.
    let trail = if accumulate {
        accum.push(fine.clone())?;
        // Light smoothing softens the trail's stair-stepping between frames.
        accum.sum().map(|sum| blur::smooth_gaussian(&sum, 3))
    } else {
        None
    };

    let (width, height) = gray.dimensions();
    let fine_slot = trail.as_ref().map_or(
        (&fine, palette.color(PaletteColor::EdgeFine)),
        |sum| (sum, palette.color(PaletteColor::EdgeTrail)),
    );
    paint_layers(
        width,
        height,
        &[
            (&coarsest, palette.color(PaletteColor::EdgeCoarsest)),
            (&coarse, palette.color(PaletteColor::EdgeCoarse)),
            fine_slot,
            (&live, palette.color(PaletteColor::EdgeFinest)),
        ],
    )
}

/// Stencil-paint the layers onto a blank canvas in the given order, so a
/// later layer wins wherever two masks overlap.
fn paint_layers(
    width: usize,
    height: usize,
    layers: &[(&GrayFrame, Bgr)],
) -> FramelensResult<Frame> {
    let mut canvas = Frame::new(width, height);
    for &(mask, shade) in layers {
        canvas.paint_masked(shade, mask)?;
    }
    Ok(canvas)
}

fn scaled_edges(gray: &GrayFrame, (kernel, thresh1, thresh2): (usize, i32, i32)) -> GrayFrame {
    edge::canny(&blur::smooth_gaussian(gray, kernel), thresh1, thresh2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use framelens_raster::Bgr;

    fn step_gray(width: usize, height: usize) -> GrayFrame {
        let mut img = GrayFrame::new(width, height);
        for y in 0..height {
            for x in width / 2..width {
                img.set_value(x, y, 255);
            }
        }
        img
    }

    fn run_composite(accum: &mut AccumBuffer, accumulate: bool) -> Frame {
        let gray = step_gray(32, 32);
        let params = TuningParams::default();
        let gray_smooth = blur::smooth_gaussian(&gray, params.gauss_size());
        let palette = Palette::standard();
        composite(&gray, &gray_smooth, &params, accum, accumulate, &palette).unwrap()
    }

    #[test]
    fn live_layer_wins_where_it_detects() {
        let gray = step_gray(32, 32);
        let params = TuningParams::default();
        let gray_smooth = blur::smooth_gaussian(&gray, params.gauss_size());
        let live = edge::canny(&gray_smooth, params.thresh1, params.thresh2);

        let palette = Palette::standard();
        let mut accum = AccumBuffer::new(4);
        let img = composite(&gray, &gray_smooth, &params, &mut accum, false, &palette).unwrap();

        let mut live_hits = 0usize;
        for y in 0..32 {
            for x in 0..32 {
                if live.value(x, y) != 0 {
                    live_hits += 1;
                    assert_eq!(img.pixel(x, y), palette.color(PaletteColor::EdgeFinest));
                }
            }
        }
        assert!(live_hits > 0, "the step must register on the live layer");
    }

    #[test]
    fn later_layers_win_on_overlapping_stencils() {
        // Four stencils: each covers its own column plus a shared column.
        let mut masks = Vec::new();
        for col in 0..4 {
            let mut mask = GrayFrame::new(8, 4);
            for y in 0..4 {
                mask.set_value(col, y, 255);
                mask.set_value(7, y, 255);
            }
            masks.push(mask);
        }

        let shades = [
            Bgr::new(1, 1, 1),
            Bgr::new(2, 2, 2),
            Bgr::new(3, 3, 3),
            Bgr::new(4, 4, 4),
        ];
        let layers: Vec<(&GrayFrame, Bgr)> =
            masks.iter().zip(shades).map(|(m, s)| (m, s)).collect();
        let img = paint_layers(8, 4, &layers).unwrap();

        // Disjoint columns keep their own layer's shade.
        for (col, shade) in shades.iter().enumerate() {
            assert_eq!(img.pixel(col, 2), *shade);
        }
        // The shared column takes the last-painted, highest-priority shade.
        assert_eq!(img.pixel(7, 2), shades[3]);
        // Untouched pixels stay black.
        assert_eq!(img.pixel(5, 2), Bgr::new(0, 0, 0));
    }

    #[test]
    fn background_stays_black() {
        let mut accum = AccumBuffer::new(4);
        let img = run_composite(&mut accum, false);
        assert_eq!(img.pixel(1, 1), Bgr::new(0, 0, 0));
        assert_eq!(img.pixel(30, 30), Bgr::new(0, 0, 0));
    }

    #[test]
    fn accumulation_fills_one_frame_per_cycle() {
        let mut accum = AccumBuffer::new(4);
        for expected in 1..=3 {
            run_composite(&mut accum, true);
            assert_eq!(accum.len(), expected);
        }
    }

    #[test]
    fn toggling_accumulation_off_keeps_the_window() {
        let mut accum = AccumBuffer::new(4);
        for _ in 0..4 {
            run_composite(&mut accum, true);
        }
        assert_eq!(accum.len(), 4);

        // Off cycles neither push nor discard; only capacity eviction
        // replaces buffered frames.
        run_composite(&mut accum, false);
        assert_eq!(accum.len(), 4);

        // Re-enabling evicts the oldest held frame and inserts the new one.
        run_composite(&mut accum, true);
        assert_eq!(accum.len(), 4);
    }

    #[test]
    fn trail_paints_in_the_trail_shade() {
        let gray = step_gray(32, 32);
        // Live thresholds above any 3x3 sobel response, so the live layer
        // stays empty and cannot overpaint the trail.
        let params = TuningParams {
            thresh1: 2000,
            thresh2: 3000,
            ..TuningParams::default()
        };
        let gray_smooth = blur::smooth_gaussian(&gray, params.gauss_size());
        let palette = Palette::standard();

        let mut accum = AccumBuffer::new(4);
        let img = composite(&gray, &gray_smooth, &params, &mut accum, true, &palette).unwrap();
        let trail = accum.sum().unwrap();

        let mut trail_hits = 0usize;
        for y in 0..32 {
            for x in 0..32 {
                if trail.value(x, y) != 0 {
                    trail_hits += 1;
                    assert_eq!(img.pixel(x, y), palette.color(PaletteColor::EdgeTrail));
                }
            }
        }
        assert!(trail_hits > 0, "the step must register on the fine layer");
    }
}
