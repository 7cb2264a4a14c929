//! Frame producers and external feature matching.

use framelens_common::error::FramelensResult;
use framelens_raster::{Bgr, Frame};

/// A device or generator that delivers frames to the pipeline.
pub trait FrameSource {
    fn start(&mut self) -> FramelensResult<()>;
    fn stop(&mut self) -> FramelensResult<()>;
    fn pause(&mut self) -> FramelensResult<()>;
    fn frame_rate(&self) -> f64;
}

/// Draws feature matches between a model image and a live frame.
pub trait FeatureMatcher: Send {
    fn draw_matches(&self, model: &Frame, frame: &Frame) -> FramelensResult<Frame>;
}

/// Deterministic generator: a bright square drifting over a gradient
/// background. Used by offline runs and tests in place of a camera.
#[derive(Debug)]
pub struct SyntheticSource {
    width: usize,
    height: usize,
    frame_rate: f64,
    index: u64,
    running: bool,
}

impl SyntheticSource {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            frame_rate: 30.0,
            index: 0,
            running: false,
        }
    }

    pub fn frame_index(&self) -> u64 {
        self.index
    }

    /// Produce the next frame in the sequence.
    pub fn next_frame(&mut self) -> Frame {
        let mut frame = Frame::new(self.width, self.height);

        for y in 0..self.height {
            for x in 0..self.width {
                let shade = ((x * 160) / self.width.max(1)) as u8;
                frame.set_pixel(x, y, Bgr::new(shade / 2, shade / 3, shade));
            }
        }

        // The square advances one pixel per frame and wraps around.
        let side = (self.width.min(self.height) / 4).max(1);
        let span = self.width.saturating_sub(side).max(1);
        let x0 = (self.index as usize) % span;
        let y0 = (self.height.saturating_sub(side)) / 2;
        for y in y0..(y0 + side).min(self.height) {
            for x in x0..(x0 + side).min(self.width) {
                frame.set_pixel(x, y, Bgr::new(255, 255, 255));
            }
        }

        self.index += 1;
        frame
    }
}

impl FrameSource for SyntheticSource {
    fn start(&mut self) -> FramelensResult<()> {
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) -> FramelensResult<()> {
        self.running = false;
        self.index = 0;
        Ok(())
    }

    fn pause(&mut self) -> FramelensResult<()> {
        self.running = false;
        Ok(())
    }

    fn frame_rate(&self) -> f64 {
        self.frame_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_advance_deterministically() {
        let mut a = SyntheticSource::new(64, 48);
        let mut b = SyntheticSource::new(64, 48);

        let first = a.next_frame();
        assert_eq!(first, b.next_frame());
        // The moving square makes consecutive frames differ.
        assert_ne!(a.next_frame(), first);
    }

    #[test]
    fn stop_rewinds_the_sequence() {
        let mut src = SyntheticSource::new(32, 32);
        src.start().unwrap();
        let first = src.next_frame();
        src.next_frame();
        src.stop().unwrap();
        assert_eq!(src.next_frame(), first);
    }
}
