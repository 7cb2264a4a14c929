//! Display hand-off: rendered output and the sink that receives it.

use framelens_raster::{Frame, GrayFrame};

/// Output of one dispatch cycle, either a color or a gray raster.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Color(Frame),
    Gray(GrayFrame),
}

impl Rendered {
    pub fn dimensions(&self) -> (usize, usize) {
        match self {
            Rendered::Color(frame) => frame.dimensions(),
            Rendered::Gray(frame) => frame.dimensions(),
        }
    }

    /// Horizontally mirrored copy, applied once right before display.
    pub fn mirror_horizontal(&self) -> Rendered {
        match self {
            Rendered::Color(frame) => Rendered::Color(frame.mirror_horizontal()),
            Rendered::Gray(frame) => Rendered::Gray(frame.mirror_horizontal()),
        }
    }

    pub fn as_color(&self) -> Option<&Frame> {
        match self {
            Rendered::Color(frame) => Some(frame),
            Rendered::Gray(_) => None,
        }
    }

    pub fn as_gray(&self) -> Option<&GrayFrame> {
        match self {
            Rendered::Gray(frame) => Some(frame),
            Rendered::Color(_) => None,
        }
    }
}

/// Receives the rendered image at the end of each dispatch cycle.
pub trait DisplaySink: Send {
    fn present(&mut self, image: Rendered);
}

/// Sink that keeps every presented image, for tests and offline runs.
#[derive(Debug, Default)]
pub struct CollectingSink {
    frames: Vec<Rendered>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Rendered] {
        &self.frames
    }

    pub fn last(&self) -> Option<&Rendered> {
        self.frames.last()
    }

    pub fn take_frames(&mut self) -> Vec<Rendered> {
        std::mem::take(&mut self.frames)
    }
}

impl DisplaySink for CollectingSink {
    fn present(&mut self, image: Rendered) {
        self.frames.push(image);
    }
}

/// Sink that discards everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl DisplaySink for NullSink {
    fn present(&mut self, _image: Rendered) {}
}
