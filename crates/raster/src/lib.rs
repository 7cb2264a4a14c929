//! FrameLens Raster: pure pixel computation.
//!
//! Image types and the per-mode transforms the frame pipeline dispatches to:
//! grayscale conversion, gaussian smoothing, canny/sobel/laplacian edge
//! operators, binary thresholding, hue remapping, and contour extraction.
//!
//! This crate is pure computation, with no I/O and no platform dependencies.
//! All inputs are data; all outputs are data.
//!
//! ## Image Format
//!
//! - [`Frame`]: interleaved BGR bytes, shaped `(height, width, 3)`
//! - [`GrayFrame`]: single channel bytes, shaped `(height, width)`
//!
//! Frames are fixed-size for a capture session; operations that combine two
//! rasters reject mismatched dimensions rather than producing garbage.

pub mod blur;
pub mod contour;
pub mod convert;
pub mod edge;
pub mod frame;
pub mod threshold;

pub use frame::{Bgr, Frame, GrayFrame};
