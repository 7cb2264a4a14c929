//! Core raster types: color frames, gray frames, and pixel values.

use framelens_common::error::{FramelensError, FramelensResult};
use ndarray::{s, Array2, Array3};

/// One BGR pixel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bgr {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Bgr {
    pub const fn new(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }
}

/// A color raster with interleaved BGR byte channels.
///
/// Storage is `(height, width, 3)`; a frame is immutable for the duration of
/// one dispatch cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    data: Array3<u8>,
}

impl Frame {
    /// Create a black frame of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: Array3::zeros((height, width, 3)),
        }
    }

    /// Build a frame from raw interleaved BGR bytes.
    pub fn from_raw(width: usize, height: usize, bytes: Vec<u8>) -> FramelensResult<Self> {
        let data = Array3::from_shape_vec((height, width, 3), bytes)
            .map_err(|e| FramelensError::raster(format!("raw frame buffer: {e}")))?;
        Ok(Self { data })
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// `(width, height)` pair.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    pub fn pixel(&self, x: usize, y: usize) -> Bgr {
        Bgr::new(
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
        )
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Bgr) {
        self.data[[y, x, 0]] = color.b;
        self.data[[y, x, 1]] = color.g;
        self.data[[y, x, 2]] = color.r;
    }

    /// Fill the whole frame with one color.
    pub fn fill(&mut self, color: Bgr) {
        let (height, width) = (self.height(), self.width());
        for y in 0..height {
            for x in 0..width {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Paint `color` onto every pixel whose mask byte is nonzero.
    ///
    /// Stencil semantics: pixels outside the mask are left untouched, so
    /// successive paints compose by priority (later paints win on overlap).
    pub fn paint_masked(&mut self, color: Bgr, mask: &GrayFrame) -> FramelensResult<()> {
        if self.dimensions() != mask.dimensions() {
            return Err(FramelensError::dimension_mismatch(
                self.dimensions(),
                mask.dimensions(),
            ));
        }
        let (height, width) = (self.height(), self.width());
        for y in 0..height {
            for x in 0..width {
                if mask.value(x, y) != 0 {
                    self.set_pixel(x, y, color);
                }
            }
        }
        Ok(())
    }

    /// Horizontally mirrored copy (pixel `(x, y)` moves to `(width-1-x, y)`).
    pub fn mirror_horizontal(&self) -> Frame {
        Frame {
            data: self.data.slice(s![.., ..;-1, ..]).to_owned(),
        }
    }

    pub fn data(&self) -> &Array3<u8> {
        &self.data
    }
}

/// A single-channel raster, same dimensions as the [`Frame`] it derives from.
#[derive(Debug, Clone, PartialEq)]
pub struct GrayFrame {
    data: Array2<u8>,
}

impl GrayFrame {
    /// Create a black gray frame of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: Array2::zeros((height, width)),
        }
    }

    /// Build a gray frame from raw bytes in row-major order.
    pub fn from_raw(width: usize, height: usize, bytes: Vec<u8>) -> FramelensResult<Self> {
        let data = Array2::from_shape_vec((height, width), bytes)
            .map_err(|e| FramelensError::raster(format!("raw gray buffer: {e}")))?;
        Ok(Self { data })
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// `(width, height)` pair.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    pub fn value(&self, x: usize, y: usize) -> u8 {
        self.data[[y, x]]
    }

    pub fn set_value(&mut self, x: usize, y: usize, value: u8) {
        self.data[[y, x]] = value;
    }

    /// Zero out every pixel whose mask byte is nonzero (paint black).
    pub fn blank_masked(&mut self, mask: &GrayFrame) -> FramelensResult<()> {
        if self.dimensions() != mask.dimensions() {
            return Err(FramelensError::dimension_mismatch(
                self.dimensions(),
                mask.dimensions(),
            ));
        }
        let (height, width) = (self.height(), self.width());
        for y in 0..height {
            for x in 0..width {
                if mask.value(x, y) != 0 {
                    self.data[[y, x]] = 0;
                }
            }
        }
        Ok(())
    }

    /// Pixelwise saturating add of `other` into `self`.
    pub fn saturating_add_assign(&mut self, other: &GrayFrame) -> FramelensResult<()> {
        if self.dimensions() != other.dimensions() {
            return Err(FramelensError::dimension_mismatch(
                self.dimensions(),
                other.dimensions(),
            ));
        }
        ndarray::Zip::from(&mut self.data)
            .and(&other.data)
            .for_each(|a, &b| *a = a.saturating_add(b));
        Ok(())
    }

    /// Horizontally mirrored copy.
    pub fn mirror_horizontal(&self) -> GrayFrame {
        GrayFrame {
            data: self.data.slice(s![.., ..;-1]).to_owned(),
        }
    }

    pub fn data(&self) -> &Array2<u8> {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asymmetric_gray() -> GrayFrame {
        let mut img = GrayFrame::new(4, 2);
        img.set_value(0, 0, 10);
        img.set_value(3, 1, 200);
        img
    }

    #[test]
    fn mirror_swaps_columns() {
        let img = asymmetric_gray();
        let mirrored = img.mirror_horizontal();
        for y in 0..img.height() {
            for x in 0..img.width() {
                assert_eq!(mirrored.value(img.width() - 1 - x, y), img.value(x, y));
            }
        }
    }

    #[test]
    fn mirror_twice_is_identity() {
        let img = asymmetric_gray();
        assert_eq!(img.mirror_horizontal().mirror_horizontal(), img);
    }

    #[test]
    fn paint_masked_respects_stencil() {
        let mut canvas = Frame::new(3, 3);
        let mut mask = GrayFrame::new(3, 3);
        mask.set_value(1, 1, 255);

        canvas.paint_masked(Bgr::new(1, 2, 3), &mask).unwrap();

        assert_eq!(canvas.pixel(1, 1), Bgr::new(1, 2, 3));
        assert_eq!(canvas.pixel(0, 0), Bgr::new(0, 0, 0));
    }

    #[test]
    fn paint_masked_rejects_mismatched_mask() {
        let mut canvas = Frame::new(3, 3);
        let mask = GrayFrame::new(2, 3);
        let err = canvas.paint_masked(Bgr::new(1, 1, 1), &mask).unwrap_err();
        assert!(err.to_string().contains("Dimension mismatch"));
    }

    #[test]
    fn saturating_add_clamps_at_255() {
        let mut a = GrayFrame::new(2, 1);
        a.set_value(0, 0, 250);
        let mut b = GrayFrame::new(2, 1);
        b.set_value(0, 0, 20);
        b.set_value(1, 0, 7);

        a.saturating_add_assign(&b).unwrap();
        assert_eq!(a.value(0, 0), 255);
        assert_eq!(a.value(1, 0), 7);
    }
}
