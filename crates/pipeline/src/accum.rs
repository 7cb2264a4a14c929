//! Bounded ring of recent edge maps for the motion-trail overlay.

use std::collections::VecDeque;

use framelens_common::error::{FramelensError, FramelensResult};
use framelens_raster::GrayFrame;

/// Fixed-capacity buffer of the most recent edge maps, newest first.
///
/// The capacity bound holds at every point in time: the oldest frame is
/// evicted before a new one is inserted.
#[derive(Debug, Clone)]
pub struct AccumBuffer {
    frames: VecDeque<GrayFrame>,
    capacity: usize,
}

impl AccumBuffer {
    /// A buffer holding at most `capacity` frames (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Insert `frame` as the newest entry, evicting the oldest when full.
    ///
    /// All buffered frames must share one size; a mismatched frame is
    /// rejected and the buffer is left unchanged.
    pub fn push(&mut self, frame: GrayFrame) -> FramelensResult<()> {
        if let Some(existing) = self.frames.front() {
            if existing.dimensions() != frame.dimensions() {
                return Err(FramelensError::dimension_mismatch(
                    existing.dimensions(),
                    frame.dimensions(),
                ));
            }
        }
        if self.frames.len() == self.capacity {
            self.frames.pop_back();
        }
        self.frames.push_front(frame);
        Ok(())
    }

    /// Pixelwise saturating sum over the buffered frames, newest to oldest.
    ///
    /// `None` when the buffer is empty.
    pub fn sum(&self) -> Option<GrayFrame> {
        let mut iter = self.frames.iter();
        let mut acc = iter.next()?.clone();
        for frame in iter {
            // Buffered frames share one size, so this cannot fail.
            let _ = acc.saturating_add_assign(frame);
        }
        Some(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn uniform(value: u8) -> GrayFrame {
        let mut frame = GrayFrame::new(3, 2);
        for y in 0..2 {
            for x in 0..3 {
                frame.set_value(x, y, value);
            }
        }
        frame
    }

    #[test]
    fn empty_buffer_sums_to_none() {
        assert!(AccumBuffer::new(4).sum().is_none());
    }

    #[test]
    fn window_keeps_only_the_newest_frames() {
        let mut buf = AccumBuffer::new(4);
        for v in [1, 2, 3, 4, 5] {
            buf.push(uniform(v)).unwrap();
        }
        assert_eq!(buf.len(), 4);

        // 2 + 3 + 4 + 5; the first frame was evicted.
        let sum = buf.sum().unwrap();
        assert_eq!(sum.value(0, 0), 14);
    }

    #[test]
    fn sum_saturates_per_pixel() {
        let mut buf = AccumBuffer::new(3);
        for _ in 0..3 {
            buf.push(uniform(200)).unwrap();
        }
        assert_eq!(buf.sum().unwrap().value(2, 1), 255);
    }

    #[test]
    fn mismatched_frame_is_rejected_and_buffer_unchanged() {
        let mut buf = AccumBuffer::new(2);
        buf.push(uniform(9)).unwrap();

        let err = buf.push(GrayFrame::new(5, 5)).unwrap_err();
        assert!(err.to_string().contains("Dimension mismatch"));
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.sum().unwrap().value(0, 0), 9);
    }

    #[test]
    fn zero_capacity_is_widened_to_one() {
        let mut buf = AccumBuffer::new(0);
        assert_eq!(buf.capacity(), 1);
        buf.push(uniform(7)).unwrap();
        buf.push(uniform(8)).unwrap();
        assert_eq!(buf.sum().unwrap().value(0, 0), 8);
    }

    proptest! {
        #[test]
        fn len_never_exceeds_capacity(
            capacity in 1usize..6,
            values in proptest::collection::vec(0u8..=255, 0..20),
        ) {
            let mut buf = AccumBuffer::new(capacity);
            for v in values {
                buf.push(uniform(v)).unwrap();
                prop_assert!(buf.len() <= capacity);
            }
        }

        #[test]
        fn sum_matches_a_reference_fold_over_the_window(
            capacity in 1usize..6,
            values in proptest::collection::vec(0u8..=255, 1..20),
        ) {
            let mut buf = AccumBuffer::new(capacity);
            for &v in &values {
                buf.push(uniform(v)).unwrap();
            }

            let window = &values[values.len().saturating_sub(capacity)..];
            let expected = window.iter().fold(0u8, |acc, &v| acc.saturating_add(v));
            prop_assert_eq!(buf.sum().unwrap().value(0, 0), expected);
        }
    }
}
