//! Gaussian smoothing for gray frames.

use crate::frame::GrayFrame;

/// Smooth a gray frame with a gaussian of the given odd kernel size.
///
/// Uses separable 2-pass convolution with clamped edge sampling. A size of
/// one or less is a no-op copy; even sizes are widened to the next odd size.
pub fn smooth_gaussian(src: &GrayFrame, kernel_size: usize) -> GrayFrame {
    if kernel_size <= 1 {
        return src.clone();
    }
    let size = kernel_size | 1;
    let kernel = gaussian_kernel_sized(size);
    let half = kernel.len() / 2;

    let (width, height) = src.dimensions();
    let mut temp = vec![0.0f32; width * height];
    let mut out = GrayFrame::new(width, height);

    // Horizontal pass, work in f32 for precision
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let sx =
                    (x as isize + ki as isize - half as isize).clamp(0, width as isize - 1) as usize;
                sum += src.value(sx, y) as f32 * kv;
            }
            temp[y * width + x] = sum;
        }
    }

    // Vertical pass
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let sy = (y as isize + ki as isize - half as isize).clamp(0, height as isize - 1)
                    as usize;
                sum += temp[sy * width + x] * kv;
            }
            out.set_value(x, y, sum.clamp(0.0, 255.0).round() as u8);
        }
    }

    out
}

/// Normalized 1D gaussian kernel for a fixed odd size.
///
/// Sigma follows the OpenCV convention for size-driven kernels:
/// `0.3 * ((size - 1) * 0.5 - 1) + 0.8`.
fn gaussian_kernel_sized(size: usize) -> Vec<f32> {
    let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let half = size / 2;

    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let x = i as f32 - half as f32;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }

    kernel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_is_normalized_and_symmetric() {
        for size in [3, 5, 7, 11, 15] {
            let kernel = gaussian_kernel_sized(size);
            assert_eq!(kernel.len(), size);
            let sum: f32 = kernel.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5);
            for i in 0..size / 2 {
                assert!((kernel[i] - kernel[size - 1 - i]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn size_one_is_identity() {
        let mut img = GrayFrame::new(4, 4);
        img.set_value(2, 2, 200);
        assert_eq!(smooth_gaussian(&img, 1), img);
    }

    #[test]
    fn smoothing_spreads_an_impulse() {
        let mut img = GrayFrame::new(7, 7);
        img.set_value(3, 3, 255);

        let blurred = smooth_gaussian(&img, 5);
        assert!(blurred.value(3, 3) < 255);
        assert!(blurred.value(2, 3) > 0);
        assert!(blurred.value(3, 2) > 0);
    }

    #[test]
    fn flat_field_stays_flat() {
        let mut img = GrayFrame::new(6, 6);
        for y in 0..6 {
            for x in 0..6 {
                img.set_value(x, y, 128);
            }
        }
        let blurred = smooth_gaussian(&img, 7);
        for y in 0..6 {
            for x in 0..6 {
                assert_eq!(blurred.value(x, y), 128);
            }
        }
    }
}
