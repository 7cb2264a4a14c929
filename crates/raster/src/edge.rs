//! Edge operators: canny, sobel magnitude, and laplacian.

use crate::frame::GrayFrame;

const WEAK: u8 = 128;
const STRONG: u8 = 255;

/// Canny edge detection producing a binary edge map (255 on edges, 0 off).
///
/// Stages: 3x3 sobel gradient, non-maximum suppression, double threshold,
/// hysteresis. The threshold pair is order-normalized, so `(20, 15)` and
/// `(15, 20)` select the same edges.
pub fn canny(src: &GrayFrame, thresh1: i32, thresh2: i32) -> GrayFrame {
    let (width, height) = src.dimensions();
    let low = thresh1.min(thresh2) as f32;
    let high = thresh1.max(thresh2) as f32;

    let mut gx = vec![0.0f32; width * height];
    let mut gy = vec![0.0f32; width * height];

    let kernel_h: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
    let kernel_v: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let mut sx = 0.0f32;
            let mut sy = 0.0f32;
            for ky in 0..3 {
                for kx in 0..3 {
                    let v = src.value(x + kx - 1, y + ky - 1) as f32;
                    sx += v * kernel_h[ky][kx];
                    sy += v * kernel_v[ky][kx];
                }
            }
            gx[y * width + x] = sx;
            gy[y * width + x] = sy;
        }
    }

    // Non-maximum suppression: keep a pixel only if it is the local maximum
    // along its quantized gradient direction.
    let magnitude: Vec<f32> = gx
        .iter()
        .zip(gy.iter())
        .map(|(&a, &b)| (a * a + b * b).sqrt())
        .collect();

    let mut suppressed = vec![0.0f32; width * height];
    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let idx = y * width + x;
            let mag = magnitude[idx];
            if mag == 0.0 {
                continue;
            }
            let angle = gy[idx].atan2(gx[idx]).to_degrees();
            let angle = if angle < 0.0 { angle + 180.0 } else { angle };

            let (na, nb) = if !(22.5..157.5).contains(&angle) {
                (magnitude[idx - 1], magnitude[idx + 1])
            } else if angle < 67.5 {
                (magnitude[idx - width + 1], magnitude[idx + width - 1])
            } else if angle < 112.5 {
                (magnitude[idx - width], magnitude[idx + width])
            } else {
                (magnitude[idx - width - 1], magnitude[idx + width + 1])
            };

            if mag >= na && mag >= nb {
                suppressed[idx] = mag;
            }
        }
    }

    // Double threshold into strong / weak classes.
    let mut classes = vec![0u8; width * height];
    for (c, &m) in classes.iter_mut().zip(suppressed.iter()) {
        *c = if m >= high {
            STRONG
        } else if m >= low {
            WEAK
        } else {
            0
        };
    }

    // Hysteresis: weak pixels survive only when connected to a strong pixel.
    let mut out = GrayFrame::new(width, height);
    let mut stack: Vec<(usize, usize)> = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if classes[y * width + x] == STRONG {
                stack.push((x, y));
            }
        }
    }
    while let Some((x, y)) = stack.pop() {
        if out.value(x, y) != 0 {
            continue;
        }
        out.set_value(x, y, STRONG);
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if nx < 0 || ny < 0 || nx >= width as i32 || ny >= height as i32 {
                    continue;
                }
                let (nx, ny) = (nx as usize, ny as usize);
                if classes[ny * width + nx] == WEAK && out.value(nx, ny) == 0 {
                    stack.push((nx, ny));
                }
            }
        }
    }

    out
}

/// Sobel magnitude with a 5-tap aperture (first order in each axis).
///
/// The x/y responses use the separable `[1, 4, 6, 4, 1]` smoothing and
/// `[-1, -2, 0, 2, 1]` derivative taps; the f32 magnitude is clamped into a
/// byte image for display.
pub fn sobel_magnitude(src: &GrayFrame) -> GrayFrame {
    const SMOOTH: [f32; 5] = [1.0, 4.0, 6.0, 4.0, 1.0];
    const DERIV: [f32; 5] = [-1.0, -2.0, 0.0, 2.0, 1.0];

    let (width, height) = src.dimensions();
    let mut out = GrayFrame::new(width, height);

    for y in 2..height.saturating_sub(2) {
        for x in 2..width.saturating_sub(2) {
            let mut gx = 0.0f32;
            let mut gy = 0.0f32;
            for ky in 0..5 {
                for kx in 0..5 {
                    let v = src.value(x + kx - 2, y + ky - 2) as f32;
                    gx += v * SMOOTH[ky] * DERIV[kx];
                    gy += v * DERIV[ky] * SMOOTH[kx];
                }
            }
            let mag = (gx * gx + gy * gy).sqrt();
            out.set_value(x, y, mag.min(255.0) as u8);
        }
    }

    out
}

/// 5x5 laplacian; the absolute response is clamped into a byte image.
pub fn laplacian(src: &GrayFrame) -> GrayFrame {
    const KERNEL: [[f32; 5]; 5] = [
        [0.0, 0.0, -1.0, 0.0, 0.0],
        [0.0, -1.0, -2.0, -1.0, 0.0],
        [-1.0, -2.0, 16.0, -2.0, -1.0],
        [0.0, -1.0, -2.0, -1.0, 0.0],
        [0.0, 0.0, -1.0, 0.0, 0.0],
    ];

    let (width, height) = src.dimensions();
    let mut out = GrayFrame::new(width, height);

    for y in 2..height.saturating_sub(2) {
        for x in 2..width.saturating_sub(2) {
            let mut sum = 0.0f32;
            for ky in 0..5 {
                for kx in 0..5 {
                    sum += src.value(x + kx - 2, y + ky - 2) as f32 * KERNEL[ky][kx];
                }
            }
            out.set_value(x, y, sum.abs().min(255.0) as u8);
        }
    }

    out
}
