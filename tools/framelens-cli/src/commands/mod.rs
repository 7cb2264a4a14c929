//! CLI subcommands and image file conversions.

use anyhow::Context;
use framelens_pipeline::Rendered;
use framelens_raster::Frame;
use image::{GrayImage, RgbImage};
use std::path::Path;

pub mod process;
pub mod simulate;

/// Load an image file into a BGR frame.
pub fn load_frame(path: &Path) -> anyhow::Result<Frame> {
    let img = image::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .to_rgb8();
    let (width, height) = img.dimensions();

    let mut bytes = Vec::with_capacity((width * height * 3) as usize);
    for pixel in img.pixels() {
        let [r, g, b] = pixel.0;
        bytes.extend_from_slice(&[b, g, r]);
    }
    Ok(Frame::from_raw(width as usize, height as usize, bytes)?)
}

/// Save a rendered image to a file, format chosen by extension.
pub fn save_rendered(rendered: &Rendered, path: &Path) -> anyhow::Result<()> {
    let (width, height) = rendered.dimensions();
    match rendered {
        Rendered::Color(frame) => {
            let mut bytes = Vec::with_capacity(width * height * 3);
            for y in 0..height {
                for x in 0..width {
                    let p = frame.pixel(x, y);
                    bytes.extend_from_slice(&[p.r, p.g, p.b]);
                }
            }
            let img = RgbImage::from_raw(width as u32, height as u32, bytes)
                .context("rendered color frame has an inconsistent size")?;
            img.save(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        Rendered::Gray(frame) => {
            let bytes: Vec<u8> = frame.data().iter().copied().collect();
            let img = GrayImage::from_raw(width as u32, height as u32, bytes)
                .context("rendered gray frame has an inconsistent size")?;
            img.save(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use framelens_raster::Bgr;

    #[test]
    fn color_frame_round_trips_through_png() {
        let mut frame = Frame::new(4, 2);
        frame.set_pixel(0, 0, Bgr::new(10, 20, 30));
        frame.set_pixel(3, 1, Bgr::new(200, 100, 50));

        let path = std::env::temp_dir().join("framelens_test_roundtrip.png");
        save_rendered(&Rendered::Color(frame.clone()), &path).unwrap();
        let loaded = load_frame(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, frame);
    }
}
