//! Contour extraction: binary threshold, boundary tracing, outline drawing.

use std::collections::HashSet;

use framelens_common::error::FramelensResult;

use crate::frame::{Bgr, Frame, GrayFrame};
use crate::threshold;

/// Threshold `gray` with `(binary_min, binary_max)`, trace every contour and
/// draw each outline in `color` onto a blank color canvas.
pub fn contour_image(
    gray: &GrayFrame,
    binary_min: i32,
    binary_max: i32,
    color: Bgr,
) -> FramelensResult<Frame> {
    let mask = threshold::binary(gray, binary_min, binary_max);
    let contours = trace_contours(&mask);

    let (width, height) = gray.dimensions();
    let mut canvas = Frame::new(width, height);
    for contour in &contours {
        for &(x, y) in contour {
            canvas.set_pixel(x, y, color);
        }
    }
    Ok(canvas)
}

/// Trace all contours in a binary mask as a flat list (no hierarchy).
///
/// Uses Moore-neighborhood boundary tracing; each contour is the ordered
/// list of its boundary pixels.
pub fn trace_contours(mask: &GrayFrame) -> Vec<Vec<(usize, usize)>> {
    let (width, height) = mask.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut contours = Vec::new();
    let mut visited: HashSet<(i32, i32)> = HashSet::new();

    for y in 0..height as i32 {
        for x in 0..width as i32 {
            if is_boundary(mask, x, y) && !visited.contains(&(x, y)) {
                let contour = trace_boundary(mask, x, y, &mut visited);
                if !contour.is_empty() {
                    contours.push(contour);
                }
            }
        }
    }

    contours
}

/// Moore neighborhood directions (8-connected, clockwise from right).
const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

#[inline]
fn is_selected(mask: &GrayFrame, x: i32, y: i32) -> bool {
    if x >= 0 && y >= 0 && (x as usize) < mask.width() && (y as usize) < mask.height() {
        mask.value(x as usize, y as usize) > 0
    } else {
        false
    }
}

/// A selected pixel with at least one unselected 4-neighbor.
#[inline]
fn is_boundary(mask: &GrayFrame, x: i32, y: i32) -> bool {
    if !is_selected(mask, x, y) {
        return false;
    }
    !is_selected(mask, x - 1, y)
        || !is_selected(mask, x + 1, y)
        || !is_selected(mask, x, y - 1)
        || !is_selected(mask, x, y + 1)
}

fn trace_boundary(
    mask: &GrayFrame,
    start_x: i32,
    start_y: i32,
    visited: &mut HashSet<(i32, i32)>,
) -> Vec<(usize, usize)> {
    let mut contour = Vec::new();

    let mut backtrack_dir = 0usize;
    for (i, &(dx, dy)) in DIRECTIONS.iter().enumerate() {
        if !is_selected(mask, start_x + dx, start_y + dy) {
            backtrack_dir = i;
            break;
        }
    }

    let mut x = start_x;
    let mut y = start_y;
    let mut dir = backtrack_dir;

    let max_steps = mask.width() * mask.height() * 2;
    let mut steps = 0usize;

    loop {
        if !visited.contains(&(x, y)) {
            contour.push((x as usize, y as usize));
            visited.insert((x, y));
        }

        // Resume the clockwise search three steps back from the direction
        // we arrived by, so the trace hugs the boundary.
        let search_start = (dir + 5) % 8;

        let mut found = false;
        for i in 0..8 {
            let check_dir = (search_start + i) % 8;
            let (dx, dy) = DIRECTIONS[check_dir];
            let nx = x + dx;
            let ny = y + dy;

            if is_selected(mask, nx, ny) {
                if nx == start_x && ny == start_y && steps > 0 {
                    return contour;
                }
                if is_boundary(mask, nx, ny) {
                    x = nx;
                    y = ny;
                    dir = check_dir;
                    found = true;
                    break;
                }
            }
        }

        if !found {
            // Isolated pixel, nothing more to follow.
            break;
        }

        steps += 1;
        if steps >= max_steps {
            break;
        }
    }

    contour
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_rect(width: usize, height: usize, x0: usize, y0: usize, w: usize, h: usize) -> GrayFrame {
        let mut mask = GrayFrame::new(width, height);
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                mask.set_value(x, y, 255);
            }
        }
        mask
    }

    #[test]
    fn empty_mask_has_no_contours() {
        let mask = GrayFrame::new(10, 10);
        assert!(trace_contours(&mask).is_empty());
    }

    #[test]
    fn rectangle_produces_one_contour_on_its_border() {
        let mask = filled_rect(10, 10, 2, 2, 4, 3);
        let contours = trace_contours(&mask);
        assert_eq!(contours.len(), 1);

        for &(x, y) in &contours[0] {
            assert!(mask.value(x, y) > 0);
            // Interior pixels (all 4-neighbors selected) are not boundary.
            assert!(
                x == 2 || x == 5 || y == 2 || y == 4,
                "({x},{y}) is not on the rectangle border"
            );
        }
    }

    #[test]
    fn two_blobs_give_two_contours() {
        let mut mask = filled_rect(12, 6, 1, 1, 3, 3);
        for y in 1..4 {
            for x in 7..10 {
                mask.set_value(x, y, 255);
            }
        }
        assert_eq!(trace_contours(&mask).len(), 2);
    }

    #[test]
    fn contour_image_draws_in_requested_color() {
        let mut gray = GrayFrame::new(8, 8);
        for y in 2..6 {
            for x in 2..6 {
                gray.set_value(x, y, 220);
            }
        }

        let color = Bgr::new(0, 0, 255);
        let img = contour_image(&gray, 180, 255, color).unwrap();

        assert_eq!(img.pixel(2, 2), color);
        assert_eq!(img.pixel(0, 0), Bgr::new(0, 0, 0));
        // Interior stays blank: only outlines are drawn.
        assert_eq!(img.pixel(4, 4), Bgr::new(0, 0, 0));
    }
}
