//! Pixel-space drawing primitives on an RGB buffer.
//!
//! All coordinates are integer canvas pixels; anything falling outside the
//! buffer is clipped.

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut, draw_text_mut};
use imageproc::point::Point as PixelPoint;

/// Integer pixel coordinate
pub type Pixel = (i32, i32);

/// Plots single pixels
pub fn draw_points(img: &mut RgbImage, points: &[Pixel], color: Rgb<u8>) {
    let (width, height) = img.dimensions();
    for &(x, y) in points {
        if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Clips segment `a`-`b` to the image grown by `margin` on every side
fn clip_segment(
    a: (f64, f64),
    b: (f64, f64),
    (width, height): (u32, u32),
    margin: f64,
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let x_max = f64::from(width) + margin;
    let y_max = f64::from(height) + margin;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [
        (-dx, a.0 + margin),
        (dx, x_max - a.0),
        (-dy, a.1 + margin),
        (dy, y_max - a.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            t0 = t0.max(q / p);
        } else {
            t1 = t1.min(q / p);
        }
    }
    if t0 > t1 {
        return None;
    }
    Some(((a.0 + t0 * dx, a.1 + t0 * dy), (a.0 + t1 * dx, a.1 + t1 * dy)))
}

fn round_pixel(x: f64, y: f64) -> Pixel {
    (x.round() as i32, y.round() as i32)
}

/// Draws one segment exactly `width` pixels across.
///
/// Only the part near the image is rasterized. Wide segments are filled as
/// a quad spanning `width` pixel rows or columns, with square ends and no
/// joins between consecutive segments.
fn draw_thick_segment(img: &mut RgbImage, start: Pixel, end: Pixel, color: Rgb<u8>, width: u32) {
    let from = (f64::from(start.0), f64::from(start.1));
    let to = (f64::from(end.0), f64::from(end.1));
    let (from, to) = match clip_segment(from, to, img.dimensions(), f64::from(width) + 1.0) {
        Some(segment) => segment,
        None => return,
    };
    if width <= 1 {
        draw_line_segment_mut(
            img,
            (from.0 as f32, from.1 as f32),
            (to.0 as f32, to.1 as f32),
            color,
        );
        return;
    }

    let lo = -f64::from(width / 2);
    let hi = f64::from(width - 1) + lo;
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = dx.hypot(dy);
    let quad = if length < 1e-9 {
        [
            round_pixel(from.0 + lo, from.1 + lo),
            round_pixel(from.0 + hi, from.1 + lo),
            round_pixel(from.0 + hi, from.1 + hi),
            round_pixel(from.0 + lo, from.1 + hi),
        ]
    } else {
        let (nx, ny) = (-dy / length, dx / length);
        [
            round_pixel(from.0 + nx * lo, from.1 + ny * lo),
            round_pixel(to.0 + nx * lo, to.1 + ny * lo),
            round_pixel(to.0 + nx * hi, to.1 + ny * hi),
            round_pixel(from.0 + nx * hi, from.1 + ny * hi),
        ]
    };
    fill_ring(img, &quad, color);
}

/// Strokes a polyline through consecutive points
pub fn draw_line(img: &mut RgbImage, points: &[Pixel], color: Rgb<u8>, width: u32) {
    match points {
        [] => {}
        [single] => draw_thick_segment(img, *single, *single, color, width),
        _ => {
            for pair in points.windows(2) {
                draw_thick_segment(img, pair[0], pair[1], color, width);
            }
        }
    }
}

/// Drops repeated closing points so the ring is open
fn open_ring(points: &[Pixel]) -> Vec<Pixel> {
    let mut ring: Vec<Pixel> = Vec::with_capacity(points.len());
    for &p in points {
        if ring.last() != Some(&p) {
            ring.push(p);
        }
    }
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

/// Fills an implicitly closed ring, returning it without repeated points
fn fill_ring(img: &mut RgbImage, points: &[Pixel], color: Rgb<u8>) -> Vec<Pixel> {
    let ring = open_ring(points);
    match ring.len() {
        0 => {}
        1 => draw_points(img, &ring, color),
        2 => draw_line(img, &ring, color, 1),
        _ => {
            let poly: Vec<PixelPoint<i32>> =
                ring.iter().map(|&(x, y)| PixelPoint::new(x, y)).collect();
            draw_polygon_mut(img, &poly, color);
        }
    }
    ring
}

/// Fills the implicitly closed ring, then strokes its outline if asked.
///
/// Rings that collapse below three distinct pixels are drawn as a line or a
/// single point.
pub fn draw_polygon(
    img: &mut RgbImage,
    points: &[Pixel],
    fill: Rgb<u8>,
    outline: Option<Rgb<u8>>,
    width: u32,
) {
    let ring = fill_ring(img, points, fill);
    if ring.is_empty() {
        return;
    }
    if let Some(outline) = outline {
        let mut closed = ring;
        if let Some(&first) = closed.first() {
            closed.push(first);
        }
        draw_line(img, &closed, outline, width);
    }
}

/// Renders a text label with its top-left corner at `point`
pub fn draw_text(
    img: &mut RgbImage,
    point: Pixel,
    text: &str,
    color: Rgb<u8>,
    font: &FontArc,
    scale: f32,
) {
    draw_text_mut(img, color, point.0, point.1, PxScale::from(scale), font, text);
}
