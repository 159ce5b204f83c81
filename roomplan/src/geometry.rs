//! Geometry primitives: points, axis-aligned rectangles, clamping, overlap,
//! and unit conversion between millimeters, meters and stage pixels.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CONTAINER_PIXEL_SCALE, SCALE};

/// A point in stage pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle anchored at its top-left corner.
///
/// Zones are plain rectangles derived on demand for overlap testing; they are
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A derived rectangle used only for collision testing.
pub type Zone = Rect;

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Build a rectangle of the given size centered on `center`.
    #[must_use]
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        Self { x: center.x - width / 2.0, y: center.y - height / 2.0, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Grow the rectangle by `amount` on every side.
    #[must_use]
    pub fn expand(&self, amount: f64) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + 2.0 * amount,
            height: self.height + 2.0 * amount,
        }
    }

    /// Whether `inner` lies entirely within this rectangle (edges included).
    #[must_use]
    pub fn contains_rect(&self, inner: &Rect) -> bool {
        inner.x >= self.x && inner.y >= self.y && inner.right() <= self.right() && inner.bottom() <= self.bottom()
    }
}

/// Restrict `value` to `[min, max]`.
///
/// The caller guarantees `min <= max`; otherwise the result is `max`.
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Whether two rectangles share a positive-area intersection.
///
/// Rectangles that only touch along an edge or a corner do not overlap.
#[must_use]
pub fn is_overlapping(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Convert a catalog dimension in millimeters to stage pixels.
///
/// Missing dimensions convert to zero.
#[must_use]
pub fn mm_to_pixels(mm: Option<f64>) -> f64 {
    match mm {
        Some(mm) => (mm / 1000.0 / SCALE) * CONTAINER_PIXEL_SCALE,
        None => 0.0,
    }
}

/// Convert a real-world length in meters to stage pixels.
#[must_use]
pub fn meters_to_pixels(meters: f64) -> f64 {
    meters / SCALE
}

/// Convert a stage length in pixels to meters.
#[must_use]
pub fn pixels_to_meters(pixels: f64) -> f64 {
    pixels * SCALE
}

/// Normalize a rotation in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Width and height after a rotation by a multiple of 90°.
///
/// A quarter turn (90° or 270°) swaps the two extents.
#[must_use]
pub fn effective_size(width: f64, height: f64, rotation: f64) -> (f64, f64) {
    if normalize_degrees(rotation) % 180.0 == 90.0 { (height, width) } else { (width, height) }
}
