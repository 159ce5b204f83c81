//! Room model: the rectangle every door, container and object lives in.
//!
//! The room is resized by dragging one of its four corners and moved by
//! dragging its body. Both operations clamp silently; neither can produce a
//! room smaller than `MIN_WIDTH × MIN_HEIGHT` or one that leaves the stage
//! margins.

#[cfg(test)]
#[path = "room_test.rs"]
mod room_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ROOM_HEIGHT, DEFAULT_ROOM_WIDTH, MARGIN, MIN_HEIGHT, MIN_WIDTH, STAGE_HEIGHT, STAGE_WIDTH};
use crate::geometry::{Point, Rect, clamp};

/// A room corner, indexed clockwise from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Self::TopLeft, Self::TopRight, Self::BottomRight, Self::BottomLeft];

    /// Corner for a handle index: 0=top-left, 1=top-right, 2=bottom-right, 3=bottom-left.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomRight => 2,
            Self::BottomLeft => 3,
        }
    }

    /// The diagonally opposite corner, which stays fixed during a resize.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomRight,
            Self::TopRight => Self::BottomLeft,
            Self::BottomRight => Self::TopLeft,
            Self::BottomLeft => Self::TopRight,
        }
    }
}

/// The room rectangle in stage pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Default for Room {
    fn default() -> Self {
        Self { x: MARGIN, y: MARGIN, width: DEFAULT_ROOM_WIDTH, height: DEFAULT_ROOM_HEIGHT, name: None }
    }
}

impl Room {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height, name: None }
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
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
        self.rect().center()
    }

    /// Corner positions in handle order (see [`Corner::from_index`]).
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }

    #[must_use]
    pub fn corner(&self, corner: Corner) -> Point {
        self.corners()[corner.index()]
    }

    /// Whether the room satisfies the size floor and stays within the margins.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width >= MIN_WIDTH
            && self.height >= MIN_HEIGHT
            && self.x >= MARGIN
            && self.y >= MARGIN
            && self.right() <= STAGE_WIDTH - MARGIN
            && self.bottom() <= STAGE_HEIGHT - MARGIN
    }

    /// Force an arbitrary rectangle into the room invariants.
    ///
    /// Size is clamped first (between the floor and the usable stage), then the
    /// origin is clamped so the whole rectangle fits.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let width = clamp(finite_or_zero(self.width), MIN_WIDTH, STAGE_WIDTH - 2.0 * MARGIN);
        let height = clamp(finite_or_zero(self.height), MIN_HEIGHT, STAGE_HEIGHT - 2.0 * MARGIN);
        let x = clamp(finite_or_zero(self.x), MARGIN, STAGE_WIDTH - MARGIN - width);
        let y = clamp(finite_or_zero(self.y), MARGIN, STAGE_HEIGHT - MARGIN - height);
        Self { x, y, width, height, name: self.name.clone() }
    }

    /// Resize by dragging `corner` to `pos`, keeping the opposite corner fixed.
    ///
    /// Each axis is clamped independently: the dragged coordinate may not come
    /// closer than the minimum size to the fixed corner, nor leave the stage
    /// margins.
    #[must_use]
    pub fn drag_corner(&self, corner: Corner, pos: Point) -> Self {
        let fixed = self.corner(corner.opposite());
        let max_x = STAGE_WIDTH - MARGIN;
        let max_y = STAGE_HEIGHT - MARGIN;

        let dragged_x = match corner {
            Corner::TopLeft | Corner::BottomLeft => clamp(pos.x, MARGIN, fixed.x - MIN_WIDTH),
            Corner::TopRight | Corner::BottomRight => clamp(pos.x, fixed.x + MIN_WIDTH, max_x),
        };
        let dragged_y = match corner {
            Corner::TopLeft | Corner::TopRight => clamp(pos.y, MARGIN, fixed.y - MIN_HEIGHT),
            Corner::BottomLeft | Corner::BottomRight => clamp(pos.y, fixed.y + MIN_HEIGHT, max_y),
        };

        Self {
            x: dragged_x.min(fixed.x),
            y: dragged_y.min(fixed.y),
            width: (dragged_x - fixed.x).abs(),
            height: (dragged_y - fixed.y).abs(),
            name: self.name.clone(),
        }
    }

    /// Clamp a requested top-left origin so the room stays within the margins.
    ///
    /// Only the origin is computed; translating the room's contents by the
    /// resulting delta is the caller's job.
    #[must_use]
    pub fn clamp_move(&self, x: f64, y: f64) -> Point {
        Point::new(
            clamp(x, MARGIN, STAGE_WIDTH - MARGIN - self.width),
            clamp(y, MARGIN, STAGE_HEIGHT - MARGIN - self.height),
        )
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
