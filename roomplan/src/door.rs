//! Doors: wall anchoring, nearest-wall snapping, and the door keep-out zone.
//!
//! A door is a hinge point sitting on one of the room's four walls. While it is
//! dragged, the pointer is projected onto the nearest wall the door may move
//! to (its own wall or one of the two perpendicular walls). The snap itself is
//! stateless; the engine decides when the new wall is committed.

#[cfg(test)]
#[path = "door_test.rs"]
mod door_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DOOR_WIDTH_M, DOOR_ZONE_MARGIN_M};
use crate::geometry::{Point, Rect, Zone, clamp, meters_to_pixels};
use crate::placed::EntityId;
use crate::room::Room;

/// One of the four room edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wall {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl Wall {
    /// Candidate order for nearest-wall selection. Earlier walls win ties.
    pub const ORDER: [Wall; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Whether a door on `self` may be dragged onto `target`.
    ///
    /// Doors never jump straight across the room.
    #[must_use]
    pub fn allows(self, target: Wall) -> bool {
        target != self.opposite()
    }

    /// Walls a door on `self` may snap to, in [`Wall::ORDER`].
    pub fn allowed(self) -> impl Iterator<Item = Wall> {
        Self::ORDER.into_iter().filter(move |w| self.allows(*w))
    }

    /// Rendering angle of a door on this wall, in degrees.
    #[must_use]
    pub fn angle(self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Right => 90.0,
            Self::Bottom => 180.0,
            Self::Left => 270.0,
        }
    }

    /// Distance from `pos` to this wall's line.
    #[must_use]
    pub fn distance(self, room: &Room, pos: Point) -> f64 {
        match self {
            Self::Top => (pos.y - room.y).abs(),
            Self::Bottom => (pos.y - room.bottom()).abs(),
            Self::Left => (pos.x - room.x).abs(),
            Self::Right => (pos.x - room.right()).abs(),
        }
    }

    /// Project `pos` onto this wall, clamped to the wall's span.
    #[must_use]
    pub fn project(self, room: &Room, pos: Point) -> Point {
        match self {
            Self::Top => Point::new(clamp(pos.x, room.x, room.right()), room.y),
            Self::Bottom => Point::new(clamp(pos.x, room.x, room.right()), room.bottom()),
            Self::Left => Point::new(room.x, clamp(pos.y, room.y, room.bottom())),
            Self::Right => Point::new(room.right(), clamp(pos.y, room.y, room.bottom())),
        }
    }

    /// Midpoint of this wall.
    #[must_use]
    pub fn midpoint(self, room: &Room) -> Point {
        self.project(room, room.center())
    }
}

/// Which way the door leaf opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwingDirection {
    #[default]
    Inward,
    Outward,
}

/// Where a snapped door ends up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorSnap {
    pub position: Point,
    pub wall: Wall,
}

/// Snap a dragged door to the nearest wall it is allowed to reach.
#[must_use]
pub fn snap_door(room: &Room, current: Wall, pos: Point) -> DoorSnap {
    let mut best = current;
    let mut best_dist = f64::INFINITY;
    for wall in current.allowed() {
        let dist = wall.distance(room, pos);
        if dist < best_dist {
            best = wall;
            best_dist = dist;
        }
    }
    DoorSnap { position: best.project(room, pos), wall: best }
}

/// A door anchored to a room wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Door {
    pub id: EntityId,
    /// Leaf width in meters.
    pub width: f64,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub wall: Wall,
    pub swing_direction: SwingDirection,
}

impl Door {
    /// A default-width inward door at the midpoint of `wall`.
    #[must_use]
    pub fn on_wall(room: &Room, wall: Wall) -> Self {
        let pos = wall.midpoint(room);
        Self {
            id: EntityId::new_v4(),
            width: DEFAULT_DOOR_WIDTH_M,
            x: pos.x,
            y: pos.y,
            rotation: wall.angle(),
            wall,
            swing_direction: SwingDirection::Inward,
        }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Leaf width in pixels; also the swing radius.
    #[must_use]
    pub fn swing_px(&self) -> f64 {
        meters_to_pixels(self.width)
    }

    /// Whether the hinge sits exactly on its wall within the wall's span.
    #[must_use]
    pub fn is_on_wall(&self, room: &Room) -> bool {
        self.wall.project(room, self.position()) == self.position()
    }

    /// The door snapped for a pointer at `pos`.
    #[must_use]
    pub fn snap(&self, room: &Room, pos: Point) -> DoorSnap {
        snap_door(room, self.wall, pos)
    }

    /// Move the hinge back onto its wall after the room changed.
    pub fn reproject(&mut self, room: &Room) {
        let pos = self.wall.project(room, self.position());
        self.x = pos.x;
        self.y = pos.y;
    }

    /// Commit a snap result.
    pub fn apply_snap(&mut self, snap: DoorSnap) {
        self.x = snap.position.x;
        self.y = snap.position.y;
        if self.wall != snap.wall {
            self.wall = snap.wall;
            self.rotation = snap.wall.angle();
        }
    }

    /// The square swept by the leaf on the room side of the wall.
    ///
    /// The leaf runs from the hinge along the wall in the positive axis
    /// direction and swings into the room.
    #[must_use]
    pub fn footprint(&self) -> Rect {
        let s = self.swing_px();
        match self.wall {
            Wall::Top | Wall::Left => Rect::new(self.x, self.y, s, s),
            Wall::Bottom => Rect::new(self.x, self.y - s, s, s),
            Wall::Right => Rect::new(self.x - s, self.y, s, s),
        }
    }

    /// Keep-out zone: the swing footprint plus a clearance margin.
    #[must_use]
    pub fn zone(&self) -> Zone {
        self.footprint().expand(meters_to_pixels(DOOR_ZONE_MARGIN_M))
    }

    #[must_use]
    pub fn visual(&self) -> DoorVisual {
        DoorVisual {
            hinge: self.position(),
            radius: self.swing_px(),
            rotation: self.wall.angle(),
            sweep: 90.0,
            mirrored: self.swing_direction == SwingDirection::Inward,
        }
    }
}

/// Rendering parameters for a door's swing arc.
///
/// Purely visual; collision uses [`Door::zone`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorVisual {
    pub hinge: Point,
    /// Arc radius in pixels (the leaf width).
    pub radius: f64,
    /// Rotation of the arc in degrees, taken from the wall.
    pub rotation: f64,
    /// Arc sweep in degrees.
    pub sweep: f64,
    /// Mirror the arc horizontally (inward swing).
    pub mirrored: bool,
}
