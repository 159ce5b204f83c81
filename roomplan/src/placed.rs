//! Placed entities: containers and other objects, plus the tagged
//! [`PlacedEntity`] view over everything that lives in a room.
//!
//! Containers and other objects are positioned by their center. Their
//! collision footprint is the rotation-adjusted bounding box; a quarter turn
//! swaps width and height.

#[cfg(test)]
#[path = "placed_test.rs"]
mod placed_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::door::{Door, Wall};
use crate::geometry::{Point, Rect, Zone, clamp, effective_size, is_overlapping, mm_to_pixels};
use crate::room::Room;

/// Unique identifier for a door, container or other object.
pub type EntityId = Uuid;

/// Catalog entry a placed container refers to. Dimensions are millimeters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerDto {
    pub id: i64,
    pub name: String,
    pub width: Option<f64>,
    pub depth: Option<f64>,
    pub height: Option<f64>,
    /// Volume in liters.
    pub size: Option<f64>,
}

impl ContainerDto {
    /// Footprint in stage pixels (width × depth).
    #[must_use]
    pub fn footprint_px(&self) -> (f64, f64) {
        (mm_to_pixels(self.width), mm_to_pixels(self.depth))
    }
}

/// Shared geometry of center-anchored, rotatable room items.
pub trait Movable {
    fn center(&self) -> Point;

    /// Unrotated width and height.
    fn size(&self) -> (f64, f64);

    fn rotation(&self) -> f64;

    fn set_center(&mut self, center: Point);

    fn set_rotation(&mut self, rotation: f64);

    #[must_use]
    fn effective_size(&self) -> (f64, f64) {
        let (w, h) = self.size();
        effective_size(w, h, self.rotation())
    }

    #[must_use]
    fn bounding_box(&self) -> Rect {
        let (w, h) = self.effective_size();
        Rect::centered(self.center(), w, h)
    }
}

/// A catalog container placed in the room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerInRoom {
    pub id: EntityId,
    pub container: ContainerDto,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub lock_i_lock: bool,
}

impl ContainerInRoom {
    /// Place `container` unrotated at `center`, sized from its catalog dimensions.
    #[must_use]
    pub fn new(container: ContainerDto, center: Point) -> Self {
        let (width, height) = container.footprint_px();
        Self {
            id: EntityId::new_v4(),
            container,
            x: center.x,
            y: center.y,
            width,
            height,
            rotation: 0.0,
            lock_i_lock: false,
        }
    }
}

impl Movable for ContainerInRoom {
    fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_center(&mut self, center: Point) {
        self.x = center.x;
        self.y = center.y;
    }

    fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }
}

/// A free-form obstacle (pillar, sink, bench...) without a catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherObjectInRoom {
    pub id: EntityId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

impl OtherObjectInRoom {
    #[must_use]
    pub fn new(name: impl Into<String>, center: Point, width: f64, height: f64) -> Self {
        Self { id: EntityId::new_v4(), name: name.into(), x: center.x, y: center.y, width, height, rotation: 0.0 }
    }
}

impl Movable for OtherObjectInRoom {
    fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_center(&mut self, center: Point) {
        self.x = center.x;
        self.y = center.y;
    }

    fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }
}

/// Tag + id of an entity, without borrowing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
    Door(EntityId),
    Container(EntityId),
    OtherObject(EntityId),
}

impl EntityRef {
    #[must_use]
    pub fn id(self) -> EntityId {
        match self {
            Self::Door(id) | Self::Container(id) | Self::OtherObject(id) => id,
        }
    }
}

/// Borrowed view over anything placed in a room.
#[derive(Debug, Clone, Copy)]
pub enum PlacedEntity<'a> {
    Door(&'a Door),
    Container(&'a ContainerInRoom),
    OtherObject(&'a OtherObjectInRoom),
}

/// Result of constraining a dragged entity to the room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constrained {
    pub position: Point,
    /// Wall the door would land on; `None` for containers and objects.
    pub wall: Option<Wall>,
    /// The candidate footprint overlaps a blocked zone.
    pub over_zone: bool,
}

impl PlacedEntity<'_> {
    #[must_use]
    pub fn entity_ref(&self) -> EntityRef {
        match self {
            Self::Door(d) => EntityRef::Door(d.id),
            Self::Container(c) => EntityRef::Container(c.id),
            Self::OtherObject(o) => EntityRef::OtherObject(o.id),
        }
    }

    #[must_use]
    pub fn id(&self) -> EntityId {
        self.entity_ref().id()
    }

    /// Hinge point for doors, center for containers and objects.
    #[must_use]
    pub fn position(&self) -> Point {
        match self {
            Self::Door(d) => d.position(),
            Self::Container(c) => c.center(),
            Self::OtherObject(o) => o.center(),
        }
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        match self {
            Self::Door(d) => d.rotation,
            Self::Container(c) => c.rotation,
            Self::OtherObject(o) => o.rotation,
        }
    }

    /// Rotation-adjusted footprint. For doors this is the swing square.
    #[must_use]
    pub fn effective_box(&self) -> Rect {
        match self {
            Self::Door(d) => d.footprint(),
            Self::Container(c) => c.bounding_box(),
            Self::OtherObject(o) => o.bounding_box(),
        }
    }

    /// Apply the kind-specific drag constraint for a pointer at `pos`.
    ///
    /// Doors snap to the nearest allowed wall; containers and objects are
    /// clamped inside the room and checked against `zones`.
    #[must_use]
    pub fn constrain(&self, room: &Room, pos: Point, zones: &[Zone]) -> Constrained {
        match self {
            Self::Door(d) => {
                let snap = d.snap(room, pos);
                Constrained { position: snap.position, wall: Some(snap.wall), over_zone: false }
            }
            Self::Container(c) => drag_bound(room, c.effective_size(), pos, zones),
            Self::OtherObject(o) => drag_bound(room, o.effective_size(), pos, zones),
        }
    }
}

/// Clamp a center so a `width × height` box stays inside the room.
///
/// A box wider (or taller) than the room is centered on that axis.
#[must_use]
pub fn clamp_into_room(room: &Room, (width, height): (f64, f64), pos: Point) -> Point {
    Point::new(
        clamp_axis(pos.x, room.x + width / 2.0, room.right() - width / 2.0),
        clamp_axis(pos.y, room.y + height / 2.0, room.bottom() - height / 2.0),
    )
}

fn clamp_axis(value: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi { f64::midpoint(lo, hi) } else { clamp(value, lo, hi) }
}

/// Drag-bound function for containers and other objects.
///
/// The center is clamped into the room; `over_zone` reports whether the
/// clamped box overlaps any of `zones`. Hovering over a zone never blocks the
/// drag itself.
#[must_use]
pub fn drag_bound(room: &Room, size: (f64, f64), pos: Point, zones: &[Zone]) -> Constrained {
    let position = clamp_into_room(room, size, pos);
    let candidate = Rect::centered(position, size.0, size.1);
    let over_zone = zones.iter().any(|z| is_overlapping(&candidate, z));
    Constrained { position, wall: None, over_zone }
}
