//! Zone aggregation and free-position search.
//!
//! Zones are derived fresh on every call: one per door (its swing square plus
//! clearance), one per other object (its box plus a 10 cm buffer) and one per
//! container (its bare box). The entity currently being placed is excluded so
//! it never collides with itself. With single-digit to low-tens occupants per
//! room, a linear scan is all this needs.

#[cfg(test)]
#[path = "zones_test.rs"]
mod zones_test;

use crate::consts::{OTHER_OBJECT_BUFFER_M, PLACEMENT_GRID_STEP};
use crate::door::Door;
use crate::geometry::{Point, Rect, Zone, is_overlapping, meters_to_pixels};
use crate::placed::{ContainerInRoom, EntityId, Movable, OtherObjectInRoom};
use crate::room::Room;

/// Keep-out zones of every door.
#[must_use]
pub fn door_zones(doors: &[Door]) -> Vec<Zone> {
    doors.iter().map(Door::zone).collect()
}

/// Buffered boxes of every other object except `exclude`.
#[must_use]
pub fn other_object_zones(objects: &[OtherObjectInRoom], exclude: Option<EntityId>) -> Vec<Zone> {
    let buffer = meters_to_pixels(OTHER_OBJECT_BUFFER_M);
    objects
        .iter()
        .filter(|o| Some(o.id) != exclude)
        .map(|o| o.bounding_box().expand(buffer))
        .collect()
}

/// Unbuffered boxes of every container except `exclude`.
#[must_use]
pub fn container_zones(containers: &[ContainerInRoom], exclude: Option<EntityId>) -> Vec<Zone> {
    containers
        .iter()
        .filter(|c| Some(c.id) != exclude)
        .map(Movable::bounding_box)
        .collect()
}

/// Union of door, other-object and container zones, minus `exclude`.
///
/// Degenerate zones (zero area or non-finite) are dropped; they can never
/// produce an overlap and only come from half-loaded snapshots.
#[must_use]
pub fn blocked_zones(
    doors: &[Door],
    containers: &[ContainerInRoom],
    objects: &[OtherObjectInRoom],
    exclude: Option<EntityId>,
) -> Vec<Zone> {
    door_zones(doors)
        .into_iter()
        .chain(other_object_zones(objects, exclude))
        .chain(container_zones(containers, exclude))
        .filter(is_meaningful)
        .collect()
}

fn is_meaningful(zone: &Zone) -> bool {
    zone.width > 0.0
        && zone.height > 0.0
        && zone.x.is_finite()
        && zone.y.is_finite()
        && zone.width.is_finite()
        && zone.height.is_finite()
}

/// Whether `candidate` overlaps any zone.
#[must_use]
pub fn is_blocked(candidate: &Rect, zones: &[Zone]) -> bool {
    zones.iter().any(|z| is_overlapping(candidate, z))
}

/// Find a center for a new `width × height` box inside `room`.
///
/// The room center is tried first. If it is blocked, the interior is scanned
/// row by row in [`PLACEMENT_GRID_STEP`] increments starting at the top-left,
/// and the first free position wins. Returns `None` if the box does not fit
/// anywhere.
#[must_use]
pub fn find_free_position(room: &Room, (width, height): (f64, f64), zones: &[Zone]) -> Option<Point> {
    if width > room.width || height > room.height {
        return None;
    }

    let center = room.center();
    if !is_blocked(&Rect::centered(center, width, height), zones) {
        return Some(center);
    }

    let start = Point::new(room.x + width / 2.0, room.y + height / 2.0);
    let cols = steps(room.width - width);
    let rows = steps(room.height - height);

    for row in 0..=rows {
        #[allow(clippy::cast_precision_loss)]
        let y = start.y + row as f64 * PLACEMENT_GRID_STEP;
        for col in 0..=cols {
            #[allow(clippy::cast_precision_loss)]
            let x = start.x + col as f64 * PLACEMENT_GRID_STEP;
            let pos = Point::new(x, y);
            if !is_blocked(&Rect::centered(pos, width, height), zones) {
                return Some(pos);
            }
        }
    }
    None
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn steps(span: f64) -> u32 {
    (span / PLACEMENT_GRID_STEP).floor().max(0.0) as u32
}
