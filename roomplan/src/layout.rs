//! Layout store: the room and everything placed in it.
//!
//! `Layout` owns the room, its doors, containers and other objects. Mutations
//! keep the composition invariants where they can: doors stay on their wall,
//! new or rotated items never land outside the room or on a blocked zone, and
//! items displaced by a shrinking room are moved to a free spot. What cannot
//! be kept is reported instead: items left stranded by a resize, and items a
//! newly placed door now covers. Drag previews live in the engine; only
//! committed state is stored here.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::ROTATION_STEP_DEG;
use crate::door::{Door, DoorSnap, SwingDirection, Wall};
use crate::error::PlanError;
use crate::geometry::{Point, Rect, Zone, effective_size, is_overlapping, normalize_degrees};
use crate::placed::{
    ContainerDto, ContainerInRoom, EntityId, EntityRef, Movable, OtherObjectInRoom, PlacedEntity, clamp_into_room,
};
use crate::room::{Corner, Room};
use crate::zones::{blocked_zones, find_free_position, is_blocked};

/// What is wrong with an entity's committed position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// The item's box leaves the room.
    OutsideRoom,
    /// The door's hinge is not on its wall.
    OffWall,
    /// The item's box overlaps a door, container or other-object zone.
    Overlaps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub entity: EntityRef,
    pub kind: ViolationKind,
}

/// The room and its contents, in stage pixels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub room: Room,
    pub doors: Vec<Door>,
    pub containers: Vec<ContainerInRoom>,
    pub other_objects: Vec<OtherObjectInRoom>,
}

impl Layout {
    #[must_use]
    pub fn new(room: Room) -> Self {
        Self { room, ..Default::default() }
    }

    // --- Lookup ---

    #[must_use]
    pub fn door(&self, id: EntityId) -> Option<&Door> {
        self.doors.iter().find(|d| d.id == id)
    }

    #[must_use]
    pub fn container(&self, id: EntityId) -> Option<&ContainerInRoom> {
        self.containers.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn other_object(&self, id: EntityId) -> Option<&OtherObjectInRoom> {
        self.other_objects.iter().find(|o| o.id == id)
    }

    #[must_use]
    pub fn entity(&self, entity: EntityRef) -> Option<PlacedEntity<'_>> {
        match entity {
            EntityRef::Door(id) => self.door(id).map(PlacedEntity::Door),
            EntityRef::Container(id) => self.container(id).map(PlacedEntity::Container),
            EntityRef::OtherObject(id) => self.other_object(id).map(PlacedEntity::OtherObject),
        }
    }

    /// Every placed entity: doors, then containers, then other objects.
    #[must_use]
    pub fn entities(&self) -> Vec<PlacedEntity<'_>> {
        self.doors
            .iter()
            .map(PlacedEntity::Door)
            .chain(self.containers.iter().map(PlacedEntity::Container))
            .chain(self.other_objects.iter().map(PlacedEntity::OtherObject))
            .collect()
    }

    fn door_mut(&mut self, id: EntityId) -> Option<&mut Door> {
        self.doors.iter_mut().find(|d| d.id == id)
    }

    fn item(&self, entity: EntityRef) -> Option<&dyn Movable> {
        match entity {
            EntityRef::Door(_) => None,
            EntityRef::Container(id) => self.container(id).map(|c| c as &dyn Movable),
            EntityRef::OtherObject(id) => self.other_object(id).map(|o| o as &dyn Movable),
        }
    }

    fn item_mut(&mut self, entity: EntityRef) -> Option<&mut dyn Movable> {
        match entity {
            EntityRef::Door(_) => None,
            EntityRef::Container(id) => {
                self.containers.iter_mut().find(|c| c.id == id).map(|c| c as &mut dyn Movable)
            }
            EntityRef::OtherObject(id) => {
                self.other_objects.iter_mut().find(|o| o.id == id).map(|o| o as &mut dyn Movable)
            }
        }
    }

    // --- Zones ---

    /// Door, other-object and container zones, excluding `exclude`.
    #[must_use]
    pub fn blocked_zones(&self, exclude: Option<EntityId>) -> Vec<Zone> {
        blocked_zones(&self.doors, &self.containers, &self.other_objects, exclude)
    }

    /// Whether `entity`'s box, centered at `center`, would overlap a zone.
    ///
    /// Doors are never blocked; they only snap.
    #[must_use]
    pub fn is_blocked_at(&self, entity: EntityRef, center: Point) -> bool {
        let Some(item) = self.item(entity) else {
            return false;
        };
        let (w, h) = item.effective_size();
        is_blocked(&Rect::centered(center, w, h), &self.blocked_zones(Some(entity.id())))
    }

    // --- Room ---

    /// Move the room to the requested origin (clamped) and carry its contents along.
    ///
    /// Returns the origin actually applied.
    pub fn move_room(&mut self, x: f64, y: f64) -> Point {
        let origin = self.room.clamp_move(x, y);
        let dx = origin.x - self.room.x;
        let dy = origin.y - self.room.y;
        self.room.x = origin.x;
        self.room.y = origin.y;
        self.translate_contents(dx, dy);
        origin
    }

    fn translate_contents(&mut self, dx: f64, dy: f64) {
        for d in &mut self.doors {
            d.x += dx;
            d.y += dy;
        }
        for c in &mut self.containers {
            c.x += dx;
            c.y += dy;
        }
        for o in &mut self.other_objects {
            o.x += dx;
            o.y += dy;
        }
    }

    /// Resize the room by dragging `corner` to `pos`, then refit the contents.
    ///
    /// Returns the items that could not be refitted (see [`Layout::refit`]).
    pub fn resize_room(&mut self, corner: Corner, pos: Point) -> Vec<EntityRef> {
        self.room = self.room.drag_corner(corner, pos);
        self.refit()
    }

    /// Put doors back on their walls and items back inside the room.
    ///
    /// Items are clamped first. An item that then overlaps a zone, or that
    /// still leaves the room, is moved to the first free position. Items with
    /// no free position are left where the clamp put them and returned.
    pub fn refit(&mut self) -> Vec<EntityRef> {
        let room = self.room.clone();
        for d in &mut self.doors {
            d.reproject(&room);
        }

        let items: Vec<EntityRef> = self
            .containers
            .iter()
            .map(|c| EntityRef::Container(c.id))
            .chain(self.other_objects.iter().map(|o| EntityRef::OtherObject(o.id)))
            .collect();
        for &entity in &items {
            if let Some(item) = self.item_mut(entity) {
                let pos = clamp_into_room(&room, item.effective_size(), item.center());
                item.set_center(pos);
            }
        }

        let mut stranded = Vec::new();
        for entity in items {
            let Some(item) = self.item(entity) else {
                continue;
            };
            let size = item.effective_size();
            let bbox = Rect::centered(item.center(), size.0, size.1);
            let zones = self.blocked_zones(Some(entity.id()));
            if room.rect().contains_rect(&bbox) && !is_blocked(&bbox, &zones) {
                continue;
            }
            match find_free_position(&room, size, &zones) {
                Some(pos) => {
                    debug!(?entity, x = pos.x, y = pos.y, "item displaced by room resize");
                    if let Some(item) = self.item_mut(entity) {
                        item.set_center(pos);
                    }
                }
                None => {
                    warn!(?entity, "no free position left after room resize");
                    stranded.push(entity);
                }
            }
        }
        stranded
    }

    // --- Add / remove ---

    /// Add a default door at the midpoint of `wall`.
    ///
    /// The door is added even if its zone covers items already placed; see
    /// [`Layout::covered_by`].
    pub fn add_door(&mut self, wall: Wall) -> EntityRef {
        let door = Door::on_wall(&self.room, wall);
        let entity = EntityRef::Door(door.id);
        let covered = self.covered_by(&door);
        if !covered.is_empty() {
            debug!(?entity, ?covered, "new door zone covers placed items");
        }
        self.doors.push(door);
        entity
    }

    /// Containers and other objects whose box overlaps `door`'s zone.
    #[must_use]
    pub fn covered_by(&self, door: &Door) -> Vec<EntityRef> {
        let zone = door.zone();
        self.containers
            .iter()
            .map(|c| (EntityRef::Container(c.id), c.bounding_box()))
            .chain(self.other_objects.iter().map(|o| (EntityRef::OtherObject(o.id), o.bounding_box())))
            .filter(|(_, bbox)| is_overlapping(bbox, &zone))
            .map(|(entity, _)| entity)
            .collect()
    }

    /// Add a container from the catalog at the first free position.
    ///
    /// # Errors
    ///
    /// Returns `NoFreePlacement` if no position in the room is free; nothing
    /// is added in that case.
    pub fn add_container(&mut self, container: ContainerDto) -> Result<EntityRef, PlanError> {
        let size = container.footprint_px();
        let pos = self.free_position(size)?;
        let placed = ContainerInRoom::new(container, pos);
        let entity = EntityRef::Container(placed.id);
        self.containers.push(placed);
        Ok(entity)
    }

    /// Add an other object of `width × height` pixels at the first free position.
    ///
    /// # Errors
    ///
    /// Returns `NoFreePlacement` if no position in the room is free.
    pub fn add_other_object(&mut self, name: &str, width: f64, height: f64) -> Result<EntityRef, PlanError> {
        let pos = self.free_position((width, height))?;
        let placed = OtherObjectInRoom::new(name, pos, width, height);
        let entity = EntityRef::OtherObject(placed.id);
        self.other_objects.push(placed);
        Ok(entity)
    }

    fn free_position(&self, (width, height): (f64, f64)) -> Result<Point, PlanError> {
        find_free_position(&self.room, (width, height), &self.blocked_zones(None)).ok_or_else(|| {
            warn!(width, height, "no free position for new item");
            PlanError::NoFreePlacement { width, height }
        })
    }

    /// Remove an entity.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if no such entity exists.
    pub fn remove(&mut self, entity: EntityRef) -> Result<(), PlanError> {
        let before = self.entity_count();
        match entity {
            EntityRef::Door(id) => self.doors.retain(|d| d.id != id),
            EntityRef::Container(id) => self.containers.retain(|c| c.id != id),
            EntityRef::OtherObject(id) => self.other_objects.retain(|o| o.id != id),
        }
        if self.entity_count() == before {
            return Err(PlanError::EntityNotFound(entity));
        }
        Ok(())
    }

    fn entity_count(&self) -> usize {
        self.doors.len() + self.containers.len() + self.other_objects.len()
    }

    // --- Edit ---

    /// Rotate a container or other object a quarter turn clockwise.
    ///
    /// The rotated box is clamped back into the room. Returns the new rotation.
    ///
    /// # Errors
    ///
    /// `NotRotatable` for doors, `EntityNotFound` for unknown ids, and
    /// `Blocked` if the rotated box would not fit in the room or would overlap
    /// a zone (nothing changes).
    pub fn rotate(&mut self, entity: EntityRef) -> Result<f64, PlanError> {
        if matches!(entity, EntityRef::Door(_)) {
            return Err(PlanError::NotRotatable(entity));
        }
        let item = self.item(entity).ok_or(PlanError::EntityNotFound(entity))?;
        let rotation = normalize_degrees(item.rotation() + ROTATION_STEP_DEG);
        let (w, h) = item.size();
        let size = effective_size(w, h, rotation);
        if size.0 > self.room.width || size.1 > self.room.height {
            debug!(?entity, rotation, "rotation refused: does not fit the room");
            return Err(PlanError::Blocked(entity));
        }
        let center = clamp_into_room(&self.room, size, item.center());

        let zones = self.blocked_zones(Some(entity.id()));
        if is_blocked(&Rect::centered(center, size.0, size.1), &zones) {
            debug!(?entity, rotation, "rotation refused: overlaps zone");
            return Err(PlanError::Blocked(entity));
        }

        let item = self.item_mut(entity).ok_or(PlanError::EntityNotFound(entity))?;
        item.set_rotation(rotation);
        item.set_center(center);
        Ok(rotation)
    }

    /// Flip a door between inward and outward swing. Returns the new direction.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the door does not exist.
    pub fn toggle_swing(&mut self, id: EntityId) -> Result<SwingDirection, PlanError> {
        let door = self.door_mut(id).ok_or(PlanError::EntityNotFound(EntityRef::Door(id)))?;
        door.swing_direction = match door.swing_direction {
            SwingDirection::Inward => SwingDirection::Outward,
            SwingDirection::Outward => SwingDirection::Inward,
        };
        Ok(door.swing_direction)
    }

    /// Commit a door's new hinge position and wall.
    ///
    /// Returns the items the door's zone now covers. Doors always snap, so
    /// the move is committed either way.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the door does not exist.
    pub fn place_door(&mut self, id: EntityId, position: Point, wall: Wall) -> Result<Vec<EntityRef>, PlanError> {
        let door = self.door_mut(id).ok_or(PlanError::EntityNotFound(EntityRef::Door(id)))?;
        if door.wall != wall {
            debug!(%id, from = ?door.wall, to = ?wall, "door moved to another wall");
        }
        door.apply_snap(DoorSnap { position, wall });
        let door = door.clone();
        let covered = self.covered_by(&door);
        if !covered.is_empty() {
            debug!(%id, ?covered, "door zone covers placed items");
        }
        Ok(covered)
    }

    /// Commit an item's new center without any validation.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` for unknown ids and for doors (use
    /// [`Layout::place_door`]).
    pub fn place_item(&mut self, entity: EntityRef, center: Point) -> Result<(), PlanError> {
        let item = self.item_mut(entity).ok_or(PlanError::EntityNotFound(entity))?;
        item.set_center(center);
        Ok(())
    }

    // --- Validation ---

    /// Every entity whose committed position breaks a layout invariant.
    #[must_use]
    pub fn violations(&self) -> Vec<Violation> {
        let room = self.room.rect();
        let mut out = Vec::new();
        for door in &self.doors {
            if !door.is_on_wall(&self.room) {
                out.push(Violation { entity: EntityRef::Door(door.id), kind: ViolationKind::OffWall });
            }
        }
        let items = self
            .containers
            .iter()
            .map(|c| (EntityRef::Container(c.id), c.bounding_box()))
            .chain(self.other_objects.iter().map(|o| (EntityRef::OtherObject(o.id), o.bounding_box())));
        for (entity, bbox) in items {
            if !room.contains_rect(&bbox) {
                out.push(Violation { entity, kind: ViolationKind::OutsideRoom });
            }
            if is_blocked(&bbox, &self.blocked_zones(Some(entity.id()))) {
                out.push(Violation { entity, kind: ViolationKind::Overlaps });
            }
        }
        out
    }
}
