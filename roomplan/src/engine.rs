use tracing::{debug, info};

use crate::door::Wall;
use crate::error::PlanError;
use crate::geometry::{Point, Zone};
use crate::input::{Gesture, Selection};
use crate::layout::Layout;
use crate::placed::{ContainerDto, EntityId, EntityRef};
use crate::room::{Corner, Room};
use crate::snapshot::{self, SavePayload};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RoomChanged(Room),
    /// Items a room resize could neither keep nor move to a free spot.
    ItemsStranded(Vec<EntityRef>),
    /// `over_zone` is set when the door's zone would cover a placed item.
    DoorPreview { id: EntityId, position: Point, wall: Wall, over_zone: bool },
    DoorPlaced { id: EntityId, position: Point, wall: Wall, over_zone: bool },
    ItemPreview { entity: EntityRef, position: Point, over_zone: bool },
    ItemPlaced { entity: EntityRef, position: Point },
    ItemSnappedBack { entity: EntityRef, position: Point },
    EntityAdded(EntityRef),
    EntityRemoved(EntityRef),
    SelectionChanged(Selection),
    RenderNeeded,
}

/// Editor session state for one room.
///
/// Owns the committed layout, the current selection and the drag in
/// progress. Pointer positions are stage pixels; converting from screen space
/// is the host's job.
#[derive(Debug, Default)]
pub struct Engine {
    pub layout: Layout,
    selection: Selection,
    gesture: Gesture,
}

impl Engine {
    #[must_use]
    pub fn new(layout: Layout) -> Self {
        Self { layout, selection: Selection::None, gesture: Gesture::Idle }
    }

    // --- Data inputs ---

    /// Replace the layout with a persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns a snapshot error if `raw` is not a JSON object.
    pub fn load_snapshot(&mut self, raw: &str) -> Result<(), PlanError> {
        self.layout = snapshot::load(raw)?;
        self.selection = Selection::None;
        self.gesture = Gesture::Idle;
        Ok(())
    }

    /// Real-world payload for the persistence API.
    #[must_use]
    pub fn save_payload(&self) -> SavePayload {
        snapshot::save_payload(&self.layout)
    }

    // --- Selection ---

    /// Select `entity`, replacing any previous selection. Unknown entities clear it.
    pub fn select(&mut self, entity: Option<EntityRef>) -> Vec<Action> {
        let next = match entity {
            Some(e) if self.layout.entity(e).is_some() => Selection::from(e),
            _ => Selection::None,
        };
        if next == self.selection {
            return Vec::new();
        }
        self.selection = next;
        vec![Action::SelectionChanged(next), Action::RenderNeeded]
    }

    // --- Gestures ---

    /// Start dragging a room corner handle.
    pub fn begin_corner_drag(&mut self, corner: Corner) {
        self.gesture = Gesture::ResizingRoom { corner };
    }

    /// Start dragging the room body with the pointer at `pointer`.
    pub fn begin_room_move(&mut self, pointer: Point) {
        let grab_offset = Point::new(pointer.x - self.layout.room.x, pointer.y - self.layout.room.y);
        self.gesture = Gesture::MovingRoom { grab_offset };
    }

    /// Start dragging a door, container or other object. Selects it.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the entity is not in the layout.
    pub fn begin_drag(&mut self, entity: EntityRef) -> Result<Vec<Action>, PlanError> {
        let placed = self.layout.entity(entity).ok_or(PlanError::EntityNotFound(entity))?;
        let position = placed.position();
        self.gesture = match entity {
            EntityRef::Door(id) => {
                let wall = self.layout.door(id).map_or(Wall::default(), |d| d.wall);
                Gesture::DraggingDoor { id, preview: position, preview_wall: wall }
            }
            EntityRef::Container(_) | EntityRef::OtherObject(_) => {
                Gesture::DraggingItem { entity, last_valid: position, preview: position, over_zone: false }
            }
        };
        Ok(self.select(Some(entity)))
    }

    /// Handle a pointer move during a drag.
    ///
    /// Room gestures apply immediately. Door and item drags only update the
    /// preview; nothing is committed until [`Engine::pointer_up`].
    pub fn pointer_move(&mut self, pos: Point) -> Vec<Action> {
        match self.gesture.clone() {
            Gesture::Idle => Vec::new(),
            Gesture::ResizingRoom { corner } => {
                let stranded = self.layout.resize_room(corner, pos);
                let mut actions = vec![Action::RoomChanged(self.layout.room.clone())];
                if !stranded.is_empty() {
                    actions.push(Action::ItemsStranded(stranded));
                }
                actions.push(Action::RenderNeeded);
                actions
            }
            Gesture::MovingRoom { grab_offset } => {
                self.layout.move_room(pos.x - grab_offset.x, pos.y - grab_offset.y);
                vec![Action::RoomChanged(self.layout.room.clone()), Action::RenderNeeded]
            }
            Gesture::DraggingDoor { id, .. } => {
                let Some(door) = self.layout.door(id) else {
                    self.gesture = Gesture::Idle;
                    return Vec::new();
                };
                let snap = door.snap(&self.layout.room, pos);
                let mut moved = door.clone();
                moved.apply_snap(snap);
                let over_zone = !self.layout.covered_by(&moved).is_empty();
                self.gesture = Gesture::DraggingDoor { id, preview: snap.position, preview_wall: snap.wall };
                vec![
                    Action::DoorPreview { id, position: snap.position, wall: snap.wall, over_zone },
                    Action::RenderNeeded,
                ]
            }
            Gesture::DraggingItem { entity, last_valid, .. } => {
                let zones = self.layout.blocked_zones(Some(entity.id()));
                let Some(placed) = self.layout.entity(entity) else {
                    self.gesture = Gesture::Idle;
                    return Vec::new();
                };
                let bound = placed.constrain(&self.layout.room, pos, &zones);
                self.gesture =
                    Gesture::DraggingItem { entity, last_valid, preview: bound.position, over_zone: bound.over_zone };
                vec![
                    Action::ItemPreview { entity, position: bound.position, over_zone: bound.over_zone },
                    Action::RenderNeeded,
                ]
            }
        }
    }

    /// Finish the drag at `pos`.
    ///
    /// Doors commit the snapped position and wall. Items commit the clamped
    /// position if it is free, otherwise snap back to where the drag started.
    pub fn pointer_up(&mut self, pos: Point) -> Vec<Action> {
        let mut actions = self.pointer_move(pos);
        actions.retain(|a| !matches!(a, Action::DoorPreview { .. } | Action::ItemPreview { .. } | Action::RenderNeeded));
        actions.extend(self.finish());
        actions
    }

    /// Abort the drag. Treated as a release at the last previewed position.
    pub fn cancel(&mut self) -> Vec<Action> {
        self.finish()
    }

    fn finish(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => Vec::new(),
            Gesture::ResizingRoom { .. } | Gesture::MovingRoom { .. } => vec![Action::RenderNeeded],
            Gesture::DraggingDoor { id, preview, preview_wall } => {
                match self.layout.place_door(id, preview, preview_wall) {
                    Ok(covered) => vec![
                        Action::DoorPlaced { id, position: preview, wall: preview_wall, over_zone: !covered.is_empty() },
                        Action::RenderNeeded,
                    ],
                    Err(e) => {
                        debug!(error = %e, "door vanished during drag");
                        Vec::new()
                    }
                }
            }
            Gesture::DraggingItem { entity, last_valid, preview, .. } => {
                let (position, action) = if self.layout.is_blocked_at(entity, preview) {
                    info!(?entity, "drop blocked; snapping back");
                    (last_valid, Action::ItemSnappedBack { entity, position: last_valid })
                } else {
                    (preview, Action::ItemPlaced { entity, position: preview })
                };
                match self.layout.place_item(entity, position) {
                    Ok(()) => vec![action, Action::RenderNeeded],
                    Err(e) => {
                        debug!(error = %e, "item vanished during drag");
                        Vec::new()
                    }
                }
            }
        }
    }

    // --- Edits ---

    /// Add a door at the midpoint of `wall` and select it.
    pub fn add_door(&mut self, wall: Wall) -> Vec<Action> {
        let entity = self.layout.add_door(wall);
        self.added(entity)
    }

    /// Add a catalog container at the first free position and select it.
    ///
    /// # Errors
    ///
    /// Returns `NoFreePlacement` if the room has no room left for it.
    pub fn add_container(&mut self, container: ContainerDto) -> Result<Vec<Action>, PlanError> {
        let entity = self.layout.add_container(container)?;
        Ok(self.added(entity))
    }

    /// Add an other object at the first free position and select it.
    ///
    /// # Errors
    ///
    /// Returns `NoFreePlacement` if the room has no room left for it.
    pub fn add_other_object(&mut self, name: &str, width: f64, height: f64) -> Result<Vec<Action>, PlanError> {
        let entity = self.layout.add_other_object(name, width, height)?;
        Ok(self.added(entity))
    }

    fn added(&mut self, entity: EntityRef) -> Vec<Action> {
        let mut actions = vec![Action::EntityAdded(entity)];
        actions.extend(self.select(Some(entity)));
        if !actions.contains(&Action::RenderNeeded) {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Remove an entity, clearing the selection and any drag that refers to it.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if it does not exist.
    pub fn remove(&mut self, entity: EntityRef) -> Result<Vec<Action>, PlanError> {
        self.layout.remove(entity)?;
        if self.gesture.dragged() == Some(entity) {
            self.gesture = Gesture::Idle;
        }
        let mut actions = vec![Action::EntityRemoved(entity)];
        if self.selection.is_selected(entity) {
            self.selection = Selection::None;
            actions.push(Action::SelectionChanged(Selection::None));
        }
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Rotate a container or other object a quarter turn.
    ///
    /// # Errors
    ///
    /// See [`Layout::rotate`].
    pub fn rotate(&mut self, entity: EntityRef) -> Result<Vec<Action>, PlanError> {
        self.layout.rotate(entity)?;
        Ok(vec![Action::RenderNeeded])
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[must_use]
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Whether the item being dragged currently hovers over a blocked zone.
    #[must_use]
    pub fn over_zone(&self) -> bool {
        matches!(self.gesture, Gesture::DraggingItem { over_zone: true, .. })
    }

    /// Zones to highlight, excluding the entity being dragged (or, when idle,
    /// the selected one).
    #[must_use]
    pub fn blocked_zones(&self) -> Vec<Zone> {
        let current = self.gesture.dragged().or_else(|| self.selection.entity());
        self.layout.blocked_zones(current.map(EntityRef::id))
    }
}
