//! Input model: selection and the drag gesture state machine.
//!
//! `Selection` holds at most one selected door, container or other object;
//! selecting anything replaces the previous selection. `Gesture` is the
//! active drag being tracked between pointer-down and pointer-up, carrying
//! what is needed to preview each pointer move and to commit or revert on
//! release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::door::Wall;
use crate::geometry::Point;
use crate::placed::{EntityId, EntityRef};
use crate::room::Corner;

/// The single selected entity, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Door(EntityId),
    Container(EntityId),
    OtherObject(EntityId),
}

impl Selection {
    #[must_use]
    pub fn entity(self) -> Option<EntityRef> {
        match self {
            Self::None => None,
            Self::Door(id) => Some(EntityRef::Door(id)),
            Self::Container(id) => Some(EntityRef::Container(id)),
            Self::OtherObject(id) => Some(EntityRef::OtherObject(id)),
        }
    }

    #[must_use]
    pub fn is_selected(self, entity: EntityRef) -> bool {
        self.entity() == Some(entity)
    }
}

impl From<EntityRef> for Selection {
    fn from(entity: EntityRef) -> Self {
        match entity {
            EntityRef::Door(id) => Self::Door(id),
            EntityRef::Container(id) => Self::Container(id),
            EntityRef::OtherObject(id) => Self::OtherObject(id),
        }
    }
}

/// The drag currently in progress.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    /// No drag in progress.
    #[default]
    Idle,
    /// A room corner handle is being dragged.
    ResizingRoom { corner: Corner },
    /// The room body is being dragged.
    MovingRoom {
        /// Pointer position minus room origin at pointer-down.
        grab_offset: Point,
    },
    /// A door is being dragged along the walls.
    DraggingDoor {
        id: EntityId,
        /// Snapped hinge position from the latest pointer move.
        preview: Point,
        /// Wall from the latest pointer move; committed on release.
        preview_wall: Wall,
    },
    /// A container or other object is being dragged.
    DraggingItem {
        entity: EntityRef,
        /// Committed center before the drag; the snap-back target.
        last_valid: Point,
        /// Clamped center from the latest pointer move.
        preview: Point,
        /// Whether the preview overlaps a blocked zone.
        over_zone: bool,
    },
}

impl Gesture {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The entity being dragged, if the gesture drags one.
    #[must_use]
    pub fn dragged(&self) -> Option<EntityRef> {
        match self {
            Self::DraggingDoor { id, .. } => Some(EntityRef::Door(*id)),
            Self::DraggingItem { entity, .. } => Some(*entity),
            Self::Idle | Self::ResizingRoom { .. } | Self::MovingRoom { .. } => None,
        }
    }
}
